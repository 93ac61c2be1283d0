//! schema.org structured data.
//!
//! Produces `schema-org.json`, a JSON-LD `Organization` describing the
//! business for search engines:
//!
//! ```json
//! {
//!   "@context": "https://schema.org",
//!   "@type": "Organization",
//!   "name": "Right School of Motoring",
//!   "url": "https://example.co.uk",
//!   "email": "bookings@example.co.uk",
//!   "telephone": "+447832185711",
//!   "address": {
//!     "@type": "PostalAddress",
//!     "streetAddress": "1 Road",
//!     "addressLocality": "Town",
//!     "postalCode": "AB1 2CD",
//!     "addressCountry": "GB"
//!   },
//!   "contactPoint": [
//!     {
//!       "@type": "ContactPoint",
//!       "telephone": "+447832185711",
//!       "contactType": "customer service",
//!       "areaServed": "Town and surrounding areas",
//!       "availableLanguage": ["English"]
//!     }
//!   ]
//! }
//! ```
//!
//! The business address is stored as three newline-separated lines
//! (street, locality, postcode). Missing lines are left out of the output.

use crate::config::LocaleConfig;
use crate::site::{SiteDocument, SiteError};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Output file name inside the public directory.
pub const SCHEMA_FILENAME: &str = "schema-org.json";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub address_country: String,
}

impl PostalAddress {
    /// Split a `street\nlocality\npostcode` block.
    pub fn parse(address: &str, country: &str) -> Self {
        let mut lines = address
            .split('\n')
            .map(|line| line.trim().to_string());
        Self {
            kind: "PostalAddress",
            street_address: lines.next(),
            address_locality: lines.next(),
            postal_code: lines.next(),
            address_country: country.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPoint {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub telephone: String,
    pub contact_type: String,
    pub area_served: Value,
    pub available_language: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub url: String,
    pub email: String,
    pub telephone: String,
    pub address: PostalAddress,
    pub contact_point: Vec<ContactPoint>,
}

impl Organization {
    pub fn from_site(document: &SiteDocument, locale: &LocaleConfig) -> Result<Self, SiteError> {
        let business = document.business()?;
        let site = document.site_info()?;
        let telephone = international_phone(&business.phone, &locale.country_code);
        Ok(Self {
            context: "https://schema.org",
            kind: "Organization",
            name: site.name,
            url: site.url,
            email: business.email,
            telephone: telephone.clone(),
            address: PostalAddress::parse(&business.address, &locale.address_country),
            contact_point: vec![ContactPoint {
                kind: "ContactPoint",
                telephone,
                contact_type: "customer service".to_string(),
                area_served: business.service_area,
                available_language: locale.languages.clone(),
            }],
        })
    }

    pub fn to_json_pretty(&self) -> Result<String, SiteError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Normalise a national number to `+<country><number>`.
///
/// Non-digits are dropped and a single leading trunk `0` removed:
/// `"07832 185711"` with country `44` becomes `"+447832185711"`.
pub fn international_phone(phone: &str, country_code: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    let national = digits.strip_prefix('0').unwrap_or(&digits);
    format!("+{country_code}{national}")
}

/// Write the organization to `<public_dir>/schema-org.json`.
pub fn write_schema(organization: &Organization, public_dir: &Path) -> Result<PathBuf, SiteError> {
    fs::create_dir_all(public_dir)?;
    let path = public_dir.join(SCHEMA_FILENAME);
    fs::write(&path, organization.to_json_pretty()?)?;
    Ok(path)
}
