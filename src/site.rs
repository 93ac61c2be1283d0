//! The site config store (`siteConfig.json`).
//!
//! One JSON document holds the site text, business contact details and image
//! lists. Page templates read it through the site generator; the commands in
//! this crate read it to derive build artifacts, and the image-of-the-day
//! rotation writes it back.
//!
//! ## Fields in use
//!
//! ```text
//! common.business.address        "1 Road\nTown\nAB1 2CD"
//! common.business.phone          "07832185711"
//! common.business.email
//! common.business.serviceArea
//! common.site.name
//! common.site.url
//! sections.hero.heroImages       [{ "src": "...", "class": "..." }, ...]
//! sections.hero.imageOfTheDay    one entry copied from heroImages
//! sections.gallery.images        optional [{ "src", "alt", "caption" }]
//! seo.bingSiteVerification
//! ```
//!
//! ## Lifecycle
//!
//! The document is only ever loaded whole, changed in one field, and written
//! whole. [`SiteDocument`] keeps the raw `serde_json::Value` so that unknown
//! keys and key order survive a round trip; typed views are derived on demand.
//! Writes go through [`write_atomic`] so a crash mid-write leaves the previous
//! file in place.

use crate::hero::HeroImage;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No {} found in siteConfig.json", .0.label)]
    MissingField(Field),
    #[error("No hero images provided")]
    NoHeroImages,
    #[error("Invalid {}: {reason}", .field.path())]
    Invalid { field: Field, reason: String },
}

/// A config field: its JSON pointer plus a human label for error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub pointer: &'static str,
    pub label: &'static str,
}

impl Field {
    /// Dotted path as written in docs, e.g. `seo.bingSiteVerification`.
    pub fn path(&self) -> String {
        self.pointer.trim_start_matches('/').replace('/', ".")
    }
}

/// Every field the build commands read or write.
pub mod fields {
    use super::Field;

    pub const BING_VERIFICATION: Field = Field {
        pointer: "/seo/bingSiteVerification",
        label: "Bing site verification string",
    };
    pub const BUSINESS_ADDRESS: Field = Field {
        pointer: "/common/business/address",
        label: "business address",
    };
    pub const BUSINESS_PHONE: Field = Field {
        pointer: "/common/business/phone",
        label: "business phone",
    };
    pub const BUSINESS_EMAIL: Field = Field {
        pointer: "/common/business/email",
        label: "business email",
    };
    pub const BUSINESS_SERVICE_AREA: Field = Field {
        pointer: "/common/business/serviceArea",
        label: "business service area",
    };
    pub const SITE_NAME: Field = Field {
        pointer: "/common/site/name",
        label: "site name",
    };
    pub const SITE_URL: Field = Field {
        pointer: "/common/site/url",
        label: "site url",
    };
    pub const HERO: Field = Field {
        pointer: "/sections/hero",
        label: "hero section",
    };
    pub const HERO_IMAGES: Field = Field {
        pointer: "/sections/hero/heroImages",
        label: "hero images",
    };
    pub const IMAGE_OF_THE_DAY: Field = Field {
        pointer: "/sections/hero/imageOfTheDay",
        label: "image of the day",
    };
    pub const GALLERY_IMAGES: Field = Field {
        pointer: "/sections/gallery/images",
        label: "gallery images",
    };
}

/// Business contact details from `common.business`.
#[derive(Debug, Clone, PartialEq)]
pub struct Business {
    /// Newline-separated: street, locality, postcode.
    pub address: String,
    pub phone: String,
    pub email: String,
    /// Passed through untouched; may be a string or a list of places.
    pub service_area: Value,
}

/// Site identity from `common.site`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteInfo {
    pub name: String,
    pub url: String,
}

/// An entry of `sections.gallery.images`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub caption: String,
}

/// The whole config document.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteDocument {
    root: Value,
}

impl SiteDocument {
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    pub fn parse(json: &str) -> Result<Self, SiteError> {
        Ok(Self {
            root: serde_json::from_str(json)?,
        })
    }

    /// Serialize with two-space indentation, no trailing newline.
    pub fn to_json_pretty(&self) -> Result<String, SiteError> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }

    pub fn lookup(&self, field: Field) -> Option<&Value> {
        self.root.pointer(field.pointer)
    }

    /// A string field that must be present and non-empty.
    pub fn require_str(&self, field: Field) -> Result<&str, SiteError> {
        match self.lookup(field).and_then(Value::as_str) {
            Some(s) if !s.is_empty() => Ok(s),
            _ => Err(SiteError::MissingField(field)),
        }
    }

    pub fn bing_verification(&self) -> Result<&str, SiteError> {
        self.require_str(fields::BING_VERIFICATION)
    }

    pub fn business(&self) -> Result<Business, SiteError> {
        let service_area = self
            .lookup(fields::BUSINESS_SERVICE_AREA)
            .filter(|v| !v.is_null())
            .cloned()
            .ok_or(SiteError::MissingField(fields::BUSINESS_SERVICE_AREA))?;
        Ok(Business {
            address: self.require_str(fields::BUSINESS_ADDRESS)?.to_string(),
            phone: self.require_str(fields::BUSINESS_PHONE)?.to_string(),
            email: self.require_str(fields::BUSINESS_EMAIL)?.to_string(),
            service_area,
        })
    }

    pub fn site_info(&self) -> Result<SiteInfo, SiteError> {
        Ok(SiteInfo {
            name: self.require_str(fields::SITE_NAME)?.to_string(),
            url: self.require_str(fields::SITE_URL)?.to_string(),
        })
    }

    /// The hero image pool. Missing, non-list or empty all count as "no images".
    pub fn hero_images(&self) -> Result<Vec<HeroImage>, SiteError> {
        let images: Vec<HeroImage> = match self.lookup(fields::HERO_IMAGES) {
            Some(value @ Value::Array(_)) => serde_json::from_value(value.clone())?,
            _ => return Err(SiteError::NoHeroImages),
        };
        if images.is_empty() {
            return Err(SiteError::NoHeroImages);
        }
        Ok(images)
    }

    pub fn image_of_the_day(&self) -> Option<HeroImage> {
        self.lookup(fields::IMAGE_OF_THE_DAY)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Copy `heroImages[index]` verbatim into `imageOfTheDay`.
    ///
    /// The raw JSON entry is copied rather than the typed view, so keys this
    /// crate does not model are kept as written.
    pub fn feature_hero_image(&mut self, index: usize) -> Result<HeroImage, SiteError> {
        let raw = self
            .lookup(fields::HERO_IMAGES)
            .and_then(|images| images.get(index))
            .cloned()
            .ok_or(SiteError::NoHeroImages)?;
        let chosen: HeroImage = serde_json::from_value(raw.clone())?;
        let hero = self
            .root
            .pointer_mut(fields::HERO.pointer)
            .and_then(Value::as_object_mut)
            .ok_or(SiteError::MissingField(fields::HERO))?;
        hero.insert("imageOfTheDay".to_string(), raw);
        Ok(chosen)
    }

    /// Optional gallery list; absent means no gallery on the site.
    pub fn gallery_images(&self) -> Result<Vec<GalleryImage>, SiteError> {
        match self.lookup(fields::GALLERY_IMAGES) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => Ok(serde_json::from_value(value.clone())?),
        }
    }
}

/// Load/save seam for the config document.
pub trait SiteRepository {
    fn load(&self) -> Result<SiteDocument, SiteError>;
    fn save(&self, document: &SiteDocument) -> Result<(), SiteError>;
}

/// The config document as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SiteRepository for JsonFileRepository {
    fn load(&self) -> Result<SiteDocument, SiteError> {
        let content = fs::read_to_string(&self.path)?;
        SiteDocument::parse(&content)
    }

    fn save(&self, document: &SiteDocument) -> Result<(), SiteError> {
        let json = document.to_json_pretty()?;
        write_atomic(&self.path, json.as_bytes())
    }
}

/// Write `contents` to a temp file next to `path`, then rename it over `path`.
///
/// The temp file lives in the same directory so the rename never crosses a
/// filesystem. Existing permissions on `path` are carried over.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), SiteError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    if let Ok(meta) = fs::metadata(path) {
        fs::set_permissions(tmp.path(), meta.permissions())?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
