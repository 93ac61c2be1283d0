//! Dry-run validation of the site config.
//!
//! Derives every build artifact in memory without writing anything, so a CI
//! job can fail on a broken `siteConfig.json` before deploying.

use crate::config::ToolConfig;
use crate::contact::BusinessContact;
use crate::markup;
use crate::schema_org::Organization;
use crate::site::SiteDocument;
use crate::verification::VerificationFile;
use std::path::Path;

/// One derived artifact and whether it could be produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckItem {
    pub name: &'static str,
    /// `Ok(summary)` or `Err(message)`.
    pub outcome: Result<String, String>,
}

impl CheckItem {
    fn new<T, E: std::fmt::Display>(
        name: &'static str,
        result: Result<T, E>,
        summary: impl FnOnce(T) -> String,
    ) -> Self {
        Self {
            name,
            outcome: result.map(summary).map_err(|e| e.to_string()),
        }
    }

    pub fn passed(&self) -> bool {
        self.outcome.is_ok()
    }
}

pub fn check_site(document: &SiteDocument, config: &ToolConfig, public_dir: &Path) -> Vec<CheckItem> {
    vec![
        CheckItem::new(
            "verification",
            VerificationFile::from_site(document, public_dir),
            |file| file.path.display().to_string(),
        ),
        CheckItem::new(
            "schema-org",
            Organization::from_site(document, &config.locale)
                .and_then(|org| org.to_json_pretty()),
            |json| format!("{} bytes", json.len()),
        ),
        CheckItem::new("hero images", document.hero_images(), |images| {
            format!("{} images", images.len())
        }),
        CheckItem::new("booking contact", BusinessContact::from_site(document), |contact| {
            format!("{} <{}>, {}", contact.name, contact.email, contact.phone)
        }),
        CheckItem::new(
            "gallery",
            document.gallery_images(),
            |images| match images.len() {
                0 => "none".to_string(),
                n => format!("{n} images"),
            },
        ),
        CheckItem::new(
            "hero partial",
            markup::site_hero(document),
            |html| format!("{} bytes", html.into_string().len()),
        ),
    ]
}

pub fn all_passed(items: &[CheckItem]) -> bool {
    items.iter().all(CheckItem::passed)
}
