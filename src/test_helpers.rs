//! Shared test utilities for the rsm-site test suite.
//!
//! Provides a representative `siteConfig.json`, an in-memory
//! [`SiteRepository`], deterministic randomness and lightbox image fixtures.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let repo = MemoryRepository::new(sample_document());
//! let chosen = rotate_image_of_the_day(&repo, &mut seeded_rng(7)).unwrap();
//! assert_eq!(repo.saves(), 1);
//! ```

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::{Value, json};

use crate::site::{SiteDocument, SiteError, SiteRepository};
use crate::widgets::navigation::ImageDescriptor;

// =========================================================================
// Site config fixtures
// =========================================================================

/// A complete config document as the live site keeps it.
///
/// `sections.hero.imageOfTheDay` is deliberately absent so rotation tests
/// can observe it being added.
pub fn sample_site_json() -> Value {
    json!({
        "common": {
            "site": {
                "name": "Right School of Motoring",
                "url": "https://example.co.uk"
            },
            "business": {
                "address": "1 Road\nTown\nAB1 2CD",
                "phone": "07832185711",
                "email": "bookings@example.co.uk",
                "serviceArea": "Town and surrounding areas"
            }
        },
        "sections": {
            "hero": {
                "title": "Learn to drive with confidence",
                "heroImages": [
                    { "src": "hero-1.jpg", "alt": "Instructor and pupil" },
                    { "src": "hero-2.jpg", "class": "object-top" },
                    { "src": "hero-3.jpg", "class": "object-[50%_30%]" }
                ]
            },
            "gallery": {
                "images": [
                    { "src": "gallery/pass-1.jpg", "alt": "First time pass", "caption": "Passed first time" },
                    { "src": "gallery/pass-2.jpg", "alt": "Happy driver", "caption": "Zero minors" },
                    { "src": "gallery/pass-3.jpg", "alt": "New licence" }
                ]
            },
            "testimonials": [
                { "name": "A.", "text": "Patient and calm." },
                { "name": "B.", "text": "Passed in six weeks." }
            ]
        },
        "seo": {
            "bingSiteVerification": "0123ABCD4567EF"
        }
    })
}

pub fn sample_document() -> SiteDocument {
    SiteDocument::from_value(sample_site_json())
}

/// Write `value` as `siteConfig.json` inside `dir` and return the path.
pub fn write_site(dir: &Path, value: &Value) -> PathBuf {
    let path = dir.join("siteConfig.json");
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

// =========================================================================
// In-memory repository
// =========================================================================

/// A [`SiteRepository`] that keeps the document in memory and counts saves.
pub struct MemoryRepository {
    document: RefCell<SiteDocument>,
    saves: Cell<usize>,
}

impl MemoryRepository {
    pub fn new(document: SiteDocument) -> Self {
        Self {
            document: RefCell::new(document),
            saves: Cell::new(0),
        }
    }

    /// The document as last saved (or as constructed).
    pub fn document(&self) -> SiteDocument {
        self.document.borrow().clone()
    }

    pub fn saves(&self) -> usize {
        self.saves.get()
    }
}

impl SiteRepository for MemoryRepository {
    fn load(&self) -> Result<SiteDocument, SiteError> {
        Ok(self.document())
    }

    fn save(&self, document: &SiteDocument) -> Result<(), SiteError> {
        *self.document.borrow_mut() = document.clone();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

// =========================================================================
// Randomness and widget fixtures
// =========================================================================

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// `n` lightbox images: `img-{i}.jpg`, `Alt {i}`, `Caption {i}`.
pub fn sample_images(n: usize) -> Vec<ImageDescriptor> {
    (0..n)
        .map(|i| ImageDescriptor {
            src: format!("img-{i}.jpg"),
            alt: format!("Alt {i}"),
            caption: format!("Caption {i}"),
            index: i,
        })
        .collect()
}
