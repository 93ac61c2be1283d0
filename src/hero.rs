//! Hero banner images.
//!
//! Two independent pieces share the same image list:
//!
//! - **Image of the day** (build time): a scheduled job picks one entry of
//!   `sections.hero.heroImages` and stores it as `sections.hero.imageOfTheDay`,
//!   which the page template renders as the initial banner.
//! - **Hero randomizer** (page load): the banner container carries the whole
//!   list as JSON in `data-hero-images`; on load one entry is picked and the
//!   `<img>` source and classes are swapped to it.

use crate::site::{SiteError, SiteRepository};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Base classes applied to the hero `<img>`; the entry's own `class` is appended.
pub const HERO_BASE_CLASS: &str = "w-full h-full object-cover";

/// One entry of the hero image list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroImage {
    pub src: String,
    /// Extra classes, typically an `object-position` utility.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HeroImage {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            class: None,
            extra: Map::new(),
        }
    }

    pub fn alt(&self) -> &str {
        self.extra.get("alt").and_then(Value::as_str).unwrap_or("")
    }

    /// Full class attribute for the hero `<img>`.
    pub fn class_name(&self) -> String {
        match self.class.as_deref().map(str::trim) {
            Some(extra) if !extra.is_empty() => format!("{HERO_BASE_CLASS} {extra}"),
            _ => HERO_BASE_CLASS.to_string(),
        }
    }
}

/// Uniform choice over a non-empty image list.
#[derive(Debug, Clone, Copy)]
pub struct HeroPicker<'a> {
    images: &'a [HeroImage],
}

impl<'a> HeroPicker<'a> {
    pub fn new(images: &'a [HeroImage]) -> Result<Self, SiteError> {
        if images.is_empty() {
            return Err(SiteError::NoHeroImages);
        }
        Ok(Self { images })
    }

    pub fn pick_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.gen_range(0..self.images.len())
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &'a HeroImage {
        &self.images[self.pick_index(rng)]
    }
}

/// Load the config, feature a random hero image, and write the config back.
///
/// Returns the chosen image. Nothing is written when the image list is
/// missing or empty.
pub fn rotate_image_of_the_day<S, R>(repo: &S, rng: &mut R) -> Result<HeroImage, SiteError>
where
    S: SiteRepository + ?Sized,
    R: Rng + ?Sized,
{
    let mut document = repo.load()?;
    let images = document.hero_images()?;
    let index = HeroPicker::new(&images)?.pick_index(rng);
    let chosen = document.feature_hero_image(index)?;
    repo.save(&document)?;
    Ok(chosen)
}

/// What the page-load randomizer applies to the hero `<img>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroSelection {
    pub src: String,
    pub class_name: String,
}

/// Page-load hero swap, fed from the `data-hero-images` attribute.
#[derive(Debug, Clone, Default)]
pub struct HeroRandomizer {
    images: Vec<HeroImage>,
}

impl HeroRandomizer {
    /// Parse the attribute value. Absent or malformed JSON disables the swap.
    pub fn from_attribute(raw: Option<&str>) -> Self {
        let images = raw
            .and_then(|json| serde_json::from_str::<Vec<HeroImage>>(json).ok())
            .unwrap_or_default();
        Self { images }
    }

    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<HeroSelection> {
        let image = self.images.choose(rng)?;
        Some(HeroSelection {
            src: image.src.clone(),
            class_name: image.class_name(),
        })
    }
}
