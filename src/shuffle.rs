//! Gallery and testimonial shufflers.
//!
//! Both widgets take a fixed collection from the page, shuffle it uniformly
//! (Fisher–Yates), and keep only the first `k` items of the new order
//! visible. The gallery additionally has a "show more" button that reveals
//! everything.
//!
//! The result is an [`Arrangement`]: the new order plus a visible prefix.
//! A renderer re-appends children in that order and toggles `hidden` on the
//! rest, so the DOM work stays linear in the number of items.

use crate::config::RandomizerConfig;
use rand::Rng;
use rand::seq::SliceRandom;

/// A shuffle-and-truncate rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Randomizer {
    visible: usize,
}

impl Randomizer {
    pub fn new(visible: usize) -> Self {
        Self { visible }
    }

    pub fn gallery(config: &RandomizerConfig) -> Self {
        Self::new(config.gallery_visible)
    }

    pub fn testimonials(config: &RandomizerConfig) -> Self {
        Self::new(config.testimonials_visible)
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    pub fn arrange<T, R: Rng + ?Sized>(&self, mut items: Vec<T>, rng: &mut R) -> Arrangement<T> {
        items.shuffle(rng);
        Arrangement {
            visible: self.visible.min(items.len()),
            items,
        }
    }
}

/// Shuffled items with the first `visible` shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrangement<T> {
    items: Vec<T>,
    visible: usize,
}

impl<T> Arrangement<T> {
    /// All items in display order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn visible(&self) -> &[T] {
        &self.items[..self.visible]
    }

    pub fn hidden(&self) -> &[T] {
        &self.items[self.visible..]
    }

    pub fn is_visible(&self, position: usize) -> bool {
        position < self.visible
    }

    /// Whether a "show more" control still has anything to reveal.
    pub fn has_hidden(&self) -> bool {
        self.visible < self.items.len()
    }

    pub fn show_all(&mut self) {
        self.visible = self.items.len();
    }
}
