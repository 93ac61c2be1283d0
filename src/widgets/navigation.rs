//! Image sequence and navigation cursor for the lightbox.
//!
//! The sequence is collected once from the page's lightbox triggers and
//! never changes. The cursor always satisfies `0 <= index < len` for a
//! non-empty sequence; every mutation clamps.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One lightbox-triggerable image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    pub src: String,
    pub alt: String,
    pub caption: String,
    pub index: usize,
}

impl ImageDescriptor {
    /// Build from a trigger's `dataset` (`image`, `alt`, `caption`, `index`).
    ///
    /// A missing or unparsable `index` falls back to the trigger's position.
    pub fn from_dataset(dataset: &BTreeMap<String, String>, position: usize) -> Self {
        let attr = |key: &str| dataset.get(key).cloned().unwrap_or_default();
        Self {
            src: attr("image"),
            alt: attr("alt"),
            caption: attr("caption"),
            index: dataset
                .get("index")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(position),
        }
    }
}

/// Collect descriptors from triggers in document order.
pub fn collect_images<'a, I>(triggers: I) -> Vec<ImageDescriptor>
where
    I: IntoIterator<Item = &'a BTreeMap<String, String>>,
{
    triggers
        .into_iter()
        .enumerate()
        .map(|(position, dataset)| ImageDescriptor::from_dataset(dataset, position))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// Clamped cursor over a fixed image sequence.
#[derive(Debug, Clone)]
pub struct Navigator {
    images: Vec<ImageDescriptor>,
    current: usize,
}

impl Navigator {
    pub fn new(images: Vec<ImageDescriptor>) -> Self {
        Self { images, current: 0 }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn set_index(&mut self, index: usize) {
        self.current = index.min(self.images.len().saturating_sub(1));
    }

    /// Move one step; returns `false` at the boundary.
    pub fn step(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Next if !self.is_at_end() => self.current += 1,
            Direction::Prev if !self.is_at_start() => self.current -= 1,
            _ => return false,
        }
        true
    }

    pub fn is_at_start(&self) -> bool {
        self.current == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.current + 1 >= self.images.len()
    }

    pub fn current(&self) -> Option<&ImageDescriptor> {
        self.images.get(self.current)
    }
}
