//! Horizontal swipe recognition for touch screens.
//!
//! A swipe navigates only when horizontal travel dominates (`|dx| > |dy|`)
//! and exceeds the threshold, so vertical scrolling over the lightbox never
//! changes the image. Swiping right (finger moves towards +x) goes back.

use super::navigation::Direction;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub fn classify_swipe(start: Point, end: Point, threshold: f64) -> Option<Direction> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    if dx.abs() > dy.abs() && dx.abs() > threshold {
        Some(if dx > 0.0 {
            Direction::Prev
        } else {
            Direction::Next
        })
    } else {
        None
    }
}

/// Remembers where the current touch started.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwipeTracker {
    start: Option<Point>,
}

impl SwipeTracker {
    pub fn begin(&mut self, at: Point) {
        self.start = Some(at);
    }

    /// End the touch; `None` if no touch was tracked or it was not a swipe.
    pub fn finish(&mut self, at: Point, threshold: f64) -> Option<Direction> {
        let start = self.start.take()?;
        classify_swipe(start, at, threshold)
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }

    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }
}
