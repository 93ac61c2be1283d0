//! Show/hide lifecycle shared by the lightbox and the booking popup.
//!
//! ```text
//! Hidden --show--> Shown --hide--> Hiding --(transition)--> Hidden
//!                    ^                |
//!                    +-----show-------+
//! ```
//!
//! Showing is two steps: the root is displayed at once and the fade/scale
//! classes are removed on the next frame so the CSS transition runs. Hiding
//! starts the reverse transition and conceals the root once it finishes.

use super::{Effect, Timer};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Hidden,
    Shown,
    Hiding,
}

#[derive(Debug, Clone)]
pub struct Modal {
    phase: Phase,
    transition: Duration,
}

impl Modal {
    pub fn new(transition: Duration) -> Self {
        Self {
            phase: Phase::Hidden,
            transition,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_shown(&self) -> bool {
        self.phase == Phase::Shown
    }

    /// Returns `false` if already shown.
    pub fn show(&mut self, effects: &mut Vec<Effect>) -> bool {
        if self.phase == Phase::Shown {
            return false;
        }
        self.phase = Phase::Shown;
        effects.push(Effect::Display);
        effects.push(Effect::Schedule {
            timer: Timer::Frame,
            after: Duration::ZERO,
        });
        true
    }

    pub fn frame(&mut self, effects: &mut Vec<Effect>) {
        if self.phase == Phase::Shown {
            effects.push(Effect::Reveal);
        }
    }

    /// Returns `false` unless the modal was shown.
    pub fn hide(&mut self, effects: &mut Vec<Effect>) -> bool {
        if self.phase != Phase::Shown {
            return false;
        }
        self.phase = Phase::Hiding;
        effects.push(Effect::Fade);
        effects.push(Effect::Schedule {
            timer: Timer::Hide,
            after: self.transition,
        });
        true
    }

    /// Returns `true` when the exit transition completed and the root was concealed.
    ///
    /// A hide timer that fires after the modal was re-shown is ignored.
    pub fn hide_elapsed(&mut self, effects: &mut Vec<Effect>) -> bool {
        if self.phase != Phase::Hiding {
            return false;
        }
        self.phase = Phase::Hidden;
        effects.push(Effect::Conceal);
        true
    }
}
