//! Browser widget controllers.
//!
//! Each widget is a pure state machine: it receives input events, updates
//! its own state, and returns the DOM [`Effect`]s a renderer must apply. No
//! widget touches the DOM, reads a clock, or holds a reference to another
//! widget, so the machines run unchanged under test.
//!
//! Timed steps (the next-frame reveal, fade timers, key debounce) are
//! requested with [`Effect::Schedule`]. The renderer calls
//! [`Widget::on_timer`] when the delay has elapsed. Timers are never
//! cancelled; a widget ignores a timer that no longer applies.
//!
//! | Module | Role |
//! |--------|------|
//! | [`modal`] | Shared show/hide animation lifecycle |
//! | [`navigation`] | Image descriptors and the clamped cursor |
//! | [`gesture`] | Horizontal swipe recognition |
//! | [`lightbox`] | Image lightbox state machine |
//! | [`booking`] | Booking popup state machine |
//! | [`dom`] | DOM contract names and a headless renderer |

pub mod booking;
pub mod dom;
pub mod gesture;
pub mod lightbox;
pub mod modal;
pub mod navigation;

use chrono::NaiveDate;
use navigation::ImageDescriptor;
use std::time::Duration;

/// A delayed callback a widget asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timer {
    /// Next animation frame after the modal is displayed.
    Frame,
    /// End of the modal exit transition.
    Hide,
    /// End of the lightbox image dim.
    ImageFade,
    /// Debounced key, tagged with its generation.
    KeyDebounce(u64),
}

/// Keyboard keys the widgets react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other(String),
}

impl Key {
    /// Map a `KeyboardEvent.key` value.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" => Self::Escape,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            other => Self::Other(other.to_string()),
        }
    }
}

/// A change a renderer applies to the widget's part of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Modal root: remove `hidden`, add `flex`.
    Display,
    /// Modal root: remove `opacity-0`; panel: remove `scale-95`.
    Reveal,
    /// Modal root: add `opacity-0`; panel: add `scale-95`.
    Fade,
    /// Modal root: add `hidden`, remove `flex`.
    Conceal,
    /// `body.style.overflow = "hidden"`.
    LockScroll,
    /// Clear `body.style.overflow`.
    UnlockScroll,
    Schedule { timer: Timer, after: Duration },
    /// Lightbox image at half opacity while it is swapped.
    DimImage,
    /// Lightbox image `src`/`alt`, caption text, full opacity.
    ShowImage(ImageDescriptor),
    /// Prev/next affordances; a disabled one is dimmed and ignores pointer events.
    Controls { prev_enabled: bool, next_enabled: bool },
    /// Date input `min`/`max` attributes.
    DateBounds { min: NaiveDate, max: NaiveDate },
    /// Preselect a lesson type option.
    SelectLessonType(String),
    /// Blocking `alert()`.
    Alert(String),
    /// `window.open(url, "_blank")`.
    OpenExternal(String),
    /// `form.reset()`.
    ResetForm,
}

/// A widget state machine.
pub trait Widget {
    type Event;

    fn handle(&mut self, event: Self::Event) -> Vec<Effect>;

    fn on_timer(&mut self, timer: Timer) -> Vec<Effect>;
}
