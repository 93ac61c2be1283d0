//! DOM contract and headless renderer.
//!
//! [`selectors`] holds the element ids the widgets bind to; the HTML
//! partials render their ids through [`id_of`]. [`classes`] are the toggles
//! the modal effects add and remove.
//!
//! [`HeadlessPage`] applies [`Effect`]s to an in-memory model of the modal's
//! elements, and [`Harness`] drives a widget against it with a virtual
//! clock, running scheduled timers in due order.

use super::{Effect, Timer, Widget};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

pub mod selectors {
    pub const LIGHTBOX: &str = "#lightbox";
    pub const LIGHTBOX_IMAGE: &str = "#lightbox-image";
    pub const LIGHTBOX_CAPTION: &str = "#lightbox-caption";
    pub const LIGHTBOX_CLOSE: &str = "#lightbox-close";
    pub const LIGHTBOX_PREV: &str = "#lightbox-prev";
    pub const LIGHTBOX_NEXT: &str = "#lightbox-next";

    pub const BOOKING_POPUP: &str = "#booking-popup";
    pub const BOOKING_CLOSE: &str = "#booking-close";
    pub const BOOKING_FORM: &str = "#booking-form";
    pub const STUDENT_NAME: &str = "#student-name";
    pub const LESSON_DATE: &str = "#lesson-date";
    pub const LESSON_TYPE: &str = "#lesson-type";
    pub const CONTACT_EMAIL: &str = "#contact-email";
    pub const CONTACT_SMS: &str = "#contact-sms";
    pub const CONTACT_WHATSAPP: &str = "#contact-whatsapp";

    pub const GALLERY_GRID: &str = "#gallery-grid";
    pub const SHOW_MORE_GALLERY: &str = "#show-more-gallery";
}

pub mod classes {
    pub const HIDDEN: &str = "hidden";
    pub const FLEX: &str = "flex";
    pub const OPACITY_0: &str = "opacity-0";
    pub const SCALE_95: &str = "scale-95";
    pub const TRANSFORM: &str = "transform";
}

/// Strip the leading `#` from an id selector.
pub fn id_of(selector: &str) -> &str {
    selector.trim_start_matches('#')
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    classes: BTreeSet<String>,
    styles: BTreeMap<String, String>,
    attrs: BTreeMap<String, String>,
    text: String,
}

impl Element {
    pub fn with_classes(names: &[&str]) -> Self {
        let mut el = Self::default();
        for name in names {
            el.add_class(name);
        }
        el
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes.contains(name)
    }

    pub fn add_class(&mut self, name: &str) {
        self.classes.insert(name.to_string());
    }

    pub fn remove_class(&mut self, name: &str) {
        self.classes.remove(name);
    }

    pub fn style(&self, name: &str) -> Option<&str> {
        self.styles.get(name).map(String::as_str)
    }

    /// An empty value removes the property, as with `el.style[name] = ""`.
    pub fn set_style(&mut self, name: &str, value: &str) {
        if value.is_empty() {
            self.styles.remove(name);
        } else {
            self.styles.insert(name.to_string(), value.to_string());
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attrs.insert(name.to_string(), value.to_string());
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }
}

/// In-memory model of one modal widget and the page around it.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessPage {
    pub root: Element,
    pub panel: Element,
    pub image: Element,
    pub caption: Element,
    pub prev: Element,
    pub next: Element,
    pub body: Element,
    pub date_input: Element,
    pub type_select: Element,
    pub alerts: Vec<String>,
    pub opened: Vec<String>,
    pub form_resets: usize,
}

impl Default for HeadlessPage {
    fn default() -> Self {
        Self {
            root: Element::with_classes(&[classes::HIDDEN, classes::OPACITY_0]),
            panel: Element::with_classes(&[classes::TRANSFORM, classes::SCALE_95]),
            image: Element::default(),
            caption: Element::default(),
            prev: Element::default(),
            next: Element::default(),
            body: Element::default(),
            date_input: Element::default(),
            type_select: Element::default(),
            alerts: Vec::new(),
            opened: Vec::new(),
            form_resets: 0,
        }
    }
}

impl HeadlessPage {
    /// Displayed and not yet concealed.
    pub fn is_open(&self) -> bool {
        self.root.has_class(classes::FLEX)
    }

    /// Schedules are returned untouched for the caller's timer queue.
    pub fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::Display => {
                self.root.remove_class(classes::HIDDEN);
                self.root.add_class(classes::FLEX);
            }
            Effect::Reveal => {
                self.root.remove_class(classes::OPACITY_0);
                self.panel.remove_class(classes::SCALE_95);
            }
            Effect::Fade => {
                self.root.add_class(classes::OPACITY_0);
                self.panel.add_class(classes::SCALE_95);
            }
            Effect::Conceal => {
                self.root.add_class(classes::HIDDEN);
                self.root.remove_class(classes::FLEX);
            }
            Effect::LockScroll => self.body.set_style("overflow", "hidden"),
            Effect::UnlockScroll => self.body.set_style("overflow", ""),
            Effect::Schedule { .. } => {}
            Effect::DimImage => self.image.set_style("opacity", "0.5"),
            Effect::ShowImage(image) => {
                self.image.set_attr("src", &image.src);
                self.image.set_attr("alt", &image.alt);
                self.caption.set_text(&image.caption);
                self.image.set_style("opacity", "1");
            }
            Effect::Controls {
                prev_enabled,
                next_enabled,
            } => {
                set_control(&mut self.prev, *prev_enabled);
                set_control(&mut self.next, *next_enabled);
            }
            Effect::DateBounds { min, max } => {
                self.date_input.set_attr("min", &min.format("%Y-%m-%d").to_string());
                self.date_input.set_attr("max", &max.format("%Y-%m-%d").to_string());
            }
            Effect::SelectLessonType(value) => self.type_select.set_attr("value", value),
            Effect::Alert(message) => self.alerts.push(message.clone()),
            Effect::OpenExternal(url) => self.opened.push(url.clone()),
            Effect::ResetForm => {
                self.form_resets += 1;
                self.date_input = Element::default();
                self.type_select = Element::default();
            }
        }
    }
}

fn set_control(el: &mut Element, enabled: bool) {
    el.set_style("opacity", if enabled { "1" } else { "0.3" });
    el.set_style("pointer-events", if enabled { "auto" } else { "none" });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    due: Duration,
    seq: u64,
    timer: Timer,
}

/// Runs a widget against a [`HeadlessPage`] on a virtual clock.
#[derive(Debug)]
pub struct Harness<W: Widget> {
    widget: W,
    page: HeadlessPage,
    now: Duration,
    seq: u64,
    pending: Vec<Pending>,
}

impl<W: Widget> Harness<W> {
    pub fn new(widget: W) -> Self {
        Self {
            widget,
            page: HeadlessPage::default(),
            now: Duration::ZERO,
            seq: 0,
            pending: Vec::new(),
        }
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    pub fn page(&self) -> &HeadlessPage {
        &self.page
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn dispatch(&mut self, event: W::Event) {
        let effects = self.widget.handle(event);
        self.apply(effects);
    }

    /// Move the clock forward, firing every timer that falls due on the way.
    pub fn advance(&mut self, by: Duration) {
        let until = self.now + by;
        while let Some(next) = self.take_next(Some(until)) {
            self.fire(next);
        }
        self.now = until;
    }

    /// Fire timers until none remain.
    pub fn settle(&mut self) {
        while let Some(next) = self.take_next(None) {
            self.fire(next);
        }
    }

    fn fire(&mut self, pending: Pending) {
        self.now = self.now.max(pending.due);
        let effects = self.widget.on_timer(pending.timer);
        self.apply(effects);
    }

    fn take_next(&mut self, until: Option<Duration>) -> Option<Pending> {
        let (pos, next) = self
            .pending
            .iter()
            .enumerate()
            .min_by_key(|(_, p)| (p.due, p.seq))?;
        if until.is_some_and(|until| next.due > until) {
            return None;
        }
        Some(self.pending.swap_remove(pos))
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in &effects {
            if let Effect::Schedule { timer, after } = effect {
                self.seq += 1;
                self.pending.push(Pending {
                    due: self.now + *after,
                    seq: self.seq,
                    timer: *timer,
                });
            }
            self.page.apply(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::Key;
    use crate::widgets::lightbox::{Lightbox, LightboxEvent, LightboxSettings};
    use crate::test_helpers::sample_images;

    #[test]
    fn page_starts_hidden() {
        let page = HeadlessPage::default();
        assert!(!page.is_open());
        assert!(page.root.has_class(classes::HIDDEN));
        assert!(page.panel.has_class(classes::SCALE_95));
    }

    #[test]
    fn display_then_reveal() {
        let mut page = HeadlessPage::default();
        page.apply(&Effect::Display);
        assert!(page.is_open());
        assert!(page.root.has_class(classes::OPACITY_0));
        page.apply(&Effect::Reveal);
        assert!(!page.root.has_class(classes::OPACITY_0));
        assert!(!page.panel.has_class(classes::SCALE_95));
    }

    #[test]
    fn empty_style_removes() {
        let mut el = Element::default();
        el.set_style("overflow", "hidden");
        el.set_style("overflow", "");
        assert_eq!(el.style("overflow"), None);
    }

    #[test]
    fn id_of_strips_hash() {
        assert_eq!(id_of(selectors::LIGHTBOX_IMAGE), "lightbox-image");
    }

    #[test]
    fn advance_fires_only_due_timers() {
        let mut h = Harness::new(Lightbox::new(sample_images(3), LightboxSettings::default()));
        h.dispatch(LightboxEvent::Open(0));
        h.advance(Duration::from_millis(50));
        // Frame has run, image fade (100ms) has not
        assert!(!h.page().root.has_class(classes::OPACITY_0));
        assert_eq!(h.page().image.style("opacity"), Some("0.5"));
        h.advance(Duration::from_millis(50));
        assert_eq!(h.page().image.style("opacity"), Some("1"));
        assert_eq!(h.now(), Duration::from_millis(100));
    }

    #[test]
    fn timers_scheduled_during_advance_fire_in_window() {
        let mut h = Harness::new(Lightbox::new(sample_images(3), LightboxSettings::default()));
        h.dispatch(LightboxEvent::Open(0));
        h.settle();
        h.dispatch(LightboxEvent::KeyDown(Key::Escape));
        // 150ms debounce, then 300ms exit transition
        h.advance(Duration::from_millis(449));
        assert!(h.page().is_open());
        h.advance(Duration::from_millis(1));
        assert!(!h.page().is_open());
    }
}
