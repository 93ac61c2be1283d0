//! Booking popup.
//!
//! A modal form (name, preferred date, lesson type) with three contact
//! buttons. Choosing a contact method validates the form, composes the
//! booking message, and opens the visitor's mail, SMS or WhatsApp client with
//! it; the popup then closes and the form resets.
//!
//! Call-to-action buttons elsewhere on the page open the popup through a
//! [`BookingCta`], which is handed the popup explicitly rather than finding a
//! page-global instance.

use super::modal::Modal;
use super::{Effect, Key, Timer, Widget};
use crate::config::{LessonTypeOption, ToolConfig};
use crate::contact::{BookingRequest, BusinessContact, ContactMethod, compose_message, contact_url};
use chrono::{Months, NaiveDate};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Please fill in your name and preferred date first.")]
    MissingDetails,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingSettings {
    pub months_ahead: u32,
    pub email_subject: String,
    pub country_code: String,
    pub transition: Duration,
    pub lesson_types: Vec<LessonTypeOption>,
}

impl BookingSettings {
    pub fn from_config(config: &ToolConfig) -> Self {
        Self {
            months_ahead: config.booking.months_ahead,
            email_subject: config.booking.email_subject.clone(),
            country_code: config.locale.country_code.clone(),
            transition: config.booking.transition(),
            lesson_types: config.booking.lesson_types.clone(),
        }
    }
}

impl Default for BookingSettings {
    fn default() -> Self {
        Self::from_config(&ToolConfig::default())
    }
}

/// Selectable date range: today through `months_ahead` calendar months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateBounds {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl DateBounds {
    /// Month arithmetic clamps to the end of a shorter month (31 Jan + 1 → 28/29 Feb).
    pub fn from_today(today: NaiveDate, months_ahead: u32) -> Self {
        let max = today
            .checked_add_months(Months::new(months_ahead))
            .unwrap_or(NaiveDate::MAX);
        Self { min: today, max }
    }
}

/// Current form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    pub name: String,
    pub date: String,
    /// `None` means the select still shows its first option.
    pub lesson_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BookingEvent {
    Open {
        lesson_type: Option<String>,
        today: NaiveDate,
    },
    Close,
    KeyDown(Key),
    NameInput(String),
    DateInput(String),
    LessonTypeInput(String),
    Contact(ContactMethod),
}

#[derive(Debug, Clone)]
pub struct BookingPopup {
    modal: Modal,
    contact: BusinessContact,
    settings: BookingSettings,
    form: BookingForm,
}

impl BookingPopup {
    pub fn new(contact: BusinessContact, settings: BookingSettings) -> Self {
        Self {
            modal: Modal::new(settings.transition),
            contact,
            settings,
            form: BookingForm::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_shown()
    }

    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    /// Value the lesson type select currently holds.
    pub fn selected_lesson_type(&self) -> Option<&str> {
        self.form
            .lesson_type
            .as_deref()
            .or_else(|| self.settings.lesson_types.first().map(|o| o.value.as_str()))
    }

    /// Option label for a value, or the value itself when no option matches.
    pub fn lesson_label<'a>(&'a self, value: &'a str) -> &'a str {
        self.settings
            .lesson_types
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
            .unwrap_or(value)
    }

    /// Validate the form and build the outbound link for `method`.
    pub fn compose_link(&self, method: ContactMethod) -> Result<String, BookingError> {
        let name = self.form.name.as_str();
        let date = self.form.date.as_str();
        if name.trim().is_empty() || date.trim().is_empty() {
            return Err(BookingError::MissingDetails);
        }
        let lesson_label = self
            .selected_lesson_type()
            .map(|value| self.lesson_label(value))
            .unwrap_or("");
        let message = compose_message(
            &self.contact.name,
            &BookingRequest {
                name,
                date,
                lesson_label,
            },
        );
        Ok(contact_url(
            method,
            &self.contact,
            &message,
            &self.settings.email_subject,
            &self.settings.country_code,
        ))
    }

    fn open(&mut self, lesson_type: Option<String>, today: NaiveDate, effects: &mut Vec<Effect>) {
        let bounds = DateBounds::from_today(today, self.settings.months_ahead);
        effects.push(Effect::DateBounds {
            min: bounds.min,
            max: bounds.max,
        });
        if let Some(lesson_type) = lesson_type.filter(|t| !t.is_empty()) {
            self.form.lesson_type = Some(lesson_type.clone());
            effects.push(Effect::SelectLessonType(lesson_type));
        }
        if self.modal.show(effects) {
            effects.push(Effect::LockScroll);
        }
    }

    fn contact(&mut self, method: ContactMethod, effects: &mut Vec<Effect>) {
        if !self.modal.is_shown() {
            return;
        }
        match self.compose_link(method) {
            Ok(url) => {
                effects.push(Effect::OpenExternal(url));
                self.modal.hide(effects);
            }
            Err(err) => effects.push(Effect::Alert(err.to_string())),
        }
    }
}

impl Widget for BookingPopup {
    type Event = BookingEvent;

    fn handle(&mut self, event: BookingEvent) -> Vec<Effect> {
        let mut effects = Vec::new();
        match event {
            BookingEvent::Open { lesson_type, today } => self.open(lesson_type, today, &mut effects),
            BookingEvent::Close => {
                self.modal.hide(&mut effects);
            }
            BookingEvent::KeyDown(Key::Escape) => {
                self.modal.hide(&mut effects);
            }
            BookingEvent::KeyDown(_) => {}
            BookingEvent::NameInput(name) => self.form.name = name,
            BookingEvent::DateInput(date) => self.form.date = date,
            BookingEvent::LessonTypeInput(value) => self.form.lesson_type = Some(value),
            BookingEvent::Contact(method) => self.contact(method, &mut effects),
        }
        effects
    }

    fn on_timer(&mut self, timer: Timer) -> Vec<Effect> {
        let mut effects = Vec::new();
        match timer {
            Timer::Frame => self.modal.frame(&mut effects),
            Timer::Hide => {
                if self.modal.hide_elapsed(&mut effects) {
                    self.form = BookingForm::default();
                    effects.push(Effect::UnlockScroll);
                    effects.push(Effect::ResetForm);
                }
            }
            Timer::ImageFade | Timer::KeyDebounce(_) => {}
        }
        effects
    }
}

/// A "Book now" button, optionally tied to one lesson type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingCta {
    pub lesson_type: Option<String>,
}

impl BookingCta {
    pub fn new(lesson_type: Option<&str>) -> Self {
        Self {
            lesson_type: lesson_type.map(str::to_string),
        }
    }

    pub fn activate(&self, popup: &mut BookingPopup, today: NaiveDate) -> Vec<Effect> {
        popup.handle(BookingEvent::Open {
            lesson_type: self.lesson_type.clone(),
            today,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::dom::Harness;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn popup() -> BookingPopup {
        BookingPopup::new(
            BusinessContact {
                name: "Right School of Motoring".into(),
                phone: "07832185711".into(),
                email: "bookings@example.co.uk".into(),
            },
            BookingSettings::default(),
        )
    }

    fn open_harness() -> Harness<BookingPopup> {
        let mut h = Harness::new(popup());
        h.dispatch(BookingEvent::Open {
            lesson_type: None,
            today: today(),
        });
        h.settle();
        h
    }

    #[test]
    fn date_bounds_three_months() {
        let bounds = DateBounds::from_today(today(), 3);
        assert_eq!(bounds.min, today());
        assert_eq!(bounds.max, NaiveDate::from_ymd_opt(2027, 1, 18).unwrap());
    }

    #[test]
    fn date_bounds_clamp_month_end() {
        let bounds = DateBounds::from_today(NaiveDate::from_ymd_opt(2026, 11, 30).unwrap(), 3);
        assert_eq!(bounds.max, NaiveDate::from_ymd_opt(2027, 2, 28).unwrap());
    }

    #[test]
    fn open_sets_bounds_and_locks_scroll() {
        let h = open_harness();
        assert!(h.widget().is_open());
        assert!(h.page().is_open());
        assert_eq!(h.page().date_input.attr("min"), Some("2026-10-18"));
        assert_eq!(h.page().date_input.attr("max"), Some("2027-01-18"));
        assert_eq!(h.page().body.style("overflow"), Some("hidden"));
    }

    #[test]
    fn cta_preselects_lesson_type() {
        let mut popup = popup();
        let fx = BookingCta::new(Some("automatic")).activate(&mut popup, today());
        assert!(fx.contains(&Effect::SelectLessonType("automatic".into())));
        assert_eq!(popup.selected_lesson_type(), Some("automatic"));
        assert!(popup.is_open());
    }

    #[test]
    fn default_lesson_type_is_first_option() {
        let popup = popup();
        assert_eq!(popup.selected_lesson_type(), Some("manual"));
        assert_eq!(popup.lesson_label("manual"), "Manual Lessons");
        assert_eq!(popup.lesson_label("custom"), "custom");
    }

    #[test]
    fn missing_details_alert_and_stay_open() {
        for (name, date) in [("", ""), ("Sam", ""), ("", "2026-11-02"), ("  ", "2026-11-02")] {
            for method in ContactMethod::ALL {
                let mut h = open_harness();
                h.dispatch(BookingEvent::NameInput(name.into()));
                h.dispatch(BookingEvent::DateInput(date.into()));
                h.dispatch(BookingEvent::Contact(method));
                h.settle();

                assert!(h.widget().is_open(), "{name:?} {date:?} {method}");
                assert!(h.page().is_open());
                assert_eq!(
                    h.page().alerts,
                    vec!["Please fill in your name and preferred date first.".to_string()]
                );
                assert!(h.page().opened.is_empty());
            }
        }
    }

    #[test]
    fn whatsapp_opens_link_then_closes_and_resets() {
        let mut h = open_harness();
        h.dispatch(BookingEvent::NameInput("Sam".into()));
        h.dispatch(BookingEvent::DateInput("2026-11-02".into()));
        h.dispatch(BookingEvent::LessonTypeInput("intensive".into()));
        h.dispatch(BookingEvent::Contact(ContactMethod::WhatsApp));

        assert_eq!(h.page().opened.len(), 1);
        let url = &h.page().opened[0];
        assert!(url.starts_with("https://wa.me/447832185711?text=Hi%20Right%20School%20of%20Motoring%2C"));
        assert!(url.contains("Lesson%20Type%3A%20Intensive%20Course"));
        assert!(h.page().alerts.is_empty());

        h.settle();
        assert!(!h.widget().is_open());
        assert!(!h.page().is_open());
        assert_eq!(h.page().form_resets, 1);
        assert_eq!(h.widget().form(), &BookingForm::default());
        assert_eq!(h.page().body.style("overflow"), None);
    }

    #[test]
    fn email_link_has_subject_and_body() {
        let mut popup = popup();
        popup.handle(BookingEvent::NameInput("Sam".into()));
        popup.handle(BookingEvent::DateInput("2026-11-02".into()));
        let url = popup.compose_link(ContactMethod::Email).unwrap();
        assert!(url.starts_with(
            "mailto:bookings@example.co.uk?subject=Driving%20Lesson%20Booking%20Request&body="
        ));
        assert!(url.contains("Manual%20Lessons"));
    }

    #[test]
    fn link_keeps_name_and_date_as_typed() {
        let mut popup = popup();
        popup.handle(BookingEvent::NameInput("  Sam  ".into()));
        popup.handle(BookingEvent::DateInput(" 2026-11-02 ".into()));
        let url = popup.compose_link(ContactMethod::Sms).unwrap();
        assert!(url.contains("Name%3A%20%20%20Sam%20%20%0A"), "{url}");
        assert!(url.contains("Date%3A%20%202026-11-02%20%0A"), "{url}");
    }

    #[test]
    fn whitespace_only_name_is_missing() {
        let mut popup = popup();
        popup.handle(BookingEvent::NameInput("   ".into()));
        popup.handle(BookingEvent::DateInput("2026-11-02".into()));
        assert_eq!(
            popup.compose_link(ContactMethod::Email),
            Err(BookingError::MissingDetails)
        );
    }

    #[test]
    fn contact_ignored_while_closed() {
        let mut popup = popup();
        popup.handle(BookingEvent::NameInput("Sam".into()));
        popup.handle(BookingEvent::DateInput("2026-11-02".into()));
        assert!(popup.handle(BookingEvent::Contact(ContactMethod::Sms)).is_empty());
    }

    #[test]
    fn escape_closes_only_when_open() {
        let mut popup = popup();
        assert!(popup.handle(BookingEvent::KeyDown(Key::Escape)).is_empty());

        let mut h = open_harness();
        h.dispatch(BookingEvent::KeyDown(Key::ArrowLeft));
        assert!(h.widget().is_open());
        h.dispatch(BookingEvent::KeyDown(Key::Escape));
        h.settle();
        assert!(!h.page().is_open());
    }
}
