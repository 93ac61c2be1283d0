//! Booking request messages and outbound contact links.
//!
//! The booking popup never talks to a server. It builds a fixed-template
//! message and hands it to the visitor's own mail, SMS or WhatsApp client
//! through a protocol link:
//!
//! ```text
//! mailto:<email>?subject=<subject>&body=<message>
//! sms:<phone>?body=<message>
//! https://wa.me/<country><number>?text=<message>
//! ```
//!
//! Every interpolated value is escaped with `encodeURIComponent` rules.

use crate::schema_org::international_phone;
use crate::site::{SiteDocument, SiteError, fields};
use crate::widgets::dom::{id_of, selectors};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Characters `encodeURIComponent` leaves alone, besides ASCII alphanumerics.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Who booking requests are addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessContact {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl BusinessContact {
    pub fn from_site(document: &SiteDocument) -> Result<Self, SiteError> {
        Ok(Self {
            name: document.require_str(fields::SITE_NAME)?.to_string(),
            phone: document.require_str(fields::BUSINESS_PHONE)?.to_string(),
            email: document.require_str(fields::BUSINESS_EMAIL)?.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactMethod {
    Email,
    Sms,
    WhatsApp,
}

impl ContactMethod {
    pub const ALL: [ContactMethod; 3] = [Self::Email, Self::Sms, Self::WhatsApp];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
            Self::WhatsApp => "whatsapp",
        }
    }

    /// Id of the button that triggers this method in the booking popup.
    pub fn button_id(&self) -> &'static str {
        match self {
            Self::Email => id_of(selectors::CONTACT_EMAIL),
            Self::Sms => id_of(selectors::CONTACT_SMS),
            Self::WhatsApp => id_of(selectors::CONTACT_WHATSAPP),
        }
    }
}

impl fmt::Display for ContactMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown contact method '{0}'")]
pub struct UnknownContactMethod(pub String);

impl FromStr for ContactMethod {
    type Err = UnknownContactMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownContactMethod(s.to_string()))
    }
}

/// The visitor's details as entered in the booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRequest<'a> {
    pub name: &'a str,
    pub date: &'a str,
    /// Display label of the chosen lesson type.
    pub lesson_label: &'a str,
}

pub fn compose_message(business_name: &str, request: &BookingRequest<'_>) -> String {
    format!(
        "Hi {business_name},

I would like to book a driving lesson:

- Name: {name}
- Preferred Date: {date}
- Lesson Type: {label}

Please let me know your availability.

Thank you!",
        name = request.name,
        date = request.date,
        label = request.lesson_label,
    )
}

/// Escape like the browser's `encodeURIComponent`.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Build the protocol link that hands `message` to the visitor's client.
pub fn contact_url(
    method: ContactMethod,
    contact: &BusinessContact,
    message: &str,
    email_subject: &str,
    country_code: &str,
) -> String {
    let body = encode_component(message);
    match method {
        ContactMethod::Email => format!(
            "mailto:{}?subject={}&body={body}",
            contact.email,
            encode_component(email_subject)
        ),
        ContactMethod::Sms => format!("sms:{}?body={body}", contact.phone),
        ContactMethod::WhatsApp => {
            let phone = international_phone(&contact.phone, country_code);
            format!("https://wa.me/{}?text={body}", phone.trim_start_matches('+'))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    fn contact() -> BusinessContact {
        BusinessContact {
            name: "Right School of Motoring".into(),
            phone: "07832185711".into(),
            email: "bookings@example.co.uk".into(),
        }
    }

    #[test]
    fn contact_from_site() {
        assert_eq!(BusinessContact::from_site(&sample_document()).unwrap(), contact());
    }

    #[test]
    fn message_template() {
        let message = compose_message(
            "Right School of Motoring",
            &BookingRequest {
                name: "Sam",
                date: "2026-11-02",
                lesson_label: "Manual Lessons",
            },
        );
        assert_eq!(
            message,
            "Hi Right School of Motoring,\n\nI would like to book a driving lesson:\n\n\
             - Name: Sam\n- Preferred Date: 2026-11-02\n- Lesson Type: Manual Lessons\n\n\
             Please let me know your availability.\n\nThank you!"
        );
    }

    #[test]
    fn encode_matches_encode_uri_component() {
        assert_eq!(encode_component("Hi there,\n"), "Hi%20there%2C%0A");
        assert_eq!(encode_component("a-b_c.d!e~f*g'h(i)"), "a-b_c.d!e~f*g'h(i)");
        assert_eq!(encode_component("&=?/#+"), "%26%3D%3F%2F%23%2B");
        assert_eq!(encode_component("Zoë"), "Zo%C3%AB");
    }

    #[test]
    fn email_link() {
        let url = contact_url(ContactMethod::Email, &contact(), "Hi you", "Driving Lesson Booking Request", "44");
        assert_eq!(
            url,
            "mailto:bookings@example.co.uk?subject=Driving%20Lesson%20Booking%20Request&body=Hi%20you"
        );
    }

    #[test]
    fn sms_link() {
        let url = contact_url(ContactMethod::Sms, &contact(), "Hi", "unused", "44");
        assert_eq!(url, "sms:07832185711?body=Hi");
    }

    #[test]
    fn whatsapp_link_uses_international_number() {
        let url = contact_url(ContactMethod::WhatsApp, &contact(), "Hi", "unused", "44");
        assert_eq!(url, "https://wa.me/447832185711?text=Hi");
    }

    #[test]
    fn method_parse_round_trip() {
        for method in ContactMethod::ALL {
            assert_eq!(method.as_str().parse::<ContactMethod>().unwrap(), method);
        }
        assert!("fax".parse::<ContactMethod>().is_err());
    }

    #[test]
    fn button_ids_follow_dom_selectors() {
        assert_eq!(ContactMethod::Email.button_id(), "contact-email");
        assert_eq!(ContactMethod::Sms.button_id(), "contact-sms");
        assert_eq!(ContactMethod::WhatsApp.button_id(), "contact-whatsapp");
    }
}
