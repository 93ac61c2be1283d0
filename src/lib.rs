//! # rsm-site
//!
//! Build-time generators and browser widget logic for a driving school's
//! static website.
//!
//! The site's content lives in one JSON document, `siteConfig.json`. The
//! static site generator renders pages from it; this crate covers everything
//! around that render:
//!
//! ```text
//! siteConfig.json ──► verification   public/<token>.txt
//!                 ├─► schema_org     public/schema-org.json
//!                 ├─► hero           siteConfig.json (imageOfTheDay, rewritten)
//!                 └─► markup         public/partials/*.html
//! ```
//!
//! and the interactive pieces the pages ship with: an image lightbox, a
//! booking popup that hands a composed message to the visitor's mail, SMS or
//! WhatsApp client, the hero banner randomizer, and the gallery/testimonial
//! shufflers.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`site`] | The `siteConfig.json` document, typed field access, atomic writes |
//! | [`config`] | `rsm-site.toml` loading, validation and merging |
//! | [`verification`] | Bing site verification file |
//! | [`schema_org`] | Organization structured data |
//! | [`hero`] | Image of the day rotation and the page-load hero randomizer |
//! | [`contact`] | Booking message template and `mailto:`/`sms:`/`wa.me` links |
//! | [`shuffle`] | Gallery and testimonial shuffle-and-truncate |
//! | [`widgets`] | Lightbox and booking popup state machines, DOM contract |
//! | [`markup`] | Maud partials that satisfy the DOM contract |
//! | [`check`] | Dry-run validation of every artifact |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Widgets Are Pure State Machines
//!
//! Browser behaviour is modelled as [`widgets::Widget`]s that take events and
//! return DOM effects. Timers are effects too, so animation sequencing,
//! debouncing and stale-callback handling are all plain Rust under test. A
//! thin page adapter applies effects; [`widgets::dom::Harness`] is the
//! headless one used by the test suite.
//!
//! ## Business Details Come From Config
//!
//! Phone numbers, email and business name are read from `siteConfig.json`
//! and handed to the widgets explicitly. No contact detail is compiled in.
//!
//! ## Fail Loudly
//!
//! Every generator returns a typed error for a missing field, and the CLI
//! exits non-zero. A half-configured site never deploys silently.

pub mod check;
pub mod config;
pub mod contact;
pub mod hero;
pub mod markup;
pub mod output;
pub mod schema_org;
pub mod shuffle;
pub mod site;
pub mod verification;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_helpers;
