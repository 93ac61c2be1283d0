//! Tool configuration module.
//!
//! Handles loading, validating, and merging `rsm-site.toml`. The file is
//! optional: stock defaults cover the live site, and a user file overrides
//! only the keys it names.
//!
//! This is distinct from the site config store (`siteConfig.json`, see
//! [`crate::site`]), which holds the content the commands read. The tool
//! config holds paths, locale rules and widget tuning.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [paths]
//! site_config = "src/data/siteConfig.json"
//! public_dir = "public"
//!
//! [locale]
//! country_code = "44"          # Dialling code used for +44 / wa.me links
//! address_country = "GB"
//! languages = ["English"]
//!
//! [lightbox]
//! swipe_threshold = 50.0       # Minimum horizontal swipe distance
//! transition_ms = 300
//! image_fade_ms = 100
//! key_debounce_ms = 150
//!
//! [booking]
//! months_ahead = 3
//! email_subject = "Driving Lesson Booking Request"
//!
//! [[booking.lesson_types]]
//! value = "manual"
//! label = "Manual Lessons"
//!
//! [randomizers]
//! gallery_visible = 9
//! testimonials_visible = 3
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// File name looked up in the project root.
pub const CONFIG_FILENAME: &str = "rsm-site.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `rsm-site.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Where the site config lives and where artifacts are written.
    pub paths: PathsConfig,
    /// Country rules for phone numbers and postal addresses.
    pub locale: LocaleConfig,
    /// Lightbox gesture threshold and animation timings.
    pub lightbox: LightboxConfig,
    /// Booking popup date range, email subject, lesson options.
    pub booking: BookingConfig,
    /// How many shuffled items stay visible.
    pub randomizers: RandomizerConfig,
}

impl ToolConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let code = &self.locale.country_code;
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::Validation(
                "locale.country_code must be digits only, e.g. \"44\"".into(),
            ));
        }
        if !(self.lightbox.swipe_threshold > 0.0) {
            return Err(ConfigError::Validation(
                "lightbox.swipe_threshold must be positive".into(),
            ));
        }
        if self.booking.months_ahead == 0 || self.booking.months_ahead > 24 {
            return Err(ConfigError::Validation(
                "booking.months_ahead must be 1-24".into(),
            ));
        }
        if self.booking.lesson_types.is_empty() {
            return Err(ConfigError::Validation(
                "booking.lesson_types must not be empty".into(),
            ));
        }
        let mut seen = HashSet::new();
        for option in &self.booking.lesson_types {
            if option.value.is_empty() {
                return Err(ConfigError::Validation(
                    "booking.lesson_types values must not be empty".into(),
                ));
            }
            if !seen.insert(option.value.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate booking lesson type '{}'",
                    option.value
                )));
            }
        }
        if self.randomizers.gallery_visible == 0 || self.randomizers.testimonials_visible == 0 {
            return Err(ConfigError::Validation(
                "randomizers visible counts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Site config JSON, relative to the project root.
    pub site_config: PathBuf,
    /// Directory served as-is; generated files land here.
    pub public_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            site_config: PathBuf::from("src/data/siteConfig.json"),
            public_dir: PathBuf::from("public"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocaleConfig {
    /// International dialling code without `+`.
    pub country_code: String,
    /// ISO country for `PostalAddress.addressCountry`.
    pub address_country: String,
    /// `ContactPoint.availableLanguage`.
    pub languages: Vec<String>,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            country_code: "44".to_string(),
            address_country: "GB".to_string(),
            languages: vec!["English".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightboxConfig {
    pub swipe_threshold: f64,
    /// Modal fade/scale transition.
    pub transition_ms: u64,
    /// Image dim-then-swap delay; navigation is blocked meanwhile.
    pub image_fade_ms: u64,
    /// Trailing-edge debounce for keyboard navigation.
    pub key_debounce_ms: u64,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: 50.0,
            transition_ms: 300,
            image_fade_ms: 100,
            key_debounce_ms: 150,
        }
    }
}

impl LightboxConfig {
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn image_fade(&self) -> Duration {
        Duration::from_millis(self.image_fade_ms)
    }

    pub fn key_debounce(&self) -> Duration {
        Duration::from_millis(self.key_debounce_ms)
    }
}

/// An `<option>` of the lesson type select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LessonTypeOption {
    pub value: String,
    pub label: String,
}

impl LessonTypeOption {
    fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BookingConfig {
    /// Upper bound of the date picker, in calendar months from today.
    pub months_ahead: u32,
    pub email_subject: String,
    /// Modal fade/scale transition.
    pub transition_ms: u64,
    /// Options in display order; the first is the form default.
    pub lesson_types: Vec<LessonTypeOption>,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            months_ahead: 3,
            email_subject: "Driving Lesson Booking Request".to_string(),
            transition_ms: 300,
            lesson_types: vec![
                LessonTypeOption::new("manual", "Manual Lessons"),
                LessonTypeOption::new("automatic", "Automatic Lessons"),
                LessonTypeOption::new("intensive", "Intensive Course"),
                LessonTypeOption::new("refresher", "Refresher Lessons"),
                LessonTypeOption::new("pass-plus", "Pass Plus"),
            ],
        }
    }
}

impl BookingConfig {
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RandomizerConfig {
    pub gallery_visible: usize,
    pub testimonials_visible: usize,
}

impl Default for RandomizerConfig {
    fn default() -> Self {
        Self {
            gallery_visible: 9,
            testimonials_visible: 3,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ToolConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, so
///   `[[booking.lesson_types]]` in a user file replaces the stock list.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `rsm-site.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ToolConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ToolConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `rsm-site.toml` in the given directory.
pub fn load_config(root: &Path) -> Result<ToolConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(root)?)
}

/// Returns a fully-commented stock `rsm-site.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# rsm-site configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Paths (relative to the directory holding this file)
# ---------------------------------------------------------------------------
[paths]
# JSON document with site text, business details and image lists.
site_config = "src/data/siteConfig.json"

# Static directory copied as-is by the site generator. Generated files
# (verification file, schema-org.json, partials/) are written here.
public_dir = "public"

# ---------------------------------------------------------------------------
# Locale
# ---------------------------------------------------------------------------
[locale]
# Dialling code without '+'. "07832 185711" becomes "+447832185711".
country_code = "44"

# schema.org PostalAddress.addressCountry
address_country = "GB"

# schema.org ContactPoint.availableLanguage
languages = ["English"]

# ---------------------------------------------------------------------------
# Lightbox
# ---------------------------------------------------------------------------
[lightbox]
# Minimum horizontal travel for a swipe to change image.
swipe_threshold = 50.0

# Modal fade/scale duration.
transition_ms = 300

# Image dim-then-swap delay. Navigation is ignored while it runs.
image_fade_ms = 100

# Only the last arrow/Escape key within this window acts.
key_debounce_ms = 150

# ---------------------------------------------------------------------------
# Booking popup
# ---------------------------------------------------------------------------
[booking]
# The date picker allows today up to this many months ahead.
months_ahead = 3

# Subject line of the mailto: link.
email_subject = "Driving Lesson Booking Request"

# Modal fade/scale duration.
transition_ms = 300

# Lesson type options, in display order. The first one is the default.
# Listing any entries here replaces the whole default list.
[[booking.lesson_types]]
value = "manual"
label = "Manual Lessons"

[[booking.lesson_types]]
value = "automatic"
label = "Automatic Lessons"

[[booking.lesson_types]]
value = "intensive"
label = "Intensive Course"

[[booking.lesson_types]]
value = "refresher"
label = "Refresher Lessons"

[[booking.lesson_types]]
value = "pass-plus"
label = "Pass Plus"

# ---------------------------------------------------------------------------
# Randomizers
# ---------------------------------------------------------------------------
[randomizers]
# Items left visible after shuffling.
gallery_visible = 9
testimonials_visible = 3
"##
}
