//! CLI output formatting for every command.
//!
//! Output names what was produced first and where it went second, with
//! paths shown relative to the working root where possible.
//!
//! # Output Format
//!
//! ## Verification
//!
//! ```text
//! Bing verification 0123ABCD4567EF
//!     Written: public/0123ABCD4567EF.txt
//! ```
//!
//! ## Schema.org
//!
//! ```text
//! Organization Right School of Motoring
//!     Telephone: +447832185711
//!     Address: 1 Road, Town, AB1 2CD
//!     Written: public/schema-org.json
//! ```
//!
//! ## Image of the day
//!
//! ```text
//! Image of the day hero-2.jpg
//!     Class: w-full h-full object-cover object-top
//!     Saved: src/data/siteConfig.json
//! ```
//!
//! ## Check
//!
//! ```text
//! ok   verification     public/0123ABCD4567EF.txt
//! FAIL schema-org       No business phone found in siteConfig.json
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::check::CheckItem;
use crate::hero::HeroImage;
use crate::schema_org::Organization;
use crate::verification::VerificationFile;
use std::path::{Path, PathBuf};

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Display `path` relative to `root` when it lives under it.
fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

// ============================================================================
// verification
// ============================================================================

pub fn format_verification(file: &VerificationFile, root: &Path) -> Vec<String> {
    vec![
        format!("Bing verification {}", file.token),
        format!("{}Written: {}", indent(1), display_path(&file.path, root)),
    ]
}

pub fn print_verification(file: &VerificationFile, root: &Path) {
    for line in format_verification(file, root) {
        println!("{}", line);
    }
}

// ============================================================================
// schema-org
// ============================================================================

pub fn format_schema(organization: &Organization, written: &Path, root: &Path) -> Vec<String> {
    let address = &organization.address;
    let address_line = [
        address.street_address.as_deref(),
        address.address_locality.as_deref(),
        address.postal_code.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(", ");

    vec![
        format!("Organization {}", organization.name),
        format!("{}Telephone: {}", indent(1), organization.telephone),
        format!("{}Address: {}", indent(1), address_line),
        format!("{}Written: {}", indent(1), display_path(written, root)),
    ]
}

pub fn print_schema(organization: &Organization, written: &Path, root: &Path) {
    for line in format_schema(organization, written, root) {
        println!("{}", line);
    }
}

// ============================================================================
// image-of-the-day
// ============================================================================

pub fn format_image_of_the_day(image: &HeroImage, saved: &Path, root: &Path) -> Vec<String> {
    vec![
        format!("Image of the day {}", image.src),
        format!("{}Class: {}", indent(1), image.class_name()),
        format!("{}Saved: {}", indent(1), display_path(saved, root)),
    ]
}

pub fn print_image_of_the_day(image: &HeroImage, saved: &Path, root: &Path) {
    for line in format_image_of_the_day(image, saved, root) {
        println!("{}", line);
    }
}

// ============================================================================
// partials
// ============================================================================

pub fn format_partials(written: &[PathBuf], root: &Path) -> Vec<String> {
    let mut lines = vec![format!("Partials ({})", written.len())];
    lines.extend(
        written
            .iter()
            .map(|path| format!("{}{}", indent(1), display_path(path, root))),
    );
    lines
}

pub fn print_partials(written: &[PathBuf], root: &Path) {
    for line in format_partials(written, root) {
        println!("{}", line);
    }
}

// ============================================================================
// check
// ============================================================================

/// One aligned line per item; failures are marked `FAIL`.
pub fn format_check(items: &[CheckItem]) -> Vec<String> {
    let width = items.iter().map(|i| i.name.len()).max().unwrap_or(0);
    let mut lines: Vec<String> = items
        .iter()
        .map(|item| {
            let (status, detail) = match &item.outcome {
                Ok(summary) => ("ok  ", summary),
                Err(message) => ("FAIL", message),
            };
            format!("{status} {:<width$} {detail}", item.name)
        })
        .collect();

    let failed = items.iter().filter(|i| !i.passed()).count();
    lines.push(match failed {
        0 => "Site config is valid".to_string(),
        1 => "1 check failed".to_string(),
        n => format!("{n} checks failed"),
    });
    lines
}

pub fn print_check(items: &[CheckItem]) {
    for line in format_check(items) {
        println!("{}", line);
    }
}
