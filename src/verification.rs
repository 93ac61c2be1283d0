//! Bing site verification file.
//!
//! Bing Webmaster Tools verifies ownership by fetching
//! `/<token>.txt` and expecting the token as the body. The token lives in
//! `seo.bingSiteVerification`; a missing token fails the build.

use crate::site::{SiteDocument, SiteError, fields};
use std::fs;
use std::path::{Path, PathBuf};

/// A verification file derived from the site config, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationFile {
    pub token: String,
    pub path: PathBuf,
}

impl VerificationFile {
    pub fn from_site(document: &SiteDocument, public_dir: &Path) -> Result<Self, SiteError> {
        let token = document.bing_verification()?;
        validate_token(token)?;
        Ok(Self {
            token: token.to_string(),
            path: public_dir.join(format!("{token}.txt")),
        })
    }

    pub fn write(&self) -> Result<(), SiteError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, &self.token)?;
        Ok(())
    }
}

/// The token becomes a file name, so it must stay a single path component.
fn validate_token(token: &str) -> Result<(), SiteError> {
    if let Some(bad) = token
        .chars()
        .find(|c| matches!(c, '/' | '\\') || c.is_control())
    {
        return Err(SiteError::Invalid {
            field: fields::BING_VERIFICATION,
            reason: format!("token contains {bad:?}"),
        });
    }
    if token == "." || token == ".." {
        return Err(SiteError::Invalid {
            field: fields::BING_VERIFICATION,
            reason: "token is a relative directory".into(),
        });
    }
    Ok(())
}
