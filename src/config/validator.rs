//! Settings validation, applied on every load so a bad file never replaces a good snapshot.

use crate::config::Settings;
use crate::error::ConfigError;
use regex::Regex;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+$";

pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if settings.title.trim().is_empty() {
        return Err(ConfigError::Validation("title must not be empty".into()));
    }
    if let Some(email) = &settings.contact_email {
        let re = Regex::new(EMAIL_PATTERN).map_err(|e| ConfigError::Validation(e.to_string()))?;
        if !re.is_match(email) {
            return Err(ConfigError::Validation(format!("contactEmail is not an address: {}", email)));
        }
    }
    Ok(())
}
