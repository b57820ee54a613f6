use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' does not look like an email address")]
pub struct MalformedEmail(pub String);

/// Contact address accepted at the gate. Only the shape is checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Trims `raw` and checks it has the `local@domain.tld` shape.
    pub fn parse(raw: &str) -> Result<Self, MalformedEmail> {
        let trimmed = raw.trim();
        if is_well_formed(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(MalformedEmail(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn is_well_formed(candidate: &str) -> bool {
    EMAIL_SHAPE.is_match(candidate)
}
