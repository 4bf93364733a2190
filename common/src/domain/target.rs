//! # Scan Target Model
//!
//! The single domain a run is pointed at, e.g. `example.com`.

use std::fmt;
use std::str::FromStr;

use super::normalize;

/// A validated target domain.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TargetDomain(String);

impl TargetDomain {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TargetDomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for TargetDomain {
    type Err = String;

    /// Parses a target such as `example.com` or ` www.example.com `.
    ///
    /// The input is normalized first. It must then be non-empty, contain at least one dot,
    /// and carry no whitespace, path separators or empty labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let domain: String = normalize(s);

        if domain.is_empty() {
            return Err("target domain cannot be empty".to_string());
        }
        if domain.chars().any(|c| c.is_whitespace() || c == '/' || c == '\\') {
            return Err(format!("invalid target domain: {s}"));
        }
        if !domain.contains('.') {
            return Err(format!("target domain needs at least two labels: {s}"));
        }
        if domain.split('.').any(str::is_empty) {
            return Err(format!("target domain has an empty label: {s}"));
        }

        Ok(Self(domain))
    }
}
