//! Target domain type with hostname validation.
//!
//! A `Domain` is the immutable target of one collection run. Adapters
//! match provider output against it by plain substring containment.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated target domain (e.g. `example.com`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Domain(String);

/// Error type for domain parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("domain cannot be empty")]
    Empty,
    #[error("domain too long: {0} characters (max: 253)")]
    TooLong(usize),
    #[error("invalid domain '{domain}': {reason}")]
    InvalidLabel { domain: String, reason: &'static str },
}

impl Domain {
    /// Maximum length of a fully qualified domain name.
    pub const MAX_LEN: usize = 253;

    /// Maximum length of a single label.
    pub const MAX_LABEL_LEN: usize = 63;

    /// Parse and validate a domain, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let s = s.trim();

        if s.is_empty() {
            return Err(DomainError::Empty);
        }
        if s.len() > Self::MAX_LEN {
            return Err(DomainError::TooLong(s.len()));
        }

        for label in s.split('.') {
            if let Some(reason) = label_problem(label) {
                return Err(DomainError::InvalidLabel {
                    domain: s.to_string(),
                    reason,
                });
            }
        }

        Ok(Self(s.to_string()))
    }

    /// Get the domain as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `candidate` mentions this domain.
    ///
    /// This is plain substring containment: `notexample.com` matches
    /// `example.com`. Provider filtering relies on exactly this behavior.
    pub fn is_mentioned_in(&self, candidate: &str) -> bool {
        candidate.contains(self.0.as_str())
    }

    /// Whether `host` looks like a subdomain (contains `.{domain}`).
    pub fn is_subdomain_like(&self, host: &str) -> bool {
        host.contains(&format!(".{}", self.0))
    }
}

fn label_problem(label: &str) -> Option<&'static str> {
    if label.is_empty() {
        return Some("empty label");
    }
    if label.len() > Domain::MAX_LABEL_LEN {
        return Some("label longer than 63 characters");
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Some("label starts or ends with a hyphen");
    }
    if !label.chars().all(|c| c.is_alphanumeric() || c == '-') {
        return Some("label contains invalid characters");
    }
    None
}

impl FromStr for Domain {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Domain {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Domain> for String {
    fn from(domain: Domain) -> Self {
        domain.0
    }
}

impl AsRef<str> for Domain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
