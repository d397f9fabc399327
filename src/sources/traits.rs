//! Source adapter trait abstraction.
//!
//! Defines the closed set of providers and the common interface every
//! adapter implements, so the collector can run them interchangeably.

use crate::error::SourceResult;
use crate::results::Findings;
use crate::types::Domain;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Identifier of a supported data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceId {
    /// Search-engine results page scraping (Bing).
    WebSearch,
    /// Certificate transparency log lookup (crt.sh).
    CertTransparency,
    /// Passive DNS host search (HackerTarget).
    PassiveDns,
    /// Subdomain index aggregator (Anubis).
    SubdomainIndex,
}

impl SourceId {
    /// Every known source, in canonical order.
    pub const ALL: [SourceId; 4] = [
        Self::WebSearch,
        Self::CertTransparency,
        Self::PassiveDns,
        Self::SubdomainIndex,
    ];

    /// Stable identifier used in reports and on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WebSearch => "web-search",
            Self::CertTransparency => "cert-transparency",
            Self::PassiveDns => "passive-dns",
            Self::SubdomainIndex => "subdomain-index",
        }
    }

    /// Provider name accepted as an alias for the identifier.
    pub const fn alias(self) -> &'static str {
        match self {
            Self::WebSearch => "bing",
            Self::CertTransparency => "crtsh",
            Self::PassiveDns => "hackertarget",
            Self::SubdomainIndex => "anubis",
        }
    }

    /// Parse a comma-separated source list, dropping unknown names.
    ///
    /// Unknown names are logged and otherwise ignored. Repeated names keep
    /// the position of their first occurrence.
    pub fn parse_selection<S: AsRef<str>>(names: &[S]) -> Vec<SourceId> {
        let mut selected = Vec::new();
        for name in names {
            match name.as_ref().parse::<SourceId>() {
                Ok(id) if !selected.contains(&id) => selected.push(id),
                Ok(id) => debug!(source = %id, "duplicate source ignored"),
                Err(e) => debug!(error = %e, "unknown source ignored"),
            }
        }
        selected
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SourceId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s || id.alias() == s)
            .ok_or_else(|| format!("unknown source: {}", s))
    }
}

/// Trait for data provider adapters.
///
/// Implementations own the URL template and the response parsing for one
/// provider. `query` reports failures so the collector can record them;
/// `collect` is for callers that only want whatever was found.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Get the source this adapter implements.
    fn source(&self) -> SourceId;

    /// Build the provider URL for `domain`.
    fn url(&self, domain: &Domain, limit: usize) -> String;

    /// Fetch and parse the provider's findings.
    ///
    /// Returns an error only when nothing could be extracted at all: the
    /// request failed or the document as a whole could not be parsed.
    async fn query(&self, domain: &Domain, limit: usize) -> SourceResult<Findings>;

    /// Query the provider, swallowing failures as an empty contribution.
    async fn collect(&self, domain: &Domain, limit: usize) -> Findings {
        match self.query(domain, limit).await {
            Ok(findings) => findings,
            Err(e) => {
                debug!(source = %self.source(), error = %e, "source failed");
                Findings::new()
            }
        }
    }
}

/// A boxed adapter for dynamic dispatch.
pub type BoxedAdapter = Box<dyn SourceAdapter>;
