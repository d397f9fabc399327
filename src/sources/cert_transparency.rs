//! Certificate transparency adapter (crt.sh).
//!
//! crt.sh returns a JSON array of certificate entries. One entry's
//! `name_value` can pack several SAN names separated by newlines.

use crate::error::{SourceError, SourceResult};
use crate::fetch::Fetcher;
use crate::results::Findings;
use crate::sources::traits::{SourceAdapter, SourceId};
use crate::types::Domain;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Endpoint template; `{domain}` is substituted.
pub const ENDPOINT: &str = "https://crt.sh/?q=%25.{domain}&output=json";

/// crt.sh certificate search.
pub struct CertTransparencySource {
    fetcher: Arc<dyn Fetcher>,
    timeout: Duration,
}

impl CertTransparencySource {
    pub fn new(fetcher: Arc<dyn Fetcher>, timeout: Duration) -> Self {
        Self { fetcher, timeout }
    }
}

#[async_trait]
impl SourceAdapter for CertTransparencySource {
    fn source(&self) -> SourceId {
        SourceId::CertTransparency
    }

    fn url(&self, domain: &Domain, _limit: usize) -> String {
        ENDPOINT.replace("{domain}", domain.as_str())
    }

    async fn query(&self, domain: &Domain, limit: usize) -> SourceResult<Findings> {
        let url = self.url(domain, limit);
        let body = self.fetcher.fetch(&url, self.timeout).await?;
        let findings = parse_certificates(&body, domain)?;
        debug!(source = %self.source(), hosts = findings.hosts().len(), "parsed certificates");
        Ok(findings)
    }
}

/// Extract SAN names mentioning `domain` from a crt.sh JSON response.
///
/// An empty body yields no findings. Entries without a string
/// `name_value` are skipped.
pub fn parse_certificates(body: &str, domain: &Domain) -> SourceResult<Findings> {
    let mut findings = Findings::new();
    if body.trim().is_empty() {
        return Ok(findings);
    }

    let document: Value =
        serde_json::from_str(body).map_err(|e| SourceError::MalformedPayload {
            source_id: SourceId::CertTransparency,
            reason: e.to_string(),
        })?;

    let entries = document
        .as_array()
        .ok_or(SourceError::UnexpectedStructure {
            source_id: SourceId::CertTransparency,
            expected: "a JSON array of certificate entries",
        })?;

    for names in entries
        .iter()
        .filter_map(|entry| entry.get("name_value").and_then(Value::as_str))
    {
        for name in names.split('\n').map(str::trim) {
            if !name.is_empty() && domain.is_mentioned_in(name) {
                findings.add_host(name);
            }
        }
    }

    Ok(findings)
}
