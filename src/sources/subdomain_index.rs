//! Subdomain index adapter (Anubis).

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
pub const ENDPOINT: &str = "https://jldc.me/anubis/subdomains/{domain}";

/// Anubis subdomain index lookup.
pub struct SubdomainIndexSource {
    fetcher: Arc<dyn Fetcher>,
    timeout: Duration,
}

impl SubdomainIndexSource {
    pub fn new(fetcher: Arc<dyn Fetcher>, timeout: Duration) -> Self {
        Self { fetcher, timeout }
    }
}

#[async_trait]
impl SourceAdapter for SubdomainIndexSource {
    fn source(&self) -> SourceId {
        SourceId::SubdomainIndex
    }

    fn url(&self, domain: &Domain, _limit: usize) -> String {
        ENDPOINT.replace("{domain}", domain.as_str())
    }

    async fn query(&self, domain: &Domain, limit: usize) -> SourceResult<Findings> {
        let url = self.url(domain, limit);
        let body = self.fetcher.fetch(&url, self.timeout).await?;
        let findings = parse_subdomains(&body)?;
        debug!(source = %self.source(), hosts = findings.hosts().len(), "parsed subdomain index");
        Ok(findings)
    }
}

/// Add every string of a JSON array as a host. Other items are skipped.
pub fn parse_subdomains(body: &str) -> SourceResult<Findings> {
    let mut findings = Findings::new();
    if body.trim().is_empty() {
        return Ok(findings);
    }

    let document: Value =
        serde_json::from_str(body).map_err(|e| SourceError::MalformedPayload {
            source_id: SourceId::SubdomainIndex,
            reason: e.to_string(),
        })?;

    let items = document
        .as_array()
        .ok_or(SourceError::UnexpectedStructure {
            source_id: SourceId::SubdomainIndex,
            expected: "a JSON array of hostnames",
        })?;

    for host in items.iter().filter_map(Value::as_str) {
        findings.add_host(host);
    }

    Ok(findings)
}
