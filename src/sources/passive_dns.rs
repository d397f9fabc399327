//! Passive DNS adapter (HackerTarget host search).
//!
//! The response is plain text, one `host,ip` pair per line. Quota and
//! error messages come back as lines without a comma and are skipped.

use crate::error::SourceResult;
use crate::fetch::Fetcher;
use crate::results::Findings;
use crate::sources::traits::{SourceAdapter, SourceId};
use crate::types::Domain;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Endpoint template; `{domain}` is substituted.
pub const ENDPOINT: &str = "https://api.hackertarget.com/hostsearch/?q={domain}";

/// HackerTarget host search.
pub struct PassiveDnsSource {
    fetcher: Arc<dyn Fetcher>,
    timeout: Duration,
}

impl PassiveDnsSource {
    pub fn new(fetcher: Arc<dyn Fetcher>, timeout: Duration) -> Self {
        Self { fetcher, timeout }
    }
}

#[async_trait]
impl SourceAdapter for PassiveDnsSource {
    fn source(&self) -> SourceId {
        SourceId::PassiveDns
    }

    fn url(&self, domain: &Domain, _limit: usize) -> String {
        ENDPOINT.replace("{domain}", domain.as_str())
    }

    async fn query(&self, domain: &Domain, limit: usize) -> SourceResult<Findings> {
        let url = self.url(domain, limit);
        let body = self.fetcher.fetch(&url, self.timeout).await?;
        let findings = parse_host_search(&body);
        debug!(
            source = %self.source(),
            hosts = findings.hosts().len(),
            ips = findings.ips().len(),
            "parsed host search"
        );
        Ok(findings)
    }
}

/// Split each `host,ip` line on its first comma.
///
/// Lines without a comma are ignored; the host side is not filtered
/// against the target domain.
pub fn parse_host_search(body: &str) -> Findings {
    let mut findings = Findings::new();
    for (host, ip) in body.split('\n').filter_map(|line| line.split_once(',')) {
        findings.add_host(host);
        findings.add_ip(ip);
    }
    findings
}
