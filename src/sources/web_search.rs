//! Web search adapter (Bing results page scraping).
//!
//! Best effort: the results page is parsed as HTML and every anchor whose
//! target mentions the domain is kept as-is. Layout changes on the search
//! engine's side simply yield fewer results.

use crate::error::SourceResult;
use crate::fetch::Fetcher;
use crate::results::Findings;
use crate::sources::traits::{SourceAdapter, SourceId};
use crate::types::Domain;
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Endpoint template; `{domain}` and `{limit}` are substituted.
pub const ENDPOINT: &str = "https://www.bing.com/search?q=site:{domain}&count={limit}";

/// Links served through this cache proxy are never reported.
const CACHE_PROXY_PREFIX: &str = "http://webcache.googleusercontent.com";

/// Bing `site:` search.
pub struct WebSearchSource {
    fetcher: Arc<dyn Fetcher>,
    timeout: Duration,
}

impl WebSearchSource {
    pub fn new(fetcher: Arc<dyn Fetcher>, timeout: Duration) -> Self {
        Self { fetcher, timeout }
    }
}

#[async_trait]
impl SourceAdapter for WebSearchSource {
    fn source(&self) -> SourceId {
        SourceId::WebSearch
    }

    fn url(&self, domain: &Domain, limit: usize) -> String {
        ENDPOINT
            .replace("{domain}", domain.as_str())
            .replace("{limit}", &limit.to_string())
    }

    async fn query(&self, domain: &Domain, limit: usize) -> SourceResult<Findings> {
        let url = self.url(domain, limit);
        let body = self.fetcher.fetch(&url, self.timeout).await?;
        let findings = parse_results_page(&body, domain);
        debug!(source = %self.source(), hosts = findings.hosts().len(), "scraped results page");
        Ok(findings)
    }
}

/// Collect anchor targets that mention `domain`.
///
/// The whole `href` is recorded, not just its host part.
pub fn parse_results_page(html: &str, domain: &Domain) -> Findings {
    let mut findings = Findings::new();
    let anchors = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(e) => {
            warn!(error = %e, "invalid anchor selector");
            return findings;
        }
    };

    let document = Html::parse_document(html);
    for href in document
        .select(&anchors)
        .filter_map(|anchor| anchor.value().attr("href"))
    {
        if domain.is_mentioned_in(href) && !href.starts_with(CACHE_PROXY_PREFIX) {
            findings.add_host(href);
        }
    }

    findings
}
