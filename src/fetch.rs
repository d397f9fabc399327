//! HTTP fetching for source adapters.
//!
//! Every provider query goes through the [`Fetcher`] trait: one GET, a
//! per-request timeout, and a fixed client identity. The body is returned
//! as text whatever the status code; adapters decide what an error page
//! means for them. Failures are returned, not logged; the collector
//! reports them once.

use crate::error::{FetchError, FetchResult};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default User-Agent sent with every request.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; GSIT/1.0; +https://github.com/yourrepo/gsit)";

/// Trait for performing a single outbound HTTP GET.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url` and return the full response body as text.
    async fn fetch(&self, url: &str, timeout: Duration) -> FetchResult<String>;
}

/// `reqwest`-backed fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher that identifies itself with `user_agent`.
    pub fn new(user_agent: &str) -> FetchResult<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    /// Create a fetcher with the default identity.
    pub fn with_default_agent() -> FetchResult<Self> {
        Self::new(DEFAULT_USER_AGENT)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> FetchResult<String> {
        debug!(url, timeout_secs = timeout.as_secs(), "GET");

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(url, &e))?;

        debug!(url, status = response.status().as_u16(), "response received");

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Body {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        })
    }
}

/// Map a `reqwest` error to a typed fetch failure.
fn classify(url: &str, e: &reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if e.is_connect() {
        FetchError::Connect {
            url: url.to_string(),
            reason: e.to_string(),
        }
    } else {
        FetchError::Request {
            url: url.to_string(),
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Network-free fetchers for adapter and collector tests.

    use super::*;
    use std::sync::Mutex;

    /// Returns a canned body for every request and records requested URLs.
    #[derive(Debug, Default)]
    pub struct StaticFetcher {
        body: String,
        pub requested: Mutex<Vec<String>>,
    }

    impl StaticFetcher {
        pub fn new(body: impl Into<String>) -> Self {
            Self {
                body: body.into(),
                requested: Mutex::new(Vec::new()),
            }
        }

        pub fn last_url(&self) -> Option<String> {
            self.requested.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl Fetcher for StaticFetcher {
        async fn fetch(&self, url: &str, _timeout: Duration) -> FetchResult<String> {
            self.requested.lock().unwrap().push(url.to_string());
            Ok(self.body.clone())
        }
    }

    /// Fails every request with a timeout.
    #[derive(Debug, Default)]
    pub struct FailingFetcher;

    #[async_trait]
    impl Fetcher for FailingFetcher {
        async fn fetch(&self, url: &str, _timeout: Duration) -> FetchResult<String> {
            Err(FetchError::Timeout {
                url: url.to_string(),
            })
        }
    }

    /// Serves bodies by URL substring; unmatched URLs fail to connect.
    #[derive(Debug, Default)]
    pub struct RoutedFetcher {
        routes: Vec<(String, String)>,
    }

    impl RoutedFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn route(mut self, fragment: &str, body: &str) -> Self {
            self.routes.push((fragment.to_string(), body.to_string()));
            self
        }
    }

    #[async_trait]
    impl Fetcher for RoutedFetcher {
        async fn fetch(&self, url: &str, _timeout: Duration) -> FetchResult<String> {
            self.routes
                .iter()
                .find(|(fragment, _)| url.contains(fragment.as_str()))
                .map(|(_, body)| body.clone())
                .ok_or_else(|| FetchError::Connect {
                    url: url.to_string(),
                    reason: "connection refused".to_string(),
                })
        }
    }
}
