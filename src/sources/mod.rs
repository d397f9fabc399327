//! Source adapters - one per public data provider.
//!
//! Each adapter owns its provider's URL template and parsing rules. The
//! collector only sees the [`SourceAdapter`] trait.

pub mod cert_transparency;
pub mod passive_dns;
pub mod subdomain_index;
pub mod traits;
pub mod web_search;

pub use cert_transparency::CertTransparencySource;
pub use passive_dns::PassiveDnsSource;
pub use subdomain_index::SubdomainIndexSource;
pub use traits::{BoxedAdapter, SourceAdapter, SourceId};
pub use web_search::WebSearchSource;

use crate::fetch::Fetcher;
use std::sync::Arc;
use std::time::Duration;

/// Create the adapter for `source`, sharing `fetcher`.
pub fn create_adapter(
    source: SourceId,
    fetcher: Arc<dyn Fetcher>,
    timeout: Duration,
) -> BoxedAdapter {
    match source {
        SourceId::WebSearch => Box::new(WebSearchSource::new(fetcher, timeout)),
        SourceId::CertTransparency => Box::new(CertTransparencySource::new(fetcher, timeout)),
        SourceId::PassiveDns => Box::new(PassiveDnsSource::new(fetcher, timeout)),
        SourceId::SubdomainIndex => Box::new(SubdomainIndexSource::new(fetcher, timeout)),
    }
}

/// Endpoint template queried by `source`.
pub const fn endpoint(source: SourceId) -> &'static str {
    match source {
        SourceId::WebSearch => web_search::ENDPOINT,
        SourceId::CertTransparency => cert_transparency::ENDPOINT,
        SourceId::PassiveDns => passive_dns::ENDPOINT,
        SourceId::SubdomainIndex => subdomain_index::ENDPOINT,
    }
}
