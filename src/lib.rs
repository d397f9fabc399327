//! # GSIT - Global Search Intelligence Tool
//!
//! GSIT collects subdomains, IP addresses and email addresses for a target
//! domain from several public data sources at once, merges what they report
//! and renders the result as an HTML, JSON or CSV report.
//!
//! ## Features
//!
//! - **Concurrent Collection**: Every selected source runs in its own task
//! - **Failure Isolation**: A slow or broken provider never sinks the run
//! - **Source Attribution**: Each host records which sources reported it
//! - **Multiple Report Formats**: HTML, JSON, and CSV
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use gsit::{Collector, Domain, HttpFetcher};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let fetcher = Arc::new(HttpFetcher::with_default_agent().unwrap());
//!     let domain = Domain::parse("example.com").unwrap();
//!
//!     let snapshot = Collector::new(fetcher)
//!         .run(&domain, 100, &["crtsh", "hackertarget"])
//!         .await;
//!
//!     for host in snapshot.hosts() {
//!         println!("{host}");
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Validated domain and run identifiers
//! - [`fetch`] - The HTTP seam shared by every source
//! - [`sources`] - One adapter per public provider
//! - [`collector`] - Concurrent fan-out and merging
//! - [`results`] - The append-only result set and its frozen snapshot
//! - [`report`] - Report rendering and console output
//! - [`config`] - Settings file handling
//! - [`error`] - Error types

pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod report;
pub mod results;
pub mod sources;
pub mod types;

// Re-export commonly used types
pub use collector::Collector;
pub use error::{CliError, FetchError, SourceError};
pub use fetch::{Fetcher, HttpFetcher};
pub use report::ReportFormat;
pub use results::{Findings, ResultSnapshot};
pub use sources::{SourceAdapter, SourceId};
pub use types::{Domain, RunId};
