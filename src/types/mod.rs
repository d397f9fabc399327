//! Core type definitions using newtype patterns for type safety.
//!
//! These types keep unvalidated strings from reaching the collector.

mod domain;
mod run_id;

pub use domain::{Domain, DomainError};
pub use run_id::RunId;
