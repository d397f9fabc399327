//! Result sets for one collection run.
//!
//! [`Findings`] is what a single adapter extracted, [`ResultSet`] is the
//! append-only aggregate the collector merges into, and [`ResultSnapshot`]
//! is the frozen view handed to reporting.

use crate::sources::SourceId;
use crate::types::{Domain, RunId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Insert a trimmed, non-empty copy of `value` into `set`.
fn insert_trimmed(set: &mut BTreeSet<String>, value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }
    set.insert(value.to_string())
}

/// Hosts, IPs, and emails extracted by one adapter invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
    hosts: BTreeSet<String>,
    ips: BTreeSet<String>,
    emails: BTreeSet<String>,
}

impl Findings {
    /// Create an empty set of findings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a host. Returns `false` for blank or duplicate values.
    pub fn add_host(&mut self, host: &str) -> bool {
        insert_trimmed(&mut self.hosts, host)
    }

    /// Add an IP address. Returns `false` for blank or duplicate values.
    pub fn add_ip(&mut self, ip: &str) -> bool {
        insert_trimmed(&mut self.ips, ip)
    }

    /// Add an email address. Returns `false` for blank or duplicate values.
    pub fn add_email(&mut self, email: &str) -> bool {
        insert_trimmed(&mut self.emails, email)
    }

    pub fn hosts(&self) -> &BTreeSet<String> {
        &self.hosts
    }

    pub fn ips(&self) -> &BTreeSet<String> {
        &self.ips
    }

    pub fn emails(&self) -> &BTreeSet<String> {
        &self.emails
    }

    /// Total number of distinct entries across all categories.
    pub fn len(&self) -> usize {
        self.hosts.len() + self.ips.len() + self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A source that contributed nothing because its query failed outright.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFailure {
    pub source: SourceId,
    pub reason: String,
}

/// Metadata describing one collection run.
#[derive(Debug, Clone)]
pub struct RunInfo {
    pub run_id: RunId,
    pub domain: Domain,
    pub limit: usize,
    pub started_at: DateTime<Utc>,
}

impl RunInfo {
    /// Start describing a new run now.
    pub fn new(domain: Domain, limit: usize) -> Self {
        Self {
            run_id: RunId::new(),
            domain,
            limit,
            started_at: Utc::now(),
        }
    }
}

/// Mutable aggregate built while adapters complete.
///
/// Entries are only ever added. Merging is a set union, so the final
/// contents do not depend on the order in which adapters finish.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    hosts: BTreeMap<String, BTreeSet<SourceId>>,
    ips: BTreeSet<String>,
    emails: BTreeSet<String>,
    sources_used: Vec<SourceId>,
    failures: Vec<SourceFailure>,
}

impl ResultSet {
    /// Create an empty result set for the given scheduled sources.
    pub fn new(sources_used: Vec<SourceId>) -> Self {
        Self {
            sources_used,
            ..Self::default()
        }
    }

    /// Union one adapter's findings into the aggregate.
    pub fn merge(&mut self, source: SourceId, findings: Findings) {
        for host in findings.hosts {
            self.hosts.entry(host).or_default().insert(source);
        }
        self.ips.extend(findings.ips);
        self.emails.extend(findings.emails);
    }

    /// Record that `source` failed and contributed nothing.
    pub fn record_failure(&mut self, source: SourceId, reason: impl Into<String>) {
        self.failures.push(SourceFailure {
            source,
            reason: reason.into(),
        });
    }

    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }

    pub fn ip_count(&self) -> usize {
        self.ips.len()
    }

    pub fn sources_used(&self) -> &[SourceId] {
        &self.sources_used
    }

    /// Freeze the aggregate into a read-only snapshot.
    pub fn freeze(mut self, run: RunInfo) -> ResultSnapshot {
        let order = self.sources_used.clone();
        self.failures.sort_by_key(|failure| {
            order
                .iter()
                .position(|s| *s == failure.source)
                .unwrap_or(usize::MAX)
        });

        let host_sources: BTreeMap<String, Vec<SourceId>> = self
            .hosts
            .iter()
            .map(|(host, sources)| (host.clone(), sources.iter().copied().collect()))
            .collect();

        ResultSnapshot {
            run_id: run.run_id,
            domain: run.domain,
            limit: run.limit,
            started_at: run.started_at,
            completed_at: Utc::now(),
            hosts: self.hosts.into_keys().collect(),
            ips: self.ips.into_iter().collect(),
            emails: self.emails.into_iter().collect(),
            sources: self.sources_used,
            host_sources,
            failures: self.failures,
        }
    }
}

/// Immutable view of a finished run. This is the only thing reports see.
#[derive(Debug, Clone, Serialize)]
pub struct ResultSnapshot {
    run_id: RunId,
    domain: Domain,
    limit: usize,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    hosts: Vec<String>,
    ips: Vec<String>,
    emails: Vec<String>,
    sources: Vec<SourceId>,
    host_sources: BTreeMap<String, Vec<SourceId>>,
    failures: Vec<SourceFailure>,
}

impl ResultSnapshot {
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Hosts in sorted order.
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    /// IP addresses in sorted order.
    pub fn ips(&self) -> &[String] {
        &self.ips
    }

    /// Email addresses in sorted order.
    pub fn emails(&self) -> &[String] {
        &self.emails
    }

    /// Sources that were scheduled, in selection order.
    pub fn sources(&self) -> &[SourceId] {
        &self.sources
    }

    /// Sources that reported `host`, in canonical order.
    pub fn sources_for(&self, host: &str) -> &[SourceId] {
        self.host_sources.get(host).map_or(&[], Vec::as_slice)
    }

    /// Sources that failed outright, in selection order.
    pub fn failures(&self) -> &[SourceFailure] {
        &self.failures
    }

    /// True when no host, IP, or email was found.
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty() && self.ips.is_empty() && self.emails.is_empty()
    }

    /// Wall-clock duration of the run in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        u64::try_from(
            (self.completed_at - self.started_at)
                .num_milliseconds()
                .max(0),
        )
        .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_info() -> RunInfo {
        RunInfo::new(Domain::parse("example.com").unwrap(), 100)
    }

    fn findings(hosts: &[&str], ips: &[&str]) -> Findings {
        let mut f = Findings::new();
        for h in hosts {
            f.add_host(h);
        }
        for ip in ips {
            f.add_ip(ip);
        }
        f
    }

    #[test]
    fn test_findings_trim_and_reject_blank() {
        let mut f = Findings::new();
        assert!(f.add_host("  a.example.com \n"));
        assert!(!f.add_host("a.example.com"));
        assert!(!f.add_host("   "));
        assert!(!f.add_ip(""));
        assert!(f.add_email(" admin@example.com"));
        assert_eq!(f.hosts().iter().next().unwrap(), "a.example.com");
        assert_eq!(f.len(), 2);
    }

    #[test]
    fn test_merge_collapses_duplicates_and_attributes() {
        let mut set = ResultSet::new(vec![SourceId::CertTransparency, SourceId::PassiveDns]);
        set.merge(
            SourceId::CertTransparency,
            findings(&["a.example.com", "b.example.com"], &[]),
        );
        set.merge(
            SourceId::PassiveDns,
            findings(&["b.example.com"], &["1.2.3.4"]),
        );

        let snapshot = set.freeze(run_info());
        assert_eq!(snapshot.hosts(), ["a.example.com", "b.example.com"]);
        assert_eq!(snapshot.ips(), ["1.2.3.4"]);
        assert_eq!(
            snapshot.sources_for("b.example.com"),
            [SourceId::CertTransparency, SourceId::PassiveDns]
        );
        assert_eq!(
            snapshot.sources_for("a.example.com"),
            [SourceId::CertTransparency]
        );
        assert!(snapshot.sources_for("missing.example.com").is_empty());
    }

    #[test]
    fn test_merge_order_does_not_matter() {
        let a = findings(&["x.example.com", "y.example.com"], &["10.0.0.1"]);
        let b = findings(&["y.example.com", "z.example.com"], &["10.0.0.2"]);

        let mut forward = ResultSet::new(vec![SourceId::WebSearch, SourceId::SubdomainIndex]);
        forward.merge(SourceId::WebSearch, a.clone());
        forward.merge(SourceId::SubdomainIndex, b.clone());

        let mut backward = ResultSet::new(vec![SourceId::WebSearch, SourceId::SubdomainIndex]);
        backward.merge(SourceId::SubdomainIndex, b.clone());
        backward.merge(SourceId::WebSearch, a.clone());
        // Merging the same findings twice changes nothing.
        backward.merge(SourceId::WebSearch, a);

        let forward = forward.freeze(run_info());
        let backward = backward.freeze(run_info());
        assert_eq!(forward.hosts(), backward.hosts());
        assert_eq!(forward.ips(), backward.ips());
        assert_eq!(
            forward.sources_for("y.example.com"),
            backward.sources_for("y.example.com")
        );
    }

    #[test]
    fn test_failures_sorted_by_selection_order() {
        let mut set = ResultSet::new(vec![SourceId::PassiveDns, SourceId::WebSearch]);
        set.record_failure(SourceId::WebSearch, "timed out");
        set.record_failure(SourceId::PassiveDns, "connection refused");

        let snapshot = set.freeze(run_info());
        let order: Vec<SourceId> = snapshot.failures().iter().map(|f| f.source).collect();
        assert_eq!(order, vec![SourceId::PassiveDns, SourceId::WebSearch]);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = ResultSet::new(Vec::new()).freeze(run_info());
        assert!(snapshot.is_empty());
        assert!(snapshot.sources().is_empty());
        assert_eq!(snapshot.domain().as_str(), "example.com");
        assert_eq!(snapshot.limit(), 100);
        assert!(snapshot.completed_at() >= snapshot.started_at());
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut set = ResultSet::new(vec![SourceId::SubdomainIndex]);
        set.merge(SourceId::SubdomainIndex, findings(&["x.example.com"], &[]));
        let json = serde_json::to_value(set.freeze(run_info())).unwrap();
        assert_eq!(json["domain"], "example.com");
        assert_eq!(json["hosts"][0], "x.example.com");
        assert_eq!(json["sources"][0], "subdomain-index");
    }
}
