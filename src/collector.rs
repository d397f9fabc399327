//! Collector - runs source adapters concurrently and merges their findings.
//!
//! Every selected adapter runs in its own task and reports one
//! [`AdapterOutcome`] over a channel. All merging happens in the single
//! receive loop, so the result set never sees concurrent writers. The run
//! ends once every task has settled.

use crate::error::SourceResult;
use crate::fetch::{Fetcher, DEFAULT_TIMEOUT};
use crate::results::{Findings, ResultSet, ResultSnapshot, RunInfo};
use crate::sources::{create_adapter, BoxedAdapter, SourceId};
use crate::types::Domain;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// What one adapter produced: its findings or the reason it produced none.
#[derive(Debug)]
pub struct AdapterOutcome {
    pub source: SourceId,
    pub result: SourceResult<Findings>,
}

/// Concurrent multi-source collection engine.
pub struct Collector {
    fetcher: Arc<dyn Fetcher>,
    timeout: Duration,
    show_progress: bool,
}

impl Collector {
    /// Create a collector whose adapters share `fetcher`.
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            timeout: DEFAULT_TIMEOUT,
            show_progress: false,
        }
    }

    /// Set the per-request timeout handed to each adapter.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Show a terminal spinner while sources are pending.
    pub fn with_progress(mut self) -> Self {
        self.show_progress = true;
        self
    }

    /// Query the selected sources for `domain` and return the frozen results.
    ///
    /// Unknown source names are ignored, repeated names run once. Never
    /// fails: a run where every source failed yields an empty snapshot.
    pub async fn run<S: AsRef<str>>(
        &self,
        domain: &Domain,
        limit: usize,
        selected: &[S],
    ) -> ResultSnapshot {
        let adapters = SourceId::parse_selection(selected)
            .into_iter()
            .map(|source| create_adapter(source, Arc::clone(&self.fetcher), self.timeout))
            .collect();

        self.run_adapters(domain, limit, adapters).await
    }

    /// Run an explicit set of adapters. `sources` in the snapshot follows
    /// the order of `adapters`.
    pub async fn run_adapters(
        &self,
        domain: &Domain,
        limit: usize,
        adapters: Vec<BoxedAdapter>,
    ) -> ResultSnapshot {
        let run = RunInfo::new(domain.clone(), limit);
        let sources: Vec<SourceId> = adapters.iter().map(|a| a.source()).collect();
        let mut results = ResultSet::new(sources.clone());

        let names: Vec<&str> = sources.iter().map(|s| s.as_str()).collect();
        info!(domain = %domain, limit, sources = ?names, "starting collection");

        let progress = self.show_progress.then(|| progress_bar(adapters.len()));

        let (tx, mut rx) = mpsc::channel::<AdapterOutcome>(adapters.len().max(1));
        let handles: Vec<(SourceId, JoinHandle<()>)> = adapters
            .into_iter()
            .map(|adapter| {
                let tx = tx.clone();
                let domain = domain.clone();
                let source = adapter.source();
                let handle = tokio::spawn(async move {
                    let result = adapter.query(&domain, limit).await;
                    // The receiver outlives every sender, so this cannot fail.
                    let _ = tx.send(AdapterOutcome { source, result }).await;
                });
                (source, handle)
            })
            .collect();
        drop(tx);

        while let Some(outcome) = rx.recv().await {
            if let Some(pb) = &progress {
                pb.inc(1);
                pb.set_message(format!("{} done", outcome.source));
                pb.suspend(|| merge_outcome(&mut results, outcome));
            } else {
                merge_outcome(&mut results, outcome);
            }
        }

        // The channel closes once every task has dropped its sender; a task
        // that panicked did so without sending anything.
        for (source, handle) in handles {
            if let Err(e) = handle.await {
                warn!(source = %source, error = %e, "source task aborted");
                results.record_failure(source, format!("task aborted: {}", e));
            }
        }

        if let Some(pb) = progress {
            pb.finish_with_message("collection complete");
        }

        info!(
            domain = %domain,
            hosts = results.host_count(),
            ips = results.ip_count(),
            "collection complete"
        );

        results.freeze(run)
    }
}

/// Fold one adapter's outcome into the aggregate.
fn merge_outcome(results: &mut ResultSet, outcome: AdapterOutcome) {
    match outcome.result {
        Ok(findings) => {
            debug!(
                source = %outcome.source,
                hosts = findings.hosts().len(),
                ips = findings.ips().len(),
                "merging findings"
            );
            results.merge(outcome.source, findings);
        }
        Err(e) => {
            debug!(source = %outcome.source, error = %e, "source contributed nothing");
            results.record_failure(outcome.source, e.to_string());
        }
    }
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {pos}/{len} sources {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
