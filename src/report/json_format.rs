//! JSON report rendering.

use crate::error::ReportResult;
use crate::results::{ResultSnapshot, SourceFailure};
use crate::sources::SourceId;
use crate::types::RunId;
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    run_id: RunId,
    domain: &'a str,
    date: String,
    limit: usize,
    results: JsonResults<'a>,
    failures: &'a [SourceFailure],
}

#[derive(Serialize)]
struct JsonResults<'a> {
    hosts: &'a [String],
    ips: &'a [String],
    emails: &'a [String],
    sources: &'a [SourceId],
}

/// Render the snapshot as a pretty-printed JSON document.
pub fn render_json(snapshot: &ResultSnapshot) -> ReportResult<String> {
    let report = JsonReport {
        run_id: snapshot.run_id(),
        domain: snapshot.domain().as_str(),
        date: snapshot.completed_at().to_rfc3339(),
        limit: snapshot.limit(),
        results: JsonResults {
            hosts: snapshot.hosts(),
            ips: snapshot.ips(),
            emails: snapshot.emails(),
            sources: snapshot.sources(),
        },
        failures: snapshot.failures(),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}
