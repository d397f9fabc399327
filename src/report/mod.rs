//! Report rendering.
//!
//! Renders a [`ResultSnapshot`] as HTML, JSON, or CSV, and prints the
//! console summary. Nothing here can mutate the snapshot.

mod csv_format;
mod html;
mod json_format;
mod plain;

pub use csv_format::render_csv;
pub use html::render_html;
pub use json_format::render_json;
pub use plain::{
    print_error, print_info, print_run_header, print_success, print_summary, print_warning,
};

use crate::error::{ReportError, ReportResult};
use crate::results::ResultSnapshot;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Self-contained HTML page
    Html,
    /// JSON document
    Json,
    /// CSV table, one row per host
    Csv,
}

impl ReportFormat {
    /// File extension for this format.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl Default for ReportFormat {
    fn default() -> Self {
        Self::Html
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Render `snapshot` in the requested format.
pub fn render(snapshot: &ResultSnapshot, format: ReportFormat) -> ReportResult<String> {
    match format {
        ReportFormat::Html => Ok(render_html(snapshot)),
        ReportFormat::Json => render_json(snapshot),
        ReportFormat::Csv => render_csv(snapshot),
    }
}

/// Default report file name: `report_{domain}_{YYYYMMDD}.{ext}`.
pub fn default_filename(domain: &str, format: ReportFormat, date: DateTime<Local>) -> String {
    format!(
        "report_{}_{}.{}",
        domain,
        date.format("%Y%m%d"),
        format.extension()
    )
}

/// Render `snapshot` and write it to `path`.
pub fn write_report(
    snapshot: &ResultSnapshot,
    format: ReportFormat,
    path: &Path,
) -> ReportResult<PathBuf> {
    let content = render(snapshot, format)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ReportError::WriteFailed {
            path: parent.to_path_buf(),
            reason: e.to_string(),
        })?;
    }

    fs::write(path, content).map_err(|e| ReportError::WriteFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    info!(path = %path.display(), format = %format, "report written");
    Ok(path.to_path_buf())
}
