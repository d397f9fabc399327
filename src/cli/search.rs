//! Search subcommand implementation.
//!
//! Handles `gsit search -d <domain>`: runs the collector and writes the report.

use crate::collector::Collector;
use crate::config::AppSettings;
use crate::error::{CliResult, ReportError};
use crate::fetch::HttpFetcher;
use crate::report::{self, ReportFormat};
use crate::sources::SourceId;
use crate::types::Domain;
use chrono::Local;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Search public sources for a domain.
#[derive(Parser, Debug)]
pub struct SearchCommand {
    /// Target domain (e.g. example.com)
    #[arg(short, long, value_name = "DOMAIN")]
    pub domain: String,

    /// Comma-separated sources to query (see `gsit sources`)
    ///
    /// Accepts identifiers or aliases, e.g. "crtsh,hackertarget".
    #[arg(short = 'b', long = "engines", value_delimiter = ',', value_name = "SOURCES")]
    pub engines: Option<Vec<String>>,

    /// Maximum results requested from sources that support a limit
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Per-request timeout in seconds (at least 1)
    #[arg(short, long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Report file (default: report_<domain>_<YYYYMMDD>.<ext>)
    #[arg(short = 'f', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// User-Agent sent to providers
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,

    /// Print the report to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}

impl SearchCommand {
    /// Execute the search command.
    pub async fn execute(
        &self,
        settings: &AppSettings,
        verbose: bool,
        quiet: bool,
        output_dir: Option<&Path>,
    ) -> CliResult<()> {
        let domain = Domain::parse(&self.domain)?;

        let names = self
            .engines
            .clone()
            .unwrap_or_else(|| settings.default_sources.clone());
        for name in &names {
            if name.parse::<SourceId>().is_err() {
                report::print_warning(&format!("ignoring unknown source '{}'", name.trim()));
            }
        }

        let selected = SourceId::parse_selection(&names);
        if selected.is_empty() {
            report::print_warning("no known sources selected, the report will be empty");
        }

        let limit = self.limit.unwrap_or(settings.default_limit);
        let timeout = self
            .timeout
            .map(Duration::from_secs)
            .unwrap_or_else(|| settings.timeout());
        let user_agent = self.user_agent.as_deref().unwrap_or(&settings.user_agent);
        let format = self.format.unwrap_or(settings.default_format);
        let interactive = !quiet && !self.stdout;

        debug!(
            domain = %domain,
            limit,
            timeout_secs = timeout.as_secs(),
            format = %format,
            "search options"
        );

        if interactive {
            let source_names: Vec<&str> = selected.iter().map(|s| s.as_str()).collect();
            report::print_run_header(domain.as_str(), &source_names, limit);
        }

        let fetcher = Arc::new(HttpFetcher::new(user_agent)?);
        let collector = Collector::new(fetcher).with_timeout(timeout);
        let collector = if interactive {
            collector.with_progress()
        } else {
            collector
        };

        let snapshot = collector.run(&domain, limit, &names).await;

        if self.stdout {
            let content = report::render(&snapshot, format)?;
            print!("{}", content);
            return Ok(());
        }

        let path = self.report_path(&domain, format, output_dir);
        let written = report::write_report(&snapshot, format, &path)?;

        if !quiet {
            report::print_summary(&snapshot, Some(&written)).map_err(ReportError::from)?;
            if verbose {
                report::print_info(&format!("Run {} finished", snapshot.run_id()));
            }
            report::print_success(&format!("Report saved to {}", written.display()));
        }

        Ok(())
    }

    /// Where the report goes: `--output` or the default name, placed under
    /// `output_dir` when the path is relative.
    fn report_path(
        &self,
        domain: &Domain,
        format: ReportFormat,
        output_dir: Option<&Path>,
    ) -> PathBuf {
        let path = self.output.clone().unwrap_or_else(|| {
            PathBuf::from(report::default_filename(domain.as_str(), format, Local::now()))
        });

        match output_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;

    fn command(args: &[&str]) -> SearchCommand {
        let mut argv = vec!["search"];
        argv.extend_from_slice(args);
        SearchCommand::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_report_path_default_name() {
        let cmd = command(&["-d", "example.com"]);
        let domain = Domain::parse("example.com").unwrap();

        let path = cmd.report_path(&domain, ReportFormat::Json, None);
        let name = path.to_string_lossy();
        assert!(name.starts_with("report_example.com_"));
        assert!(name.ends_with(".json"));
    }

    #[test]
    fn test_report_path_uses_output_dir_for_relative_paths() {
        let cmd = command(&["-d", "example.com", "-f", "out.csv"]);
        let domain = Domain::parse("example.com").unwrap();

        let path = cmd.report_path(&domain, ReportFormat::Csv, Some(Path::new("reports")));
        assert_eq!(path, Path::new("reports").join("out.csv"));
    }

    #[test]
    fn test_report_path_keeps_absolute_output() {
        let abs = std::env::temp_dir().join("gsit.html");
        let cmd = command(&["-d", "example.com", "-f", abs.to_str().unwrap()]);
        let domain = Domain::parse("example.com").unwrap();

        let path = cmd.report_path(&domain, ReportFormat::Html, Some(Path::new("reports")));
        assert_eq!(path, abs);
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let zero = SearchCommand::try_parse_from(["search", "-d", "example.com", "-t", "0"]);
        assert!(zero.is_err());
        assert_eq!(command(&["-d", "example.com", "-t", "1"]).timeout, Some(1));
    }

    #[tokio::test]
    async fn test_invalid_domain_is_rejected() {
        let cmd = command(&["-d", "bad_label.com"]);
        let result = cmd.execute(&AppSettings::default(), false, true, None).await;
        assert!(matches!(result, Err(CliError::Domain(_))));
    }

    #[tokio::test]
    async fn test_only_unknown_sources_still_writes_report() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        let cmd = command(&[
            "-d", "example.com", "-b", "google,yahoo", "--format", "json",
            "-f", path.to_str().unwrap(),
        ]);

        cmd.execute(&AppSettings::default(), false, true, None).await.unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(json["results"]["hosts"].as_array().unwrap().is_empty());
        assert!(json["results"]["sources"].as_array().unwrap().is_empty());
    }
}
