//! CLI subcommand definitions and handlers.
//!
//! Subcommands:
//! - `gsit search -d <domain>` - Collect hosts, IPs and emails for a domain
//! - `gsit sources` - List the available data sources
//! - `gsit config` - Show or initialize the settings file

mod config;
mod search;
mod sources;

pub use config::ConfigCommand;
pub use search::SearchCommand;
pub use sources::SourcesCommand;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// GSIT - Global Search Intelligence Tool.
///
/// Queries several public data sources concurrently for a target domain
/// and writes the merged hosts, IP addresses and emails as an HTML, JSON
/// or CSV report.
#[derive(Parser, Debug)]
#[command(name = "gsit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Passive reconnaissance across public data sources", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to custom configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory for report files
    #[arg(long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search public sources for a domain
    #[command(alias = "s")]
    Search(SearchCommand),

    /// List available data sources
    #[command(alias = "ls")]
    Sources(SourcesCommand),

    /// Show or initialize settings
    #[command(alias = "c")]
    Config(ConfigCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportFormat;

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from([
            "gsit", "search", "-d", "example.com", "-b", "crtsh,hackertarget", "-l", "50",
            "--format", "json",
        ])
        .unwrap();

        let Some(Commands::Search(cmd)) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(cmd.domain, "example.com");
        assert_eq!(
            cmd.engines,
            Some(vec!["crtsh".to_string(), "hackertarget".to_string()])
        );
        assert_eq!(cmd.limit, Some(50));
        assert_eq!(cmd.format, Some(ReportFormat::Json));
        assert!(!cmd.stdout);
    }

    #[test]
    fn test_search_alias_and_global_flags() {
        let cli =
            Cli::try_parse_from(["gsit", "s", "-d", "example.com", "-v", "--output-dir", "out"])
                .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.output_dir, Some(PathBuf::from("out")));
        assert!(matches!(cli.command, Some(Commands::Search(_))));
    }

    #[test]
    fn test_search_requires_domain() {
        assert!(Cli::try_parse_from(["gsit", "search"]).is_err());
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["gsit", "-v", "-q", "sources"]).is_err());
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["gsit"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_sources_alias() {
        let cli = Cli::try_parse_from(["gsit", "ls"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Sources(_))));
    }
}
