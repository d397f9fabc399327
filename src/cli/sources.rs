//! Sources subcommand implementation.

use crate::error::CliResult;
use crate::sources::{endpoint, SourceId};
use clap::Parser;
use console::style;

/// List the available data sources.
#[derive(Parser, Debug)]
pub struct SourcesCommand {
    /// Print identifiers only, one per line
    #[arg(long)]
    pub names_only: bool,
}

impl SourcesCommand {
    /// Execute the sources command.
    pub fn execute(&self) -> CliResult<()> {
        if self.names_only {
            for source in SourceId::ALL {
                println!("{}", source);
            }
            return Ok(());
        }

        println!("{}", style("Available sources:").bold());
        println!();
        for line in source_lines() {
            println!("  {}", line);
        }
        println!();
        println!(
            "{}",
            style("Select with -b, e.g. `gsit search -d example.com -b crtsh,anubis`").dim()
        );

        Ok(())
    }
}

fn source_lines() -> Vec<String> {
    SourceId::ALL
        .iter()
        .map(|source| {
            format!(
                "{:<18} {:<13} {}",
                source.as_str(),
                format!("({})", source.alias()),
                endpoint(*source)
            )
        })
        .collect()
}
