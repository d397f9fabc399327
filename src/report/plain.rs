//! Console output.
//!
//! Produces the human-readable run summary with colors and formatting.

use crate::results::ResultSnapshot;
use console::style;
use std::io::{self, Write};
use std::path::Path;

const RULE: &str = "═══════════════════════════════════════════════════════════════";
const THIN_RULE: &str = "───────────────────────────────────────────────────────────────";

/// Maximum number of hosts listed in the console summary.
const MAX_LISTED_HOSTS: usize = 20;

/// Print the run summary to stdout.
pub fn print_summary(snapshot: &ResultSnapshot, report_path: Option<&Path>) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_summary(&mut out, snapshot, report_path)
}

fn write_summary<W: Write>(
    out: &mut W,
    snapshot: &ResultSnapshot,
    report_path: Option<&Path>,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(
        out,
        "                    {} Collection Results",
        style("GSIT").cyan().bold()
    )?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(out)?;

    let sources: Vec<&str> = snapshot.sources().iter().map(|s| s.as_str()).collect();
    writeln!(out, "  {} {}", style("Target:").bold(), snapshot.domain())?;
    writeln!(out, "  {} {}", style("Sources:").bold(), sources.join(", "))?;
    writeln!(
        out,
        "  {} {}",
        style("Run ID:").bold(),
        style(snapshot.run_id().short()).dim()
    )?;
    writeln!(out)?;

    writeln!(
        out,
        "  {} {} hosts, {} IPs, {} emails in {:.2}s",
        style("Statistics:").bold(),
        style(snapshot.hosts().len()).green().bold(),
        style(snapshot.ips().len()).green(),
        style(snapshot.emails().len()).green(),
        snapshot.duration_ms() as f64 / 1000.0
    )?;
    writeln!(out)?;

    if snapshot.is_empty() {
        writeln!(out, "  {}", style("No results found.").dim())?;
    } else {
        writeln!(out, "  {}", style(THIN_RULE).dim())?;
        for host in snapshot.hosts().iter().take(MAX_LISTED_HOSTS) {
            writeln!(out, "  {}", host)?;
        }
        let remaining = snapshot.hosts().len().saturating_sub(MAX_LISTED_HOSTS);
        if remaining > 0 {
            writeln!(out, "  {}", style(format!("... and {} more", remaining)).dim())?;
        }
        writeln!(out, "  {}", style(THIN_RULE).dim())?;
    }

    for failure in snapshot.failures() {
        writeln!(
            out,
            "  {} {}: {}",
            style("!").yellow().bold(),
            failure.source,
            style(&failure.reason).dim()
        )?;
    }

    if let Some(path) = report_path {
        writeln!(out)?;
        writeln!(out, "  {} {}", style("Report:").bold(), path.display())?;
    }

    writeln!(out)?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(out)?;

    Ok(())
}

/// Print a header before collection begins.
pub fn print_run_header(domain: &str, sources: &[&str], limit: usize) {
    println!();
    println!(
        "{} {} v{}",
        style("Starting").cyan(),
        style("GSIT").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(
        "{} Target: {}",
        style("•").dim(),
        style(domain).white().bold()
    );
    println!(
        "{} Sources: {}",
        style("•").dim(),
        style(sources.join(", ")).yellow()
    );
    println!("{} Limit: {}", style("•").dim(), limit);
    println!();
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an info message.
pub fn print_info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures;

    fn summary_text(snapshot: &ResultSnapshot, path: Option<&Path>) -> String {
        let mut buf = Vec::new();
        write_summary(&mut buf, snapshot, path).unwrap();
        console::strip_ansi_codes(&String::from_utf8(buf).unwrap()).into_owned()
    }

    #[test]
    fn test_summary_lists_hosts_and_failures() {
        let text = summary_text(&fixtures::snapshot(), Some(Path::new("out.html")));
        assert!(text.contains("Target: example.com"));
        assert!(text.contains("3 hosts, 2 IPs, 0 emails"));
        assert!(text.contains("  www.example.com"));
        assert!(text.contains("web-search: request to https://www.bing.com timed out"));
        assert!(text.contains("Report: out.html"));
    }

    #[test]
    fn test_summary_for_empty_run() {
        let text = summary_text(&fixtures::empty_snapshot(), None);
        assert!(text.contains("No results found."));
        assert!(!text.contains("Report:"));
    }
}
