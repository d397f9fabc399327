use clap::{CommandFactory, Parser};
use gsit::cli::{Cli, Commands};
use gsit::config::AppSettings;
use gsit::error::CliResult;
use gsit::{logging, report};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        // A missing custom file behaves like a missing default one.
        Some(path) if !path.exists() => Ok(AppSettings::default()),
        Some(path) => AppSettings::load_from(path),
        None => AppSettings::load(),
    };
    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            report::print_error(&e.to_string());
            return Ok(ExitCode::FAILURE);
        }
    };

    let verbose = cli.verbose || (settings.verbose && !cli.quiet);
    logging::initialize_logging(verbose, cli.quiet);

    let Some(command) = &cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(ExitCode::SUCCESS);
    };

    match dispatch(command, &cli, &settings, verbose).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            report::print_error(&e.to_string());
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn dispatch(
    command: &Commands,
    cli: &Cli,
    settings: &AppSettings,
    verbose: bool,
) -> CliResult<()> {
    match command {
        Commands::Search(cmd) => {
            cmd.execute(settings, verbose, cli.quiet, cli.output_dir.as_deref())
                .await
        }
        Commands::Sources(cmd) => cmd.execute(),
        Commands::Config(cmd) => cmd.execute(settings, cli.config.as_deref()),
    }
}
