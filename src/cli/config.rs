//! Config subcommand implementation.

use crate::config::{AppSettings, Paths};
use crate::error::{CliError, CliResult, ConfigError};
use crate::report;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

/// Show the active settings or write a settings file.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Write the default settings file
    #[arg(long)]
    pub init: bool,

    /// Overwrite an existing settings file with --init
    #[arg(long, requires = "init")]
    pub force: bool,
}

impl ConfigCommand {
    /// Execute the config command.
    pub fn execute(&self, settings: &AppSettings, config_path: Option<&Path>) -> CliResult<()> {
        let path = match config_path {
            Some(path) => path.to_path_buf(),
            None => Paths::new()?.settings_file(),
        };

        if self.init {
            let written = init_settings(&path, self.force)?;
            report::print_success(&format!("Wrote default settings to {}", written.display()));
            return Ok(());
        }

        report::print_info(&format!("Settings file: {}", path.display()));
        let content = serde_json::to_string_pretty(settings).map_err(ConfigError::from)?;
        println!("{}", content);
        Ok(())
    }
}

fn init_settings(path: &Path, force: bool) -> CliResult<PathBuf> {
    if path.exists() && !force {
        return Err(CliError::Other(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(ConfigError::from)?;
    }

    AppSettings::default().save_to(path)?;
    Ok(path.to_path_buf())
}
