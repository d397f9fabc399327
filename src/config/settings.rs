//! Application settings and paths.
//!
//! Settings live in an XDG-compliant config directory as JSON. A missing
//! file means defaults; command-line flags override whatever is loaded.

use crate::error::{ConfigError, ConfigResult};
use crate::fetch::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::report::ReportFormat;
use crate::sources::SourceId;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Application directory paths following XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/gsit)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Resolve paths using XDG directories.
    pub fn new() -> ConfigResult<Self> {
        let project =
            ProjectDirs::from("com", "gsit", "gsit").ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Sources queried when none are given on the command line.
    pub default_sources: Vec<String>,
    /// Result cap passed to providers that honor one.
    pub default_limit: usize,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// User-Agent sent to providers.
    pub user_agent: String,
    /// Report format when none is given.
    pub default_format: ReportFormat,
    /// Enable verbose output by default.
    pub verbose: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_sources: SourceId::ALL.iter().map(|s| s.to_string()).collect(),
            default_limit: 100,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_format: ReportFormat::Html,
            verbose: false,
        }
    }
}

impl AppSettings {
    /// Load settings from the default location, falling back to defaults
    /// when the file does not exist.
    pub fn load() -> ConfigResult<Self> {
        let file = Paths::new()?.settings_file();

        if !file.exists() {
            debug!(path = %file.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings: Self =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Save settings to a specific file.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| ConfigError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Per-request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.default_limit, 100);
        assert_eq!(settings.timeout(), Duration::from_secs(10));
        assert_eq!(settings.default_sources.len(), 4);
        assert_eq!(settings.default_format, ReportFormat::Html);
        assert!(settings.user_agent.contains("GSIT"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let settings = AppSettings {
            default_sources: vec!["crtsh".to_string()],
            default_limit: 25,
            default_format: ReportFormat::Json,
            ..AppSettings::default()
        };
        settings.save_to(&path).unwrap();

        assert_eq!(AppSettings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "timeout_secs": 3, "default_format": "csv" }"#).unwrap();

        let settings = AppSettings::load_from(&path).unwrap();
        assert_eq!(settings.timeout_secs, 3);
        assert_eq!(settings.default_format, ReportFormat::Csv);
        assert_eq!(settings.default_limit, 100);
    }

    #[test]
    fn test_invalid_and_missing_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            AppSettings::load_from(&path),
            Err(ConfigError::InvalidFormat(_))
        ));
        assert!(matches!(
            AppSettings::load_from(&dir.path().join("missing.json")),
            Err(ConfigError::ReadFailed { .. })
        ));
    }
}
