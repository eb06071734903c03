//! Optional user settings.
//!
//! Read from `~/.config/mfdump/settings.toml` (or the platform's config
//! directory). Command-line flags take precedence over anything set here.
//!
//! ```toml
//! color = false
//! format = "json"
//! ```

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::CliError;
use crate::cli_types::OutputFormat;

/// Defaults loaded from the settings file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
    /// Colorize table output (defaults to on when the terminal supports it)
    pub color: Option<bool>,
    /// Output format used when `--format` is not given
    pub format: Option<OutputFormat>,
}

/// Canonical path to the settings file.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("mfdump").join("settings.toml")
}

/// Load settings from the default location.
pub(crate) fn load_settings() -> Result<Settings, CliError> {
    load_settings_from(&settings_path())
}

/// Load settings from `path`. A missing file yields the defaults.
pub(crate) fn load_settings_from(path: &Path) -> Result<Settings, CliError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("No settings file at {}", path.display());
            return Ok(Settings::default());
        }
        Err(e) => return Err(e.into()),
    };

    log::debug!("Loading settings from {}", path.display());
    toml::from_str(&contents).map_err(|e| CliError::settings(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from(&dir.path().join("settings.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "color = false\nformat = \"json\"\n").unwrap();

        let settings = load_settings_from(&path).unwrap();
        assert_eq!(settings.color, Some(false));
        assert_eq!(settings.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "format = \"table\"\n").unwrap();

        let settings = load_settings_from(&path).unwrap();
        assert_eq!(settings.color, None);
        assert_eq!(settings.format, Some(OutputFormat::Table));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "format = \"xml\"\n").unwrap();

        let err = load_settings_from(&path).unwrap_err();
        assert!(matches!(err, CliError::Settings(_)));
    }

    #[test]
    fn test_settings_path_location() {
        let path = settings_path();
        assert!(path.ends_with("mfdump/settings.toml"));
    }
}
