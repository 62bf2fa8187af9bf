//! Run configuration: sheet identifiers from the environment plus optional
//! settings from `~/.config/redirgen/config.toml`.

mod env_file;
mod identifiers;

pub use env_file::{load_env_file, parse_env_file};
pub use identifiers::{Identifiers, DOCUMENT_ID, SHEET_ID};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Output file written on success unless overridden.
pub const DEFAULT_OUTPUT_PATH: &str = "netlify.toml";

/// Where and how the sheet is fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Scheme and host serving `/spreadsheets/d/...`.
    pub base_url: String,
    /// Seconds allowed for establishing the connection.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for the whole request.
    pub timeout_secs: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            base_url: "https://docs.google.com".to_string(),
            connect_timeout_secs: 15,
            timeout_secs: 30,
        }
    }
}

/// Optional settings file contents. Every key has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub output_path: PathBuf,
    pub source: SourceSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            source: SourceSettings::default(),
        }
    }
}

/// Settings file location under the XDG config home, if one exists.
pub fn config_path() -> Result<Option<PathBuf>, ConfigError> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("redirgen")?;
    Ok(xdg_dirs.find_config_file("config.toml"))
}

/// Load settings from `explicit` if given, else from the XDG config file if
/// present, else defaults. Never creates a file.
pub fn load(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match config_path()? {
            Some(p) => p,
            None => return Ok(Settings::default()),
        },
    };
    load_from(&path)
}

/// Parse a settings file.
pub fn load_from(path: &Path) -> Result<Settings, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let settings = toml::from_str(&data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("loaded settings from {}", path.display());
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_values() {
        let s = Settings::default();
        assert_eq!(s.output_path, PathBuf::from("netlify.toml"));
        assert_eq!(s.source.base_url, "https://docs.google.com");
        assert_eq!(s.source.connect_timeout_secs, 15);
        assert_eq!(s.source.timeout_secs, 30);
    }

    #[test]
    fn empty_file_gives_defaults() {
        let s: Settings = toml::from_str("").unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn partial_source_section() {
        let toml = r#"
            output_path = "public/netlify.toml"

            [source]
            timeout_secs = 5
        "#;
        let s: Settings = toml::from_str(toml).unwrap();
        assert_eq!(s.output_path, PathBuf::from("public/netlify.toml"));
        assert_eq!(s.source.timeout_secs, 5);
        assert_eq!(s.source.connect_timeout_secs, 15);
        assert_eq!(s.source.base_url, "https://docs.google.com");
    }

    #[test]
    fn load_from_reports_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "output_path = [").unwrap();
        assert!(matches!(load_from(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(matches!(load(Some(&path)), Err(ConfigError::Read { .. })));
    }
}
