//! User settings stored as TOML.
//!
//! Lookup order: an explicit `--config PATH`, then `settings.toml` in the
//! platform config directory, then built-in defaults. Command-line flags
//! override whatever is loaded here.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tablescope_report::DEFAULT_OUTPUT_DIR;
use tracing::{info, warn};

const APP_QUALIFIER: &str = "org";
const APP_ORG: &str = "tablescope";
const APP_NAME: &str = "tablescope";
const CONFIG_FILENAME: &str = "settings.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub generator: GeneratorSettings,
    pub display: DisplaySettings,
    pub export: ExportSettings,
}

/// Defaults for synthetic tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    pub rows: i64,
    pub cols: i64,
    pub pattern: String,
    pub noise: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            rows: 100,
            cols: 3,
            pattern: "linear".to_string(),
            noise: false,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Rows shown by `preview` when `--n` is not given.
    pub preview_rows: i64,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self { preview_rows: 10 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Root directory for saved reports.
    pub output_dir: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

/// Platform-specific settings file, if the platform has a config dir.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Parses TOML settings; missing keys take their defaults.
pub fn parse_settings(content: &str) -> Result<Settings> {
    toml::from_str(content).context("invalid settings")
}

/// Loads settings.
///
/// An explicit path must exist and parse. Problems with the implicit
/// per-user file are logged and the defaults are used instead.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read settings {}", path.display()))?;
        let settings =
            parse_settings(&content).with_context(|| format!("parse {}", path.display()))?;
        info!(path = %path.display(), "loaded settings");
        return Ok(settings);
    }

    let Some(path) = settings_path() else {
        warn!("could not determine settings path, using defaults");
        return Ok(Settings::default());
    };
    match fs::read_to_string(&path) {
        Ok(content) => match parse_settings(&content) {
            Ok(settings) => {
                info!(path = %path.display(), "loaded settings");
                Ok(settings)
            }
            Err(error) => {
                warn!(path = %path.display(), "{error:#}, using defaults");
                Ok(Settings::default())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Settings::default()),
        Err(error) => {
            warn!(path = %path.display(), "failed to read settings: {error}, using defaults");
            Ok(Settings::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let settings = parse_settings("[generator]\nrows = 20\npattern = \"sine\"\n").unwrap();
        assert_eq!(settings.generator.rows, 20);
        assert_eq!(settings.generator.pattern, "sine");
        assert_eq!(settings.generator.cols, 3);
        assert_eq!(settings.display.preview_rows, 10);
        assert_eq!(settings.export.output_dir, PathBuf::from("data"));
    }

    #[test]
    fn round_trips_through_toml() {
        let mut settings = Settings::default();
        settings.generator.seed = Some(7);
        let text = toml::to_string_pretty(&settings).unwrap();
        assert_eq!(parse_settings(&text).unwrap(), settings);
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(parse_settings("[display]\npreview_rows = \"many\"\n").is_err());
    }

    #[test]
    fn explicit_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_settings(Some(&dir.path().join("missing.toml"))).is_err());
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[export]\noutput_dir = \"reports\"\n").unwrap();
        let settings = load_settings(Some(&path)).unwrap();
        assert_eq!(settings.export.output_dir, PathBuf::from("reports"));
    }
}
