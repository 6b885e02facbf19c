//! # Settings
//!
//! User configuration, read from a JSON file. Every field has a default, so a
//! settings file only needs the values it changes:
//!
//! ```json
//! {
//!   "view": { "zoom_step": 1.5 },
//!   "analysis": { "frequency_hz": 5e9 },
//!   "logging": { "level": "debug" }
//! }
//! ```
//!
//! ## Lookup
//!
//! 1. An explicit path (the `--config` flag). Must exist.
//! 2. `<config dir>/xsect/settings.json` (e.g. `~/.config/xsect/settings.json`
//!    on Linux). Used if present.
//! 3. Built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::design::Design;
use crate::errors::{CalcError, CalcResult};
use crate::view::ViewSettings;

/// Settings file name inside the application config directory
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Application directory name under the platform config directory
pub const APP_DIR_NAME: &str = "xsect";

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub view: ViewSettings,
    pub analysis: AnalysisSettings,
    /// Design loaded at startup
    pub defaults: Design,
    pub logging: LoggingSettings,
}

/// Parameters of the derived line characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Frequency for wavelength and skin depth (Hz)
    pub frequency_hz: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings { frequency_hz: 1e9 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive (`warn`, `debug`, `xsect_core=trace`, ...)
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            level: "warn".to_string(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> CalcResult<()> {
        self.view.validate()?;
        let f = self.analysis.frequency_hz;
        if !(f > 0.0 && f.is_finite()) {
            return Err(CalcError::invalid_input(
                "analysis.frequency_hz",
                f.to_string(),
                "Frequency must be positive",
            ));
        }
        self.defaults.validate()
    }
}

/// Platform default settings path, if the platform has a config directory.
#[cfg(not(target_arch = "wasm32"))]
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
}

#[cfg(target_arch = "wasm32")]
pub fn default_settings_path() -> Option<PathBuf> {
    None
}

/// Load settings from `path`, or from the default location.
///
/// An explicit path that cannot be read is an error. A missing default file
/// is not: built-in defaults are returned instead.
pub fn load_settings(path: Option<&Path>) -> CalcResult<Settings> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_settings_path() {
            Some(p) if p.is_file() => p,
            _ => {
                debug!("no settings file, using defaults");
                return Ok(Settings::default());
            }
        },
    };

    let contents = fs::read_to_string(&path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    let settings = parse_settings(&contents).map_err(|e| match e {
        CalcError::SerializationError { reason } => CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), reason),
        },
        other => other,
    })?;

    debug!(path = %path.display(), "loaded settings");
    Ok(settings)
}

/// Parse and validate settings JSON.
pub fn parse_settings(json: &str) -> CalcResult<Settings> {
    let settings: Settings = serde_json::from_str(json)?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::Topology;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.analysis.frequency_hz, 1e9);
        assert_eq!(settings.logging.level, "warn");
        assert_eq!(settings.view.max_zoom, 10.0);
    }

    #[test]
    fn test_empty_object_gives_defaults() {
        assert_eq!(parse_settings("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_sections() {
        let settings = parse_settings(
            r#"{
                "view": { "zoom_step": 1.5 },
                "defaults": { "topology": "coplanar" }
            }"#,
        )
        .unwrap();
        assert_eq!(settings.view.zoom_step, 1.5);
        assert_eq!(settings.view.min_zoom, 0.1);
        assert_eq!(settings.defaults.topology, Topology::Coplanar);
        assert_eq!(settings.analysis, AnalysisSettings::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = parse_settings(r#"{ "analysis": { "frequency_hz": 0 } }"#).unwrap_err();
        assert_eq!(err.field(), Some("analysis.frequency_hz"));

        let err = parse_settings(r#"{ "view": { "zoom_step": 0.5 } }"#).unwrap_err();
        assert_eq!(err.field(), Some("view.zoom_step"));

        let err = parse_settings(r#"{ "defaults": { "materials": { "epsilon_r": 500 } } }"#).unwrap_err();
        assert_eq!(err.field(), Some("epsilon_r"));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_settings("{ view: ").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let err = load_settings(Some(Path::new("/nonexistent/xsect/settings.json"))).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("xsect-settings-{}.json", std::process::id()));
        fs::write(&path, r#"{ "logging": { "level": "debug" } }"#).unwrap();

        let loaded = load_settings(Some(&path));
        fs::remove_file(&path).ok();
        assert_eq!(loaded.unwrap().logging.level, "debug");
    }
}
