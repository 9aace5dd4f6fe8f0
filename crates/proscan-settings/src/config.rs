//! Configuration and settings management for ProScan
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats, selected by file extension.
//!
//! Configuration is organized into logical sections:
//! - Default scan parameters
//! - Motion program rendering options
//! - Output placement (directory, file name prefixes)
//! - Points file grammar and geometry output format

use crate::error::{SettingsError, SettingsResult};
use proscan_camtools::{validate_parameters, ProgramOptions};
use proscan_core::ScanParameters;
use proscan_geometry::{GeometryFormat, PointsFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the directory created under the user's desktop
pub const WORK_FOLDER_NAME: &str = "COXOproScan";

/// Most decimal places accepted for numeric words
pub const MAX_DECIMAL_PLACES: usize = 10;

/// Where generated files are placed and how they are named
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory receiving generated files
    pub directory: PathBuf,
    /// File name prefix for motion programs
    pub gcode_prefix: String,
    /// File extension for motion programs, without the dot
    pub gcode_extension: String,
    /// File name prefix for geometry exports
    pub geometry_prefix: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("Desktop")
                .join(WORK_FOLDER_NAME),
            gcode_prefix: "scan".to_string(),
            gcode_extension: "tap".to_string(),
            geometry_prefix: "artcam".to_string(),
        }
    }
}

/// Points file handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PointsSettings {
    /// Grammar of the points files recorded by the controller
    pub format: PointsFormat,
    /// Encoding used for geometry exports
    pub geometry_format: GeometryFormat,
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
/// Sections missing from a file take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Parameters used when none are given on the command line
    pub parameters: ScanParameters,
    /// Motion program rendering
    pub program: ProgramOptions,
    /// Output placement
    pub output: OutputSettings,
    /// Points files and geometry export
    pub points: PointsSettings,
}

enum FileFormat {
    Json,
    Toml,
}

fn file_format(path: &Path) -> SettingsResult<FileFormat> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(FileFormat::Json),
        Some("toml") => Ok(FileFormat::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

fn check_file_stem(key: &str, value: &str) -> SettingsResult<()> {
    if value.trim().is_empty() {
        return Err(SettingsError::invalid(key, "must not be empty"));
    }
    if value.contains(['/', '\\']) {
        return Err(SettingsError::invalid(key, "must not contain path separators"));
    }
    Ok(())
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location of the configuration file
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("proscan").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no configuration directory on this platform".into())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = file_format(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Load config from `path` if it exists, otherwise return the defaults
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match file_format(path)? {
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        tracing::info!(path = %path.display(), "configuration saved");

        Ok(())
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> SettingsResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        validate_parameters(&self.parameters)?;

        if let Some(places) = self.program.decimal_places {
            if places > MAX_DECIMAL_PLACES {
                return Err(SettingsError::invalid(
                    "program.decimal_places",
                    format!("must be at most {}", MAX_DECIMAL_PLACES),
                ));
            }
        }

        if self.output.directory.as_os_str().is_empty() {
            return Err(SettingsError::invalid("output.directory", "must not be empty"));
        }
        check_file_stem("output.gcode_prefix", &self.output.gcode_prefix)?;
        check_file_stem("output.gcode_extension", &self.output.gcode_extension)?;
        check_file_stem("output.geometry_prefix", &self.output.geometry_prefix)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.output.gcode_prefix, "scan");
        assert_eq!(config.output.gcode_extension, "tap");
        assert!(config.output.directory.ends_with("Desktop/COXOproScan"));
        assert_eq!(config.points.format, PointsFormat::Absolute);
    }

    #[test]
    fn test_invalid_parameters_are_reported() {
        let mut config = Config::new();
        config.parameters.scan_length = 0.0;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_invalid_output_settings() {
        let mut config = Config::new();
        config.output.gcode_prefix = "a/b".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.output.geometry_prefix = " ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.program.decimal_places = Some(MAX_DECIMAL_PLACES + 1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            "[parameters]\nscan_length = 250.0\n\n[points]\nformat = \"delta\"\n",
        )
        .unwrap();
        assert_eq!(config.parameters.scan_length, 250.0);
        assert_eq!(config.parameters.main_zone_step, 2.0);
        assert_eq!(config.points.format, PointsFormat::Delta);
        assert_eq!(config.points.geometry_format, GeometryFormat::Dxf);
        assert_eq!(config.program, ProgramOptions::default());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = Config::new().save_to_file(Path::new("config.yaml")).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported config format: yaml");
    }
}
