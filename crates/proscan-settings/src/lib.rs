//! ProScan Settings Crate
//!
//! Handles application configuration: default scan parameters, program
//! rendering options, output placement and points file handling.

pub mod config;
pub mod error;

pub use config::{Config, OutputSettings, PointsSettings, MAX_DECIMAL_PLACES, WORK_FOLDER_NAME};
pub use error::{SettingsError, SettingsResult};
