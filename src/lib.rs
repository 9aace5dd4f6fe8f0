//! # ProScan
//!
//! Probe scan tooling for CNC surface digitizing:
//! - generates the probe/retract/advance motion program for a scan
//! - converts the recorded probe points into a polyline for CAD/CAM import
//!
//! ## Architecture
//!
//! ProScan is organized as a workspace with multiple crates:
//!
//! 1. **proscan-core** - Scan parameters, points, error taxonomy, number formatting
//! 2. **proscan-camtools** - Parameter validation, zone planning, motion program emission
//! 3. **proscan-geometry** - Points file reading, DXF / entity text / point table output
//! 4. **proscan-settings** - Configuration file handling
//! 5. **proscan** - This crate: logging, output placement and the command line shell

pub mod commands;
pub mod output;

pub use proscan_camtools::{
    generate_program, validate_parameters, MotionProgram, MotionProgramEmitter, ProgramOptions,
    ProgramSummary, ValidatedParameters, ZonePlanner,
};
pub use proscan_core::{Error, Point, Result, ScanParameters, ZoneKind};
pub use proscan_geometry::{
    GeometryDocument, GeometryFormat, GeometrySerializer, PointsFormat, PointsReader,
};
pub use proscan_settings::{Config, OutputSettings, PointsSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("PROSCAN_BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, so stdout stays usable for reports
/// - RUST_LOG environment variable support, falling back to `default_directive`
pub fn init_logging(default_directive: &str) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
