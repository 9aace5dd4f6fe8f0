//! Command implementations behind the CLI
//!
//! Each command validates or parses its whole input before any output file
//! is opened, so a rejected request never leaves a partial file behind.

use crate::output::resolve_output_path;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::Args;
use proscan_camtools::{generate_program, ProgramSummary};
use proscan_core::ScanParameters;
use proscan_geometry::{GeometryFormat, GeometrySerializer, PointsFormat, PointsReader};
use proscan_settings::Config;
use std::path::{Path, PathBuf};

/// Scan parameter values given on the command line
///
/// Every field left unset keeps the configured value.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct ParameterOverrides {
    /// Total scan length (mm)
    #[arg(long)]
    pub scan_length: Option<f64>,

    /// Probe travel per cycle (mm)
    #[arg(long)]
    pub probe_depth: Option<f64>,

    /// Retract distance after contact (mm)
    #[arg(long)]
    pub retract: Option<f64>,

    /// Feed rate (mm/min)
    #[arg(long)]
    pub speed: Option<f64>,

    /// Enable or disable the start zone
    #[arg(long)]
    pub start_zone: Option<bool>,

    #[arg(long)]
    pub start_zone_length: Option<f64>,

    #[arg(long)]
    pub start_zone_step: Option<f64>,

    #[arg(long)]
    pub main_zone_step: Option<f64>,

    /// Enable or disable the end zone
    #[arg(long)]
    pub end_zone: Option<bool>,

    #[arg(long)]
    pub end_zone_length: Option<f64>,

    #[arg(long)]
    pub end_zone_step: Option<f64>,
}

impl ParameterOverrides {
    /// Return `base` with every given value replaced
    pub fn apply(&self, base: ScanParameters) -> ScanParameters {
        ScanParameters {
            scan_length: self.scan_length.unwrap_or(base.scan_length),
            probe_depth: self.probe_depth.unwrap_or(base.probe_depth),
            retract: self.retract.unwrap_or(base.retract),
            speed: self.speed.unwrap_or(base.speed),
            use_start_zone: self.start_zone.unwrap_or(base.use_start_zone),
            start_zone_length: self.start_zone_length.unwrap_or(base.start_zone_length),
            start_zone_step: self.start_zone_step.unwrap_or(base.start_zone_step),
            main_zone_step: self.main_zone_step.unwrap_or(base.main_zone_step),
            use_end_zone: self.end_zone.unwrap_or(base.use_end_zone),
            end_zone_length: self.end_zone_length.unwrap_or(base.end_zone_length),
            end_zone_step: self.end_zone_step.unwrap_or(base.end_zone_step),
        }
    }
}

/// Result of a successful `gcode` run
#[derive(Debug, Clone)]
pub struct GcodeOutcome {
    pub path: PathBuf,
    pub summary: ProgramSummary,
}

/// Generate the motion program for `params` and write it
pub fn generate_gcode(
    config: &Config,
    params: &ScanParameters,
    output: Option<&Path>,
    now: NaiveDateTime,
) -> Result<GcodeOutcome> {
    let program = generate_program(params, config.program)?;

    let path = resolve_output_path(
        output,
        &config.output.directory,
        &config.output.gcode_prefix,
        &config.output.gcode_extension,
        now,
    )
    .context("Failed to prepare the output directory")?;

    program
        .write_to(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(GcodeOutcome {
        path,
        summary: program.summary().clone(),
    })
}

/// Result of a successful `geometry` run
#[derive(Debug, Clone)]
pub struct GeometryOutcome {
    pub path: PathBuf,
    pub point_count: usize,
    pub skipped_lines: usize,
    pub format: GeometryFormat,
}

/// Read a points file and write it out as geometry
pub fn export_geometry(
    config: &Config,
    points_path: &Path,
    points_format: PointsFormat,
    geometry_format: GeometryFormat,
    output: Option<&Path>,
    now: NaiveDateTime,
) -> Result<GeometryOutcome> {
    let (points, stats) = PointsReader::new(points_format)
        .read_file_with_stats(points_path)
        .with_context(|| format!("Failed to read points from {}", points_path.display()))?;

    let document = GeometrySerializer::new(geometry_format).serialize(&points)?;

    let path = resolve_output_path(
        output,
        &config.output.directory,
        &config.output.geometry_prefix,
        geometry_format.extension(),
        now,
    )
    .context("Failed to prepare the output directory")?;

    document
        .write_to(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(GeometryOutcome {
        path,
        point_count: points.len(),
        skipped_lines: stats.skipped_lines,
        format: geometry_format,
    })
}
