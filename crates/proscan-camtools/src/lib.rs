//! # ProScan CAM Tools
//!
//! Turns operator scan parameters into a probe scan motion program.
//!
//! ## Pipeline
//!
//! - **Parameter Validator**: checks a [`ScanParameters`](proscan_core::ScanParameters)
//!   record and reports every violated constraint at once
//! - **Zone Planner**: segments the start, main and end zones into
//!   probe/retract/advance cycles with exact remainder accounting
//! - **Motion Program Emitter**: renders the cycles, header and footer into
//!   program text and reports the distance and step count it emitted

pub mod error;
pub mod motion_program;
pub mod parameter_validator;
pub mod zone_planner;

pub use error::{CamToolError, CamToolResult};
pub use motion_program::{
    MotionProgram, MotionProgramEmitter, ProgramOptions, ProgramSummary, ZoneSummary,
};
pub use parameter_validator::{validate_parameters, ValidatedParameters, MAX_ZONE_STEPS};
pub use zone_planner::{segment, MotionStep, Zone, ZonePlan, ZonePlanner};

use proscan_core::ScanParameters;

/// Validate `params` and render the motion program in one call
///
/// Nothing is rendered when validation fails.
pub fn generate_program(
    params: &ScanParameters,
    options: ProgramOptions,
) -> CamToolResult<MotionProgram> {
    let validated = validate_parameters(params)?;
    Ok(MotionProgramEmitter::new(options).emit(&validated))
}
