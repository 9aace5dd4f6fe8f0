//! Motion program emitter
//!
//! Renders a planned probe scan into the line-oriented program run by the
//! controller:
//!
//! ```text
//! M40
//! F<speed>
//! M00
//! G91
//! G31X<probe depth>   \
//! G0X-<retract>        > once per motion step
//! G0Y<step distance>  /
//! G90
//! G0X0
//! G0Y0
//! M30
//! ```
//!
//! The distance and step count reported with a program are accumulated
//! from the very words that were written, never recomputed.
//!
//! With fixed decimal places each advance word is the difference between
//! consecutive rounded cursor positions, so rounding never accumulates: the
//! written advances add up to the scan length rounded to the same places.
//! A cycle whose rounded advance is zero keeps its probe and retract but
//! writes no `G0Y`.

use crate::error::CamToolResult;
use crate::parameter_validator::ValidatedParameters;
use crate::zone_planner::{ZonePlan, ZonePlanner};
use proscan_core::{format_number, ZoneKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Rendering options for the emitter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramOptions {
    /// Decimal places for numeric words; `None` prints the shortest exact form
    pub decimal_places: Option<usize>,
    /// Interleave parenthesized operator comments with the codes
    pub include_comments: bool,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            decimal_places: Some(3),
            include_comments: false,
        }
    }
}

/// Per-zone figures for the generation report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneSummary {
    pub kind: ZoneKind,
    pub active: bool,
    pub length: f64,
    pub step: f64,
    pub full_steps: usize,
    pub remainder: f64,
}

/// Figures reported alongside a generated program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramSummary {
    /// Sum of the advance words as written (mm)
    pub total_distance: f64,
    /// Number of emitted probe cycles
    pub step_count: usize,
    pub zones: Vec<ZoneSummary>,
}

impl fmt::Display for ProgramSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total length: {:.2} mm", self.total_distance)?;
        write!(f, "Steps: {}", self.step_count)?;
        for zone in &self.zones {
            if zone.active {
                write!(
                    f,
                    "\n{}: {:.2} mm (step: {} mm)",
                    zone.kind, zone.length, zone.step
                )?;
            } else {
                write!(f, "\n{}: disabled", zone.kind)?;
            }
        }
        Ok(())
    }
}

/// A rendered motion program
#[derive(Debug, Clone, PartialEq)]
pub struct MotionProgram {
    lines: Vec<String>,
    summary: ProgramSummary,
}

impl MotionProgram {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn summary(&self) -> &ProgramSummary {
        &self.summary
    }

    /// Program text, newline separated and newline terminated
    pub fn to_text(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }

    /// Write the program to `path`, replacing any existing file
    pub fn write_to(&self, path: &Path) -> CamToolResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        for line in &self.lines {
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;
        tracing::info!(
            path = %path.display(),
            steps = self.summary.step_count,
            "motion program written"
        );
        Ok(())
    }
}

/// Turns planned step distances into the advances actually written
struct AdvanceQuantizer {
    /// `10^places`, or `None` for the shortest exact form
    scale: Option<f64>,
    planned: f64,
    written_ticks: f64,
}

impl AdvanceQuantizer {
    fn new(decimal_places: Option<usize>) -> Self {
        Self {
            scale: decimal_places.map(|places| 10f64.powi(places as i32)),
            planned: 0.0,
            written_ticks: 0.0,
        }
    }

    fn advance(&mut self, distance: f64) -> f64 {
        match self.scale {
            None => distance,
            Some(scale) => {
                self.planned += distance;
                let target = (self.planned * scale).round();
                let ticks = target - self.written_ticks;
                self.written_ticks = target;
                ticks / scale
            }
        }
    }
}

/// Renders [`ZonePlanner`] output into a [`MotionProgram`]
#[derive(Debug, Clone, Default)]
pub struct MotionProgramEmitter {
    options: ProgramOptions,
}

impl MotionProgramEmitter {
    pub fn new(options: ProgramOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ProgramOptions {
        &self.options
    }

    fn num(&self, value: f64) -> String {
        format_number(value, self.options.decimal_places)
    }

    fn comment(&self, lines: &mut Vec<String>, text: impl fmt::Display) {
        if self.options.include_comments {
            lines.push(format!("({})", text));
        }
    }

    /// Plan and render a program for `params`
    pub fn emit(&self, params: &ValidatedParameters) -> MotionProgram {
        let planner = ZonePlanner::new(*params);
        self.render(params, &planner.plans())
    }

    /// Render already computed zone plans
    pub fn render(&self, params: &ValidatedParameters, plans: &[ZonePlan]) -> MotionProgram {
        let mut lines = Vec::new();
        let mut total_distance = 0.0;
        let mut step_count = 0usize;
        let mut quantizer = AdvanceQuantizer::new(self.options.decimal_places);

        self.comment(&mut lines, "*** probe scan ***");
        lines.push("M40".to_string());
        lines.push(format!("F{}", self.num(params.speed)));
        self.comment(
            &mut lines,
            "place the probe at the edge of the part, then press START",
        );
        lines.push("M00".to_string());
        lines.push("G91".to_string());

        for plan in plans {
            if plan.step_count() == 0 {
                continue;
            }
            self.comment(
                &mut lines,
                format!(
                    "{}: {} mm, step {} mm",
                    plan.zone.kind,
                    self.num(plan.zone.length),
                    self.num(plan.zone.step)
                ),
            );
            for step in plan.steps() {
                let advance = quantizer.advance(step.distance);
                self.push_step(&mut lines, params, advance);
                total_distance += advance;
                step_count += 1;
            }
        }

        lines.push("G90".to_string());
        lines.push("G0X0".to_string());
        lines.push("G0Y0".to_string());
        self.comment(&mut lines, "* choose a name for the scan points file *");
        lines.push("M30".to_string());

        let zones = plans
            .iter()
            .map(|plan| ZoneSummary {
                kind: plan.zone.kind,
                active: params.zone_is_active(plan.zone.kind),
                length: plan.zone.length,
                step: plan.zone.step,
                full_steps: plan.full_steps,
                remainder: plan.remainder,
            })
            .collect();

        tracing::debug!(step_count, total_distance, "motion program rendered");

        MotionProgram {
            lines,
            summary: ProgramSummary {
                total_distance,
                step_count,
                zones,
            },
        }
    }

    fn push_step(&self, lines: &mut Vec<String>, params: &ValidatedParameters, advance: f64) {
        lines.push(format!("G31X{}", self.num(params.probe_depth)));
        lines.push(format!("G0X-{}", self.num(params.retract)));
        if advance > 0.0 {
            lines.push(format!("G0Y{}", self.num(advance)));
        }
    }
}
