//! Zone Planner
//!
//! Splits the scan length into the start, main and end zones and segments
//! each zone into probe/retract/advance cycles.
//!
//! A zone of length `L` scanned with step `S` yields `floor(L / S)` full
//! steps followed by one remainder step of `L - floor(L / S) * S` when that
//! remainder is non-zero. The step sizes of a zone always add up to the zone
//! length, so the probe never overshoots a zone boundary and the whole plan
//! advances exactly the scan length.

use crate::parameter_validator::ValidatedParameters;
use proscan_core::ZoneKind;
use serde::{Deserialize, Serialize};

/// Remainders at or below this length (mm) are treated as zero
pub const LENGTH_EPSILON: f64 = 1e-9;

/// A length/step ratio this close to an integer counts as an exact multiple
const RATIO_EPSILON: f64 = 1e-12;

/// A contiguous sub-range of the scan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub kind: ZoneKind,
    /// Effective length; zero for a disabled zone
    pub length: f64,
    pub step: f64,
    /// Distance from the scan origin to the zone's first step
    pub start_offset: f64,
}

/// One probe/retract/advance cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionStep {
    pub zone: ZoneKind,
    /// Advance applied after the probe cycle (mm)
    pub distance: f64,
    /// True for the shorter final step of a zone
    pub is_remainder: bool,
}

/// Segmentation of a single zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZonePlan {
    pub zone: Zone,
    pub full_steps: usize,
    /// Length of the final partial step, zero when there is none
    pub remainder: f64,
}

impl ZonePlan {
    /// Number of cycles the zone contributes
    pub fn step_count(&self) -> usize {
        self.full_steps + usize::from(self.remainder > 0.0)
    }

    /// Steps of this zone in emission order
    pub fn steps(&self) -> impl Iterator<Item = MotionStep> + '_ {
        let full = (0..self.full_steps).map(move |_| MotionStep {
            zone: self.zone.kind,
            distance: self.zone.step,
            is_remainder: false,
        });
        let remainder = (self.remainder > 0.0).then_some(MotionStep {
            zone: self.zone.kind,
            distance: self.remainder,
            is_remainder: true,
        });
        full.chain(remainder)
    }
}

/// Split `length` into full steps of `step` plus a remainder
///
/// Returns `(full_steps, remainder)`. The remainder is computed by
/// subtraction, not modulo, and is zero when `length` is an exact multiple
/// of `step` up to floating-point noise. A non-positive length or step
/// yields no steps. The step count saturates at `usize::MAX`; validated
/// parameters keep it within [`MAX_ZONE_STEPS`](crate::MAX_ZONE_STEPS).
pub fn segment(length: f64, step: f64) -> (usize, f64) {
    if length.is_nan() || step.is_nan() || length <= LENGTH_EPSILON || step <= 0.0 {
        return (0, 0.0);
    }

    let ratio = length / step;
    let nearest = ratio.round();
    let full = if (ratio - nearest).abs() <= RATIO_EPSILON * nearest.max(1.0) {
        nearest
    } else {
        ratio.floor()
    };

    let remainder = length - full * step;
    let remainder = if remainder > LENGTH_EPSILON { remainder } else { 0.0 };
    (full as usize, remainder)
}

/// Plans the motion steps for a validated parameter set
#[derive(Debug, Clone)]
pub struct ZonePlanner {
    params: ValidatedParameters,
}

impl ZonePlanner {
    pub fn new(params: ValidatedParameters) -> Self {
        Self { params }
    }

    pub fn parameters(&self) -> &ValidatedParameters {
        &self.params
    }

    /// The three zones in scan order; their lengths sum to the scan length
    pub fn zones(&self) -> [Zone; 3] {
        ZoneKind::ALL.map(|kind| Zone {
            kind,
            length: self.params.effective_zone_length(kind),
            step: self.params.zone_step(kind),
            start_offset: self.params.zone_start_offset(kind),
        })
    }

    /// Segmentation of every zone, in scan order
    pub fn plans(&self) -> Vec<ZonePlan> {
        self.zones()
            .into_iter()
            .map(|zone| {
                let (full_steps, remainder) = if self.params.zone_is_active(zone.kind) {
                    segment(zone.length, zone.step)
                } else {
                    (0, 0.0)
                };
                tracing::debug!(
                    zone = %zone.kind,
                    length = zone.length,
                    step = zone.step,
                    full_steps,
                    remainder,
                    "zone planned"
                );
                ZonePlan {
                    zone,
                    full_steps,
                    remainder,
                }
            })
            .collect()
    }

    /// Every motion step: start zone, then main zone, then end zone
    pub fn steps(&self) -> Vec<MotionStep> {
        let plans = self.plans();
        plans.iter().flat_map(ZonePlan::steps).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proscan_core::ScanParameters;

    fn planner(params: ScanParameters) -> ZonePlanner {
        ZonePlanner::new(ValidatedParameters::new(params).unwrap())
    }

    #[test]
    fn test_segment_exact_multiple() {
        assert_eq!(segment(80.0, 5.0), (16, 0.0));
        assert_eq!(segment(10.0, 0.5), (20, 0.0));
    }

    #[test]
    fn test_segment_with_remainder() {
        let (full, remainder) = segment(10.0, 3.0);
        assert_eq!(full, 3);
        assert!((remainder - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_segment_ignores_float_noise() {
        // 0.3 / 0.1 evaluates to 2.9999999999999996
        assert_eq!(segment(0.3, 0.1), (3, 0.0));
        let (full, remainder) = segment(0.7, 0.1);
        assert_eq!(full, 7);
        assert_eq!(remainder, 0.0);
    }

    #[test]
    fn test_segment_step_longer_than_zone() {
        let (full, remainder) = segment(2.0, 5.0);
        assert_eq!(full, 0);
        assert!((remainder - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_segment_empty_zone() {
        assert_eq!(segment(0.0, 1.0), (0, 0.0));
        assert_eq!(segment(5.0, 0.0), (0, 0.0));
    }

    #[test]
    fn test_zones_are_contiguous() {
        let zones = planner(ScanParameters::default()).zones();
        assert_eq!(zones[0].start_offset, 0.0);
        assert_eq!(zones[1].start_offset, zones[0].length);
        assert_eq!(zones[2].start_offset, zones[0].length + zones[1].length);
        let total: f64 = zones.iter().map(|z| z.length).sum();
        assert_eq!(total, 100.0);
    }

    #[test]
    fn test_steps_emitted_in_zone_order() {
        let steps = planner(ScanParameters::default()).steps();
        // 20 start + 40 main + 20 end
        assert_eq!(steps.len(), 80);
        assert!(steps[..20].iter().all(|s| s.zone == ZoneKind::Start));
        assert!(steps[20..60].iter().all(|s| s.zone == ZoneKind::Main));
        assert!(steps[60..].iter().all(|s| s.zone == ZoneKind::End));
    }

    #[test]
    fn test_disabled_zones_emit_nothing() {
        let steps = planner(ScanParameters {
            use_start_zone: false,
            use_end_zone: false,
            scan_length: 9.0,
            main_zone_step: 2.0,
            ..ScanParameters::default()
        })
        .steps();
        assert_eq!(steps.len(), 5);
        assert!(steps.iter().all(|s| s.zone == ZoneKind::Main));
        let last = steps[4];
        assert!(last.is_remainder);
        assert!((last.distance - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_plan_step_count() {
        let plans = planner(ScanParameters {
            scan_length: 100.0,
            start_zone_length: 10.0,
            start_zone_step: 3.0,
            main_zone_step: 5.0,
            end_zone_length: 10.0,
            end_zone_step: 2.0,
            ..ScanParameters::default()
        })
        .plans();
        assert_eq!(plans[0].step_count(), 4);
        assert_eq!(plans[1].step_count(), 16);
        assert_eq!(plans[2].step_count(), 5);
    }
}
