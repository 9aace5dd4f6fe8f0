//! Scan parameter validation
//!
//! Checks a [`ScanParameters`] record and collects every violated
//! constraint rather than stopping at the first one, so the operator can fix
//! all inputs in one pass.

use proscan_core::{ParameterViolation, ScanParameters, ValidationErrors, ZoneKind};
use std::ops::Deref;

/// Most steps a single zone may be segmented into
pub const MAX_ZONE_STEPS: usize = 1_000_000;

/// Scan parameters that passed [`validate_parameters`]
///
/// Only this type is accepted by the planner, so an unchecked record can
/// never be segmented.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedParameters(ScanParameters);

impl ValidatedParameters {
    /// Validate `params`, see [`validate_parameters`]
    pub fn new(params: ScanParameters) -> Result<Self, ValidationErrors> {
        validate_parameters(&params)
    }

    pub fn into_inner(self) -> ScanParameters {
        self.0
    }
}

impl Deref for ValidatedParameters {
    type Target = ScanParameters;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<ScanParameters> for ValidatedParameters {
    type Error = ValidationErrors;

    fn try_from(params: ScanParameters) -> Result<Self, Self::Error> {
        validate_parameters(&params)
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn is_shorter(length: f64, limit: f64) -> bool {
    length < limit
}

/// Check every constraint on `params`, in a fixed order
///
/// Zone lengths are compared after the enable flags are applied, so a
/// disabled zone never causes a length violation. NaN and infinities never
/// count as positive or shorter.
///
/// After the length and step checks come the sign checks on active zone
/// lengths, retract and speed, then the per-zone step count limit
/// ([`MAX_ZONE_STEPS`]).
pub fn validate_parameters(params: &ScanParameters) -> Result<ValidatedParameters, ValidationErrors> {
    let mut violations = Vec::new();
    let start_length = params.effective_zone_length(ZoneKind::Start);
    let end_length = params.effective_zone_length(ZoneKind::End);

    if !is_positive(params.scan_length) {
        violations.push(ParameterViolation::ScanLengthNotPositive);
    }
    if !is_positive(params.probe_depth) {
        violations.push(ParameterViolation::ProbeDepthNotPositive);
    }
    if params.use_start_zone && !is_positive(params.start_zone_step) {
        violations.push(ParameterViolation::StartZoneStepNotPositive);
    }
    if !is_positive(params.main_zone_step) {
        violations.push(ParameterViolation::MainZoneStepNotPositive);
    }
    if params.use_end_zone && !is_positive(params.end_zone_step) {
        violations.push(ParameterViolation::EndZoneStepNotPositive);
    }
    if !is_shorter(start_length, params.scan_length) {
        violations.push(ParameterViolation::StartZoneTooLong);
    }
    if !is_shorter(end_length, params.scan_length) {
        violations.push(ParameterViolation::EndZoneTooLong);
    }
    if !is_shorter(start_length + end_length, params.scan_length) {
        violations.push(ParameterViolation::ZonesExceedScanLength);
    }
    if start_length < 0.0 {
        violations.push(ParameterViolation::ZoneLengthNegative(ZoneKind::Start));
    }
    if end_length < 0.0 {
        violations.push(ParameterViolation::ZoneLengthNegative(ZoneKind::End));
    }
    if !is_non_negative(params.retract) {
        violations.push(ParameterViolation::RetractNegative);
    }
    if !is_positive(params.speed) {
        violations.push(ParameterViolation::SpeedNotPositive);
    }
    for kind in ZoneKind::ALL {
        let step = params.zone_step(kind);
        let length = params.effective_zone_length(kind);
        if params.zone_is_active(kind)
            && is_positive(step)
            && length.is_finite()
            && length / step > MAX_ZONE_STEPS as f64
        {
            violations.push(ParameterViolation::TooManySteps {
                zone: kind,
                limit: MAX_ZONE_STEPS,
            });
        }
    }

    if violations.is_empty() {
        Ok(ValidatedParameters(*params))
    } else {
        tracing::debug!(count = violations.len(), "scan parameters rejected");
        Err(ValidationErrors::new(violations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let validated = validate_parameters(&ScanParameters::default()).unwrap();
        assert_eq!(validated.scan_length, 100.0);
    }

    #[test]
    fn test_reports_all_violations() {
        let params = ScanParameters {
            scan_length: 0.0,
            probe_depth: 0.0,
            ..ScanParameters::default()
        };
        let errors = validate_parameters(&params).unwrap_err();
        assert!(errors.contains(ParameterViolation::ScanLengthNotPositive));
        assert!(errors.contains(ParameterViolation::ProbeDepthNotPositive));
    }

    #[test]
    fn test_violation_order_is_deterministic() {
        let params = ScanParameters {
            scan_length: 10.0,
            probe_depth: -1.0,
            start_zone_step: 0.0,
            main_zone_step: 0.0,
            end_zone_step: -2.0,
            start_zone_length: 10.0,
            end_zone_length: 12.0,
            ..ScanParameters::default()
        };
        let errors = validate_parameters(&params).unwrap_err();
        assert_eq!(
            errors.violations(),
            &[
                ParameterViolation::ProbeDepthNotPositive,
                ParameterViolation::StartZoneStepNotPositive,
                ParameterViolation::MainZoneStepNotPositive,
                ParameterViolation::EndZoneStepNotPositive,
                ParameterViolation::StartZoneTooLong,
                ParameterViolation::EndZoneTooLong,
                ParameterViolation::ZonesExceedScanLength,
            ]
        );
    }

    #[test]
    fn test_inactive_zones_are_ignored() {
        let params = ScanParameters {
            use_start_zone: false,
            start_zone_length: 500.0,
            start_zone_step: 0.0,
            use_end_zone: false,
            end_zone_length: 500.0,
            end_zone_step: -1.0,
            ..ScanParameters::default()
        };
        assert!(validate_parameters(&params).is_ok());
    }

    #[test]
    fn test_zone_sum_must_be_strictly_less() {
        let params = ScanParameters {
            scan_length: 20.0,
            start_zone_length: 10.0,
            end_zone_length: 10.0,
            ..ScanParameters::default()
        };
        let errors = validate_parameters(&params).unwrap_err();
        assert_eq!(errors.violations(), &[ParameterViolation::ZonesExceedScanLength]);
    }

    #[test]
    fn test_nan_is_rejected() {
        let params = ScanParameters {
            main_zone_step: f64::NAN,
            ..ScanParameters::default()
        };
        let errors = validate_parameters(&params).unwrap_err();
        assert_eq!(errors.violations(), &[ParameterViolation::MainZoneStepNotPositive]);
    }

    #[test]
    fn test_negative_active_zone_lengths_are_rejected() {
        let params = ScanParameters {
            start_zone_length: -5.0,
            end_zone_length: -1.0,
            ..ScanParameters::default()
        };
        let errors = validate_parameters(&params).unwrap_err();
        assert_eq!(
            errors.violations(),
            &[
                ParameterViolation::ZoneLengthNegative(ZoneKind::Start),
                ParameterViolation::ZoneLengthNegative(ZoneKind::End),
            ]
        );

        let params = ScanParameters {
            use_start_zone: false,
            start_zone_length: -5.0,
            ..ScanParameters::default()
        };
        assert!(validate_parameters(&params).is_ok());
    }

    #[test]
    fn test_retract_and_speed() {
        let params = ScanParameters {
            retract: -5.0,
            speed: f64::NAN,
            ..ScanParameters::default()
        };
        let errors = validate_parameters(&params).unwrap_err();
        assert_eq!(
            errors.violations(),
            &[ParameterViolation::RetractNegative, ParameterViolation::SpeedNotPositive]
        );

        let params = ScanParameters {
            retract: 0.0,
            ..ScanParameters::default()
        };
        assert!(validate_parameters(&params).is_ok());
    }

    #[test]
    fn test_infinite_values_are_rejected() {
        let params = ScanParameters {
            probe_depth: f64::INFINITY,
            retract: f64::INFINITY,
            ..ScanParameters::default()
        };
        let errors = validate_parameters(&params).unwrap_err();
        assert_eq!(
            errors.violations(),
            &[ParameterViolation::ProbeDepthNotPositive, ParameterViolation::RetractNegative]
        );
    }

    #[test]
    fn test_tiny_steps_are_rejected() {
        let params = ScanParameters {
            main_zone_step: 1e-300,
            ..ScanParameters::default()
        };
        let errors = validate_parameters(&params).unwrap_err();
        assert_eq!(
            errors.violations(),
            &[ParameterViolation::TooManySteps {
                zone: ZoneKind::Main,
                limit: MAX_ZONE_STEPS
            }]
        );

        let params = ScanParameters {
            start_zone_step: 10.0 / (MAX_ZONE_STEPS as f64 + 1.0),
            ..ScanParameters::default()
        };
        assert!(validate_parameters(&params)
            .unwrap_err()
            .contains(ParameterViolation::TooManySteps {
                zone: ZoneKind::Start,
                limit: MAX_ZONE_STEPS
            }));
    }

    #[test]
    fn test_step_limit_is_inclusive() {
        let params = ScanParameters {
            use_start_zone: false,
            use_end_zone: false,
            scan_length: MAX_ZONE_STEPS as f64,
            main_zone_step: 1.0,
            ..ScanParameters::default()
        };
        assert!(validate_parameters(&params).is_ok());
    }

    #[test]
    fn test_try_from() {
        let validated = ValidatedParameters::try_from(ScanParameters::default()).unwrap();
        assert_eq!(validated.into_inner(), ScanParameters::default());
    }
}
