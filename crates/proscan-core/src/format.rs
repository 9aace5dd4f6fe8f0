//! Numeric formatting for generated text files

/// Decimal places used for geometry coordinates
pub const COORDINATE_DECIMALS: usize = 5;

/// Format a number with fixed precision, or Rust's shortest round-trip
/// representation when `decimals` is `None`.
///
/// A value that rounds to zero is printed without a sign, so that `-0.000`
/// never reaches a controller.
pub fn format_number(value: f64, decimals: Option<usize>) -> String {
    let text = match decimals {
        Some(places) => format!("{:.*}", places, value),
        None => format!("{}", value),
    };
    match text.strip_prefix('-') {
        Some(magnitude) if magnitude.chars().all(|c| c == '0' || c == '.') => {
            magnitude.to_string()
        }
        _ => text,
    }
}

/// Format a geometry coordinate with [`COORDINATE_DECIMALS`] places
pub fn format_coordinate(value: f64) -> String {
    format_number(value, Some(COORDINATE_DECIMALS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_precision() {
        assert_eq!(format_number(300.0, Some(3)), "300.000");
        assert_eq!(format_number(0.5, Some(1)), "0.5");
        assert_eq!(format_number(2.0, Some(0)), "2");
    }

    #[test]
    fn test_shortest_representation() {
        assert_eq!(format_number(300.0, None), "300");
        assert_eq!(format_number(0.25, None), "0.25");
    }

    #[test]
    fn test_negative_zero_is_normalized() {
        assert_eq!(format_number(-0.0, Some(3)), "0.000");
        assert_eq!(format_coordinate(-0.0), "0.00000");
        assert_eq!(format_number(-0.0, None), "0");
    }

    #[test]
    fn test_values_rounding_to_zero_lose_their_sign() {
        assert_eq!(format_number(-0.0001, Some(3)), "0.000");
        assert_eq!(format_number(-0.4, Some(0)), "0");
        assert_eq!(format_coordinate(-0.000001), "0.00000");
        assert_eq!(format_number(-0.0006, Some(3)), "-0.001");
        assert_eq!(format_number(-1e-7, None), "-0.0000001");
    }

    #[test]
    fn test_coordinate_precision() {
        assert_eq!(format_coordinate(10.0), "10.00000");
        assert_eq!(format_coordinate(-1.234567), "-1.23457");
    }
}
