/// Rounding used in every answer: half-up at the given decimal place.
/// 0.000015 -> 0.00002 at 5 digits
pub fn round_half_up(value: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits as i32);
    let rounded = (value * scale + 0.5).floor() / scale;
    // -0.0 prints as "-0"
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// integral values are printed without fractional part: 18.0 -> "18", 35.5 -> "35.5"
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_round_half_up() {
        assert_relative_eq!(round_half_up(0.123456, 5), 0.12346, epsilon = 1e-12);
        assert_relative_eq!(round_half_up(2.0000000001, 5), 2.0);
        assert_relative_eq!(round_half_up(0.0030000000000000001, 5), 0.003);
        assert_eq!(round_half_up(-0.000001, 5), 0.0);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(18.0), "18");
        assert_eq!(format_number(36.5), "36.5");
        assert_eq!(format_number(5000.0), "5000");
        assert_eq!(format_number(-0.0), "0");
    }
}
