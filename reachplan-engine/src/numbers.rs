//! Numeric conversion helpers centralizing safe numeric casts and rounding.

use num_traits::cast::cast;

/// Round a f64 to a fixed number of decimal places, returning 0.0 for non-finite values.
#[must_use]
pub fn round_to(value: f64, decimals: u8) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10_f64.powi(i32::from(decimals));
    (value * factor).round() / factor
}

/// Round to one decimal place (percentages, GRPs, frequencies).
#[must_use]
pub fn round1(value: f64) -> f64 {
    round_to(value, 1)
}

/// Round to two decimal places (currency ratios).
#[must_use]
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Round a f64 and clamp it to the u64 range, returning 0 for NaN or negative values.
#[must_use]
pub fn round_f64_to_u64(value: f64) -> u64 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    let max = cast::<u64, f64>(u64::MAX).unwrap_or(f64::MAX);
    let clamped = value.min(max).round();
    cast::<f64, u64>(clamped).unwrap_or(u64::MAX)
}

/// Floor a unit draw scaled by `len` into an index strictly below `len`.
#[must_use]
pub fn scaled_index(draw: f64, len: usize) -> usize {
    if len == 0 || !draw.is_finite() || draw <= 0.0 {
        return 0;
    }
    let scaled = (draw * usize_to_f64(len)).floor();
    cast::<f64, usize>(scaled).unwrap_or(0).min(len - 1)
}

/// Convert u64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn u64_to_f64(value: u64) -> f64 {
    cast::<u64, f64>(value).unwrap_or(0.0)
}

/// Convert usize to f64 while allowing precision loss in a single location.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_matches_half_up_for_positive_values() {
        assert!((round1(12.25) - 12.3).abs() < 1e-9);
        assert!((round2(3.14159) - 3.14).abs() < 1e-9);
        assert!((round_to(f64::NAN, 1) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn u64_rounding_clamps() {
        assert_eq!(round_f64_to_u64(1.6), 2);
        assert_eq!(round_f64_to_u64(-4.0), 0);
        assert_eq!(round_f64_to_u64(f64::NAN), 0);
        assert_eq!(round_f64_to_u64(f64::INFINITY), u64::MAX);
    }

    #[test]
    fn scaled_index_stays_in_bounds() {
        assert_eq!(scaled_index(0.0, 5), 0);
        assert_eq!(scaled_index(0.999_999, 5), 4);
        assert_eq!(scaled_index(0.5, 0), 0);
        assert_eq!(scaled_index(1.0, 3), 2);
    }
}
