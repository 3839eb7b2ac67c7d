//! Decimal rounding for prices and rates.

/// Round `value` to `places` decimal places (half away from zero).
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

/// Round to cents.
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_places() {
        assert_eq!(round2(1679.999_999_999_9), 1680.0);
        assert_eq!(round2(213.336), 213.34);
        assert_eq!(round2(-0.004), -0.0);
        assert_eq!(round_to(0.75000000001, 2), 0.75);
    }
}
