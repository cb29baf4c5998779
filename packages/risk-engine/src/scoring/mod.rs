pub mod assessment;
pub mod components;

pub use assessment::{assess, Assessment};
pub use components::{case_score, composite, flood_score, rainfall_score, vulnerability_score};

/// Linearly maps `value` from `[min, max]` onto `[0, 1]`, clamped.
/// A zero-width range yields 0.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return 0.0;
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_endpoints() {
        assert_eq!(normalize(-0.5, -0.5, 0.8), 0.0);
        assert_eq!(normalize(0.8, -0.5, 0.8), 1.0);
        assert_eq!(normalize(0.0, 0.0, 50.0), 0.0);
        assert_eq!(normalize(50.0, 0.0, 50.0), 1.0);
    }

    #[test]
    fn test_normalize_clamps() {
        for value in [-1e9, -3.0, -0.01, 0.0, 12.5, 199.9, 200.0, 201.0, 1e12] {
            let n = normalize(value, 0.0, 200.0);
            assert!((0.0..=1.0).contains(&n), "{} -> {}", value, n);
        }
        assert_eq!(normalize(400.0, 0.0, 200.0), 1.0);
        assert_eq!(normalize(-5.0, 0.0, 200.0), 0.0);
        assert_eq!(normalize(150.0, 0.0, 200.0), 0.75);
    }

    #[test]
    fn test_normalize_zero_width_range() {
        assert_eq!(normalize(5.0, 3.0, 3.0), 0.0);
        assert_eq!(normalize(3.0, 3.0, 3.0), 0.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.825_549, 4), 0.8255);
        assert_eq!(round_to(0.123_456, 3), 0.123);
        assert_eq!(round_to(1.0, 4), 1.0);
    }
}
