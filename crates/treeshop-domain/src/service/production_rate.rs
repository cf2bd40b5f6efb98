//! Production rate derived from mulcher hydraulic flow

/// Flow (GPM) at which the rate is 1.0 points per hour
pub const GPM_ANCHOR: f64 = 30.0;

/// Empirical power-law exponent
pub const GPM_EXPONENT: f64 = 1.58;

/// Points per hour for a machine with the given hydraulic flow: `(gpm / 30)^1.58`
pub fn production_rate_from_gpm(gpm: f64) -> f64 {
    (gpm / GPM_ANCHOR).powf(GPM_EXPONENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_point() {
        assert_eq!(production_rate_from_gpm(30.0), 1.0);
    }

    #[test]
    fn test_higher_flow() {
        // (34 / 30)^1.58 ≈ 1.22
        let rate = production_rate_from_gpm(34.0);
        assert!((rate - 1.3).abs() < 0.1);
        assert!((rate - 1.2187).abs() < 0.001);
    }

    #[test]
    fn test_rate_is_monotonic() {
        let rates: Vec<f64> = [20.0, 30.0, 40.0, 45.0, 55.0]
            .iter()
            .map(|&g| production_rate_from_gpm(g))
            .collect();
        assert!(rates.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_zero_flow() {
        assert_eq!(production_rate_from_gpm(0.0), 0.0);
    }
}
