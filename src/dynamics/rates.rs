use std::f64::consts::PI;

use crate::dynamics::state::BodyRates;

// ---------------------------------------------------------------------------
// Angular rate source
// ---------------------------------------------------------------------------

/// Trait for body-rate sources.
///
/// Implement this to drive the simulation with a different rate history.
/// Rates are sampled once per step from time alone.
pub trait RateProfile {
    /// Body-frame rates (rad/s) at simulation time `t` (s).
    fn rates(&self, t: f64) -> BodyRates;

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}

/// Fixed analytic rate-gyro stand-in.
///
///   p = 30π/6
///   q = cos(6t/π)
///   r = 3 sin(30t/π)
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticRates;

impl RateProfile for AnalyticRates {
    fn rates(&self, t: f64) -> BodyRates {
        BodyRates {
            p: 30.0 * PI / 6.0,
            q: ((6.0 / PI) * t).cos(),
            r: 3.0 * ((30.0 / PI) * t).sin(),
        }
    }

    fn name(&self) -> &str {
        "analytic"
    }
}

/// Rates held at a fixed value for the whole run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantRates(pub BodyRates);

impl RateProfile for ConstantRates {
    fn rates(&self, _t: f64) -> BodyRates {
        self.0
    }

    fn name(&self) -> &str {
        "constant"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn roll_rate_is_constant() {
        for t in [0.0, 0.1, 1.7, 30.0, 59.9, -4.0] {
            assert_relative_eq!(AnalyticRates.rates(t).p, 5.0 * PI, epsilon = 1e-12);
        }
    }

    #[test]
    fn initial_sample() {
        let w = AnalyticRates.rates(0.0);
        assert_eq!(w.q, 1.0);
        assert_eq!(w.r, 0.0);
    }

    #[test]
    fn pitch_and_yaw_follow_formulas() {
        let t = 2.5;
        let w = AnalyticRates.rates(t);
        assert_relative_eq!(w.q, (6.0 * t / PI).cos(), epsilon = 1e-12);
        assert_relative_eq!(w.r, 3.0 * (30.0 * t / PI).sin(), epsilon = 1e-12);
    }

    #[test]
    fn constant_profile_ignores_time() {
        let c = ConstantRates(BodyRates::new(0.1, -0.2, 0.3));
        assert_eq!(c.rates(0.0), c.rates(42.0));
    }
}
