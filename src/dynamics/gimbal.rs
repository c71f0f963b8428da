use crate::dynamics::state::{BodyRates, EulerAngles, EulerRates};

// ---------------------------------------------------------------------------
// Gimbal equation: body rates → Euler-angle rates
// ---------------------------------------------------------------------------

/// Euler-angle rates for the current attitude and body rates.
///
///   φ̇ = tanθ·sinφ·p + tanθ·cosφ·r
///   θ̇ = cosφ·q − sinφ·r
///   ψ̇ = (sinφ/cosθ)·q + (cosφ/cosθ)·r
///
/// Yaw does not enter. Divides by cosθ: as θ → ±π/2 (gimbal lock) the
/// result grows without bound and may become non-finite. No guard.
pub fn euler_rates(angles: &EulerAngles, w: &BodyRates) -> EulerRates {
    let (sin_phi, cos_phi) = angles.roll.sin_cos();
    let tan_theta = angles.pitch.tan();
    let cos_theta = angles.pitch.cos();

    EulerRates {
        roll_dot: tan_theta * sin_phi * w.p + tan_theta * cos_phi * w.r,
        pitch_dot: cos_phi * w.q - sin_phi * w.r,
        yaw_dot: (sin_phi / cos_theta) * w.q + (cos_phi / cos_theta) * w.r,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn level_attitude_collapses() {
        let w = BodyRates::new(5.0, 1.0, 0.0);
        let d = euler_rates(&EulerAngles::default(), &w);
        assert_eq!(d, EulerRates::new(0.0, 1.0, 0.0));

        let w = BodyRates::new(2.0, -0.5, 0.75);
        let d = euler_rates(&EulerAngles::default(), &w);
        assert_eq!(d.roll_dot, 0.0);
        assert_eq!(d.pitch_dot, w.q);
        assert_eq!(d.yaw_dot, w.r);
    }

    #[test]
    fn yaw_does_not_enter() {
        let w = BodyRates::new(0.3, 0.4, 0.5);
        let a = euler_rates(&EulerAngles::new(0.2, 0.1, 0.0), &w);
        let b = euler_rates(&EulerAngles::new(0.2, 0.1, 2.5), &w);
        assert_eq!(a, b);
    }

    #[test]
    fn general_attitude() {
        let (phi, theta) = (0.3_f64, -0.4_f64);
        let w = BodyRates::new(0.7, -1.1, 0.9);
        let d = euler_rates(&EulerAngles::new(phi, theta, 0.0), &w);
        assert_relative_eq!(
            d.roll_dot,
            theta.tan() * phi.sin() * w.p + theta.tan() * phi.cos() * w.r,
            epsilon = 1e-12
        );
        assert_relative_eq!(d.pitch_dot, phi.cos() * w.q - phi.sin() * w.r, epsilon = 1e-12);
        assert_relative_eq!(
            d.yaw_dot,
            (phi.sin() * w.q + phi.cos() * w.r) / theta.cos(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn near_gimbal_lock_blows_up_without_panicking() {
        let w = BodyRates::new(1.0, 1.0, 1.0);
        let d = euler_rates(&EulerAngles::new(0.1, FRAC_PI_2 - 1e-12, 0.0), &w);
        assert!(d.yaw_dot.abs() > 1e10, "yaw rate should diverge, got {}", d.yaw_dot);
    }
}
