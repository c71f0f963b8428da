use crate::dynamics::gimbal;
use crate::dynamics::state::{BodyRates, EulerAngles, EulerRates};

// ---------------------------------------------------------------------------
// Classical 4th-order Runge-Kutta on the Euler-angle rates
// ---------------------------------------------------------------------------

/// RK4-weighted average rate over one step for an arbitrary right-hand side.
///
/// Returns (k1 + 2k2 + 2k3 + k4) / 6. The caller applies it with a single
/// explicit step: `angles.apply(&avg, dt)`.
pub fn rk4_average<F>(f: F, angles: &EulerAngles, dt: f64) -> EulerRates
where
    F: Fn(&EulerAngles) -> EulerRates,
{
    let k1 = f(angles);
    let k2 = f(&angles.apply(&k1, dt * 0.5));
    let k3 = f(&angles.apply(&k2, dt * 0.5));
    let k4 = f(&angles.apply(&k3, dt));

    EulerRates {
        roll_dot: (k1.roll_dot + 2.0 * k2.roll_dot + 2.0 * k3.roll_dot + k4.roll_dot) / 6.0,
        pitch_dot: (k1.pitch_dot + 2.0 * k2.pitch_dot + 2.0 * k3.pitch_dot + k4.pitch_dot) / 6.0,
        yaw_dot: (k1.yaw_dot + 2.0 * k2.yaw_dot + 2.0 * k3.yaw_dot + k4.yaw_dot) / 6.0,
    }
}

/// Averaged Euler-angle rate for one step of the gimbal equation.
///
/// Body rates are frozen at their start-of-step sample for all four stages;
/// they are not re-sampled at t + dt/2 or t + dt.
pub fn advance(angles: &EulerAngles, w: &BodyRates, dt: f64) -> EulerRates {
    rk4_average(|a| gimbal::euler_rates(a, w), angles, dt)
}
