use nalgebra::{Matrix3, Vector3};

use crate::error::SimError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const KNOTS_TO_FPS: f64 = 1.68781; // ft/s per knot
pub const DEFAULT_SPEED_KNOTS: f64 = 60.0;
pub const DEFAULT_HORIZON: f64 = 60.0; // s
pub const DEFAULT_DT: f64 = 0.1; // s

/// Step sizes swept by the reference driver.
pub const REFERENCE_STEPS: [f64; 4] = [0.2, 0.1, 0.025, 0.0125];

// ---------------------------------------------------------------------------
// Body rates, Euler angles, Euler rates
// ---------------------------------------------------------------------------

/// Body-frame angular rates, rad/s.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BodyRates {
    pub p: f64, // roll rate
    pub q: f64, // pitch rate
    pub r: f64, // yaw rate
}

impl BodyRates {
    pub fn new(p: f64, q: f64, r: f64) -> Self {
        Self { p, q, r }
    }

    pub fn to_degrees(&self) -> Vector3<f64> {
        Vector3::new(self.p.to_degrees(), self.q.to_degrees(), self.r.to_degrees())
    }
}

/// Roll, pitch, yaw in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EulerAngles {
    pub roll: f64,  // φ
    pub pitch: f64, // θ, singular at ±π/2
    pub yaw: f64,   // ψ
}

impl EulerAngles {
    pub fn new(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self { roll, pitch, yaw }
    }

    /// Advance angles by a rate scaled by dt (explicit Euler; also used for RK4 sub-stages).
    pub fn apply(&self, d: &EulerRates, dt: f64) -> EulerAngles {
        EulerAngles {
            roll: self.roll + d.roll_dot * dt,
            pitch: self.pitch + d.pitch_dot * dt,
            yaw: self.yaw + d.yaw_dot * dt,
        }
    }

    pub fn to_degrees(&self) -> Vector3<f64> {
        Vector3::new(
            self.roll.to_degrees(),
            self.pitch.to_degrees(),
            self.yaw.to_degrees(),
        )
    }

    pub fn is_finite(&self) -> bool {
        self.roll.is_finite() && self.pitch.is_finite() && self.yaw.is_finite()
    }
}

/// Time derivative of the Euler angles, rad/s.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EulerRates {
    pub roll_dot: f64,
    pub pitch_dot: f64,
    pub yaw_dot: f64,
}

impl EulerRates {
    pub fn new(roll_dot: f64, pitch_dot: f64, yaw_dot: f64) -> Self {
        Self { roll_dot, pitch_dot, yaw_dot }
    }

    pub fn to_degrees(&self) -> Vector3<f64> {
        Vector3::new(
            self.roll_dot.to_degrees(),
            self.pitch_dot.to_degrees(),
            self.yaw_dot.to_degrees(),
        )
    }
}

// ---------------------------------------------------------------------------
// Output record
// ---------------------------------------------------------------------------

/// One emitted row. Angles and rates are in degrees; velocity ft/s, position ft.
#[derive(Debug, Clone, PartialEq)]
pub struct StateRecord {
    pub time: f64,
    pub euler_deg: Vector3<f64>,       // attitude at `time`
    pub rates_deg: Vector3<f64>,       // p, q, r sampled at `time`
    pub euler_rate_deg: Vector3<f64>,  // RK4-averaged rate used for the step
    pub vel_ned: Vector3<f64>,
    pub pos_ned: Vector3<f64>,
}

impl StateRecord {
    pub fn is_finite(&self) -> bool {
        self.euler_deg.iter().all(|v| v.is_finite())
            && self.euler_rate_deg.iter().all(|v| v.is_finite())
            && self.vel_ned.iter().all(|v| v.is_finite())
            && self.pos_ned.iter().all(|v| v.is_finite())
    }
}

// ---------------------------------------------------------------------------
// Initial conditions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct InitialConditions {
    pub euler: EulerAngles,
    pub dcm: Matrix3<f64>,           // body → NED
    pub body_velocity: Vector3<f64>, // ft/s, constant for the run
    pub position: Vector3<f64>,      // ft, NED
}

impl InitialConditions {
    /// Default conditions with the body x-axis speed given in knots.
    pub fn with_speed_knots(knots: f64) -> Self {
        Self {
            body_velocity: Vector3::new(knots * KNOTS_TO_FPS, 0.0, 0.0),
            ..Self::default()
        }
    }
}

impl Default for InitialConditions {
    fn default() -> Self {
        Self {
            euler: EulerAngles::default(),
            dcm: Matrix3::identity(),
            body_velocity: Vector3::new(DEFAULT_SPEED_KNOTS * KNOTS_TO_FPS, 0.0, 0.0),
            position: Vector3::zeros(),
        }
    }
}

// ---------------------------------------------------------------------------
// Simulation config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    pub dt: f64,
    pub horizon: f64,
}

impl SimConfig {
    pub fn new(dt: f64) -> Self {
        Self { dt, ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(SimError::InvalidStep { dt: self.dt });
        }
        if !self.horizon.is_finite() || self.horizon < 0.0 {
            return Err(SimError::InvalidHorizon { horizon: self.horizon });
        }
        // `as usize` saturates, so counts at or past usize::MAX are rejected
        if (self.horizon / self.dt).floor() >= usize::MAX as f64 {
            return Err(SimError::TooManySteps { dt: self.dt, horizon: self.horizon });
        }
        Ok(())
    }

    /// Whole steps that fit in the horizon; a trailing partial step is dropped.
    pub fn total_steps(&self) -> usize {
        (self.horizon / self.dt).floor() as usize
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            horizon: DEFAULT_HORIZON,
        }
    }
}
