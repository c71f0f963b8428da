use nalgebra::{Matrix3, Vector3};
use tracing::{debug, warn};

use super::integrator;
use crate::dynamics::dcm;
use crate::dynamics::rates::{AnalyticRates, RateProfile};
use crate::dynamics::state::{EulerAngles, InitialConditions, SimConfig, StateRecord};
use crate::error::SimError;

// ---------------------------------------------------------------------------
// Evolving state of one run
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SimState {
    pub step: usize,
    pub euler: EulerAngles,
    pub dcm: Matrix3<f64>,           // body → NED
    pub body_velocity: Vector3<f64>, // ft/s
    pub pos_ned: Vector3<f64>,       // ft
    /// Worst DCM row-norm error so far, initial DCM included.
    pub max_row_norm_error: f64,
    /// Worst DCM inter-row dot product so far, initial DCM included.
    pub max_orthogonality_error: f64,
}

impl SimState {
    pub fn new(ic: &InitialConditions) -> Self {
        Self {
            step: 0,
            euler: ic.euler,
            dcm: ic.dcm,
            body_velocity: ic.body_velocity,
            pos_ned: ic.position,
            max_row_norm_error: dcm::row_norm_error(&ic.dcm),
            max_orthogonality_error: dcm::orthogonality_error(&ic.dcm),
        }
    }

    /// Advance one step and return the record for it.
    pub fn advance(&mut self, profile: &dyn RateProfile, dt: f64) -> Result<StateRecord, SimError> {
        let t = self.step as f64 * dt;
        let w = profile.rates(t);

        self.dcm = dcm::step(&self.dcm, &w, dt)
            .map_err(|e| SimError::DegenerateDcmRow { row: e.row, step: self.step })?;
        self.max_row_norm_error = self.max_row_norm_error.max(dcm::row_norm_error(&self.dcm));
        self.max_orthogonality_error =
            self.max_orthogonality_error.max(dcm::orthogonality_error(&self.dcm));

        let vel_ned = self.dcm * self.body_velocity;
        self.pos_ned += vel_ned * dt;

        let attitude = self.euler;
        let euler_rate = integrator::advance(&attitude, &w, dt);
        self.euler = attitude.apply(&euler_rate, dt);
        self.step += 1;

        Ok(StateRecord {
            time: t,
            euler_deg: attitude.to_degrees(),
            rates_deg: w.to_degrees(),
            euler_rate_deg: euler_rate.to_degrees(),
            vel_ned,
            pos_ned: self.pos_ned,
        })
    }
}

// ---------------------------------------------------------------------------
// Step iterator
// ---------------------------------------------------------------------------

/// One run as a stream of records, in step order.
///
/// Ends after `config.total_steps()` records, or right after the first error.
pub struct Simulation<'a> {
    state: SimState,
    profile: &'a dyn RateProfile,
    dt: f64,
    total_steps: usize,
    failed: bool,
}

impl<'a> Simulation<'a> {
    pub fn new(
        config: &SimConfig,
        ic: &InitialConditions,
        profile: &'a dyn RateProfile,
    ) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self {
            state: SimState::new(ic),
            profile,
            dt: config.dt,
            total_steps: config.total_steps(),
            failed: false,
        })
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }
}

impl Iterator for Simulation<'_> {
    type Item = Result<StateRecord, SimError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.state.step >= self.total_steps {
            return None;
        }
        let rec = self.state.advance(self.profile, self.dt);
        self.failed = rec.is_err();
        Some(rec)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.total_steps.saturating_sub(self.state.step);
        (0, Some(left))
    }
}

// ---------------------------------------------------------------------------
// Full run
// ---------------------------------------------------------------------------

/// Run to the horizon, returning the records and the state after the last step.
pub fn run_with(
    config: &SimConfig,
    ic: &InitialConditions,
    profile: &dyn RateProfile,
) -> Result<(Vec<StateRecord>, SimState), SimError> {
    let mut sim = Simulation::new(config, ic, profile)?;
    debug!(
        dt = config.dt,
        steps = sim.total_steps(),
        profile = profile.name(),
        "starting run"
    );

    let mut records = Vec::with_capacity(sim.total_steps().min(100_000));
    let mut warned = false;
    for rec in sim.by_ref() {
        let rec = rec?;
        if !warned && !rec.is_finite() {
            warn!(t = rec.time, dt = config.dt, "non-finite state (gimbal lock?)");
            warned = true;
        }
        records.push(rec);
    }

    debug!(dt = config.dt, records = records.len(), "run complete");
    Ok((records, sim.state))
}

/// Run to the horizon with a custom rate profile and initial conditions.
pub fn simulate_with(
    config: &SimConfig,
    ic: &InitialConditions,
    profile: &dyn RateProfile,
) -> Result<Vec<StateRecord>, SimError> {
    run_with(config, ic, profile).map(|(records, _)| records)
}

/// Run with the analytic rate profile and default initial conditions.
pub fn simulate(config: &SimConfig) -> Result<Vec<StateRecord>, SimError> {
    simulate_with(config, &InitialConditions::default(), &AnalyticRates)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
