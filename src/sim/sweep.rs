use rayon::prelude::*;
use tracing::info;

use super::runner::{run_with, SimState};
use crate::dynamics::rates::RateProfile;
use crate::dynamics::state::{InitialConditions, SimConfig, StateRecord};
use crate::error::SimError;

// ---------------------------------------------------------------------------
// Step-size sweep
// ---------------------------------------------------------------------------

/// Records of one run in a sweep.
#[derive(Debug, Clone)]
pub struct SweepRun {
    pub config: SimConfig,
    pub records: Vec<StateRecord>,
    pub final_state: SimState,
}

/// Drop repeated step sizes, keeping the first occurrence of each.
///
/// Run outputs are keyed by step size, so repeats would only redo and
/// overwrite an identical run.
pub fn unique_steps(steps: &[f64]) -> Vec<f64> {
    let mut seen = Vec::with_capacity(steps.len());
    for &dt in steps {
        if !seen.iter().any(|s: &f64| s.to_bits() == dt.to_bits()) {
            seen.push(dt);
        }
    }
    seen
}

/// Run one independent simulation per step size over a shared horizon.
///
/// Each run owns its own state. With `parallel` the runs are spread over the
/// rayon pool; results come back in the order of `steps` either way.
pub fn sweep(
    steps: &[f64],
    horizon: f64,
    ic: &InitialConditions,
    profile: &(dyn RateProfile + Sync),
    parallel: bool,
) -> Result<Vec<SweepRun>, SimError> {
    info!(runs = steps.len(), horizon, parallel, "sweeping step sizes");

    let run = |&dt: &f64| -> Result<SweepRun, SimError> {
        let config = SimConfig { dt, horizon };
        let (records, final_state) = run_with(&config, ic, profile)?;
        Ok(SweepRun { config, records, final_state })
    };

    if parallel {
        steps.par_iter().map(run).collect()
    } else {
        steps.iter().map(run).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::rates::AnalyticRates;
    use crate::dynamics::state::REFERENCE_STEPS;

    #[test]
    fn parallel_matches_serial() {
        let ic = InitialConditions::default();
        let serial = sweep(&REFERENCE_STEPS, 10.0, &ic, &AnalyticRates, false).unwrap();
        let parallel = sweep(&REFERENCE_STEPS, 10.0, &ic, &AnalyticRates, true).unwrap();

        assert_eq!(serial.len(), parallel.len());
        for (a, b) in serial.iter().zip(&parallel) {
            assert_eq!(a.config, b.config);
            assert_eq!(a.records, b.records);
            assert_eq!(a.final_state.dcm, b.final_state.dcm);
        }
    }

    #[test]
    fn run_lengths_follow_step_size() {
        let ic = InitialConditions::default();
        let runs = sweep(&REFERENCE_STEPS, 60.0, &ic, &AnalyticRates, true).unwrap();
        let lens: Vec<usize> = runs.iter().map(|r| r.records.len()).collect();
        assert_eq!(lens, vec![300, 600, 2400, 4800]);
    }

    #[test]
    fn repeated_steps_are_dropped_in_order() {
        let steps = unique_steps(&[0.1, 0.2, 0.1, 0.025, 0.2, 0.1]);
        assert_eq!(steps, vec![0.1, 0.2, 0.025]);
        assert_eq!(unique_steps(&REFERENCE_STEPS), REFERENCE_STEPS.to_vec());
        assert!(unique_steps(&[]).is_empty());
    }

    #[test]
    fn bad_step_aborts_sweep() {
        let ic = InitialConditions::default();
        let res = sweep(&[0.1, -1.0], 1.0, &ic, &AnalyticRates, false);
        assert!(matches!(res, Err(SimError::InvalidStep { .. })));
    }
}
