use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::dynamics::state::StateRecord;
use crate::error::SimError;
use crate::sim::{SimState, SweepRun};

/// Summary statistics for one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub dt: f64,
    pub steps: usize,
    pub final_time: f64,
    pub final_euler_deg: [f64; 3],
    pub final_pos_ned_ft: [f64; 3],
    pub max_speed_fps: f64,
    pub finite: bool,
    pub dcm: Option<DcmHealth>,
    /// Distance between this run's final position and the finest run's, ft.
    pub pos_diff_vs_finest_ft: Option<f64>,
}

impl RunSummary {
    /// Compute summary from trajectory data.
    pub fn from_records(dt: f64, records: &[StateRecord]) -> Self {
        let (final_time, final_euler_deg, final_pos_ned_ft) = match records.last() {
            Some(last) => {
                let (e, p) = (&last.euler_deg, &last.pos_ned);
                (last.time, [e.x, e.y, e.z], [p.x, p.y, p.z])
            }
            None => (0.0, [0.0; 3], [0.0; 3]),
        };

        let max_speed_fps = records
            .iter()
            .map(|r| r.vel_ned.norm())
            .fold(0.0_f64, f64::max);

        RunSummary {
            dt,
            steps: records.len(),
            final_time,
            final_euler_deg,
            final_pos_ned_ft,
            max_speed_fps,
            finite: records.iter().all(StateRecord::is_finite),
            dcm: None,
            pos_diff_vs_finest_ft: None,
        }
    }
}

/// Worst DCM drift over a run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DcmHealth {
    pub max_row_norm_error: f64,
    pub max_orthogonality_error: f64,
}

impl DcmHealth {
    pub fn of(state: &SimState) -> Self {
        Self {
            max_row_norm_error: state.max_row_norm_error,
            max_orthogonality_error: state.max_orthogonality_error,
        }
    }
}

/// Summary of a whole sweep.
#[derive(Debug, Clone, Serialize)]
pub struct SweepSummary {
    pub horizon: f64,
    pub runs: Vec<RunSummary>,
}

impl SweepSummary {
    /// Summarize each run and measure its final-position gap to the smallest-dt run.
    pub fn from_runs(horizon: f64, runs: &[SweepRun]) -> Self {
        let mut summaries: Vec<RunSummary> = runs
            .iter()
            .map(|r| RunSummary {
                dcm: Some(DcmHealth::of(&r.final_state)),
                ..RunSummary::from_records(r.config.dt, &r.records)
            })
            .collect();

        let finest = summaries
            .iter()
            .filter(|s| s.steps > 0)
            .min_by(|a, b| a.dt.total_cmp(&b.dt))
            .map(|s| s.final_pos_ned_ft);

        if let Some(reference) = finest {
            for s in summaries.iter_mut().filter(|s| s.steps > 0) {
                let d: f64 = s
                    .final_pos_ned_ft
                    .iter()
                    .zip(&reference)
                    .map(|(a, b)| (a - b).powi(2))
                    .sum();
                s.pos_diff_vs_finest_ft = Some(d.sqrt());
            }
        }

        SweepSummary { horizon, runs: summaries }
    }
}

/// Write a sweep summary as pretty JSON.
pub fn write_summary<W: Write>(writer: W, summary: &SweepSummary) -> Result<(), SimError> {
    serde_json::to_writer_pretty(writer, summary)?;
    Ok(())
}

/// Write a sweep summary JSON to a file.
pub fn write_summary_file(path: impl AsRef<Path>, summary: &SweepSummary) -> Result<(), SimError> {
    let file = std::fs::File::create(path)?;
    write_summary(std::io::BufWriter::new(file), summary)
}
