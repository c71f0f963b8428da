use std::io;

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("Invalid time step: {dt} (must be finite and > 0)")]
    InvalidStep { dt: f64 },

    #[error("Invalid horizon: {horizon} (must be finite and >= 0)")]
    InvalidHorizon { horizon: f64 },

    #[error("Step count for horizon {horizon} at dt {dt} does not fit in usize")]
    TooManySteps { dt: f64, horizon: f64 },

    #[error("DCM row {row} has zero norm at step {step}")]
    DegenerateDcmRow { row: usize, step: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
