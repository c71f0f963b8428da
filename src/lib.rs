pub mod dynamics;
pub mod sim;
pub mod io;
pub mod error;

pub use error::SimError;

// Flat re-exports of the commonly used types
pub mod types {
    pub use crate::dynamics::state::{
        BodyRates, EulerAngles, EulerRates, InitialConditions, SimConfig, StateRecord,
        DEFAULT_DT, DEFAULT_HORIZON, DEFAULT_SPEED_KNOTS, KNOTS_TO_FPS, REFERENCE_STEPS,
    };
    pub use crate::sim::runner::SimState;
}
