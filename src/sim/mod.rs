pub mod integrator;
pub mod runner;
pub mod sweep;

pub use runner::{run_with, simulate, simulate_with, SimState, Simulation};
pub use integrator::{advance, rk4_average};
pub use sweep::{sweep, unique_steps, SweepRun};
