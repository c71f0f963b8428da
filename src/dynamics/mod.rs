pub mod state;
pub mod rates;
pub mod gimbal;
pub mod dcm;

pub use rates::{AnalyticRates, ConstantRates, RateProfile};
pub use state::{BodyRates, EulerAngles, EulerRates, InitialConditions, SimConfig, StateRecord};
