#![doc = include_str!("../README.md")]

pub mod control_curve;
pub mod curve_model;
pub mod economic;
pub mod error;
pub mod gaussian;
pub mod sensitivity;
pub mod simulation;
pub mod spline;

pub use error::{Error, Result};
pub use rayon;

/// Commonly used engine types.
pub mod prelude {
    pub use crate::control_curve::{ControlCurve, ControlPoint, default_nodes};
    pub use crate::curve_model::CurveModel;
    pub use crate::economic::{EconomicDelta, EconomicInputs};
    pub use crate::error::{Error, Result};
    pub use crate::sensitivity::{SensitivityRow, SensitivityTable, SweepParams};
    pub use crate::simulation::{DistributionParams, SimulationResult};
}

/// Initializes the process-wide logger from the `RUST_LOG` environment
/// variable. Safe to call more than once; later calls are no-ops.
pub fn init_logger() {
    let _ = env_logger::Builder::from_default_env().try_init();
}
