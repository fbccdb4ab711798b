//! Minimal vertical-flight host used to exercise the controller end to end.

pub mod event;
pub mod integrator;
pub mod runner;
pub mod state;

pub use event::{EventKind, SimEvent};
pub use integrator::rk4_step;
pub use runner::{fly, Flight};
pub use state::{FlightConfig, FlightState};
