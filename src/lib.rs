//! Fin-thickness flight controller.
//!
//! A fixed-rate loop that estimates vertical acceleration, compares it with a
//! reference profile and commands the thickness of a named fin set. Hosts
//! drive it through [`control::ControlLoop::step`] and supply the vehicle
//! components and a telemetry sink.

pub mod config;
pub mod control;
pub mod error;
pub mod io;
pub mod sim;
pub mod telemetry;
pub mod vehicle;

pub use config::{ControlConfig, FinControlExtension};
pub use control::{ControlLoop, GainSet, ReferenceProfile, StepOutcome};
pub use error::{ControlError, ControlResult};
pub use telemetry::{Channel, TelemetrySink};
