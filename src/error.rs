use thiserror::Error;

/// Failures surfaced by the fin controller and its collaborators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ControlError {
    /// The commanded fin set is missing from the vehicle. Aborts the run.
    #[error("A fin set with name '{name}' was not found")]
    ActuatorNotFound { name: String },

    /// A configured gain is NaN or infinite.
    #[error("gain {name} must be finite, got {value}")]
    InvalidGain { name: &'static str, value: f64 },

    /// Invalid controller configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A reference profile needs at least one sample.
    #[error("reference profile is empty")]
    EmptyProfile,

    /// Telemetry or trajectory export failed.
    #[error("io error: {0}")]
    Io(String),
}

pub type ControlResult<T> = Result<T, ControlError>;
