//! Controller tuning constants and the gain configuration surface.

pub mod extension;
pub mod store;

pub use extension::FinControlExtension;
pub use store::{ConfigStore, MemoryStore};

use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};

/// Fixed constants of the fin controller.
///
/// The defaults reproduce the tuned flight configuration; other values are
/// mainly useful for tests and alternative vehicles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Control period (s). Host steps closer together than this are held.
    /// Also the divisor of the acceleration estimate.
    pub nominal_period: f64,

    /// Simulation time (s) at which the controller activates.
    pub activation_time: f64,

    /// Fin thickness (m) with zero control output.
    pub base_thickness: f64,

    /// Lower clamp on the control output (m).
    pub output_min: f64,

    /// Upper clamp on the control output (m).
    pub output_max: f64,

    /// Exact name of the fin set to command.
    pub actuator_name: String,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            nominal_period: 0.07,
            activation_time: 0.07,
            base_thickness: 0.003,
            output_min: 0.0,
            output_max: 0.007,
            actuator_name: "Trapezoidal fin set".to_string(),
        }
    }
}

impl ControlConfig {
    /// Validate all parameters.
    pub fn validate(&self) -> ControlResult<()> {
        let finite = [
            ("nominal_period", self.nominal_period),
            ("activation_time", self.activation_time),
            ("base_thickness", self.base_thickness),
            ("output_min", self.output_min),
            ("output_max", self.output_max),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ControlError::Config(format!("{name} must be finite, got {value}")));
            }
        }
        if self.nominal_period <= 0.0 {
            return Err(ControlError::Config(format!(
                "nominal_period must be > 0, got {}",
                self.nominal_period
            )));
        }
        if self.output_min > self.output_max {
            return Err(ControlError::Config(format!(
                "output_min ({}) must not exceed output_max ({})",
                self.output_min, self.output_max
            )));
        }
        if self.actuator_name.is_empty() {
            return Err(ControlError::Config("actuator_name must not be empty".to_string()));
        }
        Ok(())
    }

    /// Load from JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ControlResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ControlError::Config(format!("JSON parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}
