use nalgebra::Vector3;

use crate::error::{ControlError, ControlResult};

// ---------------------------------------------------------------------------
// Physical constants
// ---------------------------------------------------------------------------

pub const G0: f64 = 9.80665; // m/s^2
pub const RHO_SEA_LEVEL: f64 = 1.225; // kg/m^3, flights stay far below 1 km

// ---------------------------------------------------------------------------
// Point-mass flight state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct FlightState {
    pub time: f64,
    pub pos: Vector3<f64>, // m, [East, North, Up]
    pub vel: Vector3<f64>, // m/s
    pub mass: f64,         // kg
}

impl FlightState {
    /// At rest on the pad.
    pub fn launch(mass: f64) -> Self {
        Self { time: 0.0, pos: Vector3::zeros(), vel: Vector3::zeros(), mass }
    }

    pub fn apply(&self, d: &Deriv, dt: f64) -> FlightState {
        FlightState {
            time: self.time + dt,
            pos: self.pos + d.dpos * dt,
            vel: self.vel + d.dvel * dt,
            mass: (self.mass + d.dmass * dt).max(0.0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Deriv {
    pub dpos: Vector3<f64>,
    pub dvel: Vector3<f64>,
    pub dmass: f64,
}

// ---------------------------------------------------------------------------
// Flight config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct FlightConfig {
    pub dt: f64,
    pub max_time: f64,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            dt: 0.01,       // 100 Hz, several host steps per control period
            max_time: 30.0, // s
        }
    }
}

impl FlightConfig {
    /// Reject step sizes that would never advance the clock.
    pub fn validate(&self) -> ControlResult<()> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ControlError::Config(format!("dt must be finite and > 0, got {}", self.dt)));
        }
        if !self.max_time.is_finite() {
            return Err(ControlError::Config(format!(
                "max_time must be finite, got {}",
                self.max_time
            )));
        }
        Ok(())
    }
}
