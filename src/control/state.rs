use super::law::ErrorTerms;

/// Controller lifecycle. `Exhausted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Active,
    Exhausted,
}

// ---------------------------------------------------------------------------
// Per-run controller state
// ---------------------------------------------------------------------------

/// Mutable state owned by one [`ControlLoop`](super::ControlLoop) for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerState {
    pub phase: Phase,
    /// Index of the next reference sample; never exceeds the profile length.
    pub step_index: usize,
    pub last_velocity: f64,
    pub last_acceleration: f64,
    pub last_error: f64,
    pub last_command: f64,
    pub error_integral: f64,
}

impl ControllerState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            step_index: 0,
            last_velocity: 0.0,
            last_acceleration: 0.0,
            last_error: 0.0,
            last_command: 0.0,
            error_integral: 0.0,
        }
    }

    /// Backward-difference acceleration over the nominal period, not the
    /// actual elapsed time. Updates the stored velocity and acceleration.
    pub fn estimate_acceleration(&mut self, velocity_z: f64, period: f64) -> f64 {
        let acc = (velocity_z - self.last_velocity) / period;
        self.last_velocity = velocity_z;
        self.last_acceleration = acc;
        acc
    }

    /// Fold a new error sample into the running terms and remember it.
    pub fn accumulate(&mut self, error: f64, period: f64) -> ErrorTerms {
        self.error_integral += error * period;
        let derivative = (error - self.last_error) / period;
        self.last_error = error;
        ErrorTerms { error, integral: self.error_integral, derivative }
    }
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::new()
    }
}
