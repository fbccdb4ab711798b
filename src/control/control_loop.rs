use nalgebra::Vector3;
use tracing::{debug, info, trace, warn};

use crate::config::ControlConfig;
use crate::error::ControlResult;
use crate::telemetry::{Channel, TelemetrySink};
use crate::vehicle::{ActuatorHandle, ComponentTree};

use super::clock::SampleClock;
use super::gains::GainSet;
use super::law::{ControlLaw, Proportional};
use super::profile::ReferenceProfile;
use super::state::{ControllerState, Phase};

/// What a single [`ControlLoop::step`] call did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Not yet activated. Nothing was written.
    Idle,
    /// Inside the control period; previous command and error republished.
    Held,
    /// A new command was computed and applied.
    Updated(UpdateReport),
    /// Profile consumed. Nothing was written.
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateReport {
    /// Profile index this update tracked.
    pub step: usize,
    pub reference: f64,
    pub acceleration: f64,
    pub error: f64,
    /// Law output before clamping.
    pub raw_output: f64,
    /// Law output after clamping to the output limits.
    pub output: f64,
    /// Thickness sent to the actuator: base thickness plus output.
    pub command: f64,
    /// Thickness the actuator reported after the write.
    pub readback: f64,
}

// ---------------------------------------------------------------------------
// Control loop
// ---------------------------------------------------------------------------

/// Fixed-rate fin-thickness controller tracking a reference acceleration.
///
/// One instance per simulation run. The host calls [`step`](Self::step)
/// after every integration step, in increasing time order.
#[derive(Debug, Clone)]
pub struct ControlLoop<L: ControlLaw = Proportional> {
    config: ControlConfig,
    gains: GainSet,
    profile: ReferenceProfile,
    clock: SampleClock,
    law: L,
    state: ControllerState,
}

impl ControlLoop<Proportional> {
    /// A proportional-only loop over the embedded acceleration profile.
    pub fn new(config: ControlConfig, gains: GainSet) -> ControlResult<Self> {
        config.validate()?;
        Ok(Self {
            clock: SampleClock::new(config.nominal_period),
            config,
            gains,
            profile: ReferenceProfile::acceleration(),
            law: Proportional,
            state: ControllerState::new(),
        })
    }
}

impl<L: ControlLaw> ControlLoop<L> {
    /// Swap the control law. Intended before the first step.
    pub fn with_law<M: ControlLaw>(self, law: M) -> ControlLoop<M> {
        ControlLoop {
            config: self.config,
            gains: self.gains,
            profile: self.profile,
            clock: self.clock,
            law,
            state: self.state,
        }
    }

    pub fn with_profile(mut self, profile: ReferenceProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    pub fn gains(&self) -> &GainSet {
        &self.gains
    }

    pub fn profile(&self) -> &ReferenceProfile {
        &self.profile
    }

    pub fn law(&self) -> &L {
        &self.law
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Time of the last accepted update.
    pub fn last_update_time(&self) -> Option<f64> {
        self.clock.last_update()
    }

    /// Advance the controller by one host step.
    ///
    /// Fails only when an update is due and the configured actuator cannot be
    /// found in `components`; the host should abort the run.
    pub fn step<T, S>(
        &mut self,
        time: f64,
        velocity: &Vector3<f64>,
        components: &mut T,
        telemetry: &mut S,
    ) -> ControlResult<StepOutcome>
    where
        T: ComponentTree + ?Sized,
        S: TelemetrySink + ?Sized,
    {
        match self.state.phase {
            Phase::Exhausted => return Ok(StepOutcome::Exhausted),
            Phase::Idle => {
                let armed = time >= self.config.activation_time
                    || self.state.last_acceleration >= self.profile.first();
                if !armed {
                    return Ok(StepOutcome::Idle);
                }
                info!(time, law = self.law.name(), "fin controller active");
                self.state.phase = Phase::Active;
            }
            Phase::Active => {}
        }

        let Some(reference) = self.profile.get(self.state.step_index) else {
            self.exhaust(time);
            return Ok(StepOutcome::Exhausted);
        };
        telemetry.record(Channel::IdealAcceleration, reference);

        if !self.clock.is_due(time) {
            telemetry.record(Channel::FinThickness, self.state.last_command);
            telemetry.record(Channel::PidError, self.state.last_error);
            trace!(time, step = self.state.step_index, "holding fin command");
            return Ok(StepOutcome::Held);
        }
        self.clock.mark(time);

        let mut actuator = ActuatorHandle::resolve(components, &self.config.actuator_name)?;

        let period = self.config.nominal_period;
        let acceleration = self.state.estimate_acceleration(velocity.z, period);
        let error = acceleration - reference;
        let step = self.state.step_index;
        self.state.step_index += 1;

        let terms = self.state.accumulate(error, period);
        let raw_output = self.law.output(&self.gains, &terms);
        // NaN passes through clamp.
        let output = if raw_output.is_nan() {
            warn!(step, time, acceleration, "non-finite fin command, using lower limit");
            self.config.output_min
        } else {
            raw_output.clamp(self.config.output_min, self.config.output_max)
        };
        if output != raw_output && !raw_output.is_nan() {
            debug!(step, raw_output, output, "fin command saturated");
        }

        let command = self.config.base_thickness + output;
        self.state.last_command = command;
        let readback = actuator.set(command);

        telemetry.record(Channel::FinThickness, readback);
        telemetry.record(Channel::PidError, error);
        debug!(step, time, acceleration, error, command, "fin command updated");

        if self.state.step_index >= self.profile.len() {
            self.exhaust(time);
        }

        Ok(StepOutcome::Updated(UpdateReport {
            step,
            reference,
            acceleration,
            error,
            raw_output,
            output,
            command,
            readback,
        }))
    }

    fn exhaust(&mut self, time: f64) {
        self.state.phase = Phase::Exhausted;
        info!(time, steps = self.state.step_index, "reference profile exhausted");
    }
}
