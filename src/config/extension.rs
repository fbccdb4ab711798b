use tracing::info;

use crate::control::{ControlLoop, GainSet};
use crate::error::ControlResult;

use super::store::ConfigStore;
use super::ControlConfig;

const P_GAIN: &str = "pGain";
const I_GAIN: &str = "iGain";
const D_GAIN: &str = "dGain";

/// User-facing gain settings backed by a [`ConfigStore`].
///
/// Gains are stored unscaled, exactly as configured. [`initialize`](Self::initialize)
/// scales them once and hands a fresh [`ControlLoop`] to the run.
#[derive(Debug)]
pub struct FinControlExtension<S: ConfigStore> {
    store: S,
}

impl<S: ConfigStore> FinControlExtension<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn name(&self) -> &'static str {
        "PID Fin Control"
    }

    pub fn description(&self) -> &'static str {
        "This extension controls Fin thickness using PID."
    }

    pub fn p_gain(&self) -> f64 {
        self.store.get_double(P_GAIN, 0.0)
    }

    pub fn i_gain(&self) -> f64 {
        self.store.get_double(I_GAIN, 0.0)
    }

    pub fn d_gain(&self) -> f64 {
        self.store.get_double(D_GAIN, 0.0)
    }

    pub fn set_p_gain(&mut self, value: f64) {
        self.store.put(P_GAIN, value);
    }

    pub fn set_i_gain(&mut self, value: f64) {
        self.store.put(I_GAIN, value);
    }

    pub fn set_d_gain(&mut self, value: f64) {
        self.store.put(D_GAIN, value);
    }

    /// Current gains, scaled. Fails on non-finite values.
    pub fn gains(&self) -> ControlResult<GainSet> {
        GainSet::from_raw(self.p_gain(), self.i_gain(), self.d_gain())
    }

    /// Build the controller for one simulation run.
    pub fn initialize(&self, config: ControlConfig) -> ControlResult<ControlLoop> {
        let gains = self.gains()?;
        info!(
            p = self.p_gain(),
            i = self.i_gain(),
            d = self.d_gain(),
            "initializing {}",
            self.name()
        );
        ControlLoop::new(config, gains)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
