use std::borrow::Cow;

use crate::error::{ControlError, ControlResult};

// ---------------------------------------------------------------------------
// Embedded reference data
// ---------------------------------------------------------------------------

/// Target vertical acceleration (m/s^2), one sample per control step.
pub static ACCELERATION_PROFILE: [f64; 16] = [
    11.46, 58.68, 114.24, 36.99, 27.84, 22.33, 20.25, 19.85, 20.36, -5.26, -10.83, -10.77,
    -10.85, -10.94, -10.83, -10.62,
];

/// Target altitude (m) sampled at the same control rate. Not tracked by the
/// default law; hosts use it to report altitude deviation.
pub static ALTITUDE_PROFILE: [f64; 39] = [
    3.5, 4.9, 6.3, 7.9, 9.5, 11.3, 12.8, 14.3, 15.8, 17.2, 18.6, 19.9, 21.2, 22.4, 22.4, 23.6,
    24.7, 25.7, 26.8, 27.7, 28.6, 29.5, 30.3, 31.1, 31.8, 32.5, 33.1, 33.6, 34.2, 34.6, 35.1,
    35.4, 35.8, 36.0, 36.3, 36.5, 36.6, 36.7, 36.7,
];

// ---------------------------------------------------------------------------
// Reference profile
// ---------------------------------------------------------------------------

/// Immutable, non-empty sequence of targets indexed by control step.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceProfile {
    samples: Cow<'static, [f64]>,
}

impl ReferenceProfile {
    /// The embedded acceleration table.
    pub fn acceleration() -> Self {
        Self { samples: Cow::Borrowed(&ACCELERATION_PROFILE) }
    }

    /// The embedded altitude table.
    pub fn altitude() -> Self {
        Self { samples: Cow::Borrowed(&ALTITUDE_PROFILE) }
    }

    /// A custom profile. Must contain at least one sample.
    pub fn from_samples(samples: Vec<f64>) -> ControlResult<Self> {
        if samples.is_empty() {
            return Err(ControlError::EmptyProfile);
        }
        Ok(Self { samples: Cow::Owned(samples) })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, step: usize) -> Option<f64> {
        self.samples.get(step).copied()
    }

    /// Target for the first control step; doubles as the activation level.
    pub fn first(&self) -> f64 {
        self.samples[0]
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }
}

impl Default for ReferenceProfile {
    fn default() -> Self {
        Self::acceleration()
    }
}
