use crate::error::{ControlError, ControlResult};

/// Scale applied to configured gains before they reach the control law.
pub const GAIN_SCALE: f64 = 0.001;

// ---------------------------------------------------------------------------
// Gain set (scaled once per run)
// ---------------------------------------------------------------------------

/// Proportional, integral and derivative gains, already multiplied by
/// [`GAIN_SCALE`]. Fixed for the lifetime of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainSet {
    p: f64,
    i: f64,
    d: f64,
}

impl GainSet {
    /// Build from the raw values a user configures. Non-finite gains are rejected.
    pub fn from_raw(p: f64, i: f64, d: f64) -> ControlResult<Self> {
        Ok(Self {
            p: scale("pGain", p)?,
            i: scale("iGain", i)?,
            d: scale("dGain", d)?,
        })
    }

    /// Build from gains that are already scaled.
    pub fn scaled(p: f64, i: f64, d: f64) -> ControlResult<Self> {
        Ok(Self {
            p: finite("pGain", p)?,
            i: finite("iGain", i)?,
            d: finite("dGain", d)?,
        })
    }

    pub fn p(&self) -> f64 {
        self.p
    }

    pub fn i(&self) -> f64 {
        self.i
    }

    pub fn d(&self) -> f64 {
        self.d
    }
}

impl Default for GainSet {
    fn default() -> Self {
        Self { p: 0.0, i: 0.0, d: 0.0 }
    }
}

fn finite(name: &'static str, value: f64) -> ControlResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ControlError::InvalidGain { name, value })
    }
}

fn scale(name: &'static str, raw: f64) -> ControlResult<f64> {
    finite(name, raw).map(|v| v * GAIN_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn raw_gains_are_scaled() {
        let g = GainSet::from_raw(100.0, 2.0, -5.0).unwrap();
        assert_relative_eq!(g.p(), 0.1);
        assert_relative_eq!(g.i(), 0.002);
        assert_relative_eq!(g.d(), -0.005);
    }

    #[test]
    fn non_finite_gain_rejected() {
        let err = GainSet::from_raw(1.0, f64::NAN, 0.0).unwrap_err();
        assert!(matches!(err, ControlError::InvalidGain { name: "iGain", .. }));

        let err = GainSet::scaled(f64::INFINITY, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, ControlError::InvalidGain { name: "pGain", .. }));
    }
}
