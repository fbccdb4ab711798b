use super::gains::GainSet;

/// Error terms handed to a control law on every accepted update.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ErrorTerms {
    pub error: f64,
    /// Running sum of `error * nominal_period`.
    pub integral: f64,
    /// `(error - previous error) / nominal_period`.
    pub derivative: f64,
}

/// Maps error terms to an unclamped actuator offset.
///
/// The loop clamps the result to the output limits and adds the base
/// thickness; implementations only produce the raw correction.
pub trait ControlLaw {
    fn output(&mut self, gains: &GainSet, terms: &ErrorTerms) -> f64;

    fn name(&self) -> &str {
        "unnamed"
    }
}

// ---------------------------------------------------------------------------
// Proportional law (default)
// ---------------------------------------------------------------------------

/// `p * error`. Integral and derivative terms are tracked by the loop but
/// ignored here.
#[derive(Debug, Clone, Copy, Default)]
pub struct Proportional;

impl ControlLaw for Proportional {
    fn output(&mut self, gains: &GainSet, terms: &ErrorTerms) -> f64 {
        gains.p() * terms.error
    }

    fn name(&self) -> &str {
        "Proportional"
    }
}

// ---------------------------------------------------------------------------
// Full PID law (opt-in)
// ---------------------------------------------------------------------------

/// `p * e + i * integral - d * derivative`.
///
/// Experimental. The derivative sign follows the draft law the controller was
/// tuned against and has not been validated in flight.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pid;

impl ControlLaw for Pid {
    fn output(&mut self, gains: &GainSet, terms: &ErrorTerms) -> f64 {
        gains.p() * terms.error + gains.i() * terms.integral - gains.d() * terms.derivative
    }

    fn name(&self) -> &str {
        "Pid"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn terms() -> ErrorTerms {
        ErrorTerms { error: 0.5, integral: 2.0, derivative: 4.0 }
    }

    #[test]
    fn proportional_ignores_i_and_d() {
        let gains = GainSet::scaled(1.0, 10.0, 10.0).unwrap();
        let out = Proportional.output(&gains, &terms());
        assert_relative_eq!(out, 0.5);
    }

    #[test]
    fn pid_combines_all_terms() {
        let gains = GainSet::scaled(1.0, 0.1, 0.01).unwrap();
        let out = Pid.output(&gains, &terms());
        assert_relative_eq!(out, 0.5 + 0.2 - 0.04);
    }
}
