// ---------------------------------------------------------------------------
// Sample clock: sample-and-hold gating at the nominal control period
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SampleClock {
    period: f64,
    last_update: Option<f64>,
}

impl SampleClock {
    pub fn new(period: f64) -> Self {
        Self { period, last_update: None }
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    /// Time of the most recent accepted update, if any.
    pub fn last_update(&self) -> Option<f64> {
        self.last_update
    }

    /// True when `time` is at least one period past the last accepted update.
    /// The very first update is always due.
    pub fn is_due(&self, time: f64) -> bool {
        match self.last_update {
            None => true,
            Some(last) => time - last >= self.period,
        }
    }

    pub fn mark(&mut self, time: f64) {
        self.last_update = Some(time);
    }
}
