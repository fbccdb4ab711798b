use tracing::warn;

// ---------------------------------------------------------------------------
// Channels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Length,
    Acceleration,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Length => "m",
            Unit::Acceleration => "m/s^2",
        }
    }
}

/// Name, plot symbol and unit of a telemetry channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelDescriptor {
    pub name: &'static str,
    pub symbol: &'static str,
    pub unit: Unit,
}

/// Channels written by the fin controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    FinThickness,
    PidError,
    IdealAcceleration,
}

impl Channel {
    pub const ALL: [Channel; 3] =
        [Channel::FinThickness, Channel::PidError, Channel::IdealAcceleration];

    pub fn descriptor(&self) -> ChannelDescriptor {
        match self {
            Channel::FinThickness => ChannelDescriptor {
                name: "Control fin thickness",
                symbol: "\u{03B1}fc",
                unit: Unit::Length,
            },
            Channel::PidError => ChannelDescriptor {
                name: "PID Error",
                symbol: "\u{03B1}fc",
                unit: Unit::Acceleration,
            },
            Channel::IdealAcceleration => ChannelDescriptor {
                name: "Ideal Acceleration",
                symbol: "\u{03B1}fc",
                unit: Unit::Acceleration,
            },
        }
    }

    fn slot(&self) -> usize {
        match self {
            Channel::FinThickness => 0,
            Channel::PidError => 1,
            Channel::IdealAcceleration => 2,
        }
    }
}

/// Write-only recorder the controller publishes into.
pub trait TelemetrySink {
    /// Overwrite the current step's value for `channel`.
    fn record(&mut self, channel: Channel, value: f64);
}

// ---------------------------------------------------------------------------
// In-memory flight data
// ---------------------------------------------------------------------------

/// One host step worth of channel values. `None` means not written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryRow {
    pub time: f64,
    values: [Option<f64>; 3],
}

impl TelemetryRow {
    pub fn get(&self, channel: Channel) -> Option<f64> {
        self.values[channel.slot()]
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }
}

/// Host-side telemetry store: one row per host step, registered channels only.
#[derive(Debug, Clone, Default)]
pub struct FlightData {
    registered: [bool; 3],
    rows: Vec<TelemetryRow>,
}

impl FlightData {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store with every controller channel registered.
    pub fn with_fin_channels() -> Self {
        let mut data = Self::new();
        for channel in Channel::ALL {
            data.register(channel);
        }
        data
    }

    pub fn register(&mut self, channel: Channel) {
        self.registered[channel.slot()] = true;
    }

    pub fn is_registered(&self, channel: Channel) -> bool {
        self.registered[channel.slot()]
    }

    /// Open a new row; subsequent records land in it.
    pub fn begin_step(&mut self, time: f64) {
        self.rows.push(TelemetryRow { time, values: [None; 3] });
    }

    pub fn rows(&self) -> &[TelemetryRow] {
        &self.rows
    }

    pub fn last(&self) -> Option<&TelemetryRow> {
        self.rows.last()
    }

    /// Time series of one channel, skipping steps where it was not written.
    pub fn series(&self, channel: Channel) -> Vec<(f64, f64)> {
        self.rows
            .iter()
            .filter_map(|r| r.get(channel).map(|v| (r.time, v)))
            .collect()
    }
}

impl TelemetrySink for FlightData {
    fn record(&mut self, channel: Channel, value: f64) {
        if !self.is_registered(channel) {
            warn!(channel = channel.descriptor().name, "dropping value for unregistered channel");
            return;
        }
        if self.rows.is_empty() {
            self.begin_step(f64::NAN);
        }
        if let Some(row) = self.rows.last_mut() {
            row.values[channel.slot()] = Some(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_overwrite_within_a_step() {
        let mut data = FlightData::with_fin_channels();
        data.begin_step(0.1);
        data.record(Channel::PidError, 1.0);
        data.record(Channel::PidError, 2.0);
        data.begin_step(0.2);
        data.record(Channel::FinThickness, 0.004);

        assert_eq!(data.rows().len(), 2);
        assert_eq!(data.rows()[0].get(Channel::PidError), Some(2.0));
        assert_eq!(data.rows()[0].get(Channel::FinThickness), None);
        assert_eq!(data.series(Channel::FinThickness), vec![(0.2, 0.004)]);
    }

    #[test]
    fn unregistered_channel_is_dropped() {
        let mut data = FlightData::new();
        data.register(Channel::PidError);
        data.begin_step(0.0);
        data.record(Channel::IdealAcceleration, 11.46);
        assert!(data.last().unwrap().is_empty());
    }

    #[test]
    fn descriptors_carry_units() {
        assert_eq!(Channel::FinThickness.descriptor().unit, Unit::Length);
        assert_eq!(Channel::PidError.descriptor().unit.symbol(), "m/s^2");
        assert_eq!(Channel::IdealAcceleration.descriptor().name, "Ideal Acceleration");
    }
}
