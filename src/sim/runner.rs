use tracing::info;

use crate::control::{ControlLaw, ControlLoop, Phase, StepOutcome, UpdateReport};
use crate::error::ControlResult;
use crate::telemetry::FlightData;
use crate::vehicle::Rocket;

use super::event::{ApogeeDetector, BurnoutDetector, EventDetector, EventKind, SimEvent};
use super::integrator::rk4_step;
use super::state::{FlightConfig, FlightState};

/// Result of a controlled flight.
#[derive(Debug, Clone)]
pub struct Flight {
    pub trajectory: Vec<FlightState>,
    pub events: Vec<SimEvent>,
    /// Accepted controller updates with the host time they happened at.
    pub updates: Vec<(f64, UpdateReport)>,
}

impl Flight {
    pub fn apogee(&self) -> f64 {
        self.trajectory.iter().map(|s| s.pos.z).fold(0.0_f64, f64::max)
    }

    pub fn event(&self, kind: &EventKind) -> Option<&SimEvent> {
        self.events.iter().find(|e| &e.kind == kind)
    }

    /// Last recorded state at or before `time`.
    pub fn state_at(&self, time: f64) -> Option<&FlightState> {
        self.trajectory.iter().take_while(|s| s.time <= time).last()
    }
}

// ---------------------------------------------------------------------------
// Controlled flight: integrate, then hand each step to the controller
// ---------------------------------------------------------------------------

/// Fly `rocket` from the pad to ground impact (or `max_time`), invoking the
/// controller after every integration step.
///
/// A controller error aborts the flight and is returned as is.
pub fn fly<L: ControlLaw>(
    rocket: &mut Rocket,
    config: &FlightConfig,
    controller: &mut ControlLoop<L>,
    telemetry: &mut FlightData,
) -> ControlResult<Flight> {
    config.validate()?;
    let mut state = FlightState::launch(rocket.total_mass());

    let capacity = (config.max_time / config.dt) as usize + 1;
    let mut trajectory = Vec::with_capacity(capacity.min(100_000));
    let mut events = vec![SimEvent { time: 0.0, kind: EventKind::Launch, state: state.clone() }];
    let mut updates = Vec::new();

    let mut detectors: Vec<Box<dyn EventDetector>> = vec![
        Box::new(BurnoutDetector { burn_time: rocket.burn_time }),
        Box::new(ApogeeDetector),
    ];

    trajectory.push(state.clone());
    let mut launched = false;

    info!(rocket = %rocket.name, dt = config.dt, "flight started");

    while state.time < config.max_time {
        let prev = state;
        state = rk4_step(&prev, rocket, config.dt);

        let phase_before = controller.phase();
        telemetry.begin_step(state.time);
        let outcome = controller.step(state.time, &state.vel, rocket, telemetry)?;
        if let StepOutcome::Updated(report) = outcome {
            updates.push((state.time, report));
        }
        match (phase_before, controller.phase()) {
            (Phase::Idle, Phase::Active) => push(&mut events, EventKind::ControllerActive, &state),
            (Phase::Idle, Phase::Exhausted) => {
                push(&mut events, EventKind::ControllerActive, &state);
                push(&mut events, EventKind::ProfileExhausted, &state);
            }
            (Phase::Active, Phase::Exhausted) => {
                push(&mut events, EventKind::ProfileExhausted, &state)
            }
            _ => {}
        }

        for det in detectors.iter_mut() {
            if let Some(kind) = det.check(&prev, &state) {
                push(&mut events, kind, &state);
            }
        }

        if state.pos.z > 0.1 {
            launched = true;
        }

        if launched && state.pos.z <= 0.0 {
            state.pos.z = 0.0;
            push(&mut events, EventKind::Landing, &state);
            trajectory.push(state);
            break;
        }

        trajectory.push(state.clone());
    }

    info!(updates = updates.len(), events = events.len(), "flight finished");
    Ok(Flight { trajectory, events, updates })
}

fn push(events: &mut Vec<SimEvent>, kind: EventKind, state: &FlightState) {
    events.push(SimEvent { time: state.time, kind, state: state.clone() });
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ControlConfig;
    use crate::control::GainSet;
    use crate::error::ControlError;
    use crate::telemetry::Channel;
    use crate::vehicle::{presets, BodyTube, RocketBuilder};

    fn controller(raw_p: f64) -> ControlLoop {
        let gains = GainSet::from_raw(raw_p, 0.0, 0.0).unwrap();
        ControlLoop::new(ControlConfig::default(), gains).unwrap()
    }

    #[test]
    fn controlled_flight_consumes_profile() {
        let mut rocket = presets::sport_rocket();
        let mut ctl = controller(100.0);
        let mut data = FlightData::with_fin_channels();
        let flight = fly(&mut rocket, &FlightConfig::default(), &mut ctl, &mut data).unwrap();

        assert_eq!(flight.updates.len(), 16);
        assert_eq!(ctl.phase(), Phase::Exhausted);
        assert!(flight.event(&EventKind::ControllerActive).is_some());
        assert!(flight.event(&EventKind::ProfileExhausted).is_some());
        assert!(flight.event(&EventKind::Apogee).is_some());
        assert!(flight.event(&EventKind::Landing).is_some());
        assert!(flight.apogee() > 10.0);

        for (_, r) in &flight.updates {
            assert!(r.command >= 0.003 - 1e-12 && r.command <= 0.010 + 1e-12);
            assert_eq!(r.readback, r.command);
        }
        // Updates are at least one control period apart.
        for pair in flight.updates.windows(2) {
            assert!(pair[1].0 - pair[0].0 >= 0.07 - 1e-9);
        }
    }

    #[test]
    fn telemetry_only_between_activation_and_exhaustion() {
        let mut rocket = presets::sport_rocket();
        let mut ctl = controller(100.0);
        let mut data = FlightData::with_fin_channels();
        let flight = fly(&mut rocket, &FlightConfig::default(), &mut ctl, &mut data).unwrap();

        let active = flight.event(&EventKind::ControllerActive).unwrap().time;
        let exhausted = flight.event(&EventKind::ProfileExhausted).unwrap().time;
        for row in data.rows() {
            if row.time < active - 1e-9 || row.time > exhausted + 1e-9 {
                assert!(row.is_empty(), "unexpected telemetry at t={}", row.time);
            } else {
                assert!(row.get(Channel::FinThickness).is_some());
                assert!(row.get(Channel::PidError).is_some());
            }
        }
    }

    #[test]
    fn missing_fin_set_aborts_flight() {
        let mut rocket = RocketBuilder::new("Finless")
            .component(BodyTube { name: "Body tube".into(), length: 0.3, radius: 0.0125 })
            .build();
        let mut ctl = controller(100.0);
        let mut data = FlightData::with_fin_channels();
        let err = fly(&mut rocket, &FlightConfig::default(), &mut ctl, &mut data).unwrap_err();
        assert_eq!(err, ControlError::ActuatorNotFound { name: presets::CONTROL_FIN_NAME.into() });
    }

    #[test]
    fn state_lookup_by_time() {
        let mut rocket = presets::sport_rocket();
        let mut ctl = controller(0.0);
        let mut data = FlightData::with_fin_channels();
        let flight = fly(&mut rocket, &FlightConfig::default(), &mut ctl, &mut data).unwrap();
        let s = flight.state_at(0.5).unwrap();
        assert!(s.time <= 0.5 && s.time > 0.48);
        assert!(s.pos.z > 0.0);
    }

    #[test]
    fn invalid_step_size_is_rejected() {
        for dt in [0.0, -0.01, f64::NAN, f64::INFINITY] {
            let mut rocket = presets::sport_rocket();
            let mut ctl = controller(100.0);
            let mut data = FlightData::with_fin_channels();
            let config = FlightConfig { dt, ..FlightConfig::default() };
            let result = fly(&mut rocket, &config, &mut ctl, &mut data);
            assert!(matches!(result, Err(ControlError::Config(_))), "dt = {dt}");
            assert_eq!(ctl.phase(), Phase::Idle);
        }
    }
}
