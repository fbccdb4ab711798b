use super::state::FlightState;

// ---------------------------------------------------------------------------
// Flight events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Launch,
    Burnout,
    ControllerActive,
    ProfileExhausted,
    Apogee,
    Landing,
}

#[derive(Debug, Clone)]
pub struct SimEvent {
    pub time: f64,
    pub kind: EventKind,
    pub state: FlightState,
}

/// Passive detector over consecutive states.
pub trait EventDetector {
    fn check(&mut self, prev: &FlightState, current: &FlightState) -> Option<EventKind>;
}

/// Vertical velocity changing sign from up to down.
pub struct ApogeeDetector;

impl EventDetector for ApogeeDetector {
    fn check(&mut self, prev: &FlightState, current: &FlightState) -> Option<EventKind> {
        if prev.vel.z > 0.0 && current.vel.z <= 0.0 && current.pos.z > 0.0 {
            Some(EventKind::Apogee)
        } else {
            None
        }
    }
}

/// Motor burn time crossed.
pub struct BurnoutDetector {
    pub burn_time: f64,
}

impl EventDetector for BurnoutDetector {
    fn check(&mut self, prev: &FlightState, current: &FlightState) -> Option<EventKind> {
        if prev.time < self.burn_time && current.time >= self.burn_time {
            Some(EventKind::Burnout)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn make_state(time: f64, alt: f64, vz: f64) -> FlightState {
        FlightState {
            time,
            pos: Vector3::new(0.0, 0.0, alt),
            vel: Vector3::new(0.0, 0.0, vz),
            mass: 0.05,
        }
    }

    #[test]
    fn apogee_detected() {
        let mut det = ApogeeDetector;
        let prev = make_state(2.0, 36.0, 0.2);
        let curr = make_state(2.01, 36.0, -0.05);
        assert_eq!(det.check(&prev, &curr), Some(EventKind::Apogee));
        assert_eq!(det.check(&curr, &curr), None);
    }

    #[test]
    fn burnout_fires_on_crossing() {
        let mut det = BurnoutDetector { burn_time: 0.6 };
        let crossing = det.check(&make_state(0.595, 5.0, 20.0), &make_state(0.605, 5.2, 20.0));
        assert_eq!(crossing, Some(EventKind::Burnout));
        let after = det.check(&make_state(0.605, 5.2, 20.0), &make_state(0.615, 5.4, 20.0));
        assert_eq!(after, None);
    }
}
