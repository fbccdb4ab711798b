use nalgebra::Vector3;

use crate::vehicle::Rocket;

use super::state::{Deriv, FlightState, G0, RHO_SEA_LEVEL};

// ---------------------------------------------------------------------------
// Equations of motion: vertical point mass with thrust, drag, gravity
// ---------------------------------------------------------------------------

/// State derivatives. Drag uses the rocket's current drag area, so the fin
/// thickness the controller commands feeds straight back into the dynamics.
pub fn derivatives(state: &FlightState, rocket: &Rocket) -> Deriv {
    let burning = state.time < rocket.burn_time && state.mass > rocket.dry_mass;

    let a_gravity = Vector3::new(0.0, 0.0, -G0);

    let a_thrust = if burning {
        Vector3::z() * (rocket.thrust / state.mass)
    } else {
        Vector3::zeros()
    };

    let speed = state.vel.norm();
    let a_drag = if speed > 1e-6 {
        let q_dyn = 0.5 * RHO_SEA_LEVEL * speed * speed;
        -state.vel.normalize() * (q_dyn * rocket.cd * rocket.drag_area() / state.mass)
    } else {
        Vector3::zeros()
    };

    Deriv {
        dpos: state.vel,
        dvel: a_gravity + a_thrust + a_drag,
        dmass: if burning { -rocket.mass_flow() } else { 0.0 },
    }
}

/// Classical RK4 step with the vehicle geometry frozen over the step.
pub fn rk4_step(state: &FlightState, rocket: &Rocket, dt: f64) -> FlightState {
    let k1 = derivatives(state, rocket);
    let k2 = derivatives(&state.apply(&k1, dt * 0.5), rocket);
    let k3 = derivatives(&state.apply(&k2, dt * 0.5), rocket);
    let k4 = derivatives(&state.apply(&k3, dt), rocket);

    FlightState {
        time: state.time + dt,
        pos: state.pos + (k1.dpos + 2.0 * k2.dpos + 2.0 * k3.dpos + k4.dpos) * (dt / 6.0),
        vel: state.vel + (k1.dvel + 2.0 * k2.dvel + 2.0 * k3.dvel + k4.dvel) * (dt / 6.0),
        mass: (state.mass + (k1.dmass + 2.0 * k2.dmass + 2.0 * k3.dmass + k4.dmass) * (dt / 6.0))
            .max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::presets;
    use approx::assert_relative_eq;

    #[test]
    fn free_fall_matches_gravity() {
        let rocket = presets::sport_rocket();
        let state = FlightState { time: 5.0, ..FlightState::launch(rocket.dry_mass) };
        let next = rk4_step(&state, &rocket, 0.01);
        assert_relative_eq!(next.vel.z, -G0 * 0.01, epsilon = 1e-5);
        assert_eq!(next.mass, rocket.dry_mass);
    }

    #[test]
    fn thrust_lifts_off_pad() {
        let rocket = presets::sport_rocket();
        let d = derivatives(&FlightState::launch(rocket.total_mass()), &rocket);
        assert!(d.dvel.z > 0.0);
        assert!(d.dmass < 0.0);
    }

    #[test]
    fn thicker_fins_mean_more_drag() {
        let thin = presets::sport_rocket();
        let mut thick = presets::sport_rocket();
        if let Some(fin) = thick.components.iter_mut().find_map(|c| c.thickness_actuator()) {
            fin.set_thickness(0.010);
        }
        let state = FlightState {
            time: 2.0,
            vel: Vector3::new(0.0, 0.0, 25.0),
            ..FlightState::launch(thin.dry_mass)
        };
        let a_thin = derivatives(&state, &thin).dvel.z;
        let a_thick = derivatives(&state, &thick).dvel.z;
        assert!(a_thick < a_thin);
    }
}
