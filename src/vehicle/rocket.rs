use super::component::{Component, ComponentTree, ThicknessActuator};

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct NoseCone {
    pub name: String,
    pub length: f64, // m
}

impl Component for NoseCone {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone)]
pub struct BodyTube {
    pub name: String,
    pub length: f64, // m
    pub radius: f64, // m
}

impl Component for BodyTube {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A set of identical flat fins. Thickness is the commanded dimension.
#[derive(Debug, Clone)]
pub struct FinSet {
    pub name: String,
    pub fin_count: usize,
    pub span: f64,      // m, root to tip
    pub thickness: f64, // m
}

impl ThicknessActuator for FinSet {
    fn thickness(&self) -> f64 {
        self.thickness
    }

    fn set_thickness(&mut self, thickness: f64) {
        self.thickness = thickness.max(0.0);
    }
}

impl Component for FinSet {
    fn name(&self) -> &str {
        &self.name
    }

    fn thickness_actuator(&mut self) -> Option<&mut dyn ThicknessActuator> {
        Some(self)
    }

    fn frontal_area(&self) -> f64 {
        self.fin_count as f64 * self.span * self.thickness
    }
}

// ---------------------------------------------------------------------------
// Rocket: single-stage vehicle with a component tree
// ---------------------------------------------------------------------------

pub struct Rocket {
    pub name: String,
    pub dry_mass: f64,        // kg
    pub propellant_mass: f64, // kg
    pub thrust: f64,          // N, constant during burn
    pub burn_time: f64,       // s
    pub cd: f64,              // drag coefficient
    pub area: f64,            // body reference area, m^2
    pub components: Vec<Box<dyn Component>>,
}

impl Rocket {
    pub fn total_mass(&self) -> f64 {
        self.dry_mass + self.propellant_mass
    }

    /// Propellant consumed per second, uniform over the burn.
    pub fn mass_flow(&self) -> f64 {
        if self.burn_time > 0.0 {
            self.propellant_mass / self.burn_time
        } else {
            0.0
        }
    }

    /// Body reference area plus whatever the components present to the flow.
    pub fn drag_area(&self) -> f64 {
        self.area + self.components.iter().map(|c| c.frontal_area()).sum::<f64>()
    }
}

impl ComponentTree for Rocket {
    fn component_count(&self) -> usize {
        self.components.component_count()
    }

    fn component_mut(&mut self, index: usize) -> Option<&mut dyn Component> {
        self.components.component_mut(index)
    }
}

// ---------------------------------------------------------------------------
// Rocket builder
// ---------------------------------------------------------------------------

pub struct RocketBuilder {
    name: String,
    dry_mass: f64,
    propellant_mass: f64,
    thrust: f64,
    burn_time: f64,
    cd: f64,
    area: f64,
    components: Vec<Box<dyn Component>>,
}

impl RocketBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dry_mass: 0.05,
            propellant_mass: 0.01,
            thrust: 3.0,
            burn_time: 0.6,
            cd: 0.5,
            area: 0.000_5,
            components: vec![],
        }
    }

    pub fn dry_mass(mut self, v: f64) -> Self { self.dry_mass = v; self }
    pub fn propellant_mass(mut self, v: f64) -> Self { self.propellant_mass = v; self }
    pub fn thrust(mut self, v: f64) -> Self { self.thrust = v; self }
    pub fn burn_time(mut self, v: f64) -> Self { self.burn_time = v; self }
    pub fn cd(mut self, v: f64) -> Self { self.cd = v; self }
    pub fn area(mut self, v: f64) -> Self { self.area = v; self }

    pub fn component(mut self, component: impl Component + 'static) -> Self {
        self.components.push(Box::new(component));
        self
    }

    pub fn build(self) -> Rocket {
        Rocket {
            name: self.name,
            dry_mass: self.dry_mass,
            propellant_mass: self.propellant_mass,
            thrust: self.thrust,
            burn_time: self.burn_time,
            cd: self.cd,
            area: self.area,
            components: self.components,
        }
    }
}

// ---------------------------------------------------------------------------
// Preset vehicles
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;

    /// Name of the fin set the controller drives on the preset vehicles.
    pub const CONTROL_FIN_NAME: &str = "Trapezoidal fin set";

    /// Small single-motor sport rocket with three control fins.
    pub fn sport_rocket() -> Rocket {
        RocketBuilder::new("Sport-1")
            .dry_mass(0.05)
            .propellant_mass(0.01)
            .thrust(3.0)
            .burn_time(0.6)
            .cd(0.5)
            .area(0.000_49)
            .component(NoseCone { name: "Nose cone".into(), length: 0.08 })
            .component(BodyTube { name: "Body tube".into(), length: 0.3, radius: 0.0125 })
            .component(FinSet {
                name: CONTROL_FIN_NAME.into(),
                fin_count: 3,
                span: 0.03,
                thickness: 0.003,
            })
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::ActuatorHandle;
    use approx::assert_relative_eq;

    #[test]
    fn fins_add_drag_area() {
        let rocket = presets::sport_rocket();
        assert_relative_eq!(rocket.drag_area(), 0.000_49 + 3.0 * 0.03 * 0.003);
    }

    #[test]
    fn preset_fin_set_is_resolvable() {
        let mut rocket = presets::sport_rocket();
        let mut handle = ActuatorHandle::resolve(&mut rocket, presets::CONTROL_FIN_NAME).unwrap();
        assert_eq!(handle.set(0.008), 0.008);
        assert_relative_eq!(rocket.drag_area(), 0.000_49 + 3.0 * 0.03 * 0.008);
    }

    #[test]
    fn mass_flow_spreads_propellant_over_burn() {
        let rocket = presets::sport_rocket();
        assert_relative_eq!(rocket.mass_flow() * rocket.burn_time, rocket.propellant_mass);
        let inert = RocketBuilder::new("X").burn_time(0.0).build();
        assert_eq!(inert.mass_flow(), 0.0);
    }
}
