use tracing::error;

use crate::error::{ControlError, ControlResult};

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// A component with a settable linear thickness (m).
pub trait ThicknessActuator {
    fn thickness(&self) -> f64;
    fn set_thickness(&mut self, thickness: f64);
}

/// A named part of the vehicle's component tree.
pub trait Component {
    fn name(&self) -> &str;

    /// The thickness capability, for components that have one.
    fn thickness_actuator(&mut self) -> Option<&mut dyn ThicknessActuator> {
        None
    }

    /// Area presented to the flow along the vehicle axis (m^2), beyond the
    /// body reference area.
    fn frontal_area(&self) -> f64 {
        0.0
    }
}

/// The vehicle's current set of components, in host traversal order.
pub trait ComponentTree {
    fn component_count(&self) -> usize;
    fn component_mut(&mut self, index: usize) -> Option<&mut dyn Component>;
}

impl ComponentTree for Vec<Box<dyn Component>> {
    fn component_count(&self) -> usize {
        self.len()
    }

    fn component_mut(&mut self, index: usize) -> Option<&mut dyn Component> {
        let component: &mut dyn Component = &mut **self.get_mut(index)?;
        Some(component)
    }
}

// ---------------------------------------------------------------------------
// Actuator lookup
// ---------------------------------------------------------------------------

/// Non-owning binding to the commanded actuator, valid for one step.
pub struct ActuatorHandle<'a> {
    actuator: &'a mut dyn ThicknessActuator,
}

impl<'a> ActuatorHandle<'a> {
    /// First component whose name matches exactly (case-sensitive) and that
    /// exposes a thickness. Components with the right name but no thickness
    /// are skipped.
    pub fn resolve<T>(tree: &'a mut T, name: &str) -> ControlResult<Self>
    where
        T: ComponentTree + ?Sized,
    {
        let index = (0..tree.component_count()).find(|&i| is_match(&mut *tree, i, name));
        let actuator = match index {
            Some(i) => tree.component_mut(i).and_then(|c| c.thickness_actuator()),
            None => None,
        };

        match actuator {
            Some(actuator) => Ok(Self { actuator }),
            None => {
                error!(actuator = name, "control actuator missing from vehicle");
                Err(ControlError::ActuatorNotFound { name: name.to_string() })
            }
        }
    }

    pub fn get(&self) -> f64 {
        self.actuator.thickness()
    }

    /// Command a new thickness and return the value the actuator reports back.
    pub fn set(&mut self, thickness: f64) -> f64 {
        self.actuator.set_thickness(thickness);
        self.actuator.thickness()
    }
}

fn is_match<T: ComponentTree + ?Sized>(tree: &mut T, index: usize, name: &str) -> bool {
    match tree.component_mut(index) {
        Some(c) => c.name() == name && c.thickness_actuator().is_some(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plate {
        name: String,
        thickness: f64,
    }

    impl ThicknessActuator for Plate {
        fn thickness(&self) -> f64 {
            self.thickness
        }

        fn set_thickness(&mut self, thickness: f64) {
            self.thickness = thickness;
        }
    }

    impl Component for Plate {
        fn name(&self) -> &str {
            &self.name
        }

        fn thickness_actuator(&mut self) -> Option<&mut dyn ThicknessActuator> {
            Some(self)
        }
    }

    struct Tube(String);

    impl Component for Tube {
        fn name(&self) -> &str {
            &self.0
        }
    }

    fn plate(name: &str, thickness: f64) -> Box<dyn Component> {
        Box::new(Plate { name: name.into(), thickness })
    }

    #[test]
    fn first_match_wins() {
        let mut tree: Vec<Box<dyn Component>> =
            vec![Box::new(Tube("Body".into())), plate("Fins", 0.001), plate("Fins", 0.002)];
        let mut handle = ActuatorHandle::resolve(&mut tree, "Fins").unwrap();
        assert_eq!(handle.get(), 0.001);
        assert_eq!(handle.set(0.004), 0.004);

        assert_eq!(tree[1].thickness_actuator().unwrap().thickness(), 0.004);
        assert_eq!(tree[2].thickness_actuator().unwrap().thickness(), 0.002);
    }

    #[test]
    fn name_match_is_case_sensitive() {
        let mut tree: Vec<Box<dyn Component>> = vec![plate("Fins", 0.001)];
        let err = ActuatorHandle::resolve(&mut tree, "fins").err().unwrap();
        assert_eq!(err, ControlError::ActuatorNotFound { name: "fins".into() });
    }

    #[test]
    fn component_without_thickness_is_skipped() {
        let mut tree: Vec<Box<dyn Component>> =
            vec![Box::new(Tube("Fins".into())), plate("Fins", 0.003)];
        let handle = ActuatorHandle::resolve(&mut tree, "Fins").unwrap();
        assert_eq!(handle.get(), 0.003);

        let mut only_tube: Vec<Box<dyn Component>> = vec![Box::new(Tube("Fins".into()))];
        assert!(ActuatorHandle::resolve(&mut only_tube, "Fins").is_err());
    }
}
