pub mod component;
pub mod rocket;

pub use component::{ActuatorHandle, Component, ComponentTree, ThicknessActuator};
pub use rocket::{presets, BodyTube, FinSet, NoseCone, Rocket, RocketBuilder};
