pub mod clock;
pub mod control_loop;
pub mod gains;
pub mod law;
pub mod profile;
pub mod state;

pub use clock::SampleClock;
pub use control_loop::{ControlLoop, StepOutcome, UpdateReport};
pub use gains::{GainSet, GAIN_SCALE};
pub use law::{ControlLaw, ErrorTerms, Pid, Proportional};
pub use profile::{ReferenceProfile, ACCELERATION_PROFILE, ALTITUDE_PROFILE};
pub use state::{ControllerState, Phase};
