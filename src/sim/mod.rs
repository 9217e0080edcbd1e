//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Kinematics are stateless functions of their inputs
//! - Entities never read or mutate each other
//! - Stable iteration order (insertion order, keyed by entity ID)
//! - No rendering or platform dependencies; the driver takes timestamps as
//!   arguments instead of reading a clock

pub mod driver;
pub mod kinematics;
pub mod state;

pub use driver::{Driver, DriverPhase};
pub use kinematics::{advance, launch_velocity};
pub use state::{Herd, Llama, LlamaState};
