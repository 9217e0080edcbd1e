//! LlamaBox - click anywhere to launch a llama
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, entity store, frame driver)
//!
//! The platform front end (DOM rendering, input, frame scheduling) lives in
//! the binary; everything in the library is pure and platform-free.

pub mod sim;

pub use sim::{Driver, DriverPhase, Herd, Llama, LlamaState};

/// Physics and layout constants
pub mod consts {
    /// Nominal frame duration in milliseconds; one sim frame at 60 Hz
    pub const FRAME_MS: f64 = 16.0;
    /// Maximum delta-time scale per tick (caps integration after a stalled
    /// frame, e.g. tab backgrounding)
    pub const MAX_DELTA_SCALE: f32 = 2.0;

    /// Gravity acceleration, pixels per frame squared (y grows downward)
    pub const GRAVITY: f32 = 0.6;
    /// Launch impulse, pixels per frame (negative = upward)
    pub const INITIAL_VY: f32 = -15.0;
    /// Fraction of vertical speed retained on bounce
    pub const BOUNCE_DAMPENING: f32 = 0.6;
    /// Fraction of horizontal speed retained per bounce
    pub const FRICTION: f32 = 0.85;
    /// Ground contacts allowed before forced rest
    pub const MAX_BOUNCES: u8 = 4;
    /// Speed below which a llama settles
    pub const STOP_THRESHOLD: f32 = 0.5;
    /// Degrees of spin per pixel of horizontal travel
    pub const ROTATION_SPEED: f32 = 2.0;
    /// Horizontal launch speed toward the click point
    pub const LAUNCH_SPEED: f32 = 8.0;

    /// Ground strip height in pixels (bottom of the viewport)
    pub const GROUND_HEIGHT: f32 = 150.0;
    /// Crate sprite height; launches originate from the crate's center
    pub const CRATE_SIZE: f32 = 120.0;
    /// Vertical window around the crate center where llamas render behind it
    pub const BEHIND_CRATE_DY: f32 = 80.0;
    /// Horizontal window around screen center where llamas render behind it
    pub const BEHIND_CRATE_DX: f32 = 100.0;
}
