//! Frame-driven animation loop
//!
//! The driver owns no clock and schedules nothing itself: the platform layer
//! feeds it timestamps (`now_ms`) and schedules the next frame callback only
//! while `tick` asks for one. That keeps the whole loop testable with
//! simulated time.

use super::kinematics::advance;
use super::state::Herd;
use crate::consts::*;

/// Scheduling state of the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverPhase {
    /// No frame callback outstanding; every llama is at rest
    Idle,
    /// A frame callback is scheduled
    Running,
}

/// Advances the herd once per frame while anything is still moving.
///
/// State machine: Idle until a spawn makes the herd active, Running while any
/// llama flies, back to Idle once all are resting. Re-entry after a new spawn
/// goes through [`Driver::start`] again.
#[derive(Debug, Clone)]
pub struct Driver {
    phase: DriverPhase,
    /// Timestamp of the previous tick, milliseconds
    last_time_ms: f64,
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver {
    pub fn new() -> Self {
        Self {
            phase: DriverPhase::Idle,
            last_time_ms: 0.0,
        }
    }

    pub fn phase(&self) -> DriverPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == DriverPhase::Running
    }

    /// Enter Running if the herd has anything to animate. Returns whether the
    /// caller should schedule a frame callback.
    ///
    /// Idempotent while already Running: the tick baseline is only reset on
    /// the Idle -> Running transition, so calling `start` on every spawn is
    /// safe and does not skew delta time.
    pub fn start(&mut self, herd: &Herd, now_ms: f64) -> bool {
        if herd.all_resting() {
            return false;
        }
        if self.phase == DriverPhase::Idle {
            self.last_time_ms = now_ms;
            self.phase = DriverPhase::Running;
            log::debug!("driver running ({} llamas)", herd.len());
            return true;
        }
        false
    }

    /// Advance every llama one frame and publish the result. Returns whether
    /// the caller should schedule another frame callback.
    pub fn tick(&mut self, herd: &mut Herd, ground_level: f32, now_ms: f64) -> bool {
        if self.phase != DriverPhase::Running {
            return false;
        }

        let dt = delta_scale(self.last_time_ms, now_ms);
        self.last_time_ms = now_ms;

        let next: Vec<_> = herd
            .llamas()
            .iter()
            .map(|llama| advance(llama, ground_level, dt))
            .collect();
        herd.replace_all(next);

        if herd.all_resting() {
            self.phase = DriverPhase::Idle;
            log::debug!("driver idle ({} llamas at rest)", herd.len());
            return false;
        }
        true
    }

    /// Unconditionally return to Idle. The owner is responsible for
    /// cancelling any frame callback it already scheduled; no tick after
    /// `stop` will advance the herd.
    pub fn stop(&mut self) {
        self.phase = DriverPhase::Idle;
    }
}

/// Convert elapsed wall time to a frame-scale factor, clamped so a stalled
/// frame (tab backgrounded, debugger pause) cannot produce a huge step.
fn delta_scale(last_ms: f64, now_ms: f64) -> f32 {
    (((now_ms - last_ms) / FRAME_MS) as f32).clamp(0.0, MAX_DELTA_SCALE)
}
