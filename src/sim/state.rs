//! Llama entities and the herd that holds them

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::kinematics::launch_velocity;
use crate::consts::*;

/// Lifecycle state of a llama
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LlamaState {
    /// Just created, velocity not yet assigned; promoted to Flying before the
    /// first physics step
    Spawning,
    /// Airborne or bouncing
    Flying,
    /// Settled on the ground; terminal, nothing updates a resting llama
    Resting,
}

/// A llama entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Llama {
    pub id: u32,
    /// Screen-space position (y grows downward)
    pub pos: Vec2,
    /// Velocity in pixels per nominal frame
    pub vel: Vec2,
    /// Accumulated spin in degrees, unbounded
    pub rotation: f32,
    /// Ground contacts remaining before forced rest
    pub bounces_left: u8,
    pub state: LlamaState,
}

impl Llama {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            rotation: 0.0,
            bounces_left: MAX_BOUNCES,
            state: LlamaState::Spawning,
        }
    }

    /// Aim at a target point and go airborne
    pub fn launch(&mut self, target: Vec2) {
        self.vel = launch_velocity(self.pos, target);
        self.state = LlamaState::Flying;
    }

    /// Zero velocity and enter the terminal Resting state
    pub(crate) fn settle(&mut self) {
        self.vel = Vec2::ZERO;
        self.state = LlamaState::Resting;
    }

    #[inline]
    pub fn is_resting(&self) -> bool {
        self.state == LlamaState::Resting
    }
}

/// Ordered collection of llamas plus the entity ID counter.
///
/// Insertion order is preserved for render stability; it carries no physics
/// meaning. IDs are unique for the lifetime of the collection and reset only
/// on [`Herd::clear`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Herd {
    llamas: Vec<Llama>,
    next_id: u32,
}

impl Default for Herd {
    fn default() -> Self {
        Self::new()
    }
}

impl Herd {
    pub fn new() -> Self {
        Self {
            llamas: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a llama at `origin` launched toward `target`; returns its ID
    pub fn spawn(&mut self, origin: Vec2, target: Vec2) -> u32 {
        let id = self.next_entity_id();
        let mut llama = Llama::new(id, origin);
        llama.launch(target);
        self.add(llama);
        id
    }

    /// Append a llama to the collection
    pub fn add(&mut self, llama: Llama) {
        self.llamas.push(llama);
    }

    /// Atomically swap in a new collection (the driver publishes each frame
    /// through this)
    pub fn replace_all(&mut self, llamas: Vec<Llama>) {
        self.llamas = llamas;
    }

    /// Discard every llama, mid-flight or not, and restart the ID counter
    pub fn clear(&mut self) {
        self.llamas.clear();
        self.next_id = 1;
    }

    /// Read-only view for rendering; callers must not assume any order beyond
    /// insertion order
    pub fn llamas(&self) -> &[Llama] {
        &self.llamas
    }

    pub fn len(&self) -> usize {
        self.llamas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.llamas.is_empty()
    }

    /// True when no llama needs further simulation
    pub fn all_resting(&self) -> bool {
        self.llamas.iter().all(Llama::is_resting)
    }
}
