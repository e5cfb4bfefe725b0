//! Player and obstacle entities with their motion rules

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;

/// Player vertical sub-state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionState {
    /// Standing on the ground, can jump, not affected by gravity
    #[default]
    Grounded,
    /// In the air after a jump
    Airborne,
}

/// The runner. Moves only vertically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub bounds: Aabb,
    /// Vertical velocity (units/tick, negative is up)
    pub velocity: f32,
    pub motion: MotionState,
}

impl Player {
    /// Create a grounded player occupying `bounds`
    pub fn new(bounds: Aabb) -> Self {
        Self {
            bounds,
            velocity: 0.0,
            motion: MotionState::Grounded,
        }
    }

    pub fn is_airborne(&self) -> bool {
        self.motion == MotionState::Airborne
    }

    /// Start a jump. Returns false (and changes nothing) when already airborne.
    pub fn jump(&mut self, impulse: f32) -> bool {
        if self.is_airborne() {
            return false;
        }
        self.velocity = impulse;
        self.motion = MotionState::Airborne;
        true
    }

    /// Explicit Euler step followed by the ground clamp.
    ///
    /// Position moves by the current velocity, then gravity is added to the
    /// velocity. Reaching or passing `ground_y` lands the player.
    pub fn integrate(&mut self, gravity: f32, ground_y: f32) {
        if !self.is_airborne() {
            return;
        }
        self.bounds.pos.y += self.velocity;
        self.velocity += gravity;

        if self.bounds.pos.y >= ground_y {
            self.land(ground_y);
        }
    }

    fn land(&mut self, ground_y: f32) {
        self.bounds.pos.y = ground_y;
        self.velocity = 0.0;
        self.motion = MotionState::Grounded;
    }
}

/// A slot machine scrolling toward the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Spawn order, strictly increasing
    pub id: u32,
    pub bounds: Aabb,
}

impl Obstacle {
    pub fn new(id: u32, bounds: Aabb) -> Self {
        Self { id, bounds }
    }

    /// Move left by `speed` units
    pub fn scroll(&mut self, speed: f32) {
        self.bounds.pos -= Vec2::new(speed, 0.0);
    }

    /// True once the box has left the field entirely through the left edge
    pub fn is_offscreen(&self) -> bool {
        self.bounds.x() < -self.bounds.width()
    }
}
