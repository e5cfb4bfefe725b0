//! Slot Runner - A minimal endless-runner arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, game state)
//! - `config`: Field geometry and tuning, loadable from JSON
//! - `clock`: Fixed-step tick accumulator shared by the front ends
//! - `game`: Single-writer owner of the session used by both front ends
//! - `render`: Frame drawing over an abstract surface (canvas on web, terminal on native)

pub mod clock;
pub mod config;
pub mod game;
pub mod render;
pub mod sim;

pub use clock::FixedStep;
pub use config::{ConfigError, GameConfig};
pub use game::Game;

/// Default game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_RATE_HZ: f32 = 60.0;
    /// Maximum ticks run per frame before the accumulator is dropped
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 400.0;
    /// Player top edge when standing on the ground
    pub const GROUND_Y: f32 = 325.0;

    /// Player box
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 75.0;

    /// Defeated pose (sprite lying on its side)
    pub const DEFEATED_Y: f32 = 340.0;
    pub const DEFEATED_WIDTH: f32 = 75.0;
    pub const DEFEATED_HEIGHT: f32 = 60.0;

    /// Obstacle box (slot machine)
    pub const OBSTACLE_Y: f32 = 310.0;
    pub const OBSTACLE_WIDTH: f32 = 45.0;
    pub const OBSTACLE_HEIGHT: f32 = 90.0;

    /// Downward acceleration (units/tick²)
    pub const GRAVITY: f32 = 0.5;
    /// Upward velocity applied on jump (units/tick, negative is up)
    pub const JUMP_IMPULSE: f32 = -12.0;
    /// Leftward obstacle speed (units/tick)
    pub const SCROLL_SPEED: f32 = 5.0;
    /// Per-tick Bernoulli probability of spawning an obstacle
    pub const SPAWN_PROBABILITY: f64 = 0.005;

    /// Caption drawn across the top of the field
    pub const TITLE: &str = "Run, Artyom, run";
}
