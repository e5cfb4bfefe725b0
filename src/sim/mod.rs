//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, no delta-time scaling
//! - Seeded RNG only
//! - Obstacles kept in spawn order
//! - No rendering or platform dependencies

pub mod collision;
pub mod entities;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, overlaps};
pub use entities::{MotionState, Obstacle, Player};
pub use snapshot::Snapshot;
pub use spawner::{FieldStep, ObstacleField};
pub use state::{GamePhase, GameState};
pub use tick::{TickInput, TickOutcome, tick};
