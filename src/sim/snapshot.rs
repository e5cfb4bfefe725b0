//! Read-only view of a session for drawing a frame

use super::collision::Aabb;
use super::entities::MotionState;
use super::state::{GamePhase, GameState};

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub player: Aabb,
    pub motion: MotionState,
    /// Obstacle boxes, oldest first
    pub obstacles: Vec<Aabb>,
    pub score: u64,
    pub phase: GamePhase,
}

impl Snapshot {
    pub fn of(state: &GameState) -> Self {
        Self {
            player: state.player.bounds,
            motion: state.player.motion,
            obstacles: state.obstacles.iter().map(|o| o.bounds).collect(),
            score: state.score,
            phase: state.phase,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(self)
    }
}
