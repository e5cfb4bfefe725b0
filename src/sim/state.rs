//! Game session state
//!
//! One session lives for the whole process: it starts Playing and turns
//! GameOver on the first collision, after which nothing in it changes.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::Player;
use super::spawner::ObstacleField;
use crate::GameConfig;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Run ended (terminal)
    GameOver,
}

/// Complete game session (deterministic given its seed and inputs)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Field geometry and tuning
    pub config: GameConfig,
    /// Current phase
    pub phase: GamePhase,
    /// Ticks survived
    pub score: u64,
    /// Simulation tick counter (ticks actually simulated)
    pub time_ticks: u64,
    /// The runner
    pub player: Player,
    /// Live obstacles, oldest first
    pub obstacles: ObstacleField,
    /// Spawn RNG
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new session with the given config and seed
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Playing,
            score: 0,
            time_ticks: 0,
            player: Player::new(config.player_start()),
            obstacles: ObstacleField::new(),
            rng: Pcg32::seed_from_u64(seed),
            config,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Place an obstacle with its left edge at `x`, outside the random spawner.
    ///
    /// Refused (`None`) once the session is over, beyond the spawn edge, or
    /// left of the newest obstacle.
    pub fn insert_obstacle(&mut self, x: f32) -> Option<u32> {
        if self.is_game_over() || !x.is_finite() || x > self.config.field_width {
            return None;
        }
        self.obstacles.push(x, &self.config)
    }

    /// Jump command. Only a grounded player in a Playing session jumps.
    ///
    /// Returns true when the jump was accepted.
    pub fn request_jump(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        let accepted = self.player.jump(self.config.jump_impulse);
        if accepted {
            log::debug!("Jump at tick {}", self.time_ticks);
        }
        accepted
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default(), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::MotionState;

    #[test]
    fn test_new_session() {
        let state = GameState::new(GameConfig::default(), 42);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.bounds.y(), 325.0);
        assert_eq!(state.player.bounds.x(), 50.0);
        assert_eq!(state.player.motion, MotionState::Grounded);
    }

    #[test]
    fn test_jump_accepted_when_grounded() {
        let mut state = GameState::default();
        assert!(state.request_jump());
        assert_eq!(state.player.velocity, -12.0);
        assert_eq!(state.player.motion, MotionState::Airborne);
    }

    #[test]
    fn test_jump_ignored_when_airborne() {
        let mut state = GameState::default();
        state.request_jump();
        state.player.velocity = -3.0;
        assert!(!state.request_jump());
        assert_eq!(state.player.velocity, -3.0);
    }

    #[test]
    fn test_jump_ignored_after_game_over() {
        let mut state = GameState::default();
        state.phase = GamePhase::GameOver;
        assert!(!state.request_jump());
        assert_eq!(state.player.velocity, 0.0);
        assert_eq!(state.player.motion, MotionState::Grounded);
    }

    #[test]
    fn test_insert_obstacle_refused_after_game_over() {
        use crate::sim::{Snapshot, TickInput, tick};

        let mut state = GameState::new(
            GameConfig {
                spawn_probability: 0.0,
                ..Default::default()
            },
            3,
        );
        assert!(state.insert_obstacle(50.0).is_some());
        tick(&mut state, &TickInput::default());
        assert!(state.is_game_over());

        let frozen = Snapshot::of(&state);
        assert_eq!(state.insert_obstacle(400.0), None);
        assert_eq!(Snapshot::of(&state), frozen);
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_insert_obstacle_keeps_order() {
        let mut state = GameState::default();
        assert_eq!(state.insert_obstacle(700.0), Some(1));
        assert_eq!(state.insert_obstacle(-40.0), None);
        assert_eq!(state.insert_obstacle(900.0), None);
        assert_eq!(state.insert_obstacle(800.0), Some(2));
        let xs: Vec<f32> = state.obstacles.iter().map(|o| o.bounds.x()).collect();
        assert_eq!(xs, vec![700.0, 800.0]);
    }

    #[test]
    fn test_serde_roundtrip_preserves_rng() {
        use rand::Rng;

        let mut state = GameState::new(GameConfig::default(), 7);
        let _: f64 = state.rng.random();
        let json = serde_json::to_string(&state).unwrap();
        let mut restored: GameState = serde_json::from_str(&json).unwrap();
        let a: u32 = state.rng.random();
        let b: u32 = restored.rng.random();
        assert_eq!(a, b);
    }
}
