//! Fixed timestep simulation tick
//!
//! Advances the session by exactly one tick. The order inside a tick is:
//! pending jump, player integration and ground clamp, obstacle
//! spawn/scroll/despawn, collision scan, score.

use super::state::{GamePhase, GameState};

/// Input commands gathered between two ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump key pressed since the last tick
    pub jump: bool,
}

impl TickInput {
    pub fn jump() -> Self {
        Self { jump: true }
    }
}

/// What a tick did, for the front ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Session already over; nothing changed
    Frozen,
    /// Survived the tick, score advanced
    Survived,
    /// Collided with the obstacle carrying this id
    Collided { obstacle_id: u32 },
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    if state.phase == GamePhase::GameOver {
        return TickOutcome::Frozen;
    }

    if input.jump {
        state.request_jump();
    }

    state.time_ticks += 1;

    // Player physics
    let ground_y = state.config.ground_y;
    state.player.integrate(state.config.gravity, ground_y);

    // Obstacles
    state.obstacles.step(&mut state.rng, &state.config);

    // Collision: first hit ends the run
    let player_box = state.player.bounds;
    if let Some(hit) = state
        .obstacles
        .iter()
        .find(|o| o.bounds.overlaps(&player_box))
    {
        let obstacle_id = hit.id;
        state.phase = GamePhase::GameOver;
        log::info!(
            "Collision with obstacle {} at tick {}, final score {}",
            obstacle_id,
            state.time_ticks,
            state.score
        );
        return TickOutcome::Collided { obstacle_id };
    }

    state.score += 1;
    TickOutcome::Survived
}
