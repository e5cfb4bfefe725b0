//! Front-end glue shared by the web and terminal builds
//!
//! Owns the session and is its single writer: jump requests are queued here
//! and consumed by the next tick, so input arriving between ticks is applied
//! whole at a tick boundary.

use crate::clock::FixedStep;
use crate::render::{FrameRenderer, Sprites, Surface};
use crate::sim::{GameState, TickInput, TickOutcome, tick};
use crate::GameConfig;

pub struct Game {
    state: GameState,
    clock: FixedStep,
    /// One-shot input waiting for the next tick
    input: TickInput,
    renderer: FrameRenderer,
}

impl Game {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        log::info!(
            "Game initialized with seed {} ({}x{} field, {} Hz)",
            seed,
            config.field_width,
            config.field_height,
            config.tick_rate_hz
        );
        Self {
            clock: FixedStep::from_config(&config),
            renderer: FrameRenderer::new(&config),
            state: GameState::new(config, seed),
            input: TickInput::default(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Queue a jump for the next tick
    pub fn request_jump(&mut self) {
        self.input.jump = true;
    }

    /// Run one tick now, consuming queued input
    pub fn step(&mut self) -> TickOutcome {
        let input = std::mem::take(&mut self.input);
        tick(&mut self.state, &input)
    }

    /// Advance by `dt` seconds of wall-clock time. Returns the ticks run.
    pub fn update(&mut self, dt: f32) -> u32 {
        let ticks = self.clock.advance(dt);
        for _ in 0..ticks {
            self.step();
        }
        ticks
    }

    /// Draw the current state
    pub fn render<S: Surface>(&mut self, surface: &mut S, sprites: &Sprites<S::Image>) {
        let snapshot = self.state.snapshot();
        self.renderer.draw(surface, sprites, &snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GamePhase, MotionState};

    fn quiet_game() -> Game {
        Game::new(
            GameConfig {
                spawn_probability: 0.0,
                ..Default::default()
            },
            11,
        )
    }

    #[test]
    fn test_queued_jump_waits_for_tick() {
        let mut game = quiet_game();
        game.request_jump();
        // Not applied until a tick runs
        assert_eq!(game.state().player.motion, MotionState::Grounded);
        game.step();
        assert_eq!(game.state().player.motion, MotionState::Airborne);
        assert_eq!(game.state().player.bounds.y(), 313.0);
    }

    #[test]
    fn test_jump_consumed_once() {
        let mut game = quiet_game();
        game.request_jump();
        game.step();
        while game.state().player.motion == MotionState::Airborne {
            game.step();
        }
        // No buffered second jump
        game.step();
        assert_eq!(game.state().player.motion, MotionState::Grounded);
    }

    #[test]
    fn test_update_runs_fixed_ticks() {
        let mut game = quiet_game();
        let step = 1.0 / game.state().config.tick_rate_hz;
        let mut ran = 0;
        for _ in 0..60 {
            ran += game.update(step);
        }
        assert_eq!(ran as u64, game.state().score);
        assert!((59..=60).contains(&ran));
        assert_eq!(game.state().phase, GamePhase::Playing);
    }
}
