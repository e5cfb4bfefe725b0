//! Frame composition over an abstract drawing surface
//!
//! The layout rules live here so every front end draws the same frame:
//! title, player pose, obstacles, score, and the game-over captions.

use glam::Vec2;

use crate::GameConfig;
use crate::sim::{Aabb, Snapshot};

/// Named fill colours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    DarkBlue,
    Black,
    Red,
    White,
    Gray,
    Green,
}

impl Color {
    /// CSS colour name
    pub fn css(&self) -> &'static str {
        match self {
            Color::DarkBlue => "darkblue",
            Color::Black => "black",
            Color::Red => "red",
            Color::White => "white",
            Color::Gray => "gray",
            Color::Green => "green",
        }
    }
}

/// Horizontal anchoring of text relative to its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in field units
    pub size: f32,
    pub color: Color,
    pub align: Align,
}

impl TextStyle {
    pub const fn new(size: f32, color: Color, align: Align) -> Self {
        Self { size, color, align }
    }
}

const TITLE_STYLE: TextStyle = TextStyle::new(30.0, Color::DarkBlue, Align::Center);
const SCORE_STYLE: TextStyle = TextStyle::new(20.0, Color::Black, Align::Left);
const GAME_OVER_STYLE: TextStyle = TextStyle::new(40.0, Color::Red, Align::Center);
const FINAL_SCORE_STYLE: TextStyle = TextStyle::new(20.0, Color::Red, Align::Center);
const FALLBACK_STYLE: TextStyle = TextStyle::new(12.0, Color::White, Align::Center);

/// Caption drawn over the fallback rectangle
pub const MISSING_DEFEATED_CAPTION: &str = "No defeated img";

/// A 2D drawing target (canvas, terminal, test recorder)
pub trait Surface {
    /// Loaded image handle
    type Image;

    fn clear(&mut self, width: f32, height: f32);
    fn draw_image(&mut self, image: &Self::Image, rect: Aabb);
    fn fill_rect(&mut self, rect: Aabb, color: Color);
    fn fill_text(&mut self, text: &str, at: Vec2, style: TextStyle);
}

/// Sprite images; `None` means the asset failed to load
#[derive(Debug, Clone)]
pub struct Sprites<I> {
    pub player: Option<I>,
    pub defeated: Option<I>,
    pub obstacle: Option<I>,
}

impl<I> Sprites<I> {
    /// Names of the sprites that failed to load
    pub fn missing(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.player.is_none() {
            names.push("player");
        }
        if self.defeated.is_none() {
            names.push("player_defeated");
        }
        if self.obstacle.is_none() {
            names.push("slot_machine");
        }
        names
    }

    /// Log one warning per missing sprite
    pub fn report_missing(&self) {
        for name in self.missing() {
            log::warn!("Sprite '{}' not loaded, drawing a placeholder", name);
        }
    }
}

/// Draws snapshots onto a surface
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    field: Vec2,
    title: String,
    defeated_y: f32,
    defeated_size: Vec2,
    defeated_fallback_reported: bool,
}

impl FrameRenderer {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            field: Vec2::new(config.field_width, config.field_height),
            title: config.title.clone(),
            defeated_y: config.defeated_y,
            defeated_size: Vec2::new(config.defeated_width, config.defeated_height),
            defeated_fallback_reported: false,
        }
    }

    /// Draw one full frame
    pub fn draw<S: Surface>(&mut self, surface: &mut S, sprites: &Sprites<S::Image>, snap: &Snapshot) {
        surface.clear(self.field.x, self.field.y);
        surface.fill_text(&self.title, Vec2::new(self.field.x / 2.0, 50.0), TITLE_STYLE);

        if snap.is_game_over() {
            self.draw_defeated(surface, sprites, snap.player);
        } else {
            draw_sprite(surface, sprites.player.as_ref(), snap.player, Color::Gray);
        }

        for obstacle in &snap.obstacles {
            draw_sprite(surface, sprites.obstacle.as_ref(), *obstacle, Color::Green);
        }

        if snap.is_game_over() {
            let center = self.field / 2.0;
            surface.fill_text("Game Over!", center, GAME_OVER_STYLE);
            surface.fill_text(
                &score_text(snap.score),
                center + Vec2::new(0.0, 50.0),
                FINAL_SCORE_STYLE,
            );
        } else {
            surface.fill_text(&score_text(snap.score), Vec2::new(10.0, 30.0), SCORE_STYLE);
        }
    }

    /// Where the lying-down pose goes for a player box
    pub fn defeated_box(&self, player: Aabb) -> Aabb {
        Aabb::new(Vec2::new(player.x(), self.defeated_y), self.defeated_size)
    }

    fn draw_defeated<S: Surface>(&mut self, surface: &mut S, sprites: &Sprites<S::Image>, player: Aabb) {
        let rect = self.defeated_box(player);
        match sprites.defeated.as_ref() {
            Some(image) => surface.draw_image(image, rect),
            None => {
                surface.fill_rect(rect, Color::Red);
                surface.fill_text(MISSING_DEFEATED_CAPTION, rect.center(), FALLBACK_STYLE);
                if !self.defeated_fallback_reported {
                    log::error!("Defeated sprite not loaded, drew fallback rectangle");
                    self.defeated_fallback_reported = true;
                }
            }
        }
    }
}

fn draw_sprite<S: Surface>(surface: &mut S, image: Option<&S::Image>, rect: Aabb, placeholder: Color) {
    match image {
        Some(image) => surface.draw_image(image, rect),
        None => surface.fill_rect(rect, placeholder),
    }
}

pub fn score_text(score: u64) -> String {
    format!("Score: {}", score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GamePhase, GameState, TickInput, tick};

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear,
        Image(&'static str, Aabb),
        Rect(Aabb, Color),
        Text(String, Vec2, TextStyle),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Recorder {
        fn texts(&self) -> Vec<&str> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Text(text, _, _) => Some(text.as_str()),
                    _ => None,
                })
                .collect()
        }

        fn images(&self) -> Vec<(&'static str, Aabb)> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Image(name, rect) => Some((*name, *rect)),
                    _ => None,
                })
                .collect()
        }
    }

    impl Surface for Recorder {
        type Image = &'static str;

        fn clear(&mut self, _width: f32, _height: f32) {
            self.ops.push(Op::Clear);
        }

        fn draw_image(&mut self, image: &Self::Image, rect: Aabb) {
            self.ops.push(Op::Image(image, rect));
        }

        fn fill_rect(&mut self, rect: Aabb, color: Color) {
            self.ops.push(Op::Rect(rect, color));
        }

        fn fill_text(&mut self, text: &str, at: Vec2, style: TextStyle) {
            self.ops.push(Op::Text(text.to_string(), at, style));
        }
    }

    fn all_sprites() -> Sprites<&'static str> {
        Sprites {
            player: Some("player"),
            defeated: Some("defeated"),
            obstacle: Some("slot"),
        }
    }

    fn quiet_state() -> GameState {
        GameState::new(
            GameConfig {
                spawn_probability: 0.0,
                ..Default::default()
            },
            1,
        )
    }

    fn crashed_state() -> GameState {
        let mut state = quiet_state();
        for _ in 0..3 {
            tick(&mut state, &TickInput::default());
        }
        state.insert_obstacle(50.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        state
    }

    #[test]
    fn test_playing_frame() {
        let mut state = quiet_state();
        state.insert_obstacle(500.0);
        let mut renderer = FrameRenderer::new(&state.config);
        let mut surface = Recorder::default();
        renderer.draw(&mut surface, &all_sprites(), &state.snapshot());

        assert_eq!(surface.ops[0], Op::Clear);
        assert_eq!(surface.texts(), vec!["Run, Artyom, run", "Score: 0"]);
        let images = surface.images();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0], ("player", state.player.bounds));
        assert_eq!(images[1].0, "slot");
        assert_eq!(images[1].1.x(), 500.0);
    }

    #[test]
    fn test_game_over_frame_uses_defeated_pose() {
        let state = crashed_state();
        let mut renderer = FrameRenderer::new(&state.config);
        let mut surface = Recorder::default();
        renderer.draw(&mut surface, &all_sprites(), &state.snapshot());

        let images = surface.images();
        assert_eq!(images[0].0, "defeated");
        assert_eq!(
            images[0].1,
            Aabb::new(Vec2::new(50.0, 340.0), Vec2::new(75.0, 60.0))
        );
        assert!(images.iter().all(|(name, _)| *name != "player"));
        assert_eq!(surface.texts(), vec!["Run, Artyom, run", "Game Over!", "Score: 3"]);

        let game_over_at = surface.ops.iter().find_map(|op| match op {
            Op::Text(text, at, _) if text == "Game Over!" => Some(*at),
            _ => None,
        });
        assert_eq!(game_over_at, Some(Vec2::new(400.0, 200.0)));
    }

    #[test]
    fn test_missing_defeated_sprite_falls_back() {
        let state = crashed_state();
        let sprites = Sprites {
            defeated: None,
            ..all_sprites()
        };
        let mut renderer = FrameRenderer::new(&state.config);
        let mut surface = Recorder::default();
        renderer.draw(&mut surface, &sprites, &state.snapshot());

        let rect = Aabb::new(Vec2::new(50.0, 340.0), Vec2::new(75.0, 60.0));
        assert!(surface.ops.contains(&Op::Rect(rect, Color::Red)));
        assert!(surface.texts().contains(&MISSING_DEFEATED_CAPTION));

        // Keeps drawing on later frames
        let mut surface = Recorder::default();
        renderer.draw(&mut surface, &sprites, &state.snapshot());
        assert!(surface.ops.contains(&Op::Rect(rect, Color::Red)));
        assert!(renderer.defeated_fallback_reported);
    }

    #[test]
    fn test_missing_sprites_use_placeholders() {
        let mut state = quiet_state();
        state.insert_obstacle(300.0);
        let sprites: Sprites<&'static str> = Sprites {
            player: None,
            defeated: None,
            obstacle: None,
        };
        assert_eq!(sprites.missing(), vec!["player", "player_defeated", "slot_machine"]);

        let mut renderer = FrameRenderer::new(&state.config);
        let mut surface = Recorder::default();
        renderer.draw(&mut surface, &sprites, &state.snapshot());
        assert!(surface.images().is_empty());
        assert!(surface.ops.contains(&Op::Rect(state.player.bounds, Color::Gray)));
        assert!(
            surface
                .ops
                .iter()
                .any(|op| matches!(op, Op::Rect(_, Color::Green)))
        );
    }

    #[test]
    fn test_frozen_frames_are_identical() {
        let mut state = crashed_state();
        let mut renderer = FrameRenderer::new(&state.config);
        let mut first = Recorder::default();
        renderer.draw(&mut first, &all_sprites(), &state.snapshot());
        for _ in 0..30 {
            tick(&mut state, &TickInput::jump());
        }
        let mut later = Recorder::default();
        renderer.draw(&mut later, &all_sprites(), &state.snapshot());
        assert_eq!(first.ops, later.ops);
    }
}
