//! Terminal surface
//!
//! Rasterises field coordinates onto a grid of character cells and flushes
//! the grid with crossterm.

use std::io::Write;

use crossterm::{cursor, queue, style};
use glam::Vec2;

use super::frame::{Align, Color, Surface, TextStyle};
use super::StartupError;
use crate::sim::Aabb;

/// Sprite stand-in: one glyph repeated over the sprite's box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub color: Color,
}

impl Glyph {
    pub const fn new(ch: char, color: Color) -> Self {
        Self { ch, color }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    color: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    color: Color::Black,
};

/// Character grid covering the whole play field
#[derive(Debug, Clone)]
pub struct TerminalSurface {
    cols: u16,
    rows: u16,
    /// Field units per cell
    scale: Vec2,
    cells: Vec<Cell>,
}

impl TerminalSurface {
    /// Grid of `cols` x `rows` cells mapped onto a field of `field` units
    pub fn new(cols: u16, rows: u16, field: Vec2) -> Result<Self, StartupError> {
        if cols == 0 || rows == 0 {
            return Err(StartupError::MissingSurface(format!(
                "terminal grid {}x{} has no cells",
                cols, rows
            )));
        }
        Ok(Self {
            cols,
            rows,
            scale: field / Vec2::new(cols as f32, rows as f32),
            cells: vec![BLANK; cols as usize * rows as usize],
        })
    }

    /// Fit a grid into the current terminal, keeping one row for the status line
    pub fn fit_terminal(field: Vec2) -> Result<Self, StartupError> {
        let (cols, rows) = crossterm::terminal::size()?;
        Self::new(cols.min(100), rows.saturating_sub(1).min(30), field)
    }

    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Character at a cell (for tests and debugging)
    pub fn char_at(&self, col: u16, row: u16) -> Option<char> {
        self.index(col as i32, row as i32).map(|i| self.cells[i].ch)
    }

    /// One grid row as a string
    pub fn row_text(&self, row: u16) -> String {
        (0..self.cols)
            .filter_map(|col| self.char_at(col, row))
            .collect()
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    fn to_cell(&self, at: Vec2) -> (i32, i32) {
        let cell = at / self.scale;
        (cell.x.floor() as i32, cell.y.floor() as i32)
    }

    fn fill(&mut self, rect: Aabb, cell: Cell) {
        let (c0, r0) = self.to_cell(rect.pos);
        let end = rect.pos + rect.size;
        // Every box covers at least one cell
        let c1 = ((end.x / self.scale.x).ceil() as i32).max(c0 + 1);
        let r1 = ((end.y / self.scale.y).ceil() as i32).max(r0 + 1);
        for row in r0..r1 {
            for col in c0..c1 {
                if let Some(i) = self.index(col, row) {
                    self.cells[i] = cell;
                }
            }
        }
    }

    /// Write the grid to `out`, one terminal row per grid row
    pub fn present(&self, out: &mut impl Write) -> std::io::Result<()> {
        for row in 0..self.rows {
            queue!(out, cursor::MoveTo(0, row))?;
            let start = row as usize * self.cols as usize;
            for cell in &self.cells[start..start + self.cols as usize] {
                queue!(
                    out,
                    style::SetForegroundColor(term_color(cell.color)),
                    style::Print(cell.ch)
                )?;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

impl Surface for TerminalSurface {
    type Image = Glyph;

    fn clear(&mut self, _width: f32, _height: f32) {
        self.cells.fill(BLANK);
    }

    fn draw_image(&mut self, image: &Glyph, rect: Aabb) {
        self.fill(
            rect,
            Cell {
                ch: image.ch,
                color: image.color,
            },
        );
    }

    fn fill_rect(&mut self, rect: Aabb, color: Color) {
        self.fill(rect, Cell { ch: '#', color });
    }

    fn fill_text(&mut self, text: &str, at: Vec2, style: TextStyle) {
        let (col, row) = self.to_cell(at);
        let len = text.chars().count() as i32;
        let start = match style.align {
            Align::Left => col,
            Align::Center => col - len / 2,
        };
        for (offset, ch) in text.chars().enumerate() {
            if let Some(i) = self.index(start + offset as i32, row) {
                self.cells[i] = Cell {
                    ch,
                    color: style.color,
                };
            }
        }
    }
}

fn term_color(color: Color) -> style::Color {
    match color {
        Color::DarkBlue => style::Color::DarkBlue,
        // Black text is unreadable on most dark terminals
        Color::Black => style::Color::Reset,
        Color::Red => style::Color::Red,
        Color::White => style::Color::White,
        Color::Gray => style::Color::Grey,
        Color::Green => style::Color::Green,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameConfig;
    use crate::render::{FrameRenderer, Sprites};
    use crate::sim::GameState;

    fn field() -> Vec2 {
        Vec2::new(800.0, 400.0)
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert!(matches!(
            TerminalSurface::new(0, 20, field()),
            Err(StartupError::MissingSurface(_))
        ));
    }

    #[test]
    fn test_rect_maps_to_cells() {
        let mut surface = TerminalSurface::new(80, 20, field()).unwrap();
        // 10 x 20 units per cell: player box covers cols 5..11, rows 16..20
        let player = Aabb::new(Vec2::new(50.0, 325.0), Vec2::new(60.0, 75.0));
        surface.draw_image(&Glyph::new('@', Color::Gray), player);
        assert_eq!(surface.char_at(5, 16), Some('@'));
        assert_eq!(surface.char_at(10, 19), Some('@'));
        assert_eq!(surface.char_at(11, 19), Some(' '));
        assert_eq!(surface.char_at(5, 15), Some(' '));
    }

    #[test]
    fn test_offscreen_rect_is_clipped() {
        let mut surface = TerminalSurface::new(80, 20, field()).unwrap();
        let rect = Aabb::new(Vec2::new(-100.0, 310.0), Vec2::new(45.0, 90.0));
        surface.fill_rect(rect, Color::Green);
        assert!(surface.row_text(18).trim().is_empty());
    }

    #[test]
    fn test_centered_text() {
        let mut surface = TerminalSurface::new(80, 20, field()).unwrap();
        surface.fill_text(
            "Game Over!",
            Vec2::new(400.0, 200.0),
            TextStyle::new(40.0, Color::Red, Align::Center),
        );
        assert_eq!(surface.row_text(10).trim(), "Game Over!");
        assert_eq!(surface.char_at(35, 10), Some('G'));
    }

    #[test]
    fn test_full_frame_and_present() {
        let state = GameState::new(GameConfig::default(), 3);
        let mut renderer = FrameRenderer::new(&state.config);
        let sprites = Sprites {
            player: Some(Glyph::new('@', Color::Gray)),
            defeated: Some(Glyph::new('_', Color::Red)),
            obstacle: Some(Glyph::new('$', Color::Green)),
        };
        let mut surface = TerminalSurface::new(80, 20, field()).unwrap();
        renderer.draw(&mut surface, &sprites, &state.snapshot());
        assert!(surface.row_text(1).trim_start().starts_with("Score: 0"));
        assert!(surface.row_text(2).contains("Run, Artyom, run"));

        let mut out = Vec::new();
        surface.present(&mut out).unwrap();
        assert!(!out.is_empty());
    }
}
