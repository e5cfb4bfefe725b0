//! Rendering module
//!
//! `frame` composes a frame from a simulation snapshot onto any `Surface`.
//! The canvas (web) and terminal (native) surfaces are thin adapters over it.

pub mod frame;

#[cfg(target_arch = "wasm32")]
pub mod canvas;
#[cfg(not(target_arch = "wasm32"))]
pub mod terminal;

pub use frame::{Align, Color, FrameRenderer, Sprites, Surface, TextStyle};

use thiserror::Error;

/// Failures while bringing up a front end
#[derive(Debug, Error)]
pub enum StartupError {
    /// No drawing surface to render into; the game cannot start
    #[error("drawing surface unavailable: {0}")]
    MissingSurface(String),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
