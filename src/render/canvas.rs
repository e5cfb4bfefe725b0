//! HTML canvas surface (web only)

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::frame::{Align, Color, Sprites, Surface, TextStyle};
use super::StartupError;
use crate::sim::Aabb;

/// Page globals holding the preloaded sprite images
const PLAYER_IMAGE: &str = "playerImage";
const DEFEATED_IMAGE: &str = "playerDefeatedImage";
const OBSTACLE_IMAGE: &str = "slotMachineImage";

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Look up the canvas element by id and acquire its 2D context
    pub fn from_element_id(id: &str) -> Result<Self, StartupError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| StartupError::MissingSurface("no document".to_string()))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(id)
            .ok_or_else(|| StartupError::MissingSurface(format!("canvas #{} not found", id)))?
            .dyn_into()
            .map_err(|_| StartupError::MissingSurface(format!("#{} is not a canvas", id)))?;

        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or_else(|| StartupError::MissingSurface("2d context unavailable".to_string()))?;

        Ok(Self { ctx })
    }
}

impl Surface for CanvasSurface {
    type Image = HtmlImageElement;

    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn draw_image(&mut self, image: &HtmlImageElement, rect: Aabb) {
        if let Err(e) = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            rect.x() as f64,
            rect.y() as f64,
            rect.width() as f64,
            rect.height() as f64,
        ) {
            log::warn!("drawImage failed: {:?}", e);
        }
    }

    fn fill_rect(&mut self, rect: Aabb, color: Color) {
        self.ctx.set_fill_style_str(color.css());
        self.ctx.fill_rect(
            rect.x() as f64,
            rect.y() as f64,
            rect.width() as f64,
            rect.height() as f64,
        );
    }

    fn fill_text(&mut self, text: &str, at: Vec2, style: TextStyle) {
        self.ctx.set_fill_style_str(style.color.css());
        self.ctx.set_font(&format!("{}px Arial", style.size));
        self.ctx.set_text_align(match style.align {
            Align::Left => "left",
            Align::Center => "center",
        });
        if let Err(e) = self.ctx.fill_text(text, at.x as f64, at.y as f64) {
            log::warn!("fillText failed: {:?}", e);
        }
    }
}

/// Collect the sprite images the page preloaded into globals
pub fn load_sprites() -> Sprites<HtmlImageElement> {
    Sprites {
        player: global_image(PLAYER_IMAGE),
        defeated: global_image(DEFEATED_IMAGE),
        obstacle: global_image(OBSTACLE_IMAGE),
    }
}

fn global_image(name: &str) -> Option<HtmlImageElement> {
    let value = js_sys::Reflect::get(&js_sys::global(), &name.into()).ok()?;
    if value.is_null() || value.is_undefined() {
        return None;
    }
    value.dyn_into::<HtmlImageElement>().ok()
}
