//! Drawing contract
//!
//! The sim never talks to a graphics API directly. Each entity draws itself
//! through [`Surface`], a thin slice of the Canvas 2D API. The browser build
//! backs it with a real canvas; tests and the native build record the calls.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCommand, RecordingSurface};

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Sprite sheets known to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sprite {
    Player,
    Obstacle,
    Egg,
    Hatchling,
    Enemy,
}

impl Sprite {
    /// DOM id of the `<img>` holding the sheet
    pub fn element_id(&self) -> &'static str {
        match self {
            Sprite::Player => "bull",
            Sprite::Obstacle => "obstacles",
            Sprite::Egg => "egg",
            Sprite::Hatchling => "larva",
            Sprite::Enemy => "toad",
        }
    }
}

/// Axis-aligned destination rectangle in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Sprite rectangle centred on `anchor` horizontally and lifted by `lift`
    pub fn sprite_at(anchor: Vec2, w: f32, h: f32, lift: f32) -> Self {
        Self {
            x: anchor.x - w * 0.5,
            y: anchor.y - h * 0.5 - lift,
            w,
            h,
        }
    }
}

/// Cell within a sprite sheet (column, row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpriteFrame {
    pub x: u32,
    pub y: u32,
}

impl SpriteFrame {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// A fixed-size 2D drawing surface
pub trait Surface {
    /// Surface size in pixels (width, height)
    fn size(&self) -> (f32, f32);

    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32);
    fn save(&mut self);
    fn restore(&mut self);

    fn set_fill_style(&mut self, style: &str);
    fn set_stroke_style(&mut self, style: &str);
    fn set_global_alpha(&mut self, alpha: f32);
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);

    fn fill_text(&mut self, text: &str, x: f32, y: f32);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32);
    fn stroke_circle(&mut self, center: Vec2, radius: f32);
    fn stroke_line(&mut self, from: Vec2, to: Vec2);

    /// Blit one cell of a sprite sheet into `dest`
    fn draw_sprite(&mut self, sprite: Sprite, frame: SpriteFrame, dest: Rect);
}

/// CSS colors for game elements
pub mod colors {
    pub const TEXT: &str = "white";
    pub const OUTLINE: &str = "black";
    pub const OVERLAY: &str = "rgba(0,0,0,0.5)";
    pub const HITBOX: &str = "white";
    pub const FIREFLY: &str = "yellow";
    pub const SPARK: &str = "blue";
    pub const HATCH_PROGRESS: &str = "gold";
}

/// Draw a translucent collision circle (debug overlay)
pub fn draw_hitbox(surface: &mut dyn Surface, center: Vec2, radius: f32) {
    surface.save();
    surface.set_global_alpha(0.5);
    surface.set_fill_style(colors::HITBOX);
    surface.fill_circle(center, radius);
    surface.restore();
    surface.stroke_circle(center, radius);
}
