//! In-memory surface that records every call
//!
//! Used by the native headless build and by tests that assert on paint order.

use glam::Vec2;

use super::{Rect, Sprite, SpriteFrame, Surface, TextAlign};

/// One recorded surface call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { x: f32, y: f32, w: f32, h: f32 },
    Save,
    Restore,
    FillStyle(String),
    StrokeStyle(String),
    GlobalAlpha(f32),
    Font(String),
    TextAlign(TextAlign),
    Text { text: String, x: f32, y: f32 },
    FillRect { x: f32, y: f32, w: f32, h: f32 },
    FillCircle { center: Vec2, radius: f32 },
    StrokeCircle { center: Vec2, radius: f32 },
    Line { from: Vec2, to: Vec2 },
    Sprite { sprite: Sprite, frame: SpriteFrame, dest: Rect },
}

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop everything recorded so far
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Sprite blits in paint order
    pub fn sprites(&self) -> impl Iterator<Item = (Sprite, Rect)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Sprite { sprite, dest, .. } => Some((*sprite, *dest)),
            _ => None,
        })
    }

    /// Text draws in paint order
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Number of times the surface was cleared
    pub fn clear_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Clear { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.commands.push(DrawCommand::Clear { x, y, w, h });
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn set_fill_style(&mut self, style: &str) {
        self.commands.push(DrawCommand::FillStyle(style.to_string()));
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.commands.push(DrawCommand::StrokeStyle(style.to_string()));
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.commands.push(DrawCommand::GlobalAlpha(alpha));
    }

    fn set_font(&mut self, font: &str) {
        self.commands.push(DrawCommand::Font(font.to_string()));
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.commands.push(DrawCommand::TextAlign(align));
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
        });
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.commands.push(DrawCommand::FillRect { x, y, w, h });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.commands.push(DrawCommand::FillCircle { center, radius });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32) {
        self.commands.push(DrawCommand::StrokeCircle { center, radius });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2) {
        self.commands.push(DrawCommand::Line { from, to });
    }

    fn draw_sprite(&mut self, sprite: Sprite, frame: SpriteFrame, dest: Rect) {
        self.commands.push(DrawCommand::Sprite {
            sprite,
            frame,
            dest,
        });
    }
}
