//! Canvas 2D backend (browser only)

use std::collections::HashMap;
use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement};

use super::{Rect, Sprite, SpriteFrame, Surface, TextAlign, colors};

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f32,
    height: f32,
    images: HashMap<Sprite, HtmlImageElement>,
}

impl CanvasSurface {
    /// Wrap a canvas, resolving sprite sheets from `<img>` elements in the page
    pub fn new(canvas: &HtmlCanvasElement, document: &Document) -> Option<Self> {
        let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;
        ctx.set_fill_style_str(colors::TEXT);
        ctx.set_stroke_style_str(colors::OUTLINE);
        ctx.set_line_width(3.0);

        let mut images = HashMap::new();
        for sprite in [
            Sprite::Player,
            Sprite::Obstacle,
            Sprite::Egg,
            Sprite::Hatchling,
            Sprite::Enemy,
        ] {
            match document
                .get_element_by_id(sprite.element_id())
                .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
            {
                Some(img) => {
                    images.insert(sprite, img);
                }
                None => log::warn!("Sprite sheet #{} missing", sprite.element_id()),
            }
        }

        Some(Self {
            ctx,
            width: canvas.width() as f32,
            height: canvas.height() as f32,
            images,
        })
    }

    fn circle_path(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        if let Err(e) = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
        {
            log::warn!("arc at ({}, {}) r={} failed: {:?}", center.x, center.y, radius, e);
        }
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ctx.clear_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn set_fill_style(&mut self, style: &str) {
        self.ctx.set_fill_style_str(style);
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.ctx.set_stroke_style_str(style);
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.ctx.set_text_align(align.as_str());
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        if let Err(e) = self.ctx.fill_text(text, x as f64, y as f64) {
            log::warn!("fill_text {:?} failed: {:?}", text, e);
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.circle_path(center, radius);
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32) {
        self.circle_path(center, radius);
        self.ctx.stroke();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }

    fn draw_sprite(&mut self, sprite: Sprite, frame: SpriteFrame, dest: Rect) {
        let Some(img) = self.images.get(&sprite) else {
            return;
        };
        let (w, h) = (dest.w as f64, dest.h as f64);
        let drawn = self
            .ctx
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                img,
                frame.x as f64 * w,
                frame.y as f64 * h,
                w,
                h,
                dest.x as f64,
                dest.y as f64,
                w,
                h,
            );
        if let Err(e) = drawn {
            log::warn!("Sprite #{} blit failed: {:?}", sprite.element_id(), e);
        }
    }
}
