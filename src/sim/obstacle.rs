//! Static rocks
//!
//! Obstacles never move once placed. They block the player, eggs and enemies
//! and slow enemies that brush past.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::object::{Body, Drawable, Entity, EntityId, assert_circle};
use crate::consts::{
    OBSTACLE_RADIUS, OBSTACLE_SPRITE_HEIGHT, OBSTACLE_SPRITE_LIFT, OBSTACLE_SPRITE_WIDTH,
    OBSTACLE_VARIANTS,
};
use crate::renderer::{Rect, Sprite, SpriteFrame, Surface, draw_hitbox};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: EntityId,
    pub pos: Vec2,
    pub radius: f32,
    /// Which rock from the sheet
    pub frame: SpriteFrame,
}

impl Obstacle {
    pub fn new(id: EntityId, pos: Vec2, radius: f32, frame: SpriteFrame) -> Self {
        assert_circle("obstacle", pos, radius);
        Self {
            id,
            pos,
            radius,
            frame,
        }
    }

    /// Uniformly random candidate anywhere on a `width` x `height` surface
    pub fn candidate<R: Rng + ?Sized>(id: EntityId, width: f32, height: f32, rng: &mut R) -> Self {
        let pos = Vec2::new(rng.random::<f32>() * width, rng.random::<f32>() * height);
        let frame = SpriteFrame::new(
            rng.random_range(0..OBSTACLE_VARIANTS.0),
            rng.random_range(0..OBSTACLE_VARIANTS.1),
        );
        Self::new(id, pos, OBSTACLE_RADIUS, frame)
    }

    pub fn sprite_rect(&self) -> Rect {
        Rect::sprite_at(
            self.pos,
            OBSTACLE_SPRITE_WIDTH,
            OBSTACLE_SPRITE_HEIGHT,
            OBSTACLE_SPRITE_LIFT,
        )
    }
}

impl Body for Obstacle {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn collision_radius(&self) -> f32 {
        self.radius
    }
}

impl Entity for Obstacle {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Drawable for Obstacle {
    fn draw(&self, surface: &mut dyn Surface, debug: bool) {
        surface.draw_sprite(Sprite::Obstacle, self.frame, self.sprite_rect());
        if debug {
            draw_hitbox(surface, self.pos, self.radius);
        }
    }
}
