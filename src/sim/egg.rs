//! Eggs and their hatch state machine
//!
//! Unhatched -> Hatching while the player stands on the egg, -> Hatched once
//! enough contact time has built up. Hatching spawns a hatchling where the egg
//! was and queues the egg for removal; it does not score.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{check_collision, resolve_against};
use super::events::SimContext;
use super::hatchling::Hatchling;
use super::object::{Body, Drawable, Entity, EntityId, assert_circle};
use super::obstacle::Obstacle;
use super::player::Player;
use crate::config::{GameConfig, HatchPolicy};
use crate::consts::{EGG_RADIUS, EGG_SPRITE_HEIGHT, EGG_SPRITE_LIFT, EGG_SPRITE_WIDTH};
use crate::renderer::{Rect, Sprite, SpriteFrame, Surface, TextAlign, colors, draw_hitbox};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EggState {
    Unhatched,
    Hatching,
    Hatched,
}

/// What an egg can bump into
pub struct EggNeighbours<'a> {
    pub player: &'a Player,
    pub obstacles: &'a [Obstacle],
    pub hatchlings: &'a [Hatchling],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Egg {
    pub id: EntityId,
    pub pos: Vec2,
    pub radius: f32,
    pub state: EggState,
    /// Milliseconds of player contact so far
    pub hatch_progress: f32,
    pub hatch_threshold: f32,
    pub marked_for_deletion: bool,
}

impl Egg {
    pub fn new(id: EntityId, pos: Vec2, hatch_threshold: f32) -> Self {
        assert_circle("egg", pos, EGG_RADIUS);
        assert!(
            hatch_threshold.is_finite() && hatch_threshold >= 0.0,
            "hatch threshold must be non-negative, got {hatch_threshold}"
        );
        Self {
            id,
            pos,
            radius: EGG_RADIUS,
            state: EggState::Unhatched,
            hatch_progress: 0.0,
            hatch_threshold,
            marked_for_deletion: false,
        }
    }

    /// Drop an egg somewhere in the play band, clear of the side edges
    pub fn random<R: Rng + ?Sized>(id: EntityId, config: &GameConfig, rng: &mut R) -> Self {
        let margin = EGG_RADIUS * 2.0;
        let x = margin + rng.random::<f32>() * (config.width - margin * 2.0).max(0.0);
        let y = config.top_margin
            + rng.random::<f32>() * (config.height - config.top_margin - margin).max(0.0);
        Self::new(id, Vec2::new(x, y), config.hatch_threshold_ms)
    }

    pub fn sprite_rect(&self) -> Rect {
        Rect::sprite_at(self.pos, EGG_SPRITE_WIDTH, EGG_SPRITE_HEIGHT, EGG_SPRITE_LIFT)
    }

    /// Eaten; gone at the next sweep without hatching
    pub fn devour(&mut self) {
        self.marked_for_deletion = true;
    }

    pub fn update(
        &mut self,
        dt: f32,
        neighbours: &EggNeighbours<'_>,
        policy: HatchPolicy,
        top_margin: f32,
        ctx: &mut dyn SimContext,
    ) {
        if self.marked_for_deletion {
            return;
        }

        let blockers = neighbours
            .obstacles
            .iter()
            .map(|o| o as &dyn Body)
            .chain(
                neighbours
                    .hatchlings
                    .iter()
                    .filter(|h| !h.marked_for_deletion)
                    .map(|h| h as &dyn Body),
            );
        self.pos = resolve_against(self.pos, self.radius, blockers);
        // Bumped eggs stay in the nest band; only the player hatches them
        self.pos.y = self.pos.y.max(top_margin + self.radius);

        if check_collision(self, neighbours.player).hit {
            self.state = EggState::Hatching;
            self.hatch_progress += dt;
        } else if policy == HatchPolicy::Reset {
            self.state = EggState::Unhatched;
            self.hatch_progress = 0.0;
        }

        if self.hatch_progress > self.hatch_threshold {
            self.hatch(ctx);
        }
    }

    fn hatch(&mut self, ctx: &mut dyn SimContext) {
        self.state = EggState::Hatched;
        self.marked_for_deletion = true;
        ctx.spawn_hatchling(self.pos);
        log::debug!("Egg {} hatched at ({:.0}, {:.0})", self.id, self.pos.x, self.pos.y);
    }
}

impl Body for Egg {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn collision_radius(&self) -> f32 {
        self.radius
    }
}

impl Entity for Egg {
    fn id(&self) -> EntityId {
        self.id
    }

    fn is_marked(&self) -> bool {
        self.marked_for_deletion
    }
}

impl Drawable for Egg {
    fn draw(&self, surface: &mut dyn Surface, debug: bool) {
        surface.draw_sprite(Sprite::Egg, SpriteFrame::default(), self.sprite_rect());
        if debug {
            draw_hitbox(surface, self.pos, self.radius);
        }
        if debug || self.state == EggState::Hatching {
            let rect = self.sprite_rect();
            surface.save();
            surface.set_fill_style(colors::HATCH_PROGRESS);
            surface.set_text_align(TextAlign::Center);
            surface.fill_text(
                &format!("{:.1}", self.hatch_progress / 1000.0),
                self.pos.x,
                rect.y,
            );
            surface.restore();
        }
    }
}
