//! Hatchlings: freshly hatched larvae that must reach the player
//!
//! A hatchling within reach of the player follows them; otherwise it crawls
//! toward the top of the field. Touching the player saves it (+1 score).
//! Crawling past the top margin loses it (+1 loss) in a puff of fireflies.
//! Rocks do not stop hatchlings.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::check_collision;
use super::events::SimContext;
use super::object::{Body, Drawable, Entity, EntityId, assert_circle};
use super::particle::ParticleKind;
use super::player::Player;
use crate::consts::{
    FIREFLY_BURST, HATCHLING_CRAWL_SPEED, HATCHLING_FOLLOW_RADIUS, HATCHLING_FOLLOW_SPEED,
    HATCHLING_RADIUS, HATCHLING_SPRITE_HEIGHT, HATCHLING_SPRITE_LIFT, HATCHLING_SPRITE_WIDTH,
};
use crate::renderer::{Rect, Sprite, SpriteFrame, Surface, draw_hitbox};
use crate::step_toward;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HatchlingState {
    /// Player out of reach: heading for the top edge
    Crawling,
    /// Homing in on the player
    Following,
    /// Slipped past the top margin
    Escaped,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hatchling {
    pub id: EntityId,
    pub pos: Vec2,
    pub radius: f32,
    pub crawl_speed: f32,
    pub state: HatchlingState,
    pub frame: SpriteFrame,
    pub marked_for_deletion: bool,
}

impl Hatchling {
    pub fn new(id: EntityId, pos: Vec2, crawl_speed: f32) -> Self {
        assert_circle("hatchling", pos, HATCHLING_RADIUS);
        assert!(
            crawl_speed.is_finite() && crawl_speed > 0.0,
            "hatchling crawl speed must be positive, got {crawl_speed}"
        );
        Self {
            id,
            pos,
            radius: HATCHLING_RADIUS,
            crawl_speed,
            state: HatchlingState::Crawling,
            frame: SpriteFrame::default(),
            marked_for_deletion: false,
        }
    }

    /// Fresh from an egg: random crawl speed and skin
    pub fn spawn<R: Rng + ?Sized>(id: EntityId, pos: Vec2, rng: &mut R) -> Self {
        let mut hatchling = Self::new(
            id,
            pos,
            rng.random_range(HATCHLING_CRAWL_SPEED.0..HATCHLING_CRAWL_SPEED.1),
        );
        hatchling.frame.y = rng.random_range(0..2);
        hatchling
    }

    pub fn sprite_rect(&self) -> Rect {
        Rect::sprite_at(
            self.pos,
            HATCHLING_SPRITE_WIDTH,
            HATCHLING_SPRITE_HEIGHT,
            HATCHLING_SPRITE_LIFT,
        )
    }

    /// Eaten; counts as lost
    pub fn devour(&mut self, ctx: &mut dyn SimContext) {
        self.marked_for_deletion = true;
        ctx.record_loss();
    }

    pub fn update(&mut self, player: &Player, top_margin: f32, ctx: &mut dyn SimContext) {
        if self.marked_for_deletion {
            return;
        }

        if self.pos.distance(player.pos) <= HATCHLING_FOLLOW_RADIUS {
            self.state = HatchlingState::Following;
            self.pos = step_toward(self.pos, player.pos, HATCHLING_FOLLOW_SPEED);
        } else {
            self.state = HatchlingState::Crawling;
            self.pos.y -= self.crawl_speed;
        }

        if self.pos.y < top_margin {
            self.state = HatchlingState::Escaped;
            self.marked_for_deletion = true;
            ctx.record_loss();
            ctx.spawn_particles(ParticleKind::Firefly, self.pos, FIREFLY_BURST);
            log::debug!("Hatchling {} escaped", self.id);
        } else if check_collision(self, player).hit {
            self.marked_for_deletion = true;
            ctx.record_score();
            log::debug!("Hatchling {} collected", self.id);
        }
    }
}

impl Body for Hatchling {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn collision_radius(&self) -> f32 {
        self.radius
    }
}

impl Entity for Hatchling {
    fn id(&self) -> EntityId {
        self.id
    }

    fn is_marked(&self) -> bool {
        self.marked_for_deletion
    }
}

impl Drawable for Hatchling {
    fn draw(&self, surface: &mut dyn Surface, debug: bool) {
        surface.draw_sprite(Sprite::Hatchling, self.frame, self.sprite_rect());
        if debug {
            draw_hitbox(surface, self.pos, self.radius);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::events::{FrameEvents, GameEvent};

    const TOP: f32 = 260.0;

    #[test]
    fn test_follows_nearby_player() {
        let player = Player::new(Vec2::new(500.0, 500.0));
        let mut hatchling = Hatchling::new(1, Vec2::new(400.0, 500.0), 1.5);
        let mut events = FrameEvents::default();

        hatchling.update(&player, TOP, &mut events);
        assert_eq!(hatchling.state, HatchlingState::Following);
        assert!((hatchling.pos.x - (400.0 + HATCHLING_FOLLOW_SPEED)).abs() < 1e-4);
        assert!(events.is_empty());
    }

    #[test]
    fn test_crawls_when_player_far() {
        let player = Player::new(Vec2::new(1200.0, 700.0));
        let mut hatchling = Hatchling::new(1, Vec2::new(100.0, 500.0), 1.5);
        let mut events = FrameEvents::default();

        hatchling.update(&player, TOP, &mut events);
        assert_eq!(hatchling.state, HatchlingState::Crawling);
        assert_eq!(hatchling.pos, Vec2::new(100.0, 498.5));
    }

    #[test]
    fn test_collected_on_contact() {
        let player = Player::new(Vec2::new(400.0, 500.0));
        let mut hatchling = Hatchling::new(1, Vec2::new(440.0, 500.0), 1.5);
        let mut events = FrameEvents::default();

        hatchling.update(&player, TOP, &mut events);
        assert!(hatchling.marked_for_deletion);
        assert_eq!(events.as_slice(), &[GameEvent::Scored]);
    }

    #[test]
    fn test_escapes_over_top_margin() {
        let player = Player::new(Vec2::new(1200.0, 700.0));
        let mut hatchling = Hatchling::new(1, Vec2::new(100.0, TOP + 1.0), 2.0);
        let mut events = FrameEvents::default();

        hatchling.update(&player, TOP, &mut events);
        assert_eq!(hatchling.state, HatchlingState::Escaped);
        assert!(hatchling.marked_for_deletion);
        assert_eq!(events.as_slice().len(), 2);
        assert_eq!(events.as_slice()[0], GameEvent::Lost);
        assert!(matches!(
            events.as_slice()[1],
            GameEvent::Particles {
                kind: ParticleKind::Firefly,
                ..
            }
        ));
    }

    #[test]
    fn test_marked_hatchling_is_inert() {
        let player = Player::new(Vec2::new(400.0, 500.0));
        let mut hatchling = Hatchling::new(1, Vec2::new(400.0, 500.0), 1.5);
        hatchling.marked_for_deletion = true;
        let mut events = FrameEvents::default();

        hatchling.update(&player, TOP, &mut events);
        assert!(events.is_empty());
    }
}
