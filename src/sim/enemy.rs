//! Enemies: toads that hunt eggs and hatchlings
//!
//! Each pass an enemy picks the closest live egg or hatchling and walks at it,
//! slowed near rocks. Anything it touches is eaten. With nothing to hunt it
//! wanders left across the field and re-enters from the right.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Collision, check_collision, resolve_against};
use super::egg::Egg;
use super::events::SimContext;
use super::hatchling::Hatchling;
use super::object::{Body, Drawable, Entity, EntityId, ObjectRef, assert_circle};
use super::obstacle::Obstacle;
use super::particle::ParticleKind;
use super::player::Player;
use crate::config::GameConfig;
use crate::consts::{
    ENEMY_RADIUS, ENEMY_SLOW_FACTOR, ENEMY_SLOW_ZONE, ENEMY_SPEED, ENEMY_SPRITE_HEIGHT,
    ENEMY_SPRITE_LIFT, ENEMY_SPRITE_WIDTH, SPARK_BURST,
};
use crate::renderer::{Rect, Sprite, SpriteFrame, Surface, draw_hitbox};
use crate::step_toward;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    Roaming,
    Hunting(ObjectRef),
}

/// Everything an enemy looks at (and may eat) during its update
pub struct EnemyWorld<'a> {
    pub player: &'a Player,
    pub obstacles: &'a [Obstacle],
    pub eggs: &'a mut [Egg],
    pub hatchlings: &'a mut [Hatchling],
    pub config: &'a GameConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub pos: Vec2,
    pub radius: f32,
    /// Walking speed (pixels per pass), rolled once
    pub speed: f32,
    pub state: EnemyState,
    pub frame: SpriteFrame,
}

impl Enemy {
    pub fn new(id: EntityId, pos: Vec2, speed: f32) -> Self {
        assert_circle("enemy", pos, ENEMY_RADIUS);
        assert!(
            speed.is_finite() && speed > 0.0,
            "enemy speed must be positive, got {speed}"
        );
        Self {
            id,
            pos,
            radius: ENEMY_RADIUS,
            speed,
            state: EnemyState::Roaming,
            frame: SpriteFrame::default(),
        }
    }

    /// New enemy waiting just past the right edge
    pub fn spawn<R: Rng + ?Sized>(id: EntityId, config: &GameConfig, rng: &mut R) -> Self {
        let speed = rng.random_range(ENEMY_SPEED.0..ENEMY_SPEED.1);
        let mut enemy = Self::new(id, entry_point(config, rng), speed);
        enemy.frame.y = rng.random_range(0..4);
        enemy
    }

    pub fn sprite_rect(&self) -> Rect {
        Rect::sprite_at(
            self.pos,
            ENEMY_SPRITE_WIDTH,
            ENEMY_SPRITE_HEIGHT,
            ENEMY_SPRITE_LIFT,
        )
    }

    /// Closest live egg or hatchling
    pub fn nearest_prey(&self, eggs: &[Egg], hatchlings: &[Hatchling]) -> Option<(ObjectRef, Vec2)> {
        let eggs = eggs
            .iter()
            .filter(|e| !e.marked_for_deletion)
            .map(|e| (ObjectRef::Egg(e.id), e.pos));
        let hatchlings = hatchlings
            .iter()
            .filter(|h| !h.marked_for_deletion)
            .map(|h| (ObjectRef::Hatchling(h.id), h.pos));

        eggs.chain(hatchlings).min_by(|a, b| {
            let da = self.pos.distance(a.1);
            let db = self.pos.distance(b.1);
            da.total_cmp(&db)
        })
    }

    /// Speed after rock drag
    fn effective_speed(&self, obstacles: &[Obstacle]) -> f32 {
        let near_rock = obstacles.iter().any(|o| {
            let c = check_collision(self, o);
            c.distance - c.sum_of_radii < ENEMY_SLOW_ZONE
        });
        if near_rock {
            self.speed * ENEMY_SLOW_FACTOR
        } else {
            self.speed
        }
    }

    pub fn update<R: Rng + ?Sized>(
        &mut self,
        world: &mut EnemyWorld<'_>,
        rng: &mut R,
        ctx: &mut dyn SimContext,
    ) {
        let speed = self.effective_speed(world.obstacles);

        match self.nearest_prey(world.eggs, world.hatchlings) {
            Some((target, at)) => {
                self.state = EnemyState::Hunting(target);
                self.pos = step_toward(self.pos, at, speed);
            }
            None => {
                self.state = EnemyState::Roaming;
                self.pos.x -= speed;
                if self.pos.x + ENEMY_SPRITE_WIDTH * 0.5 < 0.0 {
                    self.pos = entry_point(world.config, rng);
                    log::trace!("Enemy {} wrapped back to the right edge", self.id);
                }
            }
        }

        let blockers = world
            .obstacles
            .iter()
            .map(|o| o as &dyn Body)
            .chain(std::iter::once(world.player as &dyn Body));
        self.pos = resolve_against(self.pos, self.radius, blockers);

        self.frame.x = (self.frame.x + 1) % 4;

        for egg in world.eggs.iter_mut().filter(|e| !e.marked_for_deletion) {
            if self.touches(egg.pos, egg.radius) {
                egg.devour();
                ctx.spawn_particles(ParticleKind::Spark, egg.pos, SPARK_BURST);
                log::debug!("Enemy {} ate egg {}", self.id, egg.id);
            }
        }
        for hatchling in world
            .hatchlings
            .iter_mut()
            .filter(|h| !h.marked_for_deletion)
        {
            if self.touches(hatchling.pos, hatchling.radius) {
                hatchling.devour(ctx);
                ctx.spawn_particles(ParticleKind::Spark, hatchling.pos, SPARK_BURST);
                log::debug!("Enemy {} ate hatchling {}", self.id, hatchling.id);
            }
        }
    }

    fn touches(&self, pos: Vec2, radius: f32) -> bool {
        Collision::between(self.pos, self.radius, pos, radius).hit
    }
}

/// Random point just off the right edge, inside the play band vertically
fn entry_point<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Vec2 {
    let x = config.width + rng.random::<f32>() * config.width * 0.5;
    let y = config.top_margin + rng.random::<f32>() * (config.height - config.top_margin);
    Vec2::new(x, y)
}

impl Body for Enemy {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn collision_radius(&self) -> f32 {
        self.radius
    }
}

impl Entity for Enemy {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Drawable for Enemy {
    fn draw(&self, surface: &mut dyn Surface, debug: bool) {
        surface.draw_sprite(Sprite::Enemy, self.frame, self.sprite_rect());
        if debug {
            draw_hitbox(surface, self.pos, self.radius);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::events::{FrameEvents, GameEvent};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    struct Fixture {
        config: GameConfig,
        player: Player,
        obstacles: Vec<Obstacle>,
        eggs: Vec<Egg>,
        hatchlings: Vec<Hatchling>,
        rng: Pcg32,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                config: GameConfig::default(),
                player: Player::new(Vec2::new(640.0, 360.0)),
                obstacles: Vec::new(),
                eggs: Vec::new(),
                hatchlings: Vec::new(),
                rng: Pcg32::seed_from_u64(42),
            }
        }

        fn step(&mut self, enemy: &mut Enemy) -> FrameEvents {
            let mut events = FrameEvents::default();
            let mut world = EnemyWorld {
                player: &self.player,
                obstacles: &self.obstacles,
                eggs: &mut self.eggs,
                hatchlings: &mut self.hatchlings,
                config: &self.config,
            };
            enemy.update(&mut world, &mut self.rng, &mut events);
            events
        }
    }

    #[test]
    fn test_hunts_nearest_prey() {
        let mut fx = Fixture::new();
        fx.eggs.push(Egg::new(1, Vec2::new(300.0, 500.0), 1000.0));
        fx.hatchlings.push(Hatchling::new(2, Vec2::new(900.0, 500.0), 1.0));
        let mut enemy = Enemy::new(3, Vec2::new(800.0, 500.0), 2.0);

        fx.step(&mut enemy);
        assert_eq!(enemy.state, EnemyState::Hunting(ObjectRef::Hatchling(2)));
        assert!((enemy.pos.x - 802.0).abs() < 1e-4);
    }

    #[test]
    fn test_devours_unhatched_egg() {
        let mut fx = Fixture::new();
        fx.eggs.push(Egg::new(1, Vec2::new(300.0, 500.0), 1000.0));
        let mut enemy = Enemy::new(2, Vec2::new(300.0, 520.0), 1.0);

        let events = fx.step(&mut enemy);
        assert!(fx.eggs[0].marked_for_deletion);
        assert_eq!(
            events.as_slice(),
            &[GameEvent::Particles {
                kind: ParticleKind::Spark,
                at: Vec2::new(300.0, 500.0),
                count: SPARK_BURST,
            }]
        );
    }

    #[test]
    fn test_devoured_hatchling_counts_as_lost() {
        let mut fx = Fixture::new();
        fx.hatchlings
            .push(Hatchling::new(1, Vec2::new(300.0, 500.0), 1.0));
        let mut enemy = Enemy::new(2, Vec2::new(310.0, 500.0), 1.0);

        let events = fx.step(&mut enemy);
        assert!(fx.hatchlings[0].marked_for_deletion);
        assert_eq!(events.as_slice()[0], GameEvent::Lost);
    }

    #[test]
    fn test_ignores_marked_prey() {
        let mut fx = Fixture::new();
        let mut egg = Egg::new(1, Vec2::new(300.0, 500.0), 1000.0);
        egg.devour();
        fx.eggs.push(egg);
        let mut enemy = Enemy::new(2, Vec2::new(800.0, 500.0), 2.0);

        let events = fx.step(&mut enemy);
        assert_eq!(enemy.state, EnemyState::Roaming);
        assert!(events.is_empty());
    }

    #[test]
    fn test_roams_left_and_wraps() {
        let mut fx = Fixture::new();
        let mut enemy = Enemy::new(1, Vec2::new(-ENEMY_SPRITE_WIDTH * 0.5 + 1.0, 500.0), 2.0);

        fx.step(&mut enemy);
        assert!(enemy.pos.x >= fx.config.width);
        assert!(enemy.pos.y >= fx.config.top_margin);
    }

    #[test]
    fn test_slowed_near_rocks() {
        let mut fx = Fixture::new();
        fx.obstacles.push(Obstacle::new(
            9,
            Vec2::new(500.0, 600.0),
            40.0,
            SpriteFrame::default(),
        ));
        fx.eggs.push(Egg::new(1, Vec2::new(300.0, 500.0), 1000.0));
        let mut enemy = Enemy::new(2, Vec2::new(500.0, 500.0), 2.0);

        fx.step(&mut enemy);
        assert!((enemy.pos.x - (500.0 - 2.0 * ENEMY_SLOW_FACTOR)).abs() < 1e-4);
    }
}
