//! Cosmetic particles
//!
//! Fireflies drift up and off the top of the surface when a hatchling slips
//! away; sparks swirl and shrink to nothing where something was eaten.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::object::{Body, Drawable, Entity, EntityId, assert_circle};
use crate::consts::{PARTICLE_RADIUS, SPARK_DECAY};
use crate::renderer::{Surface, colors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Firefly,
    Spark,
}

impl ParticleKind {
    pub fn color(&self) -> &'static str {
        match self {
            ParticleKind::Firefly => colors::FIREFLY,
            ParticleKind::Spark => colors::SPARK,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub id: EntityId,
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub radius: f32,
    /// Per-pass drift magnitudes on each axis
    pub speed: Vec2,
    pub angle: f32,
    /// Angular velocity (radians per pass)
    pub va: f32,
    pub marked_for_deletion: bool,
}

impl Particle {
    pub fn new(id: EntityId, kind: ParticleKind, pos: Vec2, radius: f32, speed: Vec2, va: f32) -> Self {
        assert_circle("particle", pos, radius);
        Self {
            id,
            kind,
            pos,
            radius,
            speed,
            angle: 0.0,
            va,
            marked_for_deletion: false,
        }
    }

    /// Roll size, drift and spin
    pub fn spawn<R: Rng + ?Sized>(id: EntityId, kind: ParticleKind, pos: Vec2, rng: &mut R) -> Self {
        let radius = rng.random_range(PARTICLE_RADIUS.0..PARTICLE_RADIUS.1).floor();
        let speed = Vec2::new(rng.random_range(-3.0..3.0), rng.random_range(0.5..2.5));
        let va = rng.random_range(0.01..0.11);
        Self::new(id, kind, pos, radius, speed, va)
    }

    pub fn update(&mut self) {
        match self.kind {
            ParticleKind::Firefly => {
                self.angle += self.va;
                self.pos.x += self.angle.cos() * self.speed.x;
                self.pos.y -= self.speed.y;
                if self.pos.y < -self.radius {
                    self.marked_for_deletion = true;
                }
            }
            ParticleKind::Spark => {
                self.angle += self.va * 0.5;
                self.pos.x -= self.angle.cos() * self.speed.x;
                self.pos.y -= self.angle.sin() * self.speed.y;
                if self.radius > 0.1 {
                    self.radius -= SPARK_DECAY;
                }
                if self.radius < 0.2 {
                    self.marked_for_deletion = true;
                }
            }
        }
    }
}

impl Body for Particle {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn collision_radius(&self) -> f32 {
        self.radius
    }
}

impl Entity for Particle {
    fn id(&self) -> EntityId {
        self.id
    }

    fn is_marked(&self) -> bool {
        self.marked_for_deletion
    }
}

impl Drawable for Particle {
    fn draw(&self, surface: &mut dyn Surface, _debug: bool) {
        surface.save();
        surface.set_fill_style(self.kind.color());
        surface.fill_circle(self.pos, self.radius.max(0.0));
        surface.stroke_circle(self.pos, self.radius.max(0.0));
        surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_firefly_leaves_through_top() {
        let mut fly = Particle::new(
            1,
            ParticleKind::Firefly,
            Vec2::new(100.0, 10.0),
            5.0,
            Vec2::new(1.0, 2.0),
            0.05,
        );
        let mut passes = 0;
        while !fly.marked_for_deletion {
            fly.update();
            passes += 1;
            assert!(passes < 100, "firefly never left the surface");
        }
        assert!(fly.pos.y < -fly.radius);
    }

    #[test]
    fn test_spark_shrinks_away() {
        let mut spark = Particle::new(
            1,
            ParticleKind::Spark,
            Vec2::new(100.0, 100.0),
            2.0,
            Vec2::new(1.0, 1.0),
            0.05,
        );
        for _ in 0..100 {
            spark.update();
        }
        assert!(spark.marked_for_deletion);
    }

    #[test]
    fn test_spawn_rolls_within_ranges() {
        let mut rng = Pcg32::seed_from_u64(3);
        for id in 0..50 {
            let p = Particle::spawn(id, ParticleKind::Spark, Vec2::ZERO, &mut rng);
            assert!(p.radius >= PARTICLE_RADIUS.0 && p.radius < PARTICLE_RADIUS.1);
            assert!(p.speed.y > 0.0);
        }
    }
}
