//! Hatchery - an egg-guarding arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, spawn policy, scoring)
//! - `renderer`: Drawing contract plus Canvas 2D / recording backends
//! - `input`: Pointer and keyboard state fed by the host
//! - `config`: Data-driven session tuning

pub mod config;
pub mod error;
pub mod input;
pub mod renderer;
pub mod sim;

pub use config::{Difficulty, GameConfig, HatchPolicy};
pub use error::ConfigError;
pub use sim::{Game, GameOutcome};

use glam::Vec2;

/// Entity tuning constants
///
/// Speeds are in pixels per logic pass, timers in milliseconds.
pub mod consts {
    /// Player collision radius
    pub const PLAYER_RADIUS: f32 = 30.0;
    /// Player steering speed
    pub const PLAYER_SPEED: f32 = 3.0;
    /// Player sprite cell size
    pub const PLAYER_SPRITE_WIDTH: f32 = 255.0;
    pub const PLAYER_SPRITE_HEIGHT: f32 = 256.0;
    /// Sprite is drawn this far above the collision circle
    pub const PLAYER_SPRITE_LIFT: f32 = 100.0;
    /// Columns in the player animation strip
    pub const PLAYER_ANIMATION_FRAMES: u32 = 58;

    /// Obstacle collision radius
    pub const OBSTACLE_RADIUS: f32 = 40.0;
    pub const OBSTACLE_SPRITE_WIDTH: f32 = 250.0;
    pub const OBSTACLE_SPRITE_HEIGHT: f32 = 250.0;
    pub const OBSTACLE_SPRITE_LIFT: f32 = 70.0;
    /// Sprite sheet layout (columns x rows of rock variants)
    pub const OBSTACLE_VARIANTS: (u32, u32) = (4, 3);

    /// Egg collision radius
    pub const EGG_RADIUS: f32 = 40.0;
    pub const EGG_SPRITE_WIDTH: f32 = 110.0;
    pub const EGG_SPRITE_HEIGHT: f32 = 135.0;
    pub const EGG_SPRITE_LIFT: f32 = 30.0;

    /// Hatchling collision radius
    pub const HATCHLING_RADIUS: f32 = 30.0;
    pub const HATCHLING_SPRITE_WIDTH: f32 = 150.0;
    pub const HATCHLING_SPRITE_HEIGHT: f32 = 150.0;
    pub const HATCHLING_SPRITE_LIFT: f32 = 40.0;
    /// Pursuit speed while following the player
    pub const HATCHLING_FOLLOW_SPEED: f32 = 2.0;
    /// Crawl speed range while out of the player's reach
    pub const HATCHLING_CRAWL_SPEED: (f32, f32) = (1.0, 2.0);
    /// Hatchlings follow the player within this centre distance
    pub const HATCHLING_FOLLOW_RADIUS: f32 = 260.0;

    /// Enemy collision radius
    pub const ENEMY_RADIUS: f32 = 30.0;
    pub const ENEMY_SPRITE_WIDTH: f32 = 140.0;
    pub const ENEMY_SPRITE_HEIGHT: f32 = 260.0;
    pub const ENEMY_SPRITE_LIFT: f32 = 90.0;
    /// Enemy speed range, rolled once per enemy
    pub const ENEMY_SPEED: (f32, f32) = (0.5, 3.5);
    /// Distance from an obstacle edge inside which enemies slow down
    pub const ENEMY_SLOW_ZONE: f32 = 40.0;
    /// Speed multiplier inside the slow zone
    pub const ENEMY_SLOW_FACTOR: f32 = 0.5;

    /// Particle radius range
    pub const PARTICLE_RADIUS: (f32, f32) = (5.0, 15.0);
    /// Particles spawned per firefly burst (hatchling escaped)
    pub const FIREFLY_BURST: usize = 3;
    /// Particles spawned per spark burst (something was devoured)
    pub const SPARK_BURST: usize = 5;
    /// Spark shrink per pass
    pub const SPARK_DECAY: f32 = 0.05;
}

/// Unit vector from `from` toward `to`, or zero when they coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Step `from` toward `to` by at most `max_step`, never overshooting
#[inline]
pub fn step_toward(from: Vec2, to: Vec2, max_step: f32) -> Vec2 {
    let delta = to - from;
    let distance = delta.x.hypot(delta.y);
    if distance <= max_step || distance == 0.0 {
        to
    } else {
        from + delta / distance * max_step
    }
}
