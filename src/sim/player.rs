//! The player-controlled guardian
//!
//! Walks toward the pointer target at a fixed speed, stays inside the play
//! band and slides around rocks. Eggs and hatchlings react to the player's
//! circle on their own updates.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::resolve_against;
use super::object::{Body, Drawable};
use super::obstacle::Obstacle;
use crate::config::GameConfig;
use crate::consts::{
    PLAYER_ANIMATION_FRAMES, PLAYER_RADIUS, PLAYER_SPEED, PLAYER_SPRITE_HEIGHT,
    PLAYER_SPRITE_LIFT, PLAYER_SPRITE_WIDTH,
};
use crate::input::PointerState;
use crate::direction_to;
use crate::renderer::{Rect, Sprite, SpriteFrame, Surface, draw_hitbox};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Where `restart` puts the player back
    pub spawn: Vec2,
    /// Last steering target (debug line)
    pub target: Vec2,
    /// Animation column and facing row
    pub frame: SpriteFrame,
}

impl Player {
    pub fn new(spawn: Vec2) -> Self {
        super::object::assert_circle("player", spawn, PLAYER_RADIUS);
        Self {
            pos: spawn,
            vel: Vec2::ZERO,
            radius: PLAYER_RADIUS,
            spawn,
            target: spawn,
            frame: SpriteFrame::default(),
        }
    }

    /// Back to the spawn point, standing still
    pub fn restart(&mut self) {
        self.pos = self.spawn;
        self.vel = Vec2::ZERO;
        self.target = self.spawn;
        self.frame = SpriteFrame::default();
    }

    pub fn sprite_rect(&self) -> Rect {
        Rect::sprite_at(
            self.pos,
            PLAYER_SPRITE_WIDTH,
            PLAYER_SPRITE_HEIGHT,
            PLAYER_SPRITE_LIFT,
        )
    }

    pub fn update(&mut self, pointer: &PointerState, obstacles: &[Obstacle], config: &GameConfig) {
        self.target = pointer.position();
        let delta = self.target - self.pos;
        let distance = delta.y.hypot(delta.x);

        self.frame.y = facing_row(delta.y.atan2(delta.x));
        self.frame.x = (self.frame.x + 1) % PLAYER_ANIMATION_FRAMES;

        self.vel = if distance > PLAYER_SPEED {
            direction_to(self.pos, self.target) * PLAYER_SPEED
        } else {
            Vec2::ZERO
        };
        self.pos += self.vel;

        let r = self.radius;
        self.pos.x = self.pos.x.clamp(r, (config.width - r).max(r));
        self.pos.y = self
            .pos
            .y
            .clamp(config.top_margin + r, (config.height - r).max(config.top_margin + r));

        self.pos = resolve_against(self.pos, r, obstacles.iter().map(|o| o as &dyn Body));
    }
}

/// Sprite row for a heading (radians, screen space), eight compass sectors
pub fn facing_row(angle: f32) -> u32 {
    if !(-2.74..=2.74).contains(&angle) {
        6
    } else if angle < -1.96 {
        7
    } else if angle < -1.17 {
        0
    } else if angle < -0.39 {
        1
    } else if angle < 0.39 {
        2
    } else if angle < 1.17 {
        3
    } else if angle < 1.96 {
        4
    } else {
        5
    }
}

impl Body for Player {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn collision_radius(&self) -> f32 {
        self.radius
    }
}

impl Drawable for Player {
    fn draw(&self, surface: &mut dyn Surface, debug: bool) {
        surface.draw_sprite(Sprite::Player, self.frame, self.sprite_rect());
        if debug {
            draw_hitbox(surface, self.pos, self.radius);
            surface.stroke_line(self.pos, self.target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    #[test]
    fn test_steers_toward_pointer() {
        let mut player = Player::new(Vec2::new(640.0, 400.0));
        let mut pointer = PointerState::centered(1280.0, 720.0);
        pointer.press(740.0, 400.0);

        player.update(&pointer, &[], &config());
        assert!((player.pos.x - (640.0 + PLAYER_SPEED)).abs() < 1e-4);
        assert!((player.pos.y - 400.0).abs() < 1e-4);
        assert_eq!(player.frame.y, 2);
    }

    #[test]
    fn test_stops_within_one_step() {
        let mut player = Player::new(Vec2::new(640.0, 400.0));
        let mut pointer = PointerState::centered(1280.0, 720.0);
        pointer.press(641.0, 400.0);

        player.update(&pointer, &[], &config());
        assert_eq!(player.pos, Vec2::new(640.0, 400.0));
        assert_eq!(player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_clamped_below_top_margin() {
        let config = config();
        let mut player = Player::new(Vec2::new(640.0, config.top_margin + 31.0));
        let mut pointer = PointerState::centered(config.width, config.height);
        pointer.press(640.0, 0.0);

        for _ in 0..10 {
            player.update(&pointer, &[], &config);
        }
        assert!((player.pos.y - (config.top_margin + player.radius)).abs() < 1e-4);
    }

    #[test]
    fn test_pushed_out_of_obstacle() {
        let rock = Obstacle::new(1, Vec2::new(700.0, 400.0), 40.0, SpriteFrame::default());
        let mut player = Player::new(Vec2::new(640.0, 400.0));
        let mut pointer = PointerState::centered(1280.0, 720.0);
        pointer.press(700.0, 400.0);

        for _ in 0..30 {
            player.update(&pointer, std::slice::from_ref(&rock), &config());
            let gap = player.pos.distance(rock.pos);
            assert!(gap >= player.radius + rock.radius - 1e-3);
        }
    }

    #[test]
    fn test_restart_returns_to_spawn() {
        let mut player = Player::new(Vec2::new(640.0, 400.0));
        let mut pointer = PointerState::centered(1280.0, 720.0);
        pointer.press(100.0, 600.0);
        player.update(&pointer, &[], &config());
        player.restart();
        assert_eq!(player.pos, player.spawn);
        assert_eq!(player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_facing_rows_cover_compass() {
        assert_eq!(facing_row(0.0), 2);
        assert_eq!(facing_row(std::f32::consts::PI), 6);
        assert_eq!(facing_row(-std::f32::consts::FRAC_PI_2), 0);
        assert_eq!(facing_row(std::f32::consts::FRAC_PI_2), 4);
    }
}
