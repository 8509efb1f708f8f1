//! Session orchestrator
//!
//! Owns every entity collection, the RNG and the counters. The host calls
//! [`Game::render`] once per animation frame with the elapsed milliseconds;
//! the game throttles that to `config.fps` logic passes per second. A pass
//! clears the surface, paints every object back to front (by base y) and
//! updates each one right after painting it, so what is on screen is the state
//! before the pass.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{self, Collision};
use super::egg::{Egg, EggNeighbours};
use super::enemy::{Enemy, EnemyWorld};
use super::events::{FrameEvents, GameEvent};
use super::hatchling::Hatchling;
use super::object::{Body, DrawEntry, Drawable, EntityId, EntityIds, ObjectRef, find_index, sweep};
use super::obstacle::Obstacle;
use super::particle::Particle;
use super::placement::place_obstacles;
use super::player::Player;
use crate::config::GameConfig;
use crate::consts::OBSTACLE_RADIUS;
use crate::error::ConfigError;
use crate::input::{KeyAction, PointerState};
use crate::renderer::{SpriteFrame, Surface, TextAlign, colors};

const HUD_FONT: &str = "40px Helvetica";
const HEADLINE_FONT: &str = "130px Helvetica";

/// How a finished session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Won,
    Lost,
}

pub struct Game {
    config: GameConfig,
    rng: Pcg32,
    ids: EntityIds,
    pointer: PointerState,

    player: Player,
    obstacles: Vec<Obstacle>,
    eggs: Vec<Egg>,
    enemies: Vec<Enemy>,
    hatchlings: Vec<Hatchling>,
    particles: Vec<Particle>,

    /// Paint order of the most recent pass
    draw_list: Vec<DrawEntry>,
    /// Everything requested during the most recent pass, in order
    last_events: Vec<GameEvent>,

    /// Milliseconds since the last pass
    timer: f32,
    /// Milliseconds since the last egg spawn
    egg_timer: f32,

    score: u32,
    lost_hatchlings: u32,
    game_over: bool,
    debug: bool,
}

impl Game {
    /// Empty session; call [`Game::init`] to populate enemies and rocks
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let spawn = Vec2::new(config.width * 0.5, config.height * 0.5);
        log::info!(
            "New session: {}x{} surface, {} difficulty, seed {:#x}",
            config.width,
            config.height,
            config.difficulty.as_str(),
            config.seed
        );

        Ok(Self {
            rng: Pcg32::seed_from_u64(config.seed),
            ids: EntityIds::default(),
            pointer: PointerState::centered(config.width, config.height),
            player: Player::new(spawn),
            obstacles: Vec::new(),
            eggs: Vec::new(),
            enemies: Vec::new(),
            hatchlings: Vec::new(),
            particles: Vec::new(),
            draw_list: Vec::new(),
            last_events: Vec::new(),
            timer: 0.0,
            egg_timer: 0.0,
            score: 0,
            lost_hatchlings: 0,
            game_over: false,
            debug: false,
            config,
        })
    }

    /// Spawn the enemy pack and lay out the rocks
    pub fn init(&mut self) {
        for _ in 0..self.config.enemy_count {
            self.add_enemy();
        }
        place_obstacles(
            &mut self.obstacles,
            &self.config,
            &mut self.ids,
            &mut self.rng,
        );
        log::debug!(
            "Session populated: {} enemies, {} obstacles",
            self.enemies.len(),
            self.obstacles.len()
        );
    }

    /// Advance by `delta_ms` of wall time, painting onto `surface` if a pass is due
    pub fn render(&mut self, surface: &mut dyn Surface, delta_ms: f32) {
        let delta = if delta_ms.is_finite() {
            delta_ms.max(0.0)
        } else {
            0.0
        };

        self.timer += delta;
        if self.timer > self.config.frame_interval_ms() {
            self.pass(surface);
            self.timer = 0.0;
        }

        if self.egg_timer > self.config.egg_interval_ms
            && self.eggs.len() < self.config.max_eggs
            && !self.game_over
        {
            self.add_egg();
            self.egg_timer = 0.0;
        } else {
            self.egg_timer += delta;
        }
    }

    /// Circle overlap between any two bodies
    pub fn check_collision<A: Body + ?Sized, B: Body + ?Sized>(a: &A, b: &B) -> Collision {
        collision::check_collision(a, b)
    }

    pub fn add_egg(&mut self) -> EntityId {
        let id = self.ids.next_id();
        let egg = Egg::random(id, &self.config, &mut self.rng);
        log::debug!("Egg {} laid at ({:.0}, {:.0})", id, egg.pos.x, egg.pos.y);
        self.eggs.push(egg);
        id
    }

    pub fn add_enemy(&mut self) -> EntityId {
        let id = self.ids.next_id();
        self.enemies
            .push(Enemy::spawn(id, &self.config, &mut self.rng));
        id
    }

    /// Drop marked eggs, hatchlings and particles
    ///
    /// Obstacles and enemies are never marked and are left alone.
    pub fn remove_game_objects(&mut self) -> usize {
        sweep(&mut self.eggs) + sweep(&mut self.hatchlings) + sweep(&mut self.particles)
    }

    /// Fresh session on the same surface: counters, timers and every
    /// collection reset, then repopulated
    pub fn restart(&mut self) {
        self.player.restart();
        self.obstacles.clear();
        self.eggs.clear();
        self.enemies.clear();
        self.hatchlings.clear();
        self.particles.clear();
        self.draw_list.clear();
        self.last_events.clear();
        self.pointer = PointerState::centered(self.config.width, self.config.height);
        self.score = 0;
        self.lost_hatchlings = 0;
        self.game_over = false;
        self.timer = 0.0;
        self.egg_timer = 0.0;
        self.init();
        log::info!("Session restarted");
    }

    pub fn reseed(&mut self, seed: u64) {
        self.config.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
    }

    pub fn handle_key(&mut self, action: KeyAction) {
        match action {
            KeyAction::ToggleDebug => self.toggle_debug(),
            KeyAction::Restart => self.restart(),
        }
    }

    pub fn toggle_debug(&mut self) {
        self.debug = !self.debug;
        log::debug!("Debug overlay {}", if self.debug { "on" } else { "off" });
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.pointer.press(x, y);
    }

    pub fn pointer_up(&mut self, x: f32, y: f32) {
        self.pointer.release(x, y);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.pointer.move_to(x, y);
    }

    // === Placement helpers for hosts and scripted scenarios ===

    pub fn spawn_egg_at(&mut self, pos: Vec2) -> EntityId {
        let id = self.ids.next_id();
        self.eggs
            .push(Egg::new(id, pos, self.config.hatch_threshold_ms));
        id
    }

    pub fn spawn_hatchling_at(&mut self, pos: Vec2) -> EntityId {
        let id = self.ids.next_id();
        self.hatchlings
            .push(Hatchling::spawn(id, pos, &mut self.rng));
        id
    }

    pub fn spawn_enemy_at(&mut self, pos: Vec2, speed: f32) -> EntityId {
        let id = self.ids.next_id();
        self.enemies.push(Enemy::new(id, pos, speed));
        id
    }

    pub fn spawn_obstacle_at(&mut self, pos: Vec2) -> EntityId {
        let id = self.ids.next_id();
        self.obstacles
            .push(Obstacle::new(id, pos, OBSTACLE_RADIUS, SpriteFrame::default()));
        id
    }

    // === Accessors ===

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lost_hatchlings(&self) -> u32 {
        self.lost_hatchlings
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        if !self.game_over {
            None
        } else if self.lost_hatchlings >= self.config.loss_limit {
            Some(GameOutcome::Lost)
        } else {
            Some(GameOutcome::Won)
        }
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn eggs(&self) -> &[Egg] {
        &self.eggs
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn hatchlings(&self) -> &[Hatchling] {
        &self.hatchlings
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn draw_list(&self) -> &[DrawEntry] {
        &self.draw_list
    }

    pub fn last_events(&self) -> &[GameEvent] {
        &self.last_events
    }

    // === Pass ===

    fn pass(&mut self, surface: &mut dyn Surface) {
        surface.clear_rect(0.0, 0.0, self.config.width, self.config.height);
        self.build_draw_list();
        self.last_events.clear();

        let step = self.config.frame_interval_ms();
        let mut events = FrameEvents::default();
        for i in 0..self.draw_list.len() {
            let object = self.draw_list[i].object;
            self.draw_and_update(object, surface, step, &mut events);
            self.apply_events(&mut events);
        }

        let removed = self.remove_game_objects();
        log::trace!(
            "Pass: {} objects drawn, {} removed",
            self.draw_list.len(),
            removed
        );

        self.draw_hud(surface);
        if self.game_over {
            self.draw_game_over(surface);
        }
    }

    /// Painter's order: everything by base y, ties keep collection order
    fn build_draw_list(&mut self) {
        let list = &mut self.draw_list;
        list.clear();
        list.push(DrawEntry {
            object: ObjectRef::Player,
            depth: self.player.pos.y,
        });
        list.extend(self.eggs.iter().map(|e| DrawEntry {
            object: ObjectRef::Egg(e.id),
            depth: e.pos.y,
        }));
        list.extend(self.obstacles.iter().map(|o| DrawEntry {
            object: ObjectRef::Obstacle(o.id),
            depth: o.pos.y,
        }));
        list.extend(self.enemies.iter().map(|e| DrawEntry {
            object: ObjectRef::Enemy(e.id),
            depth: e.pos.y,
        }));
        list.extend(self.hatchlings.iter().map(|h| DrawEntry {
            object: ObjectRef::Hatchling(h.id),
            depth: h.pos.y,
        }));
        list.extend(self.particles.iter().map(|p| DrawEntry {
            object: ObjectRef::Particle(p.id),
            depth: p.pos.y,
        }));
        list.sort_by(|a, b| a.depth.total_cmp(&b.depth));
    }

    fn draw_and_update(
        &mut self,
        object: ObjectRef,
        surface: &mut dyn Surface,
        step: f32,
        events: &mut FrameEvents,
    ) {
        let debug = self.debug;
        match object {
            ObjectRef::Player => {
                self.player.draw(surface, debug);
                self.player
                    .update(&self.pointer, &self.obstacles, &self.config);
            }
            ObjectRef::Egg(id) => {
                let Some(i) = find_index(&self.eggs, id) else {
                    return;
                };
                let egg = &mut self.eggs[i];
                if egg.marked_for_deletion {
                    return;
                }
                egg.draw(surface, debug);
                let neighbours = EggNeighbours {
                    player: &self.player,
                    obstacles: &self.obstacles,
                    hatchlings: &self.hatchlings,
                };
                egg.update(
                    step,
                    &neighbours,
                    self.config.hatch_policy,
                    self.config.top_margin,
                    events,
                );
            }
            ObjectRef::Obstacle(id) => {
                if let Some(i) = find_index(&self.obstacles, id) {
                    self.obstacles[i].draw(surface, debug);
                }
            }
            ObjectRef::Enemy(id) => {
                let Some(i) = find_index(&self.enemies, id) else {
                    return;
                };
                let enemy = &mut self.enemies[i];
                enemy.draw(surface, debug);
                let mut world = EnemyWorld {
                    player: &self.player,
                    obstacles: &self.obstacles,
                    eggs: &mut self.eggs,
                    hatchlings: &mut self.hatchlings,
                    config: &self.config,
                };
                enemy.update(&mut world, &mut self.rng, events);
            }
            ObjectRef::Hatchling(id) => {
                let Some(i) = find_index(&self.hatchlings, id) else {
                    return;
                };
                let hatchling = &mut self.hatchlings[i];
                if hatchling.marked_for_deletion {
                    return;
                }
                hatchling.draw(surface, debug);
                hatchling.update(&self.player, self.config.top_margin, events);
            }
            ObjectRef::Particle(id) => {
                let Some(i) = find_index(&self.particles, id) else {
                    return;
                };
                let particle = &mut self.particles[i];
                if particle.marked_for_deletion {
                    return;
                }
                particle.draw(surface, debug);
                particle.update();
            }
        }
    }

    /// Carry out what the last updated object asked for
    fn apply_events(&mut self, events: &mut FrameEvents) {
        for event in events.drain() {
            match &event {
                GameEvent::HatchlingSpawned { at } => {
                    let id = self.ids.next_id();
                    self.hatchlings
                        .push(Hatchling::spawn(id, *at, &mut self.rng));
                }
                GameEvent::Scored => {
                    if !self.game_over {
                        self.score += 1;
                        self.check_game_over();
                    }
                }
                GameEvent::Lost => {
                    if !self.game_over {
                        self.lost_hatchlings += 1;
                        self.check_game_over();
                    }
                }
                GameEvent::Particles { kind, at, count } => {
                    for _ in 0..*count {
                        let id = self.ids.next_id();
                        self.particles
                            .push(Particle::spawn(id, *kind, *at, &mut self.rng));
                    }
                }
            }
            self.last_events.push(event);
        }
    }

    fn check_game_over(&mut self) {
        if self.score >= self.config.winning_score
            || self.lost_hatchlings >= self.config.loss_limit
        {
            self.game_over = true;
            log::info!(
                "Game over: score {}, lost {}",
                self.score,
                self.lost_hatchlings
            );
        }
    }

    fn draw_hud(&self, surface: &mut dyn Surface) {
        surface.save();
        surface.set_fill_style(colors::TEXT);
        surface.set_font(HUD_FONT);
        surface.set_text_align(TextAlign::Left);
        surface.fill_text(&format!("Score: {}", self.score), 25.0, 50.0);
        if self.debug {
            surface.fill_text(&format!("Lost: {}", self.lost_hatchlings), 25.0, 100.0);
        }
        surface.restore();
    }

    fn draw_game_over(&self, surface: &mut dyn Surface) {
        let (width, height) = (self.config.width, self.config.height);
        let (headline, subline) = match self.outcome() {
            Some(GameOutcome::Lost) => ("Noooooo!", "Too many hatchlings were lost!"),
            _ => ("Yesss!", "Well done, guardian!"),
        };

        surface.save();
        surface.set_fill_style(colors::OVERLAY);
        surface.fill_rect(0.0, 0.0, width, height);
        surface.set_fill_style(colors::TEXT);
        surface.set_text_align(TextAlign::Center);
        surface.set_font(HEADLINE_FONT);
        surface.fill_text(headline, width * 0.5, height * 0.5 - 20.0);
        surface.set_font(HUD_FONT);
        surface.fill_text(subline, width * 0.5, height * 0.5 + 30.0);
        surface.fill_text(
            &format!(
                "Final score {}. Press 'R' to rescue more hatchlings",
                self.score
            ),
            width * 0.5,
            height * 0.5 + 80.0,
        );
        surface.restore();
    }
}
