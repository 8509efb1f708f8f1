//! Side effects requested by entities during their update
//!
//! Entities never hold a pointer back to the game. They get a [`SimContext`]
//! and ask for things; the orchestrator applies the requests once the entity's
//! update returns, so no collection is mutated while another is borrowed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::particle::ParticleKind;

/// Something that happened during a pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An egg finished hatching here
    HatchlingSpawned { at: Vec2 },
    /// A hatchling reached the player
    Scored,
    /// A hatchling escaped or was devoured
    Lost,
    /// Cosmetic burst
    Particles {
        kind: ParticleKind,
        at: Vec2,
        count: usize,
    },
}

/// Capabilities an entity may use while updating
pub trait SimContext {
    fn spawn_hatchling(&mut self, at: Vec2);
    fn record_score(&mut self);
    fn record_loss(&mut self);
    fn spawn_particles(&mut self, kind: ParticleKind, at: Vec2, count: usize);
}

/// Buffered requests from a single entity update
#[derive(Debug, Clone, Default)]
pub struct FrameEvents {
    events: Vec<GameEvent>,
}

impl FrameEvents {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn as_slice(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }
}

impl SimContext for FrameEvents {
    fn spawn_hatchling(&mut self, at: Vec2) {
        self.events.push(GameEvent::HatchlingSpawned { at });
    }

    fn record_score(&mut self) {
        self.events.push(GameEvent::Scored);
    }

    fn record_loss(&mut self) {
        self.events.push(GameEvent::Lost);
    }

    fn spawn_particles(&mut self, kind: ParticleKind, at: Vec2, count: usize) {
        self.events.push(GameEvent::Particles { kind, at, count });
    }
}
