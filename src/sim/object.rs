//! Shared entity capabilities and handles
//!
//! Every kind lives in its own `Vec`, kept sorted by id (ids are handed out
//! monotonically and removal is `retain`, so order never breaks). A handle is a
//! kind tag plus id, which stays valid until the sweep drops the entity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::renderer::Surface;

/// Stable entity id, unique for the lifetime of a `Game`
pub type EntityId = u32;

/// Anything with a collision circle
pub trait Body {
    fn position(&self) -> Vec2;
    fn collision_radius(&self) -> f32;
}

/// An entity stored in one of the orchestrator's collections
pub trait Entity: Body {
    fn id(&self) -> EntityId;

    /// Waiting for the next sweep
    fn is_marked(&self) -> bool {
        false
    }
}

/// Uniform paint interface used by the draw pass
pub trait Drawable {
    fn draw(&self, surface: &mut dyn Surface, debug: bool);
}

/// Tagged handle into the orchestrator's collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectRef {
    Player,
    Egg(EntityId),
    Obstacle(EntityId),
    Enemy(EntityId),
    Hatchling(EntityId),
    Particle(EntityId),
}

/// Entry of the per-pass paint order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawEntry {
    pub object: ObjectRef,
    /// Vertical position when the list was built
    pub depth: f32,
}

/// Monotonic id source
#[derive(Debug, Clone)]
pub struct EntityIds {
    next: EntityId,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    pub fn next_id(&mut self) -> EntityId {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Locate an entity by id in an id-sorted collection
pub fn find_index<T: Entity>(items: &[T], id: EntityId) -> Option<usize> {
    items.binary_search_by_key(&id, |e| e.id()).ok()
}

/// Drop every marked entity, returning how many went
pub fn sweep<T: Entity>(items: &mut Vec<T>) -> usize {
    let before = items.len();
    items.retain(|e| !e.is_marked());
    before - items.len()
}

/// Panic unless a constructor got a sane circle
pub(crate) fn assert_circle(kind: &str, position: Vec2, radius: f32) {
    assert!(
        position.is_finite(),
        "{kind} position must be finite, got {position}"
    );
    assert!(
        radius.is_finite() && radius > 0.0,
        "{kind} collision radius must be positive, got {radius}"
    );
}
