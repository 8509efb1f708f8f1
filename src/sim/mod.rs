//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed step per logic pass
//! - Seeded RNG only
//! - Stable iteration order (by entity ID, then paint order)
//! - Drawing only through the `Surface` trait, no platform dependencies

pub mod collision;
pub mod egg;
pub mod enemy;
pub mod events;
pub mod game;
pub mod hatchling;
pub mod object;
pub mod obstacle;
pub mod particle;
pub mod placement;
pub mod player;

pub use collision::{Collision, check_collision, resolve_against};
pub use egg::{Egg, EggState};
pub use enemy::{Enemy, EnemyState};
pub use events::{FrameEvents, GameEvent, SimContext};
pub use game::{Game, GameOutcome};
pub use hatchling::{Hatchling, HatchlingState};
pub use object::{Body, DrawEntry, Drawable, Entity, EntityId, ObjectRef};
pub use obstacle::Obstacle;
pub use particle::{Particle, ParticleKind};
pub use placement::place_obstacles;
pub use player::Player;
