//! Plain data components shared by the snare crates.
//!
//! Nothing in here knows about the ECS or about trap rules; these are the
//! records the world stores per entity and the ids used to name kinds and
//! effects.

pub mod data;

pub use data::effect::{ActiveEffects, EffectDuration, StatusEffect};
pub use data::entity::{
    Cosmetic, CosmeticKind, Creature, Identity, Player, Position, TrapTag, Velocity,
};
pub use data::id::{InvalidId, ResourceId};
