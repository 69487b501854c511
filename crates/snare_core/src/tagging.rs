//! Trap source selection.
//!
//! Every creature entering the world gets exactly one chance to become a trap
//! source, whether it was just spawned or is joining from elsewhere.

use crate::catalog::TrapCatalog;
use crate::goal::GoalKind;
use crate::registry::GLOWING;
use crate::trigger::TrapTriggerGoal;
use crate::world::World;
use rand::Rng;
use snare_data::{EffectDuration, ResourceId, StatusEffect, TrapTag};

/// How long debug glowing marks a fresh source.
pub const DEBUG_GLOW_TICKS: u32 = 2400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagOutcome {
    /// Traps are disabled, the entity is not a creature, or it was already
    /// evaluated.
    Skipped,
    /// No trap is configured for the entity's kind.
    NoMatch,
    /// The chance roll failed.
    Declined,
    Tagged,
}

/// Decides whether `entity` becomes a trap source.
pub fn on_entity_introduced(
    world: &mut World,
    catalog: &TrapCatalog,
    entity: hecs::Entity,
    existing: bool,
) -> TagOutcome {
    if !catalog.options.enabled {
        return TagOutcome::Skipped;
    }
    let Some(kind) = world.creature_kind(entity) else {
        return TagOutcome::Skipped;
    };
    if world.tag(entity) != Some(TrapTag::None) || world.has_goal(entity, GoalKind::TrapTrigger) {
        return TagOutcome::Skipped;
    }
    let Some(trap) = catalog.find_by_kind(&kind) else {
        return TagOutcome::NoMatch;
    };

    let mut rng = world.entity_rng(entity);
    let roll: f32 = rng.gen();
    world.store_rng(entity, rng);
    if roll >= trap.chance {
        return TagOutcome::Declined;
    }

    if world.set_tag(entity, TrapTag::Source).is_err() {
        return TagOutcome::Skipped;
    }
    if let Err(err) = world.attach_goal(entity, Box::new(TrapTriggerGoal::new(entity))) {
        tracing::debug!(error = %err, "Could not attach trap trigger");
        let _ = world.set_tag(entity, TrapTag::None);
        return TagOutcome::Skipped;
    }

    if catalog.options.debug_mode {
        if let Some(glowing) = ResourceId::base(GLOWING) {
            let _ = world.add_effect(
                entity,
                StatusEffect {
                    effect: glowing,
                    amplifier: 0,
                    duration: EffectDuration::Ticks(DEBUG_GLOW_TICKS),
                    ambient: false,
                    show_particles: false,
                },
            );
        }
        tracing::info!(
            entity = %world.name(entity),
            position = ?world.position(entity),
            existing = existing,
            "Trap attached"
        );
    } else {
        tracing::debug!(entity = %world.name(entity), kind = %kind, existing = existing, "Trap attached");
    }
    TagOutcome::Tagged
}
