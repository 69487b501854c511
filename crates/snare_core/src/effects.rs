//! Random status effect allocation.
//!
//! An effect budget is spent by drawing distinct beneficial effects without
//! replacement. Each draw picks an amplifier below the remaining budget and
//! costs `amplifier + 1`, so the loop ends after at most `min(budget, pool)`
//! draws.

use crate::config::TrapOptions;
use crate::world::{World, TICKS_PER_SECOND};
use rand::Rng;
use snare_data::{EffectDuration, ResourceId, StatusEffect};

/// How allocated effects are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectSettings {
    pub duration: EffectDuration,
    pub show_particles: bool,
    /// Log the applied effects at info instead of debug.
    pub debug: bool,
}

impl EffectSettings {
    pub fn from_options(options: &TrapOptions) -> Self {
        Self {
            duration: EffectDuration::from_seconds(options.effect_duration_secs, TICKS_PER_SECOND),
            show_particles: options.show_particles,
            debug: options.debug_mode,
        }
    }
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self::from_options(&TrapOptions::default())
    }
}

/// Splits `budget` over effects drawn from `pool`. Returns `(effect, amplifier)`
/// pairs in draw order.
pub fn allocate<R: Rng + ?Sized>(
    mut pool: Vec<ResourceId>,
    mut budget: u32,
    rng: &mut R,
) -> Vec<(ResourceId, u32)> {
    let mut drawn = Vec::new();
    while budget > 0 && !pool.is_empty() {
        let effect = pool.remove(rng.gen_range(0..pool.len()));
        let amplifier = rng.gen_range(0..budget);
        budget -= amplifier + 1;
        drawn.push((effect, amplifier));
    }
    drawn
}

/// Allocates `budget` over the world's beneficial effects and applies them to
/// `target`. Returns the effects that took hold.
pub fn apply<R: Rng + ?Sized>(
    world: &mut World,
    target: hecs::Entity,
    budget: u32,
    settings: &EffectSettings,
    rng: &mut R,
) -> Vec<StatusEffect> {
    let pool = world.effects().beneficial();
    let mut applied = Vec::new();
    for (effect, amplifier) in allocate(pool, budget, rng) {
        let status = StatusEffect {
            effect,
            amplifier,
            duration: settings.duration,
            ambient: false,
            show_particles: settings.show_particles,
        };
        match world.add_effect(target, status.clone()) {
            Ok(true) => applied.push(status),
            Ok(false) => {}
            Err(err) => {
                tracing::debug!(effect = %status.effect, error = %err, "Failed to apply effect");
            }
        }
    }

    if !applied.is_empty() {
        let names: Vec<String> = applied
            .iter()
            .map(|s| format!("{} {}", s.effect, s.amplifier + 1))
            .collect();
        if settings.debug {
            tracing::info!(entity = %world.name(target), effects = ?names, "Applied effects");
        } else {
            tracing::debug!(entity = %world.name(target), effects = ?names, "Applied effects");
        }
    }
    applied
}
