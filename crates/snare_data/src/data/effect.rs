use super::id::ResourceId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How long a status effect lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectDuration {
    Ticks(u32),
    Infinite,
}

impl EffectDuration {
    /// Converts a configured duration in seconds. Any negative value means infinite.
    pub fn from_seconds(seconds: i32, ticks_per_second: u32) -> Self {
        if seconds < 0 {
            EffectDuration::Infinite
        } else {
            EffectDuration::Ticks((seconds as u32).saturating_mul(ticks_per_second))
        }
    }
}

/// One applied status effect. `amplifier` 0 is level I.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub effect: ResourceId,
    pub amplifier: u32,
    pub duration: EffectDuration,
    pub ambient: bool,
    pub show_particles: bool,
}

/// Status effects currently on an entity, at most one per effect id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffects {
    effects: BTreeMap<ResourceId, StatusEffect>,
}

impl ActiveEffects {
    /// Applies `effect`. An existing instance of the same effect is only
    /// replaced by a stronger one, or by an equal one that lasts longer.
    pub fn add(&mut self, effect: StatusEffect) -> bool {
        match self.effects.get(&effect.effect) {
            Some(current) if !supersedes(&effect, current) => false,
            _ => {
                self.effects.insert(effect.effect.clone(), effect);
                true
            }
        }
    }

    pub fn remove(&mut self, effect: &ResourceId) -> Option<StatusEffect> {
        self.effects.remove(effect)
    }

    pub fn get(&self, effect: &ResourceId) -> Option<&StatusEffect> {
        self.effects.get(effect)
    }

    pub fn contains(&self, effect: &ResourceId) -> bool {
        self.effects.contains_key(effect)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.values()
    }
}

fn supersedes(new: &StatusEffect, current: &StatusEffect) -> bool {
    if new.amplifier != current.amplifier {
        return new.amplifier > current.amplifier;
    }
    match (new.duration, current.duration) {
        (_, EffectDuration::Infinite) => false,
        (EffectDuration::Infinite, _) => true,
        (EffectDuration::Ticks(a), EffectDuration::Ticks(b)) => a > b,
    }
}
