//! Creature kind and status effect registries.
//!
//! Config files name kinds and effects by id. The registries decide which ids
//! exist, which kinds count as mobs (only those can take part in traps), how
//! many riders a kind carries, and which effects are beneficial.

use snare_data::ResourceId;
use std::collections::HashMap;

pub const PLAYER: &str = "player";
pub const LIGHTNING_BOLT: &str = "lightning_bolt";
pub const GLOWING: &str = "glowing";

/// Spawn category of a creature kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MobCategory {
    Monster,
    Creature,
    Ambient,
    Axolotls,
    UndergroundWaterCreature,
    WaterCreature,
    WaterAmbient,
    Misc,
}

impl MobCategory {
    /// Everything except `Misc` (players, projectiles, effects).
    pub fn is_mob(self) -> bool {
        !matches!(self, MobCategory::Misc)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindInfo {
    pub id: ResourceId,
    pub category: MobCategory,
    /// Whether entities of this kind can be created on demand.
    pub summonable: bool,
    pub max_passengers: usize,
}

/// Registered creature kinds, in registration order.
#[derive(Debug, Clone, Default)]
pub struct KindRegistry {
    kinds: Vec<KindInfo>,
    index: HashMap<ResourceId, usize>,
}

impl KindRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in kinds.
    pub fn standard() -> Self {
        use MobCategory::*;
        let mut registry = Self::new();
        for (path, category, max_passengers) in [
            ("pig", Creature, 1),
            ("horse", Creature, 1),
            ("donkey", Creature, 1),
            ("camel", Creature, 2),
            ("cow", Creature, 1),
            ("sheep", Creature, 1),
            ("chicken", Creature, 1),
            ("strider", Creature, 1),
            ("zombie", Monster, 1),
            ("zombified_piglin", Monster, 1),
            ("skeleton", Monster, 1),
            ("spider", Monster, 1),
            ("creeper", Monster, 1),
            ("pillager", Monster, 1),
            ("ravager", Monster, 1),
            ("bat", Ambient, 0),
            ("squid", WaterCreature, 0),
            ("cod", WaterAmbient, 0),
            ("glow_squid", UndergroundWaterCreature, 0),
            ("axolotl", Axolotls, 0),
        ] {
            registry.register_base(path, category, true, max_passengers);
        }
        registry.register_base(PLAYER, Misc, false, 0);
        registry.register_base(LIGHTNING_BOLT, Misc, true, 0);
        registry
    }

    fn register_base(
        &mut self,
        path: &str,
        category: MobCategory,
        summonable: bool,
        max_passengers: usize,
    ) {
        if let Some(id) = ResourceId::base(path) {
            self.register(KindInfo {
                id,
                category,
                summonable,
                max_passengers,
            });
        }
    }

    /// Registers or replaces a kind.
    pub fn register(&mut self, info: KindInfo) {
        match self.index.get(&info.id) {
            Some(&slot) => self.kinds[slot] = info,
            None => {
                self.index.insert(info.id.clone(), self.kinds.len());
                self.kinds.push(info);
            }
        }
    }

    pub fn get(&self, id: &ResourceId) -> Option<&KindInfo> {
        self.index.get(id).map(|&slot| &self.kinds[slot])
    }

    /// Resolves a configured id to a mob kind. Unparsable, unknown and
    /// non-mob ids all resolve to `None`.
    pub fn resolve_mob(&self, raw: &str) -> Option<ResourceId> {
        let id = ResourceId::parse(raw)?;
        self.get(&id)
            .filter(|info| info.category.is_mob())
            .map(|info| info.id.clone())
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &KindInfo> {
        self.kinds.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectCategory {
    Beneficial,
    Harmful,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectInfo {
    pub id: ResourceId,
    pub category: EffectCategory,
}

/// Registered status effects, in registration order.
#[derive(Debug, Clone, Default)]
pub struct EffectRegistry {
    effects: Vec<EffectInfo>,
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn standard() -> Self {
        use EffectCategory::*;
        let mut registry = Self::new();
        for (path, category) in [
            ("speed", Beneficial),
            ("slowness", Harmful),
            ("haste", Beneficial),
            ("mining_fatigue", Harmful),
            ("strength", Beneficial),
            ("instant_health", Beneficial),
            ("instant_damage", Harmful),
            ("jump_boost", Beneficial),
            ("nausea", Harmful),
            ("regeneration", Beneficial),
            ("resistance", Beneficial),
            ("fire_resistance", Beneficial),
            ("water_breathing", Beneficial),
            ("invisibility", Beneficial),
            ("blindness", Harmful),
            ("night_vision", Beneficial),
            ("hunger", Harmful),
            ("weakness", Harmful),
            ("poison", Harmful),
            ("wither", Harmful),
            ("health_boost", Beneficial),
            ("absorption", Beneficial),
            ("saturation", Beneficial),
            (GLOWING, Neutral),
            ("levitation", Harmful),
            ("luck", Beneficial),
            ("unluck", Harmful),
            ("slow_falling", Beneficial),
            ("conduit_power", Beneficial),
            ("dolphins_grace", Beneficial),
            ("bad_omen", Neutral),
            ("hero_of_the_village", Beneficial),
            ("darkness", Harmful),
        ] {
            if let Some(id) = ResourceId::base(path) {
                registry.register(EffectInfo { id, category });
            }
        }
        registry
    }

    pub fn register(&mut self, info: EffectInfo) {
        match self.effects.iter_mut().find(|e| e.id == info.id) {
            Some(existing) => *existing = info,
            None => self.effects.push(info),
        }
    }

    pub fn get(&self, id: &ResourceId) -> Option<&EffectInfo> {
        self.effects.iter().find(|e| &e.id == id)
    }

    /// Ids of all beneficial effects, in registration order.
    pub fn beneficial(&self) -> Vec<ResourceId> {
        self.effects
            .iter()
            .filter(|e| e.category == EffectCategory::Beneficial)
            .map(|e| e.id.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
