use crate::config::{TrapConfig, TrapOptions};
use crate::effects::EffectSettings;
use crate::registry::KindRegistry;
use snare_data::ResourceId;

/// A trap whose ids have been resolved against a [`KindRegistry`].
///
/// `spawn` and `passenger` are `None` when the configured id was empty,
/// unknown, or not a mob.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTrap {
    pub source: ResourceId,
    pub spawn: Option<ResourceId>,
    pub passenger: Option<ResourceId>,
    pub passenger_on_source: bool,
    pub invert_riding: bool,
    pub chance: f32,
    pub spawn_num: u32,
    pub effect_num: u32,
}

/// Read-only snapshot of the trap configuration.
///
/// Built once per config load and shared behind an `Arc`; a reload swaps the
/// whole snapshot between ticks, so a trigger never sees a half-updated table.
#[derive(Debug, Clone)]
pub struct TrapCatalog {
    pub options: TrapOptions,
    traps: Vec<ResolvedTrap>,
    fingerprint: String,
}

impl TrapCatalog {
    pub fn resolve(config: &TrapConfig, kinds: &KindRegistry) -> Self {
        let mut traps = Vec::with_capacity(config.traps.len());
        for definition in &config.traps {
            let Some(source) = kinds.resolve_mob(&definition.source_id) else {
                tracing::debug!(
                    source_id = %definition.source_id,
                    "Ignoring trap with unresolvable source"
                );
                continue;
            };
            traps.push(ResolvedTrap {
                source,
                spawn: kinds.resolve_mob(&definition.spawn_id),
                passenger: kinds.resolve_mob(&definition.passenger_id),
                passenger_on_source: definition.passenger_on_source,
                invert_riding: definition.invert_riding,
                chance: definition.chance,
                spawn_num: definition.spawn_num,
                effect_num: definition.effect_num,
            });
        }

        Self {
            options: config.options.clone(),
            traps,
            fingerprint: config.fingerprint(),
        }
    }

    /// First trap, in config order, whose source is `kind`.
    pub fn find_by_kind(&self, kind: &ResourceId) -> Option<&ResolvedTrap> {
        self.traps.iter().find(|trap| &trap.source == kind)
    }

    pub fn traps(&self) -> &[ResolvedTrap] {
        &self.traps
    }

    pub fn effect_settings(&self) -> EffectSettings {
        EffectSettings::from_options(&self.options)
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

impl Default for TrapCatalog {
    fn default() -> Self {
        Self::resolve(&TrapConfig::default(), &KindRegistry::standard())
    }
}
