pub mod macros;

use snare_lib::model::catalog::TrapCatalog;
use snare_lib::model::config::{TrapConfig, TrapDefinition};
use snare_lib::model::registry::{EffectRegistry, KindRegistry};
use snare_lib::model::state::{Position, ResourceId};
use snare_lib::model::{TrapSystem, World};
use std::sync::Arc;

#[allow(dead_code)]
pub struct WorldBuilder {
    seed: u64,
    config: TrapConfig,
    kinds: KindRegistry,
    creatures: Vec<(String, Position)>,
    players: Vec<Position>,
    max_entities: Option<usize>,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn new() -> Self {
        Self {
            seed: 0,
            config: TrapConfig::default(),
            kinds: KindRegistry::standard(),
            creatures: Vec::new(),
            players: Vec::new(),
            max_entities: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut TrapConfig),
    {
        modifier(&mut self.config);
        self
    }

    /// Replaces the built-in trap table with a single trap.
    pub fn with_trap(mut self, trap: TrapDefinition) -> Self {
        self.config.traps = vec![trap];
        self
    }

    pub fn with_kinds<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut KindRegistry),
    {
        modifier(&mut self.kinds);
        self
    }

    pub fn with_creature(mut self, kind: &str, at: Position) -> Self {
        self.creatures.push((kind.to_string(), at));
        self
    }

    pub fn with_creatures(mut self, kind: &str, count: usize) -> Self {
        for i in 0..count {
            self.creatures
                .push((kind.to_string(), Position::new(i as f64 * 100.0, 0.0, 0.0)));
        }
        self
    }

    pub fn with_player(mut self, at: Position) -> Self {
        self.players.push(at);
        self
    }

    pub fn with_max_entities(mut self, limit: usize) -> Self {
        self.max_entities = Some(limit);
        self
    }

    /// Builds the world and system. Creatures are added to the world but no
    /// tick has run yet; the returned entities are in the order they were
    /// declared.
    pub fn build(self) -> (World, TrapSystem, Vec<hecs::Entity>) {
        self.config.validate().expect("Invalid config in test builder");
        let kinds = Arc::new(self.kinds);
        let catalog = Arc::new(TrapCatalog::resolve(&self.config, &kinds));
        let mut world =
            World::with_registries(self.seed, kinds, Arc::new(EffectRegistry::standard()));

        let mut creatures = Vec::with_capacity(self.creatures.len());
        for (kind, at) in self.creatures {
            let id = ResourceId::parse(&kind).expect("Invalid kind in test builder");
            let entity = world
                .spawn_creature(&id, at)
                .expect("Failed to spawn creature in test builder");
            world
                .add_to_world(entity)
                .expect("Failed to add creature in test builder");
            creatures.push(entity);
        }
        for at in self.players {
            world.spawn_player(at);
        }
        if let Some(limit) = self.max_entities {
            world.max_entities = limit;
        }
        (world, TrapSystem::new(catalog), creatures)
    }
}

/// A certain trap: always tags, no effects.
#[allow(dead_code)]
pub fn certain_trap(
    source: &str,
    spawn: &str,
    passenger: &str,
    invert_riding: bool,
    spawn_num: u32,
) -> TrapDefinition {
    TrapDefinition::new(source, spawn, passenger, true, invert_riding, 1.0, spawn_num, 0)
}

#[allow(dead_code)]
pub fn kind(path: &str) -> ResourceId {
    ResourceId::base(path).expect("Invalid kind")
}
