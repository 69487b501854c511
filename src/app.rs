//! Headless trap runner.
//!
//! Scatters creatures around the origin, walks a single player through them
//! and lets the trap system run. The config file is watched and reloaded
//! between ticks when it changes on disk.

use anyhow::Result;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use crate::model::registry::KindRegistry;
use crate::model::state::{Position, ResourceId, TrapTag};
use crate::model::store::ConfigStore;
use crate::model::{TrapSystem, World};

/// Half the side of the square creatures are scattered over.
const FIELD_RADIUS: f64 = 64.0;
/// Ticks between config file checks.
const RELOAD_CHECK_INTERVAL: u64 = 100;
/// Kinds mixed into the population besides configured trap sources.
const FILLER_KINDS: [&str; 3] = ["cow", "sheep", "chicken"];

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config: PathBuf,
    pub ticks: u64,
    pub seed: u64,
    pub creatures: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            config: PathBuf::from(snare_io::DEFAULT_CONFIG_FILE),
            ticks: 1200,
            seed: 42,
            creatures: 200,
        }
    }
}

/// Outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub ticks: u64,
    pub creatures: usize,
    pub population: usize,
    pub sources_tagged: u64,
    pub sources_remaining: usize,
    pub triggers: u64,
    pub batch_spawned: u64,
    pub failed_steps: u64,
    pub reloads: u32,
    pub catalog_fingerprint: String,
}

pub struct App {
    pub world: World,
    pub system: TrapSystem,
    pub store: ConfigStore,
    pub kinds: Arc<KindRegistry>,
    pub player: hecs::Entity,
    pub options: RunOptions,
    config_last_modified: Option<SystemTime>,
    reloads: u32,
}

impl App {
    pub fn new(options: RunOptions) -> Result<Self> {
        let store = ConfigStore::new(&options.config);
        let kinds = Arc::new(KindRegistry::standard());
        let catalog = store.load_catalog(&kinds);
        let mut world = World::with_registries(
            options.seed,
            kinds.clone(),
            Arc::new(crate::model::registry::EffectRegistry::standard()),
        );

        let mut sources: Vec<ResourceId> = catalog.traps().iter().map(|t| t.source.clone()).collect();
        sources.extend(FILLER_KINDS.iter().filter_map(|k| ResourceId::base(k)));
        let creatures = options.creatures.min(world.max_entities);
        if creatures < options.creatures {
            tracing::warn!(
                requested = options.creatures,
                max_entities = world.max_entities,
                "Creature count clamped to the entity cap"
            );
        }
        let mut rng = ChaCha8Rng::seed_from_u64(options.seed ^ 0x5EED);
        for _ in 0..creatures {
            let Some(kind) = sources.choose(&mut rng) else {
                break;
            };
            let at = Position::new(
                rng.gen_range(-FIELD_RADIUS..FIELD_RADIUS),
                0.0,
                rng.gen_range(-FIELD_RADIUS..FIELD_RADIUS),
            );
            let entity = world.spawn_creature(kind, at)?;
            world.add_to_world(entity)?;
        }
        let player = world.spawn_player(Position::new(-FIELD_RADIUS, 0.0, 0.0));

        tracing::info!(
            seed = options.seed,
            creatures = creatures,
            traps = catalog.traps().len(),
            fingerprint = %catalog.fingerprint(),
            "Runner ready"
        );

        Ok(Self {
            world,
            system: TrapSystem::new(catalog),
            config_last_modified: modified_at(&store),
            store,
            kinds,
            player,
            options,
            reloads: 0,
        })
    }

    /// Player position at `tick`: a zig-zag sweep across the field.
    fn player_position(&self, tick: u64) -> Position {
        let lanes = 8u64;
        let lane_len = 400u64;
        let lane = (tick / lane_len) % lanes;
        let progress = (tick % lane_len) as f64 / lane_len as f64;
        let x = if lane % 2 == 0 {
            -FIELD_RADIUS + progress * 2.0 * FIELD_RADIUS
        } else {
            FIELD_RADIUS - progress * 2.0 * FIELD_RADIUS
        };
        let z = -FIELD_RADIUS + (lane as f64 + 0.5) * (2.0 * FIELD_RADIUS / lanes as f64);
        Position::new(x, 0.0, z)
    }

    fn check_reload(&mut self) {
        let modified = modified_at(&self.store);
        if modified.is_some() && modified != self.config_last_modified {
            self.config_last_modified = modified;
            self.store.reload(&mut self.system, &self.kinds);
            self.reloads += 1;
        }
    }

    pub fn step(&mut self) -> Result<()> {
        if self.world.tick > 0 && self.world.tick % RELOAD_CHECK_INTERVAL == 0 {
            self.check_reload();
        }
        let at = self.player_position(self.world.tick);
        self.world.set_position(self.player, at)?;
        self.world.step_motion();
        self.system.tick(&mut self.world);
        Ok(())
    }

    pub fn run(&mut self) -> Result<RunSummary> {
        for _ in 0..self.options.ticks {
            self.step()?;
        }
        Ok(self.summary())
    }

    pub fn summary(&self) -> RunSummary {
        let metrics = self.system.metrics();
        let sources_remaining = self
            .world
            .ecs
            .query::<&TrapTag>()
            .iter()
            .filter(|(_, tag)| tag.is_source())
            .count();
        RunSummary {
            seed: self.options.seed,
            ticks: self.world.tick,
            creatures: self.options.creatures,
            population: self.world.population(),
            sources_tagged: metrics.sources_tagged(),
            sources_remaining,
            triggers: metrics.triggers(),
            batch_spawned: metrics.batch_spawned(),
            failed_steps: metrics.failed_steps(),
            reloads: self.reloads,
            catalog_fingerprint: self.system.catalog().fingerprint().to_string(),
        }
    }
}

fn modified_at(store: &ConfigStore) -> Option<SystemTime> {
    std::fs::metadata(store.path())
        .and_then(|meta| meta.modified())
        .ok()
}
