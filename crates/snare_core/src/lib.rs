//! # Snare Core
//!
//! Trap mechanics for a tick-driven creature world.
//!
//! A creature that enters the world may quietly become a *trap source*. Once a
//! living player comes within range, the source fires exactly once: a lightning
//! cue strikes, the source is buffed, and a scattered batch of extra creatures
//! (optionally mounted, optionally buffed) appears around it.
//!
//! This crate contains:
//! - Trap configuration and the resolved, read-only trap catalog
//! - Kind and effect registries used to resolve configured ids
//! - A `hecs`-backed world providing the entity primitives traps rely on
//! - The tagging pass, the trigger goal, the spawn sequence and the effect allocator
//! - The per-tick driver tying them together, plus metrics and logging setup
//!
//! ## Example
//!
//! ```
//! use snare_core::catalog::TrapCatalog;
//! use snare_core::config::TrapConfig;
//! use snare_core::registry::KindRegistry;
//! use snare_core::system::TrapSystem;
//! use snare_core::world::World;
//! use snare_data::{Position, ResourceId};
//! use std::sync::Arc;
//!
//! let mut config = TrapConfig::default();
//! config.traps[0].chance = 1.0;
//! let catalog = Arc::new(TrapCatalog::resolve(&config, &KindRegistry::standard()));
//!
//! let mut world = World::new(42);
//! let system = TrapSystem::new(catalog);
//!
//! let pig = world
//!     .spawn_creature(&ResourceId::base("pig").unwrap(), Position::default())
//!     .unwrap();
//! world.add_to_world(pig).unwrap();
//! world.spawn_player(Position::new(3.0, 0.0, 0.0));
//!
//! system.tick(&mut world);
//! assert_eq!(system.metrics().triggers(), 1);
//! ```

/// Resolved, read-only trap catalog snapshot
pub mod catalog;
/// Trap configuration file model and validation
pub mod config;
/// Budgeted random status-effect allocation
pub mod effects;
/// Per-entity goals and the goal scheduler
pub mod goal;
/// Counters and logging setup
pub mod metrics;
/// Creature kind and status effect registries
pub mod registry;
/// Horizontal scatter impulse sampling
pub mod scatter;
/// The trigger payload: cue, mounts, spread batch
pub mod spawn;
/// Per-tick driver for tagging and goals
pub mod system;
/// Trap source tagging on entity introduction
pub mod tagging;
/// The proximity-gated, one-shot trigger goal
pub mod trigger;
/// ECS world substrate
pub mod world;

pub use catalog::{ResolvedTrap, TrapCatalog};
pub use config::{TrapConfig, TrapDefinition, TrapOptions};
pub use metrics::{init_logging, TrapMetrics};
pub use spawn::TriggerReport;
pub use system::{TickSummary, TrapSystem};
pub use tagging::TagOutcome;
pub use world::{LevelError, World};
