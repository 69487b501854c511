//! Trap payload.
//!
//! Runs once per source when its trigger fires: a lightning cue, the source
//! passenger, then a scattered batch of creatures with their own riders.
//! Every step is best effort. A failing step is logged, counted and skipped;
//! only a missing lightning cue aborts the payload.

use crate::catalog::{ResolvedTrap, TrapCatalog};
use crate::effects::{self, EffectSettings};
use crate::scatter::{Scatter, SCATTER_BOUND};
use crate::world::{LevelError, World};
use rand::Rng;
use snare_data::{Position, ResourceId, StatusEffect, TrapTag};

/// One creature of the spawned batch and the rider mounted on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchMember {
    pub entity: hecs::Entity,
    pub rider: Option<hecs::Entity>,
}

/// What a trigger produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriggerReport {
    pub cue: Option<hecs::Entity>,
    pub source_passenger: Option<hecs::Entity>,
    pub batch: Vec<BatchMember>,
    pub source_effects: Vec<StatusEffect>,
    pub failed_steps: usize,
    /// Set when the lightning cue could not be created and nothing else ran.
    pub aborted: bool,
}

/// Creates a pending creature tagged [`TrapTag::Spawned`], with `effect_budget`
/// spent on effects when non-zero.
pub fn create_trap_creature<R: Rng + ?Sized>(
    world: &mut World,
    kind: &ResourceId,
    at: Position,
    effect_budget: u32,
    settings: &EffectSettings,
    rng: &mut R,
) -> Result<hecs::Entity, LevelError> {
    let entity = world.spawn_creature(kind, at)?;
    if effect_budget > 0 {
        effects::apply(world, entity, effect_budget, settings, rng);
    }
    world.set_tag(entity, TrapTag::Spawned)?;
    Ok(entity)
}

fn skip(report: &mut TriggerReport, step: &'static str, err: &LevelError) {
    report.failed_steps += 1;
    tracing::debug!(step = step, error = %err, "Trap step skipped");
}

/// Runs the payload of `trap` around `source`.
pub fn trigger<R: Rng + ?Sized>(
    world: &mut World,
    catalog: &TrapCatalog,
    source: hecs::Entity,
    trap: &ResolvedTrap,
    rng: &mut R,
) -> TriggerReport {
    let mut report = TriggerReport::default();
    let settings = catalog.effect_settings();
    let Some(at) = world.position(source) else {
        skip(&mut report, "locate source", &LevelError::NoSuchEntity);
        report.aborted = true;
        return report;
    };

    match world.create_lightning(at) {
        Ok(cue) => match world.add_to_world(cue) {
            Ok(()) => report.cue = Some(cue),
            Err(err) => skip(&mut report, "add lightning", &err),
        },
        Err(err) => {
            skip(&mut report, "create lightning", &err);
            report.aborted = true;
            return report;
        }
    }

    if let Err(err) = world.set_tag(source, TrapTag::Spawned) {
        skip(&mut report, "retire source", &err);
    }
    report.source_effects = effects::apply(world, source, trap.effect_num, &settings, rng);

    if let (Some(kind), true) = (&trap.passenger, trap.passenger_on_source) {
        match create_trap_creature(world, kind, at, 0, &settings, rng) {
            Ok(passenger) => {
                report.source_passenger = Some(passenger);
                mount_source_passenger(world, source, passenger, trap.invert_riding, &mut report);
            }
            Err(err) => skip(&mut report, "create source passenger", &err),
        }
    }

    let (batch_spawn, batch_passenger) = if trap.invert_riding {
        (&trap.passenger, &trap.spawn)
    } else {
        (&trap.spawn, &trap.passenger)
    };
    let Some(batch_spawn) = batch_spawn else {
        return report;
    };

    let scatter = match Scatter::new(SCATTER_BOUND) {
        Ok(scatter) => Some(scatter),
        Err(err) => {
            report.failed_steps += 1;
            tracing::debug!(error = %err, "Scatter disabled");
            None
        }
    };

    for _ in 0..trap.spawn_num {
        let entity =
            match create_trap_creature(world, batch_spawn, at, trap.effect_num, &settings, rng) {
                Ok(entity) => entity,
                Err(err) => {
                    skip(&mut report, "create batch creature", &err);
                    continue;
                }
            };

        let mut rider = None;
        if let Some(kind) = batch_passenger {
            match create_trap_creature(world, kind, at, 0, &settings, rng) {
                Ok(passenger) => match world.start_riding(passenger, entity) {
                    Ok(()) => rider = Some(passenger),
                    Err(err) => skip(&mut report, "mount batch rider", &err),
                },
                Err(err) => skip(&mut report, "create batch rider", &err),
            }
        }

        if let Some(scatter) = &scatter {
            let (dx, dz) = scatter.sample(rng);
            if let Err(err) = world.push(entity, dx, 0.0, dz) {
                skip(&mut report, "scatter", &err);
            }
        }

        match world.add_to_world(entity) {
            Ok(()) => report.batch.push(BatchMember { entity, rider }),
            Err(err) => skip(&mut report, "add batch creature", &err),
        }
    }

    tracing::debug!(
        source = %world.name(source),
        batch = report.batch.len(),
        failed_steps = report.failed_steps,
        "Trap payload finished"
    );
    report
}

/// Normal riding puts the passenger on the source before it joins the world.
/// Inverted riding adds the passenger first and only then seats the source on
/// it; a failed add leaves the source unmounted.
fn mount_source_passenger(
    world: &mut World,
    source: hecs::Entity,
    passenger: hecs::Entity,
    inverted: bool,
    report: &mut TriggerReport,
) {
    if inverted {
        match world.add_to_world(passenger) {
            Ok(()) => {
                if let Err(err) = world.start_riding(source, passenger) {
                    skip(report, "mount source", &err);
                }
            }
            Err(err) => skip(report, "add source passenger", &err),
        }
    } else {
        if let Err(err) = world.start_riding(passenger, source) {
            skip(report, "mount source passenger", &err);
        }
        if let Err(err) = world.add_to_world(passenger) {
            skip(report, "add source passenger", &err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TrapConfig, TrapDefinition};
    use crate::registry::KindRegistry;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn catalog_with(definition: TrapDefinition) -> TrapCatalog {
        let config = TrapConfig {
            traps: vec![definition],
            ..Default::default()
        };
        TrapCatalog::resolve(&config, &KindRegistry::standard())
    }

    fn source(world: &mut World, path: &str) -> hecs::Entity {
        let e = world
            .spawn_creature(&ResourceId::base(path).unwrap(), Position::default())
            .unwrap();
        world.add_to_world(e).unwrap();
        world.set_tag(e, TrapTag::Source).unwrap();
        e
    }

    #[test]
    fn test_missing_spawn_only_runs_source_steps() {
        let catalog = catalog_with(TrapDefinition::new("cow", "", "zombie", true, false, 1.0, 4, 2));
        let mut world = World::new(8);
        let cow = source(&mut world, "cow");
        let trap = catalog.traps()[0].clone();
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        let report = trigger(&mut world, &catalog, cow, &trap, &mut rng);
        assert!(report.cue.is_some());
        assert!(report.batch.is_empty());
        assert_eq!(world.tag(cow), Some(TrapTag::Spawned));
        let zombie = report.source_passenger.unwrap();
        assert_eq!(world.vehicle(zombie), Some(cow));
        assert_eq!(world.tag(zombie), Some(TrapTag::Spawned));
        assert!(!report.source_effects.is_empty());
    }

    #[test]
    fn test_passenger_off_source_is_not_created() {
        let catalog =
            catalog_with(TrapDefinition::new("cow", "cow", "zombie", false, false, 1.0, 1, 0));
        let mut world = World::new(8);
        let cow = source(&mut world, "cow");
        let trap = catalog.traps()[0].clone();
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        let report = trigger(&mut world, &catalog, cow, &trap, &mut rng);
        assert_eq!(report.source_passenger, None);
        assert!(world.passengers(cow).is_empty());
        assert_eq!(report.batch.len(), 1);
        assert!(report.batch[0].rider.is_some());
    }

    #[test]
    fn test_batch_entities_carry_full_effect_budget() {
        let catalog = catalog_with(TrapDefinition::new("cow", "cow", "", true, false, 1.0, 2, 3));
        let mut world = World::new(21);
        let cow = source(&mut world, "cow");
        let trap = catalog.traps()[0].clone();
        let mut rng = ChaCha8Rng::seed_from_u64(21);

        let report = trigger(&mut world, &catalog, cow, &trap, &mut rng);
        for member in &report.batch {
            let spent: u32 = world
                .effects_of(member.entity)
                .iter()
                .map(|s| s.amplifier + 1)
                .sum();
            assert_eq!(spent, 3);
            assert_eq!(member.rider, None);
        }
    }

    #[test]
    fn test_batch_is_scattered_horizontally() {
        let catalog = catalog_with(TrapDefinition::new("cow", "cow", "", true, false, 1.0, 5, 0));
        let mut world = World::new(2);
        let cow = source(&mut world, "cow");
        let trap = catalog.traps()[0].clone();
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let report = trigger(&mut world, &catalog, cow, &trap, &mut rng);
        assert_eq!(report.batch.len(), 5);
        for member in &report.batch {
            let v = world.velocity(member.entity).unwrap();
            assert_eq!(v.vy, 0.0);
            assert!(v.vx.abs() <= SCATTER_BOUND && v.vz.abs() <= SCATTER_BOUND);
        }
    }

    #[test]
    fn test_entity_cap_skips_batch_members() {
        let catalog = catalog_with(TrapDefinition::new("cow", "cow", "", true, false, 1.0, 4, 0));
        let mut world = World::new(2);
        let cow = source(&mut world, "cow");
        // Room for two batch cows; the cue does not count.
        world.max_entities = 3;
        let trap = catalog.traps()[0].clone();
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let report = trigger(&mut world, &catalog, cow, &trap, &mut rng);
        assert_eq!(report.batch.len(), 2);
        assert_eq!(report.failed_steps, 2);
        assert_eq!(world.discard_pending(), 2);
    }
}
