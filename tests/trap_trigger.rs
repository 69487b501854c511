mod common;
use common::{certain_trap, kind, WorldBuilder};
use snare_lib::model::catalog::TrapCatalog;
use snare_lib::model::config::TrapConfig;
use snare_lib::model::goal::GoalKind;
use snare_lib::model::registry::{KindInfo, MobCategory, LIGHTNING_BOLT};
use snare_lib::model::state::{Position, TrapTag};
use snare_lib::model::world::LIGHTNING_TICKS;
use std::sync::Arc;

fn near() -> Position {
    Position::new(2.0, 0.0, 0.0)
}

#[test]
fn test_trap_waits_for_player_in_range() {
    let (mut world, system, creatures) = WorldBuilder::new()
        .with_trap(certain_trap("horse", "cow", "zombie", false, 2))
        .with_creature("horse", Position::default())
        .with_player(Position::new(10.0, 0.0, 0.0))
        .build();
    let horse = creatures[0];

    // Exactly at the activation range does not count.
    for _ in 0..5 {
        system.tick(&mut world);
    }
    assert_tag!(world, horse, TrapTag::Source);
    assert_eq!(system.metrics().triggers(), 0);

    world.spawn_player(Position::new(0.0, 0.0, 9.9));
    system.tick(&mut world);
    assert_tag!(world, horse, TrapTag::Spawned);
    assert_eq!(system.metrics().triggers(), 1);
}

#[test]
fn test_trigger_runs_exactly_once() {
    let (mut world, system, creatures) = WorldBuilder::new()
        .with_trap(certain_trap("horse", "cow", "zombie", false, 2))
        .with_creature("horse", Position::default())
        .with_player(near())
        .build();
    let horse = creatures[0];

    system.tick(&mut world);
    let population = world.population();
    assert!(!world.has_goal(horse, GoalKind::TrapTrigger));
    for _ in 0..9 {
        system.tick(&mut world);
    }
    assert_eq!(system.metrics().triggers(), 1);
    assert_eq!(world.population(), population);
}

#[test]
fn test_spread_batch() {
    let (mut world, system, creatures) = WorldBuilder::new()
        .with_seed(9)
        .with_trap(certain_trap("horse", "cow", "zombie", false, 2))
        .with_creature("horse", Position::default())
        .with_player(near())
        .build();
    let horse = creatures[0];
    system.tick(&mut world);

    assert_eq!(world.cosmetics().len(), 1);
    assert_tag!(world, horse, TrapTag::Spawned);

    let riders = world.passengers(horse);
    assert_eq!(riders.len(), 1);
    assert_eq!(world.creature_kind(riders[0]), Some(kind("zombie")));
    assert_tag!(world, riders[0], TrapTag::Spawned);

    let cows = world.creatures_of(&kind("cow"));
    assert_kind_count!(world, kind("cow"), 2);
    for cow in cows {
        assert_tag!(world, cow, TrapTag::Spawned);
        let rider = world.passengers(cow);
        assert_eq!(rider.len(), 1);
        assert_eq!(world.creature_kind(rider[0]), Some(kind("zombie")));
        assert_riding!(world, rider[0], cow);
        assert_tag!(world, rider[0], TrapTag::Spawned);
    }
    assert_kind_count!(world, kind("zombie"), 3);
}

#[test]
fn test_role_inversion() {
    let (mut world, system, creatures) = WorldBuilder::new()
        .with_seed(9)
        .with_trap(certain_trap("horse", "cow", "zombie", true, 2))
        .with_creature("horse", Position::default())
        .with_player(near())
        .build();
    let horse = creatures[0];
    system.tick(&mut world);

    let mount = world.vehicle(horse).expect("source rides its passenger");
    assert_eq!(world.creature_kind(mount), Some(kind("zombie")));
    assert_riding!(world, horse, mount);
    assert_tag!(world, mount, TrapTag::Spawned);

    let batch: Vec<_> = world
        .creatures_of(&kind("zombie"))
        .into_iter()
        .filter(|&z| z != mount)
        .collect();
    assert_eq!(batch.len(), 2);
    for zombie in batch {
        let rider = world.passengers(zombie);
        assert_eq!(rider.len(), 1);
        assert_eq!(world.creature_kind(rider[0]), Some(kind("cow")));
        assert_tag!(world, rider[0], TrapTag::Spawned);
    }
    assert_kind_count!(world, kind("cow"), 2);
}

#[test]
fn test_failed_inverted_add_leaves_source_unmounted() {
    // Room for the source only, so the inverted passenger cannot join.
    let (mut world, system, creatures) = WorldBuilder::new()
        .with_trap(certain_trap("horse", "cow", "zombie", true, 2))
        .with_creature("horse", Position::default())
        .with_player(near())
        .with_max_entities(1)
        .build();
    let horse = creatures[0];
    system.tick(&mut world);

    assert_eq!(world.vehicle(horse), None);
    assert_tag!(world, horse, TrapTag::Spawned);
    assert_kind_count!(world, kind("zombie"), 0);
    assert_eq!(world.cosmetics().len(), 1);
    assert_eq!(world.population(), 1);
    assert_eq!(system.metrics().failed_steps(), 3);
}

#[test]
fn test_lightning_failure_aborts_payload() {
    let (mut world, system, creatures) = WorldBuilder::new()
        .with_kinds(|kinds| {
            kinds.register(KindInfo {
                id: kind(LIGHTNING_BOLT),
                category: MobCategory::Misc,
                summonable: false,
                max_passengers: 0,
            })
        })
        .with_trap(certain_trap("horse", "cow", "zombie", false, 2))
        .with_creature("horse", Position::default())
        .with_player(near())
        .build();
    let horse = creatures[0];
    for _ in 0..5 {
        system.tick(&mut world);
    }

    assert_tag!(world, horse, TrapTag::Source);
    assert!(!world.has_goal(horse, GoalKind::TrapTrigger));
    assert!(world.cosmetics().is_empty());
    assert!(world.passengers(horse).is_empty());
    assert_kind_count!(world, kind("cow"), 0);
    assert_eq!(world.population(), 1);
}

#[test]
fn test_entity_cap_limits_batch() {
    let (mut world, system, _) = WorldBuilder::new()
        .with_trap(certain_trap("horse", "cow", "", false, 10))
        .with_creature("horse", Position::default())
        .with_player(near())
        .with_max_entities(5)
        .build();
    let summary = system.tick(&mut world);

    assert_eq!(world.population(), 5);
    assert_kind_count!(world, kind("cow"), 4);
    assert_eq!(system.metrics().batch_spawned(), 4);
    assert_eq!(system.metrics().failed_steps(), 6);
    assert_eq!(summary.discarded, 6);
}

#[test]
fn test_lightning_cue_expires_and_leaves_cap_alone() {
    let far = Position::new(1000.0, 0.0, 0.0);
    let (mut world, system, creatures) = WorldBuilder::new()
        .with_trap(certain_trap("horse", "cow", "", false, 2))
        .with_creature("horse", Position::default())
        .with_creature("horse", far)
        .with_player(near())
        .with_max_entities(6)
        .build();
    system.tick(&mut world);
    assert_tag!(world, creatures[0], TrapTag::Spawned);
    assert_tag!(world, creatures[1], TrapTag::Source);
    assert_eq!(world.cosmetics().len(), 1);

    world.spawn_player(Position::new(1001.0, 0.0, 0.0));
    system.tick(&mut world);
    assert_tag!(world, creatures[1], TrapTag::Spawned);
    assert_eq!(world.cosmetics().len(), 2);
    assert_kind_count!(world, kind("cow"), 4);
    assert_eq!(system.metrics().failed_steps(), 0);

    let mut expired = 0;
    for _ in 0..LIGHTNING_TICKS {
        expired += system.tick(&mut world).expired;
    }
    assert_eq!(expired, 2);
    assert!(world.cosmetics().is_empty());
    assert_eq!(world.population(), 6);
}

#[test]
fn test_removed_trap_consumes_goal_without_payload() {
    let (mut world, mut system, creatures) = WorldBuilder::new()
        .with_trap(certain_trap("horse", "cow", "zombie", false, 2))
        .with_creature("horse", Position::default())
        .build();
    let horse = creatures[0];
    system.tick(&mut world);
    assert_tag!(world, horse, TrapTag::Source);

    let config = TrapConfig {
        traps: vec![certain_trap("pig", "cow", "", false, 2)],
        ..Default::default()
    };
    system.replace_catalog(Arc::new(TrapCatalog::resolve(&config, world.kinds())));
    world.spawn_player(near());
    system.tick(&mut world);

    assert!(!world.has_goal(horse, GoalKind::TrapTrigger));
    assert_tag!(world, horse, TrapTag::Source);
    assert!(world.cosmetics().is_empty());
    assert_eq!(world.population(), 1);
    assert_eq!(system.metrics().triggers(), 0);
}

#[test]
fn test_disabled_then_reenabled_source_never_fires() {
    let (mut world, mut system, creatures) = WorldBuilder::new()
        .with_trap(certain_trap("horse", "cow", "zombie", false, 2))
        .with_creature("horse", Position::default())
        .build();
    let horse = creatures[0];
    system.tick(&mut world);
    let enabled = system.catalog().clone();

    let mut disabled = TrapCatalog::clone(&enabled);
    disabled.options.enabled = false;
    system.replace_catalog(Arc::new(disabled));
    world.spawn_player(near());
    system.tick(&mut world);
    assert!(!world.has_goal(horse, GoalKind::TrapTrigger));

    system.replace_catalog(enabled);
    for _ in 0..5 {
        system.tick(&mut world);
    }
    assert_tag!(world, horse, TrapTag::Source);
    assert_eq!(system.metrics().triggers(), 0);
    assert_eq!(world.population(), 1);
}

#[test]
fn test_batch_stays_on_ground_and_spreads() {
    let (mut world, system, _) = WorldBuilder::new()
        .with_seed(5)
        .with_trap(certain_trap("horse", "cow", "", false, 8))
        .with_creature("horse", Position::default())
        .with_player(near())
        .build();
    system.tick(&mut world);
    for _ in 0..20 {
        world.step_motion();
    }

    let cows = world.creatures_of(&kind("cow"));
    assert_eq!(cows.len(), 8);
    let spread = cows
        .iter()
        .filter_map(|&c| world.position(c))
        .filter(|p| p.x != 0.0 || p.z != 0.0)
        .count();
    assert_eq!(spread, 8);
    for cow in cows {
        assert_eq!(world.position(cow).map(|p| p.y), Some(0.0));
    }
}
