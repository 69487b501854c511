mod common;
use common::{certain_trap, WorldBuilder};
use snare_lib::model::state::{Identity, Position, StatusEffect, TrapTag, Velocity};
use snare_lib::model::{TrapSystem, World};

type Snapshot = Vec<(String, Position, Velocity, TrapTag, Vec<StatusEffect>)>;

fn run(seed: u64) -> (World, TrapSystem) {
    let (mut world, system, _) = WorldBuilder::new()
        .with_seed(seed)
        .with_config(|c| {
            c.traps.push(certain_trap("cow", "zombie", "skeleton", true, 4));
            c.traps[0].chance = 0.5;
            c.traps[0].effect_num = 6;
        })
        .with_creatures("pig", 20)
        .with_creatures("cow", 5)
        .with_player(Position::default())
        .build();
    for tick in 0..300 {
        let at = Position::new(tick as f64 * 10.0, 0.0, 0.0);
        world.spawn_player(at);
        world.step_motion();
        system.tick(&mut world);
    }
    (world, system)
}

fn snapshot(world: &World) -> Snapshot {
    let mut out: Snapshot = world
        .ecs
        .query::<(&Identity, &Position, &Velocity, &TrapTag)>()
        .iter()
        .map(|(e, (id, pos, vel, tag))| (id.name.clone(), *pos, *vel, *tag, world.effects_of(e)))
        .collect();
    out.sort_by(|a, b| a.0.cmp(&b.0));
    out
}

#[test]
fn test_same_seed_same_outcome() {
    let (world1, system1) = run(12345);
    let (world2, system2) = run(12345);

    assert!(system1.metrics().triggers() > 0, "scenario should trigger traps");
    assert_eq!(system1.metrics().triggers(), system2.metrics().triggers());
    assert_eq!(
        system1.metrics().batch_spawned(),
        system2.metrics().batch_spawned()
    );
    assert_eq!(snapshot(&world1), snapshot(&world2));
}

#[test]
fn test_different_seed_different_outcome() {
    let (world1, _) = run(1);
    let (world2, _) = run(2);
    assert_ne!(snapshot(&world1), snapshot(&world2));
}
