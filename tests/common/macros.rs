/// Asserts the trap tag of an entity.
#[macro_export]
macro_rules! assert_tag {
    ($world:expr, $entity:expr, $tag:expr) => {
        assert_eq!(
            $world.tag($entity),
            Some($tag),
            "Entity {} has the wrong trap tag",
            $world.name($entity)
        );
    };
}

/// Asserts that `rider` is mounted on `vehicle`.
#[macro_export]
macro_rules! assert_riding {
    ($world:expr, $rider:expr, $vehicle:expr) => {
        assert_eq!(
            $world.vehicle($rider),
            Some($vehicle),
            "{} should ride {}",
            $world.name($rider),
            $world.name($vehicle)
        );
        assert!(
            $world.passengers($vehicle).contains(&$rider),
            "{} should list {} as passenger",
            $world.name($vehicle),
            $world.name($rider)
        );
    };
}

/// Asserts how many creatures of a kind are in the world.
#[macro_export]
macro_rules! assert_kind_count {
    ($world:expr, $kind:expr, $count:expr) => {
        assert_eq!(
            $world.creatures_of(&$kind).len(),
            $count,
            "Creature count mismatch for {}",
            $kind
        );
    };
}
