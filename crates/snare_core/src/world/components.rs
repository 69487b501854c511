use rand_chacha::ChaCha8Rng;

/// Whether an entity has been added to the world yet.
///
/// Freshly created entities start `Pending`: they exist in the ECS so they can
/// be configured and mounted, but proximity queries and goal ticking ignore
/// them. Anything still pending at the end of a tick is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Pending,
    Added,
}

impl Presence {
    pub fn is_added(self) -> bool {
        matches!(self, Presence::Added)
    }
}

/// The vehicle this entity rides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Riding {
    pub vehicle: hecs::Entity,
}

/// Entities riding this one, in mount order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Passengers(pub Vec<hecs::Entity>);

/// Per-entity random source, seeded from the world seed and the entity id.
#[derive(Debug, Clone)]
pub struct EntityRng(pub ChaCha8Rng);
