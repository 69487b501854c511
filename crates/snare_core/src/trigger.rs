use crate::goal::{Goal, GoalKind, TickContext};
use crate::registry::GLOWING;
use crate::spawn;
use crate::world::World;
use snare_data::ResourceId;

/// Fires a trap once a player comes close enough to its source.
///
/// Attached to the source by the tagger. The first `start` consumes the goal,
/// so a source triggers at most once no matter how the payload turns out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrapTriggerGoal {
    owner: hecs::Entity,
}

impl TrapTriggerGoal {
    pub fn new(owner: hecs::Entity) -> Self {
        Self { owner }
    }
}

impl Goal for TrapTriggerGoal {
    fn kind(&self) -> GoalKind {
        GoalKind::TrapTrigger
    }

    fn can_use(&self, world: &World, ctx: &TickContext) -> bool {
        let Some(at) = world.position(self.owner) else {
            return false;
        };
        world.has_nearby_alive_player(at, f64::from(ctx.catalog.options.activation_range))
    }

    fn start(self: Box<Self>, world: &mut World, ctx: &TickContext) -> Option<Box<dyn Goal>> {
        let owner = self.owner;
        let options = &ctx.catalog.options;

        if options.debug_mode {
            if let Some(glowing) = ResourceId::base(GLOWING) {
                world.remove_effect(owner, &glowing);
            }
            tracing::info!(
                entity = %world.name(owner),
                position = ?world.position(owner),
                "Trap triggered"
            );
        }
        if !options.enabled {
            return None;
        }

        let trap = world
            .creature_kind(owner)
            .and_then(|kind| ctx.catalog.find_by_kind(&kind))?;
        let mut rng = world.entity_rng(owner);
        let report = spawn::trigger(world, ctx.catalog, owner, trap, &mut rng);
        world.store_rng(owner, rng);
        ctx.metrics
            .record_trigger(report.batch.len(), report.failed_steps);
        None
    }
}
