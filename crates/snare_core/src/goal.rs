//! Per-entity goals.
//!
//! A goal is behavior attached to one entity and polled once per tick. When
//! `can_use` holds the scheduler detaches the goal and hands it to `start`;
//! the goal only stays attached if `start` gives it back.

use crate::catalog::TrapCatalog;
use crate::metrics::TrapMetrics;
use crate::world::{LevelError, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoalKind {
    TrapTrigger,
}

/// Read-only state shared by every goal during one tick.
pub struct TickContext<'a> {
    pub catalog: &'a TrapCatalog,
    pub metrics: &'a TrapMetrics,
}

pub trait Goal: Send + Sync {
    fn kind(&self) -> GoalKind;

    /// Whether the goal wants to run this tick. Must not mutate anything.
    fn can_use(&self, world: &World, ctx: &TickContext) -> bool;

    /// Runs the goal. It has already been detached from its owner; returning
    /// `Some` re-attaches it.
    fn start(self: Box<Self>, world: &mut World, ctx: &TickContext) -> Option<Box<dyn Goal>>;
}

/// Goals attached to an entity, in attach order.
#[derive(Default)]
pub struct GoalSelector {
    goals: Vec<Box<dyn Goal>>,
}

impl GoalSelector {
    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn contains(&self, kind: GoalKind) -> bool {
        self.goals.iter().any(|g| g.kind() == kind)
    }
}

impl World {
    pub fn attach_goal(
        &mut self,
        entity: hecs::Entity,
        goal: Box<dyn Goal>,
    ) -> Result<(), LevelError> {
        self.ecs.get::<&mut GoalSelector>(entity)?.goals.push(goal);
        Ok(())
    }

    pub fn has_goal(&self, entity: hecs::Entity, kind: GoalKind) -> bool {
        self.ecs
            .get::<&GoalSelector>(entity)
            .map(|selector| selector.contains(kind))
            .unwrap_or(false)
    }

    pub fn goal_count(&self, entity: hecs::Entity) -> usize {
        self.ecs
            .get::<&GoalSelector>(entity)
            .map(|selector| selector.len())
            .unwrap_or(0)
    }
}

/// Polls every goal of every entity in the world once. Returns how many goals
/// were started.
pub fn tick_goals(world: &mut World, ctx: &TickContext) -> usize {
    let mut owners: Vec<hecs::Entity> = world
        .ecs
        .query::<&GoalSelector>()
        .iter()
        .filter(|(_, selector)| !selector.is_empty())
        .map(|(e, _)| e)
        .filter(|e| world.is_in_world(*e))
        .collect();
    owners.sort_by_key(|e| e.to_bits());

    let mut started = 0;
    for owner in owners {
        let goals = match world.ecs.get::<&mut GoalSelector>(owner) {
            Ok(mut selector) => std::mem::take(&mut selector.goals),
            Err(_) => continue,
        };

        let mut kept = Vec::with_capacity(goals.len());
        for goal in goals {
            if goal.can_use(world, ctx) {
                started += 1;
                if let Some(goal) = goal.start(world, ctx) {
                    kept.push(goal);
                }
            } else {
                kept.push(goal);
            }
        }

        if let Ok(mut selector) = world.ecs.get::<&mut GoalSelector>(owner) {
            // Goals attached while this owner was being polled go after the
            // ones it already had.
            let added = std::mem::take(&mut selector.goals);
            kept.extend(added);
            selector.goals = kept;
        }
    }
    started
}
