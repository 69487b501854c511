//! The entity world traps live in.
//!
//! A thin layer over `hecs::World` that provides the primitives the trap
//! code needs: creating creatures and effects, adding them to the world,
//! mounting, status effects, impulses, tags and player proximity. Every
//! mutating primitive returns a [`LevelError`] on failure instead of
//! panicking, and entity creation is capped by `max_entities`.

use crate::goal::GoalSelector;
use crate::registry::{EffectRegistry, KindRegistry, LIGHTNING_BOLT};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use snare_data::{
    ActiveEffects, Cosmetic, CosmeticKind, Creature, Identity, Player, Position, ResourceId,
    StatusEffect, TrapTag, Velocity,
};
use std::sync::Arc;
use uuid::Uuid;

pub mod components;
pub mod error;
pub mod mount;

pub use components::{EntityRng, Passengers, Presence, Riding};
pub use error::LevelError;

pub const TICKS_PER_SECOND: u32 = 20;
pub const DEFAULT_MAX_ENTITIES: usize = 4096;
/// How long a lightning cue stays in the world.
pub const LIGHTNING_TICKS: u32 = 20;
/// Horizontal velocity kept per tick.
pub const GROUND_FRICTION: f64 = 0.91;

/// An entity entering the world. `existing` is set when the entity was
/// already alive somewhere else and is only joining this world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Introduction {
    pub entity: hecs::Entity,
    pub existing: bool,
}

pub struct World {
    pub ecs: hecs::World,
    pub tick: u64,
    pub seed: u64,
    /// Cap on non-player entities in the world.
    pub max_entities: usize,
    kinds: Arc<KindRegistry>,
    effects: Arc<EffectRegistry>,
    rng: ChaCha8Rng,
    introductions: Vec<Introduction>,
}

impl World {
    pub fn new(seed: u64) -> Self {
        Self::with_registries(
            seed,
            Arc::new(KindRegistry::standard()),
            Arc::new(EffectRegistry::standard()),
        )
    }

    pub fn with_registries(
        seed: u64,
        kinds: Arc<KindRegistry>,
        effects: Arc<EffectRegistry>,
    ) -> Self {
        Self {
            ecs: hecs::World::new(),
            tick: 0,
            seed,
            max_entities: DEFAULT_MAX_ENTITIES,
            kinds,
            effects,
            rng: ChaCha8Rng::seed_from_u64(seed),
            introductions: Vec::new(),
        }
    }

    pub fn kinds(&self) -> &KindRegistry {
        &self.kinds
    }

    pub fn effects(&self) -> &EffectRegistry {
        &self.effects
    }

    fn next_identity(&mut self, label: &str) -> (Identity, EntityRng) {
        let id = Uuid::from_u128(self.rng.gen::<u128>());
        let name = format!("{label}-{}", &id.simple().to_string()[..8]);
        let rng = EntityRng(derive_entity_rng(self.seed, &id));
        (Identity { id, name }, rng)
    }

    /// Creates a pending creature of `kind` at `at`.
    pub fn spawn_creature(
        &mut self,
        kind: &ResourceId,
        at: Position,
    ) -> Result<hecs::Entity, LevelError> {
        let info = self
            .kinds
            .get(kind)
            .ok_or_else(|| LevelError::UnknownKind(kind.clone()))?;
        if !info.summonable || !info.category.is_mob() {
            return Err(LevelError::NotSummonable(kind.clone()));
        }
        let (identity, rng) = self.next_identity(kind.path());
        Ok(self.ecs.spawn((
            identity,
            at,
            Velocity::default(),
            Creature { kind: kind.clone() },
            TrapTag::None,
            ActiveEffects::default(),
            GoalSelector::default(),
            Presence::Pending,
            rng,
        )))
    }

    /// Creates a pending, visual-only lightning strike at `at`.
    pub fn create_lightning(&mut self, at: Position) -> Result<hecs::Entity, LevelError> {
        let kind = ResourceId::base(LIGHTNING_BOLT).ok_or(LevelError::NoSuchEntity)?;
        match self.kinds.get(&kind) {
            Some(info) if info.summonable => {}
            Some(_) => return Err(LevelError::NotSummonable(kind)),
            None => return Err(LevelError::UnknownKind(kind)),
        }
        let (identity, _) = self.next_identity(kind.path());
        Ok(self.ecs.spawn((
            identity,
            at,
            Cosmetic {
                kind: CosmeticKind::Lightning,
                visual_only: true,
                ticks_left: LIGHTNING_TICKS,
            },
            Presence::Pending,
        )))
    }

    /// Spawns a living player directly into the world. Players do not count
    /// towards the entity cap.
    pub fn spawn_player(&mut self, at: Position) -> hecs::Entity {
        let (identity, _) = self.next_identity("player");
        let entity = self.ecs.spawn((
            identity,
            at,
            Velocity::default(),
            Player::default(),
            Presence::Added,
        ));
        self.introductions.push(Introduction {
            entity,
            existing: false,
        });
        entity
    }

    /// Adds a pending entity, together with its pending passengers, to the
    /// world and queues an introduction for each of them.
    pub fn add_to_world(&mut self, entity: hecs::Entity) -> Result<(), LevelError> {
        if self.ecs.get::<&Presence>(entity)?.is_added() {
            return Err(LevelError::AlreadyInWorld);
        }

        let joining: Vec<hecs::Entity> = self
            .with_passengers(entity)
            .into_iter()
            .filter(|e| matches!(self.presence(*e), Some(Presence::Pending)))
            .collect();
        let counted = joining.iter().filter(|e| self.counts_towards_cap(**e)).count();
        if self.population() + counted > self.max_entities {
            return Err(LevelError::EntityCap {
                limit: self.max_entities,
            });
        }

        for e in joining {
            if let Ok(mut presence) = self.ecs.get::<&mut Presence>(e) {
                *presence = Presence::Added;
            }
            self.introductions.push(Introduction {
                entity: e,
                existing: false,
            });
        }
        Ok(())
    }

    /// An entity that already existed elsewhere joins this world.
    pub fn join_existing(&mut self, entity: hecs::Entity) -> Result<(), LevelError> {
        *self.ecs.get::<&mut Presence>(entity)? = Presence::Added;
        self.introductions.push(Introduction {
            entity,
            existing: true,
        });
        Ok(())
    }

    pub fn drain_introductions(&mut self) -> Vec<Introduction> {
        std::mem::take(&mut self.introductions)
    }

    /// Despawns everything that was created but never added. Returns how many
    /// entities were dropped.
    pub fn discard_pending(&mut self) -> usize {
        let pending: Vec<hecs::Entity> = self
            .ecs
            .query::<&Presence>()
            .iter()
            .filter(|(_, presence)| !presence.is_added())
            .map(|(e, _)| e)
            .collect();
        for &e in &pending {
            self.stop_riding(e);
            for passenger in self.passengers(e) {
                self.stop_riding(passenger);
            }
            let _ = self.ecs.despawn(e);
        }
        pending.len()
    }

    fn counts_towards_cap(&self, entity: hecs::Entity) -> bool {
        self.ecs.get::<&Player>(entity).is_err() && self.ecs.get::<&Cosmetic>(entity).is_err()
    }

    /// Entities in the world that count towards the cap: everything except
    /// players and cosmetic effects.
    pub fn population(&self) -> usize {
        self.ecs
            .query::<(&Presence, Option<&Player>, Option<&Cosmetic>)>()
            .iter()
            .filter(|(_, (presence, player, cosmetic))| {
                presence.is_added() && player.is_none() && cosmetic.is_none()
            })
            .count()
    }

    /// Counts down every cosmetic in the world and despawns the ones that ran
    /// out. Returns how many were removed.
    pub fn expire_cosmetics(&mut self) -> usize {
        let mut expired = Vec::new();
        for (e, (cosmetic, presence)) in self.ecs.query_mut::<(&mut Cosmetic, &Presence)>() {
            if !presence.is_added() {
                continue;
            }
            cosmetic.ticks_left = cosmetic.ticks_left.saturating_sub(1);
            if cosmetic.ticks_left == 0 {
                expired.push(e);
            }
        }
        for &e in &expired {
            let _ = self.ecs.despawn(e);
        }
        expired.len()
    }

    pub fn presence(&self, entity: hecs::Entity) -> Option<Presence> {
        self.ecs.get::<&Presence>(entity).ok().map(|p| *p)
    }

    pub fn is_in_world(&self, entity: hecs::Entity) -> bool {
        matches!(self.presence(entity), Some(Presence::Added))
    }

    pub fn position(&self, entity: hecs::Entity) -> Option<Position> {
        self.ecs.get::<&Position>(entity).ok().map(|p| *p)
    }

    pub fn set_position(&mut self, entity: hecs::Entity, at: Position) -> Result<(), LevelError> {
        *self.ecs.get::<&mut Position>(entity)? = at;
        Ok(())
    }

    pub fn velocity(&self, entity: hecs::Entity) -> Option<Velocity> {
        self.ecs.get::<&Velocity>(entity).ok().map(|v| *v)
    }

    /// Adds an instantaneous impulse to the entity's velocity.
    pub fn push(&mut self, entity: hecs::Entity, dx: f64, dy: f64, dz: f64) -> Result<(), LevelError> {
        self.ecs.get::<&mut Velocity>(entity)?.push(dx, dy, dz);
        Ok(())
    }

    pub fn name(&self, entity: hecs::Entity) -> String {
        self.ecs
            .get::<&Identity>(entity)
            .map(|identity| identity.name.clone())
            .unwrap_or_else(|_| format!("{entity:?}"))
    }

    /// Kind of a creature; `None` for players, effects and unknown entities.
    pub fn creature_kind(&self, entity: hecs::Entity) -> Option<ResourceId> {
        self.ecs
            .get::<&Creature>(entity)
            .ok()
            .map(|creature| creature.kind.clone())
    }

    pub fn tag(&self, entity: hecs::Entity) -> Option<TrapTag> {
        self.ecs.get::<&TrapTag>(entity).ok().map(|t| *t)
    }

    pub fn set_tag(&mut self, entity: hecs::Entity, tag: TrapTag) -> Result<(), LevelError> {
        *self.ecs.get::<&mut TrapTag>(entity)? = tag;
        Ok(())
    }

    /// Applies a status effect. Returns whether it took hold (a weaker copy of
    /// an effect already present is ignored).
    pub fn add_effect(
        &mut self,
        entity: hecs::Entity,
        effect: StatusEffect,
    ) -> Result<bool, LevelError> {
        Ok(self.ecs.get::<&mut ActiveEffects>(entity)?.add(effect))
    }

    pub fn remove_effect(&mut self, entity: hecs::Entity, effect: &ResourceId) -> bool {
        self.ecs
            .get::<&mut ActiveEffects>(entity)
            .map(|mut active| active.remove(effect).is_some())
            .unwrap_or(false)
    }

    pub fn has_effect(&self, entity: hecs::Entity, effect: &ResourceId) -> bool {
        self.ecs
            .get::<&ActiveEffects>(entity)
            .map(|active| active.contains(effect))
            .unwrap_or(false)
    }

    pub fn effects_of(&self, entity: hecs::Entity) -> Vec<StatusEffect> {
        self.ecs
            .get::<&ActiveEffects>(entity)
            .map(|active| active.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Whether a living, non-spectating player in the world is strictly
    /// closer than `range` to `at`.
    pub fn has_nearby_alive_player(&self, at: Position, range: f64) -> bool {
        let range_sq = range * range;
        self.ecs
            .query::<(&Position, &Player, &Presence)>()
            .iter()
            .any(|(_, (pos, player, presence))| {
                presence.is_added()
                    && player.alive
                    && !player.spectator
                    && pos.distance_sq(&at) < range_sq
            })
    }

    /// Copy of the entity's random source. Pair with [`World::store_rng`] to
    /// keep the entity's stream advancing.
    pub fn entity_rng(&self, entity: hecs::Entity) -> ChaCha8Rng {
        match self.ecs.get::<&EntityRng>(entity) {
            Ok(rng) => rng.0.clone(),
            Err(_) => ChaCha8Rng::seed_from_u64(self.seed ^ entity.to_bits().get()),
        }
    }

    pub fn store_rng(&mut self, entity: hecs::Entity, rng: ChaCha8Rng) {
        if let Ok(mut slot) = self.ecs.get::<&mut EntityRng>(entity) {
            slot.0 = rng;
        }
    }

    /// Creatures of `kind` currently in the world.
    pub fn creatures_of(&self, kind: &ResourceId) -> Vec<hecs::Entity> {
        let mut found: Vec<(u64, hecs::Entity)> = self
            .ecs
            .query::<(&Creature, &Presence)>()
            .iter()
            .filter(|(_, (creature, presence))| presence.is_added() && &creature.kind == kind)
            .map(|(e, _)| (e.to_bits().get(), e))
            .collect();
        found.sort_by_key(|(bits, _)| *bits);
        found.into_iter().map(|(_, e)| e).collect()
    }

    /// Cosmetic effect entities currently in the world.
    pub fn cosmetics(&self) -> Vec<hecs::Entity> {
        self.ecs
            .query::<(&Cosmetic, &Presence)>()
            .iter()
            .filter(|(_, (_, presence))| presence.is_added())
            .map(|(e, _)| e)
            .collect()
    }

    /// Moves every unmounted creature by its velocity and applies friction.
    /// Riders are carried to their vehicle's position. Vertical motion is
    /// dropped: creatures stay on the ground plane they were spawned on.
    pub fn step_motion(&mut self) {
        for (_, (pos, vel, presence, riding)) in self
            .ecs
            .query_mut::<(&mut Position, &mut Velocity, &Presence, Option<&Riding>)>()
        {
            if !presence.is_added() || riding.is_some() {
                continue;
            }
            pos.x += vel.vx;
            pos.z += vel.vz;
            vel.vx *= GROUND_FRICTION;
            vel.vz *= GROUND_FRICTION;
            vel.vy = 0.0;
        }

        let carried: Vec<(hecs::Entity, hecs::Entity)> = self
            .ecs
            .query::<&Riding>()
            .iter()
            .map(|(rider, riding)| (rider, riding.vehicle))
            .collect();
        for (rider, vehicle) in carried {
            if let Some(at) = self.root_vehicle_position(vehicle) {
                let _ = self.set_position(rider, at);
            }
        }
    }

    fn root_vehicle_position(&self, mut vehicle: hecs::Entity) -> Option<Position> {
        while let Some(next) = self.vehicle(vehicle) {
            if next == vehicle {
                break;
            }
            vehicle = next;
        }
        self.position(vehicle)
    }
}

/// Seeds an entity's random source from the world seed and its id, so the
/// same world seed replays the same per-entity draws.
pub fn derive_entity_rng(world_seed: u64, id: &Uuid) -> ChaCha8Rng {
    let u = id.as_u128();
    let mut seed = world_seed.wrapping_mul(0x517CC1B727220A95);
    seed ^= (u >> 64) as u64;
    seed = seed.wrapping_mul(0x517CC1B727220A95);
    seed ^= u as u64;
    ChaCha8Rng::seed_from_u64(seed)
}
