use super::{LevelError, Passengers, Riding, World};
use snare_data::Creature;

impl World {
    /// Makes `rider` ride `vehicle`, dismounting it from any previous vehicle.
    ///
    /// Rejected when the two are the same entity, either is not a creature,
    /// the mount would form a cycle, or the vehicle carries no more riders.
    pub fn start_riding(
        &mut self,
        rider: hecs::Entity,
        vehicle: hecs::Entity,
    ) -> Result<(), LevelError> {
        if rider == vehicle {
            return Err(LevelError::MountRejected("cannot ride itself"));
        }
        let vehicle_kind = self.ecs.get::<&Creature>(vehicle)?.kind.clone();
        self.ecs.get::<&Creature>(rider)?;

        if self.with_passengers(rider).contains(&vehicle) {
            return Err(LevelError::MountRejected("mount would form a cycle"));
        }
        let capacity = self
            .kinds()
            .get(&vehicle_kind)
            .map(|info| info.max_passengers)
            .unwrap_or(0);
        if self.passengers(vehicle).len() >= capacity {
            return Err(LevelError::MountRejected("vehicle is full"));
        }

        self.stop_riding(rider);
        let mut riders = self.passengers(vehicle);
        riders.push(rider);
        self.ecs.insert_one(vehicle, Passengers(riders))?;
        self.ecs.insert_one(rider, Riding { vehicle })?;
        Ok(())
    }

    /// Dismounts `rider`. Returns the vehicle it left, if any.
    pub fn stop_riding(&mut self, rider: hecs::Entity) -> Option<hecs::Entity> {
        let vehicle = self.ecs.remove_one::<Riding>(rider).ok()?.vehicle;
        if let Ok(mut passengers) = self.ecs.get::<&mut Passengers>(vehicle) {
            passengers.0.retain(|&p| p != rider);
        }
        Some(vehicle)
    }

    pub fn vehicle(&self, rider: hecs::Entity) -> Option<hecs::Entity> {
        self.ecs.get::<&Riding>(rider).ok().map(|r| r.vehicle)
    }

    pub fn passengers(&self, vehicle: hecs::Entity) -> Vec<hecs::Entity> {
        self.ecs
            .get::<&Passengers>(vehicle)
            .map(|p| p.0.clone())
            .unwrap_or_default()
    }

    /// `entity` followed by everything riding it, directly or indirectly.
    pub fn with_passengers(&self, entity: hecs::Entity) -> Vec<hecs::Entity> {
        let mut out = vec![entity];
        let mut next = 0;
        while next < out.len() {
            for passenger in self.passengers(out[next]) {
                if !out.contains(&passenger) {
                    out.push(passenger);
                }
            }
            next += 1;
        }
        out
    }
}
