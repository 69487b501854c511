use super::id::ResourceId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// World position of an entity. `y` is the vertical axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance_sq(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }
}

/// Velocity of an entity, in world units per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
}

impl Velocity {
    /// Adds an instantaneous impulse.
    pub fn push(&mut self, dx: f64, dy: f64, dz: f64) {
        self.vx += dx;
        self.vy += dy;
        self.vz += dz;
    }
}

/// Unique identification of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub name: String,
}

/// Trap state carried by every creature.
///
/// A creature is either untouched, an armed trap source, or something that
/// a trap already produced. The enum makes "source and spawned at once"
/// unrepresentable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrapTag {
    #[default]
    None,
    Source,
    Spawned,
}

impl TrapTag {
    pub fn is_source(self) -> bool {
        matches!(self, TrapTag::Source)
    }
}

/// A creature of some registered kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    pub kind: ResourceId,
}

/// A player. Only alive non-spectators count for proximity checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub alive: bool,
    pub spectator: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            alive: true,
            spectator: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CosmeticKind {
    Lightning,
}

/// Non-interactive effect entity (no damage, no fire). Removed from the world
/// once `ticks_left` runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cosmetic {
    pub kind: CosmeticKind,
    pub visual_only: bool,
    pub ticks_left: u32,
}
