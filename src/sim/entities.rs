//! Entity variants living in the arena

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Unique identifier for an entity (allocated monotonically per session)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Anything a store can hold
pub trait Entity {
    fn id(&self) -> EntityId;
    fn position(&self) -> Vec3;
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec3,
    /// Units per tick
    pub speed: f32,
    /// Unit vector on the arena plane
    pub facing: Vec3,
    /// Wormhole the ship just arrived through (immune until it leaves)
    #[serde(default)]
    pub arrived_via: Option<EntityId>,
}

impl Player {
    pub fn new(position: Vec3, speed: f32) -> Self {
        Self {
            position,
            speed,
            facing: Vec3::NEG_Z,
            arrived_via: None,
        }
    }
}

/// A homing enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub position: Vec3,
    pub speed: f32,
    #[serde(default)]
    pub arrived_via: Option<EntityId>,
}

impl Entity for Enemy {
    fn id(&self) -> EntityId {
        self.id
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Boss,
}

/// A straight-line projectile (player bullets and boss bullets alike)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub position: Vec3,
    /// Unit vector, fixed at launch
    pub direction: Vec3,
    pub speed: f32,
    pub owner: Owner,
}

impl Entity for Projectile {
    fn id(&self) -> EntityId {
        self.id
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}

/// Power-up effect tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    SpeedBoost,
    ScoreMultiplier,
    SpawnBlackHole,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::SpeedBoost,
        PowerUpKind::ScoreMultiplier,
        PowerUpKind::SpawnBlackHole,
    ];
}

/// A collectible power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: EntityId,
    pub position: Vec3,
    pub kind: PowerUpKind,
    /// Cosmetic spin angle (radians)
    #[serde(default)]
    pub spin: f32,
}

impl Entity for PowerUp {
    fn id(&self) -> EntityId {
        self.id
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}

/// A teleport endpoint. All wormholes are interchangeable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wormhole {
    pub id: EntityId,
    pub position: Vec3,
}

impl Entity for Wormhole {
    fn id(&self) -> EntityId {
        self.id
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}

/// A temporary gravity well
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlackHole {
    pub id: EntityId,
    pub position: Vec3,
    /// Seconds left before it collapses
    pub lifespan: f32,
    #[serde(default)]
    pub spin: f32,
}

impl Entity for BlackHole {
    fn id(&self) -> EntityId {
        self.id
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}

/// The periodic boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub id: EntityId,
    pub position: Vec3,
    pub hp: i32,
    /// Seconds since spawn (drives the sway path)
    pub age: f32,
    /// Projectiles fired so far
    pub shots_fired: u32,
}

impl Entity for Boss {
    fn id(&self) -> EntityId {
        self.id
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}

impl Boss {
    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }
}
