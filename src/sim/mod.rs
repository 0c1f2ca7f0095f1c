//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (insertion order per store)
//! - Timed effects fire at tick boundaries, never mid-tick
//! - No rendering or platform dependencies

pub mod abilities;
pub mod collision;
pub mod entities;
pub mod interaction;
pub mod motion;
pub mod progression;
pub mod state;
pub mod store;
pub mod tick;
pub mod timers;

pub use entities::{
    BlackHole, Boss, Enemy, Entity, EntityId, Owner, Player, PowerUp, PowerUpKind, Projectile,
    Wormhole,
};
pub use interaction::apply_effect;
pub use state::{GameEvent, GamePhase, GameState, HyperJump, JumpRun, Snapshot, TimeWarp};
pub use store::EntityStore;
pub use tick::{TickInput, tick};
pub use timers::{TimerEffect, TimerQueue};
