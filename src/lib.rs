//! Gravwell - a 3D wave-survival arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, interactions, abilities, progression)
//! - `driver`: Per-frame orchestration and presentation hand-off
//! - `tuning`: Data-driven game balance
//!
//! Rendering, raw input capture and audio live outside this crate. They consume
//! the state and events produced here.

pub mod driver;
pub mod sim;
pub mod tuning;

pub use driver::{FrameDriver, Presenter};
pub use tuning::{Tuning, TuningError};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Height every ground-bound entity rides at
    pub const GROUND_OFFSET: f32 = 0.5;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 0.2;

    /// Enemy speed range (units per tick)
    pub const ENEMY_SPEED_MIN: f32 = 0.05;
    pub const ENEMY_SPEED_MAX: f32 = 0.1;
    pub const ENEMIES_PER_LEVEL: u32 = 5;

    /// Random spawns land in [-SPAWN_EXTENT, SPAWN_EXTENT) on x and z
    pub const SPAWN_EXTENT: f32 = 40.0;
    /// Spawns closer than this to the player are re-rolled
    pub const SPAWN_CLEARANCE: f32 = 5.0;
    pub const SPAWN_ATTEMPTS: u32 = 8;

    /// Projectiles
    pub const BULLET_SPEED: f32 = 0.5;
    pub const BOSS_BULLET_SPEED: f32 = 0.3;
    /// Projectiles further than this from the origin are discarded
    pub const ARENA_RADIUS: f32 = 50.0;

    /// Contact distance for hits, pickups, teleports and captures
    pub const CONTACT_RADIUS: f32 = 1.0;

    /// Black holes
    pub const GRAVITY_RADIUS: f32 = 10.0;
    pub const GRAVITY_STRENGTH: f32 = 0.1;
    pub const BLACK_HOLE_LIFESPAN: f32 = 10.0;

    /// Time warp
    pub const TIME_WARP_DURATION: f32 = 5.0;
    pub const TIME_WARP_PLAYER_FACTOR: f32 = 2.0;
    pub const TIME_WARP_ENEMY_FACTOR: f32 = 0.5;

    /// Hyper jump
    pub const HYPER_JUMP_COOLDOWN: f32 = 30.0;
    pub const HYPER_JUMP_STEP: f32 = 2.0;
    pub const HYPER_JUMP_DISTANCE: f32 = 100.0;

    /// Boss
    pub const BOSS_HP: i32 = 100;
    pub const BOSS_LEVEL_INTERVAL: u32 = 5;
    pub const BOSS_FIRE_CHANCE: f64 = 0.02;
    pub const BOSS_HIT_RADIUS: f32 = 3.0;
    pub const BOSS_HOVER_HEIGHT: f32 = 5.0;
    pub const BOSS_SPAWN_Z: f32 = -30.0;
    pub const BOSS_SWAY_CENTER_Z: f32 = -20.0;
    pub const BOSS_SWAY_X: f32 = 20.0;
    pub const BOSS_SWAY_Z: f32 = 20.0;
    pub const BOSS_SWAY_RATE_X: f32 = 0.5;
    pub const BOSS_SWAY_RATE_Z: f32 = 0.3;

    /// Power-up effects
    pub const SPEED_BOOST_FACTOR: f32 = 1.5;
    pub const COMBO_FACTOR: u32 = 2;

    /// Score awards (multiplied by combo)
    pub const ENEMY_KILL_SCORE: u64 = 10;
    pub const CAPTURE_SCORE: u64 = 50;
    pub const BOSS_SCORE: u64 = 1000;

    /// Cosmetic spin rates (radians per tick)
    pub const POWER_UP_SPIN: f32 = 0.01;
    pub const BLACK_HOLE_SPIN: f32 = 0.02;
}

/// Unit direction from `from` to `to`, or `None` when the points coincide
#[inline]
pub fn direction_to(from: Vec3, to: Vec3) -> Option<Vec3> {
    let delta = to - from;
    let len = delta.length();
    if len <= f32::EPSILON {
        None
    } else {
        Some(delta / len)
    }
}

/// Move `from` toward `to` by at most `max_step`, never overshooting
#[inline]
pub fn step_toward(from: Vec3, to: Vec3, max_step: f32) -> Vec3 {
    let delta = to - from;
    let len = delta.length();
    if len <= f32::EPSILON || max_step <= 0.0 {
        return from;
    }
    from + delta * (max_step.min(len) / len)
}

/// Distance between two points projected onto the arena plane (x/z)
#[inline]
pub fn ground_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

/// Intersect a pointer ray with the horizontal plane `y = ground_y`
///
/// Returns `None` when the ray runs parallel to the plane or points away
/// from it.
pub fn pointer_ray_to_ground(origin: Vec3, dir: Vec3, ground_y: f32) -> Option<Vec3> {
    if dir.y.abs() <= f32::EPSILON {
        return None;
    }
    let t = (ground_y - origin.y) / dir.y;
    if t < 0.0 {
        return None;
    }
    Some(origin + dir * t)
}
