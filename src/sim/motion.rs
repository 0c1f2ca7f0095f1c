//! Per-tick displacement for every moving entity
//!
//! Speeds are in units per tick. Only black-hole lifespans and ability
//! timers run on wall-clock seconds.

use glam::Vec3;

use super::collision::gravity_pull;
use super::entities::{BlackHole, Boss, Enemy, Player, Projectile};
use super::store::EntityStore;
use crate::tuning::Tuning;
use crate::{direction_to, step_toward};

/// Turn toward and move toward the pointer target, stopping on it
///
/// No target (pointer ray missed the arena plane) or a target right under
/// the ship leaves the ship untouched.
pub fn seek_pointer(player: &mut Player, target: Option<Vec3>) {
    let Some(mut target) = target else {
        return;
    };
    target.y = player.position.y;
    let Some(dir) = direction_to(player.position, target) else {
        return;
    };
    player.facing = dir;
    player.position = step_toward(player.position, target, player.speed);
}

/// Move an enemy straight at the player
pub fn seek_player(enemy: &mut Enemy, player_pos: Vec3) {
    if let Some(dir) = direction_to(enemy.position, player_pos) {
        enemy.position += dir * enemy.speed;
    }
}

/// Outcome of exposing a point to every live black hole
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gravity {
    /// Pulled (possibly by nothing)
    Free,
    /// Swallowed by a black hole
    Captured,
}

/// Apply each black hole's pull in turn, after the seek displacement
pub fn apply_gravity(
    pos: &mut Vec3,
    black_holes: &EntityStore<BlackHole>,
    reach: f32,
    strength: f32,
    capture_radius: f32,
) -> Gravity {
    for hole in black_holes.iter() {
        if pos.distance(hole.position) < capture_radius {
            return Gravity::Captured;
        }
        if let Some(pull) = gravity_pull(*pos, hole.position, reach, strength) {
            *pos += pull;
        }
    }
    Gravity::Free
}

/// Straight-line projectile step
pub fn advance_projectile(projectile: &mut Projectile) {
    projectile.position += projectile.direction * projectile.speed;
}

/// Walk the boss along its sway path
pub fn sway_boss(boss: &mut Boss, dt: f32, tuning: &Tuning) {
    boss.age += dt;
    boss.position = Vec3::new(
        (boss.age * tuning.boss_sway_rate_x).sin() * tuning.boss_sway_x,
        tuning.boss_hover_height,
        (boss.age * tuning.boss_sway_rate_z).cos() * tuning.boss_sway_z + tuning.boss_sway_center_z,
    );
}
