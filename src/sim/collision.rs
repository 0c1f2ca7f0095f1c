//! Proximity checks
//!
//! Every interaction in the arena is a distance test between two points:
//! contact (hits, pickups, teleports), gravity-well reach, boss hitbox and
//! the arena boundary for projectiles.

use glam::Vec3;

use crate::ground_distance;

/// True when `a` and `b` are strictly closer than `radius`
#[inline]
pub fn within(a: Vec3, b: Vec3, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}

/// True when a projectile has left the playable sphere around the origin
#[inline]
pub fn out_of_bounds(pos: Vec3, arena_radius: f32) -> bool {
    pos.length_squared() > arena_radius * arena_radius
}

/// Boss hitbox test, measured on the arena plane since the boss hovers
/// above the projectiles it is hit by
#[inline]
pub fn hits_boss(projectile: Vec3, boss: Vec3, hit_radius: f32) -> bool {
    ground_distance(projectile, boss) < hit_radius
}

/// Inverse-square pull a gravity well exerts on a point
///
/// Returns `None` when the point is outside `reach` or sits on the well.
pub fn gravity_pull(pos: Vec3, well: Vec3, reach: f32, strength: f32) -> Option<Vec3> {
    let delta = well - pos;
    let dist = delta.length();
    if dist >= reach || dist <= f32::EPSILON {
        return None;
    }
    Some(delta / dist * (strength / (dist * dist)))
}
