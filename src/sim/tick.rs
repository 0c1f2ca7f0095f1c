//! Per-frame simulation tick
//!
//! Core game loop that advances the arena by one frame, in a fixed order:
//! timers, commands, player, enemies, bullets, power-ups, black holes, boss,
//! boss bullets.

use glam::Vec3;

use super::abilities::{advance_hyper_jump, boss_fire, decay_black_holes, fire_due_timers};
use super::interaction::{
    resolve_boss_hits, teleport_player, update_boss_bullets, update_bullets, update_enemies,
    update_power_ups,
};
use super::motion::{seek_pointer, sway_boss};
use super::state::GameState;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer ray hit on the arena plane (None when the ray missed it)
    pub pointer_target: Option<Vec3>,
    /// Fire a bullet (click)
    pub shoot: bool,
    /// Trigger time warp
    pub time_warp: bool,
    /// Trigger hyper jump
    pub hyper_jump: bool,
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Game over is terminal: timers, commands and entities all freeze
    if state.is_game_over() {
        return;
    }

    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    state.time_ticks += 1;
    state.clock += f64::from(dt);

    fire_due_timers(state);

    if input.time_warp {
        state.activate_time_warp();
    }
    if input.hyper_jump {
        state.activate_hyper_jump();
    }
    if input.shoot {
        state.shoot();
    }

    // Player
    seek_pointer(&mut state.player, input.pointer_target);
    advance_hyper_jump(state);
    teleport_player(state);

    update_enemies(state);
    if state.is_game_over() {
        return;
    }

    update_bullets(state);
    update_power_ups(state);
    decay_black_holes(state, dt);

    // Boss projectiles only move while their shooter was alive this tick
    if update_boss(state, dt) {
        update_boss_bullets(state);
    }

    state.sweep_all();
}

/// Boss step: sway, maybe fire, take hits. Returns false if there was no boss.
fn update_boss(state: &mut GameState, dt: f32) -> bool {
    let GameState { boss, tuning, .. } = state;
    let Some(boss) = boss.as_mut() else {
        return false;
    };
    sway_boss(boss, dt, tuning);
    boss_fire(state);
    resolve_boss_hits(state);
    true
}
