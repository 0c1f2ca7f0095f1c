//! Interaction resolution
//!
//! One pass per entity family, run in a fixed order by the tick. Entities
//! destroyed during a pass are marked in their store and swept at the end of
//! the pass, so nothing is visited twice and nothing spawned mid-pass is
//! visited at all.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::{hits_boss, out_of_bounds, within};
use super::entities::{EntityId, PowerUpKind, Wormhole};
use super::motion::{Gravity, advance_projectile, apply_gravity, seek_player};
use super::state::{GameEvent, GameState};
use super::store::EntityStore;
use crate::consts::*;

/// Apply a power-up's effect to the session
pub fn apply_effect(kind: PowerUpKind, state: &mut GameState) {
    match kind {
        PowerUpKind::SpeedBoost => {
            state.player.speed *= state.tuning.speed_boost_factor;
        }
        PowerUpKind::ScoreMultiplier => {
            // Combo never shrinks
            state.combo = state
                .combo
                .saturating_mul(state.tuning.combo_factor)
                .max(state.combo);
        }
        PowerUpKind::SpawnBlackHole => {
            let at = state.player.position;
            state.spawn_black_hole(at);
        }
    }
}

/// Send an entity through the first wormhole it touches
///
/// The exit is a uniformly random wormhole other than the entrance (the
/// entrance itself when it is the only one). An entity is immune to the
/// wormhole it arrived through until it moves out of contact range.
/// Returns the exit wormhole when a teleport happened.
pub fn traverse_wormholes(
    position: &mut Vec3,
    arrived_via: &mut Option<EntityId>,
    wormholes: &EntityStore<Wormhole>,
    rng: &mut Pcg32,
    contact: f32,
    ground: f32,
) -> Option<EntityId> {
    if let Some(exit_id) = *arrived_via {
        let still_inside = wormholes
            .get(exit_id)
            .is_some_and(|w| within(*position, w.position, contact));
        if !still_inside {
            *arrived_via = None;
        }
    }

    let entrance = wormholes
        .iter()
        .find(|w| Some(w.id) != *arrived_via && within(*position, w.position, contact))?
        .id;

    let exits: Vec<&Wormhole> = wormholes.iter().filter(|w| w.id != entrance).collect();
    let exit = if exits.is_empty() {
        wormholes.get(entrance)?
    } else {
        exits[rng.random_range(0..exits.len())]
    };

    *position = Vec3::new(exit.position.x, ground, exit.position.z);
    *arrived_via = Some(exit.id);
    Some(exit.id)
}

/// Player wormhole check (runs right after the player moves)
pub fn teleport_player(state: &mut GameState) {
    let GameState {
        tuning,
        player,
        wormholes,
        rng,
        ..
    } = state;
    if let Some(exit) = traverse_wormholes(
        &mut player.position,
        &mut player.arrived_via,
        wormholes,
        rng,
        tuning.contact_radius,
        tuning.ground_offset,
    ) {
        log::trace!("Player warped to wormhole {:?}", exit);
    }
}

/// Enemy pass: seek, gravity wells, wormholes, then the terminal player check
///
/// Stops at the first enemy touching the player and ends the game.
pub fn update_enemies(state: &mut GameState) {
    let mut captured: Vec<(EntityId, Vec3)> = Vec::new();
    let mut touched_player = false;
    {
        let GameState {
            tuning,
            player,
            enemies,
            black_holes,
            wormholes,
            rng,
            ..
        } = state;

        for enemy in enemies.iter_mut() {
            seek_player(enemy, player.position);

            let gravity = apply_gravity(
                &mut enemy.position,
                black_holes,
                tuning.gravity_radius,
                tuning.gravity_strength,
                tuning.contact_radius,
            );
            if gravity == Gravity::Captured {
                captured.push((enemy.id, enemy.position));
                continue;
            }

            if let Some(exit) = traverse_wormholes(
                &mut enemy.position,
                &mut enemy.arrived_via,
                wormholes,
                rng,
                tuning.contact_radius,
                tuning.ground_offset,
            ) {
                log::trace!("Enemy {:?} warped to wormhole {:?}", enemy.id, exit);
            }

            if within(enemy.position, player.position, tuning.contact_radius) {
                touched_player = true;
                break;
            }
        }
    }

    for (id, position) in captured {
        if state.enemies.kill(id) {
            state.award(state.tuning.capture_score);
            state.emit(GameEvent::Explosion { position });
        }
    }
    state.enemies.sweep();

    if touched_player {
        state.game_over();
    }
}

/// Player bullet pass: move, discard strays, hit at most one enemy each
pub fn update_bullets(state: &mut GameState) {
    let mut kills: Vec<Vec3> = Vec::new();
    {
        let GameState {
            tuning,
            bullets,
            enemies,
            ..
        } = state;

        let mut spent = Vec::new();
        for bullet in bullets.iter_mut() {
            advance_projectile(bullet);

            if out_of_bounds(bullet.position, tuning.arena_radius) {
                spent.push(bullet.id);
                continue;
            }

            let hit = enemies
                .first_within(bullet.position, tuning.contact_radius)
                .map(|e| (e.id, e.position));
            if let Some((enemy_id, enemy_pos)) = hit {
                enemies.kill(enemy_id);
                spent.push(bullet.id);
                kills.push(enemy_pos);
            }
        }
        for id in spent {
            bullets.kill(id);
        }
    }

    for position in kills {
        state.award(state.tuning.enemy_kill_score);
        state.emit(GameEvent::Explosion { position });
    }
    state.bullets.sweep();
    state.enemies.sweep();
}

/// Power-up pass: spin, pickup, then top up to the level's count
pub fn update_power_ups(state: &mut GameState) {
    let player_pos = state.player.position;
    let contact = state.tuning.contact_radius;

    let mut collected = Vec::new();
    for power_up in state.power_ups.iter_mut() {
        power_up.spin += POWER_UP_SPIN;
        if within(power_up.position, player_pos, contact) {
            collected.push((power_up.id, power_up.position, power_up.kind));
        }
    }

    for (id, position, kind) in collected {
        if !state.power_ups.kill(id) {
            continue;
        }
        apply_effect(kind, state);
        log::debug!(
            "Collected {:?} (combo {}, speed {:.3})",
            kind,
            state.combo,
            state.player.speed
        );
        state.emit(GameEvent::PowerUpCollected { position, kind });
    }
    state.power_ups.sweep();

    if (state.power_ups.len() as u64) < u64::from(state.level) {
        state.spawn_power_up();
    }
}

/// Player bullets against the boss. Returns true if the boss went down.
pub fn resolve_boss_hits(state: &mut GameState) -> bool {
    let Some(boss_pos) = state.boss.as_ref().map(|b| b.position) else {
        return false;
    };

    let radius = state.tuning.boss_hit_radius;
    let hits: Vec<EntityId> = state
        .bullets
        .iter()
        .filter(|b| hits_boss(b.position, boss_pos, radius))
        .map(|b| b.id)
        .collect();

    let mut defeated = false;
    for id in hits {
        let Some(boss) = state.boss.as_mut() else {
            break;
        };
        if !state.bullets.kill(id) {
            continue;
        }
        boss.hp -= 1;
        let down = boss.is_defeated();
        state.emit(GameEvent::Explosion { position: boss_pos });
        if down {
            defeated = true;
            break;
        }
    }
    state.bullets.sweep();

    if defeated {
        defeat_boss(state);
    }
    defeated
}

fn defeat_boss(state: &mut GameState) {
    let Some(boss) = state.boss.take() else {
        return;
    };
    state.emit(GameEvent::Shockwave {
        position: boss.position,
    });
    state.award(state.tuning.boss_score);
    // Nothing steers these once their shooter is gone
    state.boss_bullets.clear();
    log::info!("Boss defeated after {} shots, score {}", boss.shots_fired, state.score);
    state.level_up();
}

/// Boss projectile pass. Any hit on the player ends the game immediately.
pub fn update_boss_bullets(state: &mut GameState) {
    let player_pos = state.player.position;
    let contact = state.tuning.contact_radius;
    let arena = state.tuning.arena_radius;

    let mut spent = Vec::new();
    let mut hit_player = false;
    for shot in state.boss_bullets.iter_mut() {
        advance_projectile(shot);
        if within(shot.position, player_pos, contact) {
            hit_player = true;
            break;
        }
        if out_of_bounds(shot.position, arena) {
            spent.push(shot.id);
        }
    }
    for id in spent {
        state.boss_bullets.kill(id);
    }
    state.boss_bullets.sweep();

    if hit_player {
        state.game_over();
    }
}
