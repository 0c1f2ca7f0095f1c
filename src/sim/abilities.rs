//! Player abilities, timed effects and other clock-driven behaviour
//!
//! Time warp: Idle -> Active on trigger, back to Idle when its timer fires.
//! Hyper jump: Ready -> Cooldown on trigger, back to Ready when its timer
//! fires. The dash itself runs independently over many ticks and ends in a
//! level-up.

use rand::Rng;

use super::entities::{EntityId, Owner, Projectile};
use super::state::{GameEvent, GameState, HyperJump, JumpRun, TimeWarp};
use super::timers::TimerEffect;
use crate::consts::*;
use crate::direction_to;

impl GameState {
    /// Fire a bullet along the ship's facing
    pub fn shoot(&mut self) -> Option<EntityId> {
        if self.is_game_over() {
            return None;
        }
        let id = self.next_entity_id();
        self.bullets.add(Projectile {
            id,
            position: self.player.position,
            direction: self.player.facing,
            speed: self.tuning.bullet_speed,
            owner: Owner::Player,
        });
        Some(id)
    }

    /// Speed the player up and slow every live enemy down for a while
    ///
    /// Returns false (and changes nothing) if a warp is already running.
    pub fn activate_time_warp(&mut self) -> bool {
        if self.is_game_over() || self.time_warp == TimeWarp::Active {
            return false;
        }
        self.time_warp = TimeWarp::Active;
        self.player.speed *= self.tuning.time_warp_player_factor;
        let factor = self.tuning.time_warp_enemy_factor;
        self.enemies.for_each_alive(|enemy| enemy.speed *= factor);
        self.timers.schedule(
            self.clock,
            self.tuning.time_warp_duration,
            TimerEffect::TimeWarpExpired,
        );
        log::debug!("Time warp on ({} enemies slowed)", self.enemies.len());
        self.emit(GameEvent::TimeWarpStarted);
        true
    }

    /// Start a hyper jump dash along the current facing
    ///
    /// Returns false while on cooldown or while a previous dash is still
    /// in flight.
    pub fn activate_hyper_jump(&mut self) -> bool {
        if self.is_game_over() || self.hyper_jump == HyperJump::Cooldown || self.jump.is_some() {
            return false;
        }
        self.hyper_jump = HyperJump::Cooldown;
        self.jump = Some(JumpRun {
            heading: self.player.facing,
            traveled: 0.0,
        });
        self.timers.schedule(
            self.clock,
            self.tuning.hyper_jump_cooldown,
            TimerEffect::HyperJumpRecharged,
        );
        log::debug!("Hyper jump engaged toward {:?}", self.player.facing);
        self.emit(GameEvent::HyperJumpStarted);
        true
    }
}

/// Run every timer that has come due
pub fn fire_due_timers(state: &mut GameState) {
    for effect in state.timers.pop_due(state.clock) {
        match effect {
            TimerEffect::TimeWarpExpired => end_time_warp(state),
            TimerEffect::HyperJumpRecharged => {
                if state.hyper_jump == HyperJump::Cooldown {
                    state.hyper_jump = HyperJump::Ready;
                    log::debug!("Hyper jump ready");
                    state.emit(GameEvent::HyperJumpRecharged);
                }
            }
        }
    }
}

/// Undo the warp for the player and whichever enemies are alive now
fn end_time_warp(state: &mut GameState) {
    if state.time_warp != TimeWarp::Active {
        return;
    }
    state.time_warp = TimeWarp::Idle;
    state.player.speed /= state.tuning.time_warp_player_factor;
    let factor = state.tuning.time_warp_enemy_factor;
    state.enemies.for_each_alive(|enemy| enemy.speed /= factor);
    log::debug!("Time warp off");
    state.emit(GameEvent::TimeWarpEnded);
}

/// Carry an in-flight hyper jump one step further
pub fn advance_hyper_jump(state: &mut GameState) {
    let Some(mut run) = state.jump else {
        return;
    };
    let total = state.tuning.hyper_jump_distance;
    let step = state.tuning.hyper_jump_step.min(total - run.traveled).max(0.0);
    state.player.position += run.heading * step;
    run.traveled += step;

    if run.traveled >= total {
        state.jump = None;
        log::debug!("Hyper jump complete");
        state.level_up();
    } else {
        state.jump = Some(run);
    }
}

/// Age black holes by real elapsed time and collapse the expired ones
pub fn decay_black_holes(state: &mut GameState, dt: f32) {
    let mut expired = Vec::new();
    for hole in state.black_holes.iter_mut() {
        hole.spin += BLACK_HOLE_SPIN;
        hole.lifespan -= dt;
        if hole.lifespan <= 0.0 {
            expired.push(hole.id);
        }
    }
    for id in expired {
        state.black_holes.kill(id);
    }
    state.black_holes.sweep();
}

/// Roll the boss's per-tick fire chance and shoot at the player if it hits
pub fn boss_fire(state: &mut GameState) -> Option<EntityId> {
    let boss_pos = state.boss.as_ref()?.position;
    if !state.rng.random_bool(state.tuning.boss_fire_chance) {
        return None;
    }
    let direction = direction_to(boss_pos, state.player.position)?;
    let id = state.next_entity_id();
    state.boss_bullets.add(Projectile {
        id,
        position: boss_pos,
        direction,
        speed: state.tuning.boss_bullet_speed,
        owner: Owner::Boss,
    });
    if let Some(boss) = state.boss.as_mut() {
        boss.shots_fired += 1;
    }
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::{BlackHole, Boss, Enemy};
    use crate::tuning::Tuning;
    use glam::Vec3;

    fn blank() -> GameState {
        GameState::blank(21, Tuning::default())
    }

    fn add_enemy(state: &mut GameState, speed: f32) -> EntityId {
        let id = state.next_entity_id();
        state.enemies.add(Enemy {
            id,
            position: Vec3::new(30.0, 0.5, 30.0),
            speed,
            arrived_via: None,
        });
        id
    }

    #[test]
    fn test_time_warp_is_idempotent() {
        let mut state = blank();
        let id = add_enemy(&mut state, 0.08);

        assert!(state.activate_time_warp());
        assert!((state.player.speed - 0.4).abs() < 1e-6);
        assert!((state.enemies.get(id).unwrap().speed - 0.04).abs() < 1e-6);

        assert!(!state.activate_time_warp());
        assert!((state.player.speed - 0.4).abs() < 1e-6);
        assert!((state.enemies.get(id).unwrap().speed - 0.04).abs() < 1e-6);
        assert_eq!(state.timers.len(), 1);
    }

    #[test]
    fn test_time_warp_expiry_hits_enemies_alive_then() {
        let mut state = blank();
        let old = add_enemy(&mut state, 0.08);
        state.activate_time_warp();
        let newcomer = add_enemy(&mut state, 0.06);

        state.clock = 4.9;
        fire_due_timers(&mut state);
        assert_eq!(state.time_warp, TimeWarp::Active);

        state.clock = 5.0;
        fire_due_timers(&mut state);
        assert_eq!(state.time_warp, TimeWarp::Idle);
        assert!((state.player.speed - 0.2).abs() < 1e-6);
        assert!((state.enemies.get(old).unwrap().speed - 0.08).abs() < 1e-6);
        // Spawned mid-warp, still doubled on expiry
        assert!((state.enemies.get(newcomer).unwrap().speed - 0.12).abs() < 1e-6);
    }

    #[test]
    fn test_hyper_jump_cooldown_guards_retrigger() {
        let mut state = blank();
        assert!(state.activate_hyper_jump());
        assert!(!state.activate_hyper_jump());

        // Finish the dash, cooldown still pending
        for _ in 0..50 {
            advance_hyper_jump(&mut state);
        }
        assert!(state.jump.is_none());
        assert!(!state.activate_hyper_jump());

        state.clock = 30.0;
        fire_due_timers(&mut state);
        assert_eq!(state.hyper_jump, HyperJump::Ready);
        assert!(state.activate_hyper_jump());
    }

    #[test]
    fn test_hyper_jump_travels_then_levels_up() {
        let mut state = blank();
        state.player.facing = Vec3::NEG_Z;
        state.activate_hyper_jump();

        for _ in 0..49 {
            advance_hyper_jump(&mut state);
        }
        assert_eq!(state.level, 1);
        assert!(state.jump.is_some());

        advance_hyper_jump(&mut state);
        assert!(state.jump.is_none());
        assert_eq!(state.level, 2);
        assert!((state.player.position.z + 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_recharge_during_long_dash_does_not_overlap() {
        let mut state = blank();
        state.activate_hyper_jump();
        advance_hyper_jump(&mut state);

        state.clock = 31.0;
        fire_due_timers(&mut state);
        assert_eq!(state.hyper_jump, HyperJump::Ready);
        // Dash still in flight
        assert!(!state.activate_hyper_jump());
    }

    #[test]
    fn test_black_hole_expires_at_zero() {
        let mut state = blank();
        state.black_holes.add(BlackHole {
            id: EntityId(40),
            position: Vec3::ZERO,
            lifespan: 0.016,
            spin: 0.0,
        });
        state.black_holes.add(BlackHole {
            id: EntityId(41),
            position: Vec3::ZERO,
            lifespan: 0.5,
            spin: 0.0,
        });
        decay_black_holes(&mut state, 0.016);
        assert!(!state.black_holes.is_alive(EntityId(40)));
        assert!(state.black_holes.is_alive(EntityId(41)));
    }

    #[test]
    fn test_boss_fire_aims_at_player() {
        let mut state = blank();
        state.tuning.boss_fire_chance = 1.0;
        state.boss = Some(Boss {
            id: EntityId(80),
            position: Vec3::new(0.0, 5.0, -20.0),
            hp: 100,
            age: 0.0,
            shots_fired: 0,
        });
        boss_fire(&mut state).unwrap();
        let shot = state.boss_bullets.iter().next().unwrap();
        let expected = (state.player.position - Vec3::new(0.0, 5.0, -20.0)).normalize();
        assert!((shot.direction - expected).length() < 1e-6);
        assert_eq!(state.boss.as_ref().unwrap().shots_fired, 1);

        state.tuning.boss_fire_chance = 0.0;
        assert!(boss_fire(&mut state).is_none());
    }

    #[test]
    fn test_commands_ignored_after_game_over() {
        let mut state = blank();
        state.game_over();
        assert!(state.shoot().is_none());
        assert!(!state.activate_time_warp());
        assert!(!state.activate_hyper_jump());
    }
}
