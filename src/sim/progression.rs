//! Level progression and wave spawning
//!
//! Each level adds `level` wormholes, `level × enemies_per_level` enemies and
//! `level` power-ups on top of whatever is still alive. Every
//! `boss_level_interval` levels a boss joins if none is present.

use glam::Vec3;
use rand::Rng;

use super::entities::{BlackHole, Boss, Enemy, EntityId, PowerUp, PowerUpKind, Wormhole};
use super::state::{GameEvent, GameState};
use crate::consts::*;

impl GameState {
    /// Advance to the next level and spawn its wave
    pub fn level_up(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.level += 1;
        self.spawn_level_wave();
        log::info!(
            "Level {}: {} enemies, {} wormholes, {} power-ups alive",
            self.level,
            self.enemies.len(),
            self.wormholes.len(),
            self.power_ups.len()
        );
        self.emit(GameEvent::LevelUp { level: self.level });

        if self.level.is_multiple_of(self.tuning.boss_level_interval) && self.boss.is_none() {
            self.spawn_boss();
        }
    }

    /// Spawn the current level's wormholes, enemies and power-ups
    pub(crate) fn spawn_level_wave(&mut self) {
        for _ in 0..self.level {
            self.spawn_wormhole();
        }
        for _ in 0..self.level.saturating_mul(self.tuning.enemies_per_level) {
            self.spawn_enemy();
        }
        for _ in 0..self.level {
            self.spawn_power_up();
        }
    }

    /// Uniform point in the spawn square, re-rolled away from the player
    fn random_ground_position(&mut self) -> Vec3 {
        let extent = self.tuning.spawn_extent;
        let clearance = self.tuning.spawn_clearance;
        let player = self.player.position;

        let mut pos = Vec3::ZERO;
        for _ in 0..SPAWN_ATTEMPTS {
            let x = self.rng.random_range(-extent..extent);
            let z = self.rng.random_range(-extent..extent);
            pos = Vec3::new(x, self.tuning.ground_offset, z);
            if crate::ground_distance(pos, player) >= clearance {
                break;
            }
        }
        pos
    }

    pub fn spawn_enemy(&mut self) -> EntityId {
        let position = self.random_ground_position();
        let (min, max) = (self.tuning.enemy_speed_min, self.tuning.enemy_speed_max);
        let speed = if max > min {
            self.rng.random_range(min..max)
        } else {
            min
        };
        let id = self.next_entity_id();
        self.enemies.add(Enemy {
            id,
            position,
            speed,
            arrived_via: None,
        });
        id
    }

    pub fn spawn_power_up(&mut self) -> EntityId {
        let position = self.random_ground_position();
        let kind = PowerUpKind::ALL[self.rng.random_range(0..PowerUpKind::ALL.len())];
        let id = self.next_entity_id();
        self.power_ups.add(PowerUp {
            id,
            position,
            kind,
            spin: 0.0,
        });
        id
    }

    pub fn spawn_wormhole(&mut self) -> EntityId {
        let position = self.random_ground_position();
        let id = self.next_entity_id();
        self.wormholes.add(Wormhole { id, position });
        id
    }

    /// Open a black hole at `at` (snapped to the ground offset)
    pub fn spawn_black_hole(&mut self, at: Vec3) -> EntityId {
        let id = self.next_entity_id();
        self.black_holes.add(BlackHole {
            id,
            position: Vec3::new(at.x, self.tuning.ground_offset, at.z),
            lifespan: self.tuning.black_hole_lifespan,
            spin: 0.0,
        });
        id
    }

    /// Bring in a boss unless one is already alive
    pub fn spawn_boss(&mut self) -> Option<EntityId> {
        if self.boss.is_some() {
            return None;
        }
        let id = self.next_entity_id();
        let position = Vec3::new(0.0, self.tuning.boss_hover_height, self.tuning.boss_spawn_z);
        self.boss = Some(Boss {
            id,
            position,
            hp: self.tuning.boss_hp,
            age: 0.0,
            shots_fired: 0,
        });
        log::info!("Boss spawned at level {} with {} hp", self.level, self.tuning.boss_hp);
        self.emit(GameEvent::BossSpawned { position });
        Some(id)
    }
}
