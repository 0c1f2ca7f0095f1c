//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives in [`Tuning`]. Values
//! default to [`crate::consts`]; a JSON document only needs the keys it wants
//! to override.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading a tuning document
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read tuning file: {err}"),
            Self::Parse(err) => write!(f, "malformed tuning json: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Gameplay balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_speed: f32,
    pub ground_offset: f32,

    // === Spawning ===
    pub spawn_extent: f32,
    pub spawn_clearance: f32,
    pub enemy_speed_min: f32,
    pub enemy_speed_max: f32,
    pub enemies_per_level: u32,

    // === Projectiles ===
    pub bullet_speed: f32,
    pub boss_bullet_speed: f32,
    pub arena_radius: f32,

    // === Interactions ===
    pub contact_radius: f32,
    pub gravity_radius: f32,
    pub gravity_strength: f32,
    pub black_hole_lifespan: f32,

    // === Abilities ===
    pub time_warp_duration: f32,
    pub time_warp_player_factor: f32,
    pub time_warp_enemy_factor: f32,
    pub hyper_jump_cooldown: f32,
    pub hyper_jump_step: f32,
    pub hyper_jump_distance: f32,

    // === Power-ups ===
    pub speed_boost_factor: f32,
    pub combo_factor: u32,

    // === Boss ===
    pub boss_hp: i32,
    pub boss_level_interval: u32,
    pub boss_fire_chance: f64,
    pub boss_hit_radius: f32,
    pub boss_hover_height: f32,
    pub boss_spawn_z: f32,
    /// Sway path: x = sin(rate_x·age)·sway_x, z = cos(rate_z·age)·sway_z + center_z
    pub boss_sway_x: f32,
    pub boss_sway_z: f32,
    pub boss_sway_center_z: f32,
    pub boss_sway_rate_x: f32,
    pub boss_sway_rate_z: f32,

    // === Scoring (before combo) ===
    pub enemy_kill_score: u64,
    pub capture_score: u64,
    pub boss_score: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            ground_offset: GROUND_OFFSET,

            spawn_extent: SPAWN_EXTENT,
            spawn_clearance: SPAWN_CLEARANCE,
            enemy_speed_min: ENEMY_SPEED_MIN,
            enemy_speed_max: ENEMY_SPEED_MAX,
            enemies_per_level: ENEMIES_PER_LEVEL,

            bullet_speed: BULLET_SPEED,
            boss_bullet_speed: BOSS_BULLET_SPEED,
            arena_radius: ARENA_RADIUS,

            contact_radius: CONTACT_RADIUS,
            gravity_radius: GRAVITY_RADIUS,
            gravity_strength: GRAVITY_STRENGTH,
            black_hole_lifespan: BLACK_HOLE_LIFESPAN,

            time_warp_duration: TIME_WARP_DURATION,
            time_warp_player_factor: TIME_WARP_PLAYER_FACTOR,
            time_warp_enemy_factor: TIME_WARP_ENEMY_FACTOR,
            hyper_jump_cooldown: HYPER_JUMP_COOLDOWN,
            hyper_jump_step: HYPER_JUMP_STEP,
            hyper_jump_distance: HYPER_JUMP_DISTANCE,

            speed_boost_factor: SPEED_BOOST_FACTOR,
            combo_factor: COMBO_FACTOR,

            boss_hp: BOSS_HP,
            boss_level_interval: BOSS_LEVEL_INTERVAL,
            boss_fire_chance: BOSS_FIRE_CHANCE,
            boss_hit_radius: BOSS_HIT_RADIUS,
            boss_hover_height: BOSS_HOVER_HEIGHT,
            boss_spawn_z: BOSS_SPAWN_Z,
            boss_sway_x: BOSS_SWAY_X,
            boss_sway_z: BOSS_SWAY_Z,
            boss_sway_center_z: BOSS_SWAY_CENTER_Z,
            boss_sway_rate_x: BOSS_SWAY_RATE_X,
            boss_sway_rate_z: BOSS_SWAY_RATE_Z,

            enemy_kill_score: ENEMY_KILL_SCORE,
            capture_score: CAPTURE_SCORE,
            boss_score: BOSS_SCORE,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read a JSON tuning document from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Serialize back to pretty JSON (handy for dumping the defaults)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("player_speed", self.player_speed),
            ("spawn_extent", self.spawn_extent),
            ("enemy_speed_min", self.enemy_speed_min),
            ("bullet_speed", self.bullet_speed),
            ("boss_bullet_speed", self.boss_bullet_speed),
            ("arena_radius", self.arena_radius),
            ("contact_radius", self.contact_radius),
            ("gravity_radius", self.gravity_radius),
            ("black_hole_lifespan", self.black_hole_lifespan),
            ("time_warp_duration", self.time_warp_duration),
            ("time_warp_player_factor", self.time_warp_player_factor),
            ("time_warp_enemy_factor", self.time_warp_enemy_factor),
            ("hyper_jump_cooldown", self.hyper_jump_cooldown),
            ("hyper_jump_step", self.hyper_jump_step),
            ("hyper_jump_distance", self.hyper_jump_distance),
            ("boss_hit_radius", self.boss_hit_radius),
            ("speed_boost_factor", self.speed_boost_factor),
        ];
        for (field, value) in positive {
            // NaN fails this comparison too
            if !(value > 0.0) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be greater than zero",
                });
            }
        }

        if self.enemy_speed_max < self.enemy_speed_min {
            return Err(TuningError::Invalid {
                field: "enemy_speed_max",
                reason: "must not be below enemy_speed_min",
            });
        }
        if !(0.0..=1.0).contains(&self.boss_fire_chance) {
            return Err(TuningError::Invalid {
                field: "boss_fire_chance",
                reason: "must be a probability in [0, 1]",
            });
        }
        if self.combo_factor < 1 {
            return Err(TuningError::Invalid {
                field: "combo_factor",
                reason: "must be at least 1",
            });
        }
        if self.boss_level_interval == 0 {
            return Err(TuningError::Invalid {
                field: "boss_level_interval",
                reason: "must be at least 1",
            });
        }
        if self.boss_hp <= 0 {
            return Err(TuningError::Invalid {
                field: "boss_hp",
                reason: "must be greater than zero",
            });
        }
        for (field, value) in [
            ("spawn_clearance", self.spawn_clearance),
            ("gravity_strength", self.gravity_strength),
            ("boss_sway_x", self.boss_sway_x),
            ("boss_sway_z", self.boss_sway_z),
            ("boss_sway_rate_x", self.boss_sway_rate_x),
            ("boss_sway_rate_z", self.boss_sway_rate_z),
        ] {
            if !(value >= 0.0) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must not be negative",
                });
            }
        }
        for (field, value) in [
            ("boss_hover_height", self.boss_hover_height),
            ("boss_spawn_z", self.boss_spawn_z),
            ("boss_sway_center_z", self.boss_sway_center_z),
        ] {
            if !value.is_finite() {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be a finite number",
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_overrides() {
        let tuning = Tuning::from_json(r#"{ "player_speed": 0.4, "boss_hp": 20 }"#).unwrap();
        assert_eq!(tuning.player_speed, 0.4);
        assert_eq!(tuning.boss_hp, 20);
        assert_eq!(tuning.bullet_speed, BULLET_SPEED);
    }

    #[test]
    fn test_rejects_bad_probability() {
        let err = Tuning::from_json(r#"{ "boss_fire_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "boss_fire_chance",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_shrinking_combo() {
        let err = Tuning::from_json(r#"{ "combo_factor": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "combo_factor",
                ..
            }
        ));
        assert!(Tuning::from_json(r#"{ "combo_factor": 1 }"#).is_ok());
    }

    #[test]
    fn test_rejects_non_positive_speed_boost() {
        for json in [r#"{ "speed_boost_factor": 0.0 }"#, r#"{ "speed_boost_factor": -1.5 }"#] {
            let err = Tuning::from_json(json).unwrap_err();
            assert!(err.to_string().contains("speed_boost_factor"));
        }
    }

    #[test]
    fn test_rejects_inverted_speed_range() {
        let err =
            Tuning::from_json(r#"{ "enemy_speed_min": 0.2, "enemy_speed_max": 0.1 }"#).unwrap_err();
        assert!(err.to_string().contains("enemy_speed_max"));
    }

    #[test]
    fn test_boss_path_is_tunable() {
        let tuning =
            Tuning::from_json(r#"{ "boss_hover_height": 8.0, "boss_sway_x": 0.0 }"#).unwrap();
        assert_eq!(tuning.boss_hover_height, 8.0);
        assert_eq!(tuning.boss_sway_x, 0.0);
        assert_eq!(tuning.boss_spawn_z, BOSS_SPAWN_Z);

        let err = Tuning::from_json(r#"{ "boss_sway_rate_z": -0.3 }"#).unwrap_err();
        assert!(err.to_string().contains("boss_sway_rate_z"));
    }

    #[test]
    fn test_malformed_json() {
        let err = Tuning::from_json("{ nope").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_json_round_trip_of_defaults() {
        let json = Tuning::default().to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), Tuning::default());
    }
}
