//! Game state and core simulation types
//!
//! One [`GameState`] exists per session. Every component reads and mutates it
//! through `&mut`, so there is no other shared mutable state.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{
    BlackHole, Boss, Enemy, EntityId, Player, PowerUp, PowerUpKind, Projectile, Wormhole,
};
use super::store::EntityStore;
use super::timers::{TimerEffect, TimerQueue};
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Terminal: nothing mutates gameplay state any more
    GameOver,
}

/// Time warp ability state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeWarp {
    Idle,
    Active,
}

/// Hyper jump ability state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HyperJump {
    Ready,
    Cooldown,
}

/// A hyper jump dash in flight (spans many ticks)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpRun {
    /// Unit heading locked in at activation
    pub heading: Vec3,
    /// Distance covered so far
    pub traveled: f32,
}

/// Events emitted for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Explosion { position: Vec3 },
    PowerUpCollected { position: Vec3, kind: PowerUpKind },
    Shockwave { position: Vec3 },
    GameOver { final_score: u64 },
    LevelUp { level: u32 },
    BossSpawned { position: Vec3 },
    TimeWarpStarted,
    TimeWarpEnded,
    HyperJumpStarted,
    HyperJumpRecharged,
}

/// Read-only summary handed to renderers and HUDs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub level: u32,
    pub score: u64,
    pub combo: u32,
    pub phase: GamePhase,
    pub time_ticks: u64,
    pub player_position: Vec3,
    pub player_facing: Vec3,
    pub player_speed: f32,
    pub enemies: usize,
    pub bullets: usize,
    pub power_ups: usize,
    pub wormholes: usize,
    pub black_holes: usize,
    pub boss_bullets: usize,
    pub boss_hp: Option<i32>,
    pub time_warp: TimeWarp,
    pub time_warp_remaining: Option<f32>,
    pub hyper_jump: HyperJump,
    pub hyper_jump_cooldown: Option<f32>,
    /// Fraction of the active dash completed (0..1)
    pub hyper_jump_progress: Option<f32>,
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
    /// Balance knobs this session runs with
    pub tuning: Tuning,
    /// Current level (starts at 1)
    pub level: u32,
    pub score: u64,
    /// Score multiplier (starts at 1, only ever grows)
    pub combo: u32,
    pub phase: GamePhase,
    /// Seconds of simulated time
    pub clock: f64,
    pub time_ticks: u64,
    pub player: Player,
    pub enemies: EntityStore<Enemy>,
    pub bullets: EntityStore<Projectile>,
    pub power_ups: EntityStore<PowerUp>,
    pub wormholes: EntityStore<Wormhole>,
    pub black_holes: EntityStore<BlackHole>,
    pub boss: Option<Boss>,
    pub boss_bullets: EntityStore<Projectile>,
    pub time_warp: TimeWarp,
    pub hyper_jump: HyperJump,
    pub jump: Option<JumpRun>,
    pub timers: TimerQueue,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// New session with default tuning and the opening wave
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// New session with the opening wave spawned
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self::blank(seed, tuning);
        state.spawn_level_wave();
        log::info!(
            "Session started (seed {}): {} enemies, {} wormholes, {} power-ups",
            seed,
            state.enemies.len(),
            state.wormholes.len(),
            state.power_ups.len()
        );
        state
    }

    /// Session with only the player in the arena
    pub fn blank(seed: u64, tuning: Tuning) -> Self {
        let player = Player::new(Vec3::new(0.0, tuning.ground_offset, 0.0), tuning.player_speed);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            level: 1,
            score: 0,
            combo: 1,
            phase: GamePhase::Playing,
            clock: 0.0,
            time_ticks: 0,
            player,
            enemies: EntityStore::new(),
            bullets: EntityStore::new(),
            power_ups: EntityStore::new(),
            wormholes: EntityStore::new(),
            black_holes: EntityStore::new(),
            boss: None,
            boss_bullets: EntityStore::new(),
            time_warp: TimeWarp::Idle,
            hyper_jump: HyperJump::Ready,
            jump: None,
            timers: TimerQueue::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every event produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Award `base × combo` points
    pub fn award(&mut self, base: u64) {
        self.score = self.score.saturating_add(base.saturating_mul(u64::from(self.combo)));
    }

    /// Enter the terminal phase (only the first call has any effect)
    pub fn game_over(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.phase = GamePhase::GameOver;
        log::info!("Game over at level {} with score {}", self.level, self.score);
        self.emit(GameEvent::GameOver {
            final_score: self.score,
        });
    }

    /// Drop entities marked during the tick from every collection
    pub fn sweep_all(&mut self) {
        self.enemies.sweep();
        self.bullets.sweep();
        self.power_ups.sweep();
        self.wormholes.sweep();
        self.black_holes.sweep();
        self.boss_bullets.sweep();
    }

    pub fn time_warp_remaining(&self) -> Option<f32> {
        match self.time_warp {
            TimeWarp::Active => self.timers.remaining(self.clock, TimerEffect::TimeWarpExpired),
            TimeWarp::Idle => None,
        }
    }

    pub fn hyper_jump_cooldown(&self) -> Option<f32> {
        match self.hyper_jump {
            HyperJump::Cooldown => self
                .timers
                .remaining(self.clock, TimerEffect::HyperJumpRecharged),
            HyperJump::Ready => None,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            level: self.level,
            score: self.score,
            combo: self.combo,
            phase: self.phase,
            time_ticks: self.time_ticks,
            player_position: self.player.position,
            player_facing: self.player.facing,
            player_speed: self.player.speed,
            enemies: self.enemies.len(),
            bullets: self.bullets.len(),
            power_ups: self.power_ups.len(),
            wormholes: self.wormholes.len(),
            black_holes: self.black_holes.len(),
            boss_bullets: self.boss_bullets.len(),
            boss_hp: self.boss.as_ref().map(|b| b.hp),
            time_warp: self.time_warp,
            time_warp_remaining: self.time_warp_remaining(),
            hyper_jump: self.hyper_jump,
            hyper_jump_cooldown: self.hyper_jump_cooldown(),
            hyper_jump_progress: self
                .jump
                .map(|run| (run.traveled / self.tuning.hyper_jump_distance).min(1.0)),
        }
    }
}
