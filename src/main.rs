//! Gravwell headless runner
//!
//! Drives the simulation with a scripted pointer and input pattern, logging
//! what a renderer would draw. Useful for balance checks and soak runs.
//!
//! Usage: `gravwell [tuning.json]` (or set `GRAVWELL_TUNING`).
//! `GRAVWELL_SEED` and `GRAVWELL_FRAMES` override the seed and frame budget.

use glam::Vec3;

use gravwell::consts::GROUND_OFFSET;
use gravwell::sim::{GameEvent, GameState, PowerUpKind};
use gravwell::{FrameDriver, Presenter, Tuning, pointer_ray_to_ground};

/// Camera hangs straight above the arena
const CAMERA_POS: Vec3 = Vec3::new(0.0, 40.0, 0.0);
const FRAME_DT: f32 = 1.0 / 60.0;
const DEFAULT_FRAMES: u64 = 60 * 120;
const DEFAULT_SEED: u64 = 0x5EED;

/// Presenter that writes what it would draw to the log
#[derive(Default)]
struct LogPresenter {
    explosions: u32,
    pickups: u32,
    last_level: u32,
}

impl Presenter for LogPresenter {
    fn on_explosion(&mut self, position: Vec3) {
        self.explosions += 1;
        log::debug!("Explosion at ({:.1}, {:.1})", position.x, position.z);
    }

    fn on_power_up_collected(&mut self, position: Vec3, kind: PowerUpKind) {
        self.pickups += 1;
        log::info!("Picked up {:?} at ({:.1}, {:.1})", kind, position.x, position.z);
    }

    fn on_shockwave(&mut self, position: Vec3) {
        log::info!("Shockwave at ({:.1}, {:.1})", position.x, position.z);
    }

    fn on_game_over(&mut self, final_score: u64) {
        log::warn!("GAME OVER - final score {}", final_score);
    }

    fn on_level_up(&mut self, level: u32) {
        self.last_level = level;
    }

    fn on_event(&mut self, event: &GameEvent) {
        log::debug!("{:?}", event);
    }

    fn present(&mut self, state: &GameState) {
        if state.time_ticks % 300 == 0 {
            log::info!(
                "t={:.1}s level {} score {} combo {} | {} enemies, {} bullets, boss {:?}",
                state.clock,
                state.level,
                state.score,
                state.combo,
                state.enemies.len(),
                state.bullets.len(),
                state.boss.as_ref().map(|b| b.hp)
            );
        }
    }
}

fn load_tuning() -> Tuning {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("GRAVWELL_TUNING").ok());
    let Some(path) = path else {
        return Tuning::default();
    };
    match Tuning::load(&path) {
        Ok(tuning) => tuning,
        Err(e) => {
            log::warn!("Ignoring tuning file {}: {}", path, e);
            Tuning::default()
        }
    }
}

fn env_number(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Pointer sweeping a slow circle, projected the way a mouse ray would be
fn scripted_pointer(frame: u64) -> Option<Vec3> {
    let t = frame as f32 * FRAME_DT;
    let cursor = Vec3::new((t * 0.4).cos() * 15.0, GROUND_OFFSET, (t * 0.4).sin() * 15.0);
    let ray = (cursor - CAMERA_POS).normalize_or_zero();
    pointer_ray_to_ground(CAMERA_POS, ray, 0.0)
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let tuning = load_tuning();
    let seed = env_number("GRAVWELL_SEED", DEFAULT_SEED);
    let frames = env_number("GRAVWELL_FRAMES", DEFAULT_FRAMES);

    log::info!("Gravwell starting (seed {:#x}, {} frames)", seed, frames);
    let state = GameState::with_tuning(seed, tuning);
    let mut driver = FrameDriver::new(state, LogPresenter::default());

    for frame in 0..frames {
        if frame % 8 == 0 {
            driver.on_shoot();
        }
        if frame % 900 == 120 {
            driver.on_activate_time_warp();
        }
        if frame % 1800 == 600 {
            driver.on_activate_hyper_jump();
        }

        driver.frame(FRAME_DT, scripted_pointer(frame));
        if driver.is_game_over() {
            break;
        }
    }

    let presenter = driver.presenter();
    log::info!(
        "Ran {} frames: {} explosions, {} pickups, reached level {}",
        driver.frames(),
        presenter.explosions,
        presenter.pickups,
        presenter.last_level.max(driver.state().level)
    );

    match serde_json::to_string_pretty(&driver.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}
