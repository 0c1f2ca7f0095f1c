//! Frame driver
//!
//! Owns the session, turns input callbacks into tick commands, runs one tick
//! per rendered frame and forwards events and state to the presentation layer.

use glam::Vec3;

use crate::sim::{GameEvent, GameState, PowerUpKind, Snapshot, TickInput, tick};

/// The presentation side: renderer, effects, HUD
///
/// Event callbacks default to no-ops so a presenter only implements what it
/// draws.
pub trait Presenter {
    fn on_explosion(&mut self, _position: Vec3) {}
    fn on_power_up_collected(&mut self, _position: Vec3, _kind: PowerUpKind) {}
    fn on_shockwave(&mut self, _position: Vec3) {}
    fn on_game_over(&mut self, _final_score: u64) {}
    fn on_level_up(&mut self, _level: u32) {}
    /// Every other event (boss arrival, ability start/stop)
    fn on_event(&mut self, _event: &GameEvent) {}

    /// Sync visuals with the state after a tick
    fn present(&mut self, state: &GameState);
}

pub struct FrameDriver<P: Presenter> {
    state: GameState,
    presenter: P,
    /// Commands collected since the last frame
    pending: TickInput,
    frames: u64,
}

impl<P: Presenter> FrameDriver<P> {
    pub fn new(state: GameState, presenter: P) -> Self {
        Self {
            state,
            presenter,
            pending: TickInput::default(),
            frames: 0,
        }
    }

    pub fn on_shoot(&mut self) {
        self.pending.shoot = true;
    }

    pub fn on_activate_time_warp(&mut self) {
        self.pending.time_warp = true;
    }

    pub fn on_activate_hyper_jump(&mut self) {
        self.pending.hyper_jump = true;
    }

    /// Run one frame: tick, dispatch events, present
    ///
    /// `elapsed` is the real time since the previous frame. Movement is per
    /// frame, but lifespans and ability timers consume the full elapsed time,
    /// so slow frames never stretch them.
    pub fn frame(&mut self, elapsed: f32, pointer_target: Option<Vec3>) {
        let dt = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };

        let mut input = std::mem::take(&mut self.pending);
        input.pointer_target = pointer_target;
        tick(&mut self.state, &input, dt);
        self.frames += 1;

        for event in self.state.drain_events() {
            dispatch(&mut self.presenter, &event);
        }
        self.presenter.present(&self.state);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }
}

fn dispatch<P: Presenter>(presenter: &mut P, event: &GameEvent) {
    match *event {
        GameEvent::Explosion { position } => presenter.on_explosion(position),
        GameEvent::PowerUpCollected { position, kind } => {
            presenter.on_power_up_collected(position, kind)
        }
        GameEvent::Shockwave { position } => presenter.on_shockwave(position),
        GameEvent::GameOver { final_score } => presenter.on_game_over(final_score),
        GameEvent::LevelUp { level } => presenter.on_level_up(level),
        _ => presenter.on_event(event),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{BlackHole, Enemy, EntityId, HyperJump, PowerUp};
    use crate::tuning::Tuning;

    #[derive(Default)]
    struct Recorder {
        explosions: Vec<Vec3>,
        pickups: Vec<PowerUpKind>,
        game_over: Option<u64>,
        others: Vec<GameEvent>,
        presented: u32,
    }

    impl Presenter for Recorder {
        fn on_explosion(&mut self, position: Vec3) {
            self.explosions.push(position);
        }

        fn on_power_up_collected(&mut self, _position: Vec3, kind: PowerUpKind) {
            self.pickups.push(kind);
        }

        fn on_game_over(&mut self, final_score: u64) {
            self.game_over = Some(final_score);
        }

        fn on_event(&mut self, event: &GameEvent) {
            self.others.push(event.clone());
        }

        fn present(&mut self, _state: &GameState) {
            self.presented += 1;
        }
    }

    #[test]
    fn test_commands_apply_on_next_frame_only() {
        let state = GameState::blank(1, Tuning::default());
        let mut driver = FrameDriver::new(state, Recorder::default());

        driver.on_shoot();
        driver.on_activate_time_warp();
        driver.frame(1.0 / 60.0, None);
        assert_eq!(driver.state().bullets.len(), 1);
        assert!(driver.presenter().others.contains(&GameEvent::TimeWarpStarted));

        driver.frame(1.0 / 60.0, None);
        assert_eq!(driver.state().bullets.len(), 1);
        assert_eq!(driver.presenter().presented, 2);
        assert_eq!(driver.frames(), 2);
    }

    #[test]
    fn test_bad_frame_delta_counts_as_zero() {
        let state = GameState::blank(1, Tuning::default());
        let mut driver = FrameDriver::new(state, Recorder::default());
        driver.frame(0.25, None);
        driver.frame(f32::NAN, None);
        driver.frame(-1.0, None);
        driver.frame(f32::INFINITY, None);
        assert!((driver.state().clock - 0.25).abs() < 1e-9);
        assert_eq!(driver.frames(), 4);
    }

    #[test]
    fn test_slow_frames_keep_real_time() {
        let mut state = GameState::blank(1, Tuning::default());
        state.black_holes.add(BlackHole {
            id: EntityId(60),
            position: Vec3::new(30.0, 0.5, 30.0),
            lifespan: 10.0,
            spin: 0.0,
        });
        let mut driver = FrameDriver::new(state, Recorder::default());

        // Two frames per second for twelve seconds
        for _ in 0..24 {
            driver.frame(0.5, None);
        }
        assert!((driver.state().clock - 12.0).abs() < 1e-6);
        assert!(driver.state().black_holes.is_empty());
    }

    #[test]
    fn test_slow_frames_recharge_hyper_jump_on_time() {
        let state = GameState::blank(1, Tuning::default());
        let mut driver = FrameDriver::new(state, Recorder::default());

        // Triggered on the first frame, at 0.5 s
        driver.on_activate_hyper_jump();
        driver.frame(0.5, None);
        assert_eq!(driver.state().hyper_jump, HyperJump::Cooldown);

        for _ in 0..59 {
            driver.frame(0.5, None);
        }
        assert_eq!(driver.state().hyper_jump, HyperJump::Cooldown);

        driver.frame(0.5, None);
        assert!((driver.state().clock - 30.5).abs() < 1e-6);
        assert_eq!(driver.state().hyper_jump, HyperJump::Ready);
        assert!(driver.presenter().others.contains(&GameEvent::HyperJumpRecharged));
    }

    #[test]
    fn test_events_reach_presenter() {
        let mut state = GameState::blank(1, Tuning::default());
        state.power_ups.add(PowerUp {
            id: EntityId(50),
            position: Vec3::new(0.3, 0.5, 0.0),
            kind: PowerUpKind::SpeedBoost,
            spin: 0.0,
        });
        state.enemies.add(Enemy {
            id: EntityId(51),
            position: Vec3::new(0.0, 0.5, 0.9),
            speed: 0.0,
            arrived_via: None,
        });
        let mut driver = FrameDriver::new(state, Recorder::default());

        // Enemy contact ends the game before the power-up pass runs
        driver.frame(1.0 / 60.0, None);
        assert_eq!(driver.presenter().game_over, Some(0));
        assert!(driver.presenter().pickups.is_empty());
        assert!(driver.presenter().explosions.is_empty());
        assert!(driver.is_game_over());
    }
}
