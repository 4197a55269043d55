//! Session controller
//!
//! Owns the Idle -> Running <-> Paused -> GameOver -> Idle state machine, the
//! held-input state, and the best-score handoff to storage.

use crate::consts::MAX_FRAME_DT;
use crate::persistence::{self, Storage};
use crate::platform::{InputEvent, InputState};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, tick};

/// Text for the splash / game-over overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub title: &'static str,
    pub subtitle: String,
    pub button: &'static str,
}

/// Converts animation-frame timestamps (ms) into clamped deltas (s)
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous timestamp; the next delta is 0
    pub fn restart(&mut self) {
        self.last_ms = None;
    }

    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0).min(MAX_FRAME_DT as f64) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }
}

/// One player's game session
pub struct Session<S: Storage> {
    state: GameState,
    best: u64,
    storage: S,
    settings: Settings,
    input: InputState,
    clock: FrameClock,
}

impl<S: Storage> Session<S> {
    /// Load best score and settings, then reset to the splash screen
    pub fn new(storage: S, seed: u64) -> Self {
        let best = persistence::load_best(&storage);
        let settings = Settings::load(&storage);
        let mut session = Self {
            state: GameState::new(seed),
            best,
            storage,
            settings,
            input: InputState::default(),
            clock: FrameClock::new(),
        };
        session.reset();
        session
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for tooling and tests
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.settings.save(&mut self.storage);
    }

    /// Fresh run state, back to Idle
    pub fn reset(&mut self) {
        self.state.reset();
        self.input.release_all();
        self.clock.restart();
        log::info!("Session reset (best {})", self.best);
    }

    /// Idle -> Running
    pub fn start(&mut self) -> bool {
        if self.state.phase != GamePhase::Idle {
            return false;
        }
        self.state.phase = GamePhase::Running;
        self.clock.restart();
        log::info!("Run started");
        true
    }

    /// Running -> Paused
    pub fn pause(&mut self) -> bool {
        if self.state.phase != GamePhase::Running {
            return false;
        }
        self.state.phase = GamePhase::Paused;
        log::info!("Paused at {:.1}s", self.state.elapsed);
        true
    }

    /// Paused -> Running
    pub fn resume(&mut self) -> bool {
        if self.state.phase != GamePhase::Paused {
            return false;
        }
        self.state.phase = GamePhase::Running;
        log::info!("Resumed");
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.state.phase {
            GamePhase::Running => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => false,
        }
    }

    /// Play / Play Again: reset and start from Idle or GameOver
    pub fn play(&mut self) -> bool {
        match self.state.phase {
            GamePhase::Idle | GamePhase::GameOver => {
                self.reset();
                self.start()
            }
            _ => false,
        }
    }

    /// End the run and persist the best score if it was beaten
    pub fn game_over(&mut self) {
        if !matches!(self.state.phase, GamePhase::Running | GamePhase::GameOver) {
            return;
        }
        self.state.phase = GamePhase::GameOver;
        self.state.player.alive = false;

        let score = self.state.score;
        if score > self.best {
            self.best = score;
            match persistence::save_best(&mut self.storage, score) {
                Ok(()) => log::info!("New best score {}", score),
                Err(e) => log::warn!("New best score {} not saved: {}", score, e),
            }
        }
        log::info!("Game over: score {} best {}", score, self.best);
    }

    /// Route an input edge
    pub fn handle_event(&mut self, event: InputEvent) {
        if self.input.apply(event) {
            return;
        }
        match event {
            InputEvent::PauseToggle => {
                self.toggle_pause();
            }
            InputEvent::Play => {
                self.play();
            }
            _ => {}
        }
    }

    /// Release held controls (window blur)
    pub fn release_input(&mut self) {
        self.input.release_all();
    }

    /// Advance one display frame by `dt` seconds
    pub fn frame(&mut self, dt: f32) -> Vec<GameEvent> {
        if self.state.phase != GamePhase::Running {
            return Vec::new();
        }
        let input = self.input.sample(self.settings.steer_conflict);
        let events = tick(&mut self.state, &input, dt);
        if events
            .iter()
            .any(|e| matches!(e, GameEvent::Crashed { .. }))
        {
            self.game_over();
        }
        events
    }

    /// Advance one display frame from an animation timestamp (ms)
    pub fn frame_at(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let dt = self.clock.delta(now_ms);
        self.frame(dt)
    }

    /// Overlay contents for the current phase, if any
    pub fn overlay(&self) -> Option<Overlay> {
        match self.state.phase {
            GamePhase::Idle => Some(Overlay {
                title: "Moto Racer",
                subtitle: "Tap Play to Start".to_string(),
                button: "Play",
            }),
            GamePhase::GameOver => Some(Overlay {
                title: "Game Over",
                subtitle: format!("Score: {} • Best: {}", self.state.score, self.best),
                button: "Play Again",
            }),
            GamePhase::Running | GamePhase::Paused => None,
        }
    }

    pub fn pause_label(&self) -> &'static str {
        if self.state.phase == GamePhase::Paused {
            "Resume"
        } else {
            "Pause"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    fn session() -> Session<MemoryStorage> {
        Session::new(MemoryStorage::new(), 42)
    }

    #[test]
    fn test_starts_idle_with_splash_overlay() {
        let s = session();
        assert_eq!(s.phase(), GamePhase::Idle);
        let overlay = s.overlay().unwrap();
        assert_eq!(overlay.title, "Moto Racer");
        assert_eq!(overlay.button, "Play");
    }

    #[test]
    fn test_state_machine_transitions() {
        let mut s = session();
        assert!(!s.pause());
        assert!(!s.resume());
        assert!(s.start());
        assert!(!s.start());
        assert!(s.pause());
        assert_eq!(s.pause_label(), "Resume");
        assert!(s.resume());
        assert_eq!(s.pause_label(), "Pause");
        assert!(!s.play());
        assert!(s.overlay().is_none());
    }

    #[test]
    fn test_idle_frames_are_noops() {
        let mut s = session();
        let before = s.state().clone();
        s.frame(0.016);
        assert_eq!(s.state(), &before);
    }

    #[test]
    fn test_frame_clock() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(1000.0), 0.0);
        assert!((clock.delta(1016.0) - 0.016).abs() < 0.0001);
        assert_eq!(clock.delta(9000.0), MAX_FRAME_DT);
        clock.restart();
        assert_eq!(clock.delta(9500.0), 0.0);
    }

    #[test]
    fn test_game_over_overlay_text() {
        let mut s = session();
        s.start();
        s.state_mut().score = 120;
        s.game_over();
        let overlay = s.overlay().unwrap();
        assert_eq!(overlay.title, "Game Over");
        assert_eq!(overlay.subtitle, "Score: 120 • Best: 120");
        assert_eq!(overlay.button, "Play Again");
        assert!(!s.state().player.alive);
    }

    #[test]
    fn test_game_over_ignored_when_idle() {
        let mut s = session();
        s.state_mut().score = 10;
        s.game_over();
        assert_eq!(s.phase(), GamePhase::Idle);
        assert_eq!(s.best(), 0);
    }

    #[test]
    fn test_failed_save_still_updates_best() {
        let mut s = Session::new(MemoryStorage::unavailable(), 1);
        s.start();
        s.state_mut().score = 77;
        s.game_over();
        assert_eq!(s.best(), 77);
    }

    #[test]
    fn test_play_again_resets() {
        let mut s = session();
        s.start();
        s.state_mut().score = 5;
        s.game_over();
        assert!(s.play());
        assert_eq!(s.phase(), GamePhase::Running);
        assert_eq!(s.score(), 0);
        assert!(s.state().player.alive);
    }
}
