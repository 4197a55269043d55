use moto_racer::Session;
use moto_racer::consts::*;
use moto_racer::persistence::{BEST_SCORE_KEY, MemoryStorage, Storage};
use moto_racer::platform::InputEvent;
use moto_racer::sim::{Coin, GameEvent, GamePhase, Obstacle, ObstacleColor};

const FRAME: f32 = 1.0 / 60.0;

fn running_session(seed: u64) -> Session<MemoryStorage> {
    let mut session = Session::new(MemoryStorage::new(), seed);
    assert!(session.start());
    session
}

/// Drop an obstacle right on top of the player and step once
fn crash(session: &mut Session<MemoryStorage>) -> Vec<GameEvent> {
    let rect = session.state().player.rect();
    session.state_mut().obstacles.push(Obstacle {
        pos: rect.pos,
        size: rect.size,
        color: ObstacleColor::Violet,
    });
    session.frame(FRAME)
}

// ── Scenario A: zero dt ───────────────────────────────────────────────────────

#[test]
fn zero_dt_frames_change_nothing() {
    let mut session = running_session(1);
    let before = session.state().clone();
    for _ in 0..100 {
        assert!(session.frame(0.0).is_empty());
    }
    assert_eq!(session.state(), &before);
    assert_eq!(session.state().speed, BASE_SPEED);
    assert_eq!(session.state().elapsed, 0.0);
}

// ── Scenario B: coin collection ──────────────────────────────────────────────

#[test]
fn centered_coin_is_collected_exactly_once() {
    let mut session = running_session(2);
    // Push spawns out so only our coin is on the road
    session.state_mut().next_obstacle = 100.0;
    session.state_mut().next_coin = 100.0;
    let center = session.state().player.rect().center();
    session.state_mut().coins.push(Coin {
        pos: center,
        radius: COIN_RADIUS,
    });

    let events = session.frame(FRAME);
    let collected: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, GameEvent::CoinCollected { .. }))
        .collect();
    assert_eq!(collected, vec![&GameEvent::CoinCollected { bonus: COIN_BONUS }]);
    assert!(session.state().coins.is_empty());
    assert!(session.score() >= COIN_BONUS);
    assert!(session.score() < 2 * COIN_BONUS);
}

// ── Scenario C: crash short-circuits the frame ───────────────────────────────

#[test]
fn crash_ends_run_on_that_frame_without_scoring() {
    let mut session = running_session(3);
    session.frame(FRAME);
    let score = session.score();
    let center = session.state().player.rect().center();
    session.state_mut().coins.push(Coin {
        pos: center,
        radius: COIN_RADIUS,
    });

    let events = crash(&mut session);
    assert!(events.contains(&GameEvent::Crashed { score }));
    assert_eq!(session.phase(), GamePhase::GameOver);
    assert_eq!(session.score(), score);
    assert!(session.state().coins.iter().any(|c| c.pos.x == center.x));
    assert!(!session.state().player.alive);

    let frozen = session.state().clone();
    session.frame(FRAME);
    session.frame_at(5000.0);
    assert_eq!(session.state(), &frozen);
}

// ── Scenario D: best score persistence ───────────────────────────────────────

#[test]
fn best_score_updates_only_when_beaten() {
    let mut session = running_session(4);
    assert_eq!(session.best(), 0);

    session.state_mut().score = 500;
    crash(&mut session);
    assert_eq!(session.best(), 500);
    assert_eq!(
        session.storage().get(BEST_SCORE_KEY).unwrap().as_deref(),
        Some("500")
    );

    assert!(session.play());
    session.state_mut().score = 300;
    crash(&mut session);
    assert_eq!(session.phase(), GamePhase::GameOver);
    assert_eq!(session.best(), 500);
    assert_eq!(
        session.storage().get(BEST_SCORE_KEY).unwrap().as_deref(),
        Some("500")
    );
}

#[test]
fn persisted_best_is_loaded_at_startup() {
    let storage = MemoryStorage::with_entry(BEST_SCORE_KEY, "1234");
    let session = Session::new(storage, 5);
    assert_eq!(session.best(), 1234);

    let storage = MemoryStorage::with_entry(BEST_SCORE_KEY, "not a number");
    let session = Session::new(storage, 5);
    assert_eq!(session.best(), 0);
}

#[test]
fn equal_score_does_not_write() {
    let storage = MemoryStorage::with_entry(BEST_SCORE_KEY, "200");
    let mut session = Session::new(storage, 6);
    session.start();
    session.state_mut().score = 200;
    crash(&mut session);
    assert_eq!(session.best(), 200);
    assert_eq!(session.storage().len(), 1);
}

// ── Scenario E: pause freezes everything ─────────────────────────────────────

#[test]
fn paused_frames_leave_state_byte_identical() {
    let mut session = running_session(7);
    session.handle_event(InputEvent::SteerLeft { pressed: true });
    session.handle_event(InputEvent::Boost { pressed: true });
    for _ in 0..30 {
        session.frame(FRAME);
    }
    assert_eq!(session.phase(), GamePhase::Running);

    session.handle_event(InputEvent::PauseToggle);
    assert_eq!(session.phase(), GamePhase::Paused);
    let snapshot = serde_json::to_string(session.state()).unwrap();
    for i in 0..120 {
        session.frame(FRAME);
        session.frame_at(i as f64 * 16.0);
    }
    assert_eq!(serde_json::to_string(session.state()).unwrap(), snapshot);

    session.handle_event(InputEvent::PauseToggle);
    assert_eq!(session.phase(), GamePhase::Running);
    session.frame(FRAME);
    assert_ne!(serde_json::to_string(session.state()).unwrap(), snapshot);
}

// ── reset idempotence ────────────────────────────────────────────────────────

#[test]
fn reset_twice_yields_same_initial_state() {
    let mut session = running_session(8);
    for _ in 0..90 {
        session.frame(FRAME);
    }
    session.reset();
    let mut first = session.state().clone();
    session.reset();
    let second = session.state().clone();

    // The RNG stream is the only field allowed to differ
    first.rng = second.rng.clone();
    assert_eq!(first, second);
    assert_eq!(second.score, 0);
    assert_eq!(second.phase, GamePhase::Idle);
    assert!(second.obstacles.is_empty() && second.coins.is_empty());
}

#[test]
fn play_button_ignored_mid_run() {
    let mut session = running_session(9);
    session.frame(FRAME);
    let elapsed = session.state().elapsed;
    session.handle_event(InputEvent::Play);
    assert_eq!(session.phase(), GamePhase::Running);
    assert_eq!(session.state().elapsed, elapsed);
}

#[test]
fn frame_clock_first_tick_after_start_is_noop() {
    let mut session = running_session(10);
    let before = session.state().clone();
    session.frame_at(123_456.0);
    assert_eq!(session.state(), &before);
    session.frame_at(123_472.0);
    assert!(session.state().elapsed > 0.0);
}

#[test]
fn cancel_policy_holds_player_still() {
    let mut session = running_session(11);
    let mut settings = session.settings().clone();
    settings.steer_conflict = moto_racer::SteerConflict::Cancel;
    session.set_settings(settings);
    session.state_mut().next_obstacle = 100.0;

    let x = session.state().player.pos.x;
    session.handle_event(InputEvent::SteerLeft { pressed: true });
    session.handle_event(InputEvent::SteerRight { pressed: true });
    session.frame(FRAME);
    assert_eq!(session.state().player.pos.x, x);
    assert_eq!(session.state().player.vx, 0.0);

}
