//! Variable timestep simulation tick
//!
//! Advances a running [`GameState`] by one display frame: steering, boost,
//! scrolling, spawning, collisions and scoring, in that order.

use super::geometry::{circle_rect_overlap, rects_overlap};
use super::spawner::{coin_interval, obstacle_interval, spawn_coin, spawn_obstacle};
use super::state::{GamePhase, GameState};
use crate::clamp_to_road;
use crate::consts::*;

/// Input snapshot for a single tick, sampled once at the start of the frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub boost: bool,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ObstacleSpawned,
    CoinSpawned,
    CoinCollected { bonus: u64 },
    /// The player hit an obstacle; the run is over
    Crashed { score: u64 },
}

/// Lateral velocity for the held keys. Left is checked first, so holding
/// both steers left.
#[inline]
pub fn steer_velocity(input: &TickInput) -> f32 {
    if input.left {
        -STEER_SPEED
    } else if input.right {
        STEER_SPEED
    } else {
        0.0
    }
}

/// Ease `boost` toward its target. The step fraction is capped at 1 so a
/// large `dt` lands on the target instead of overshooting it.
#[inline]
pub fn ease_boost(boost: f32, boosting: bool, dt: f32) -> f32 {
    let target = if boosting { BOOST_MAX } else { 0.0 };
    let eased = boost + (target - boost) * (dt * BOOST_EASE_RATE).min(1.0);
    eased.clamp(0.0, BOOST_MAX)
}

/// Advance the game state by `dt` seconds
///
/// Does nothing unless the state is [`GamePhase::Running`] and `dt > 0`.
/// `dt` is clamped to [`MAX_FRAME_DT`].
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase != GamePhase::Running {
        return events;
    }
    // Also rejects NaN
    if !(dt > 0.0) {
        return events;
    }
    let dt = dt.min(MAX_FRAME_DT);

    // Difficulty ramp
    state.elapsed += dt;
    state.speed += dt * SPEED_RAMP;

    // Steering
    let player = &mut state.player;
    player.vx = steer_velocity(input);
    player.pos.x = clamp_to_road(player.pos.x + player.vx * dt, player.size.x);

    state.boost = ease_boost(state.boost, input.boost, dt);
    let forward = state.forward_speed();

    // Divider lines scroll slightly slower than traffic
    for line in &mut state.lines {
        line.pos.y += forward * dt * LINE_PARALLAX;
        line.wrap();
    }

    // Spawning. A stalled frame spawns at most one of each and reschedules
    // from scratch, so a very negative timer never turns into a burst.
    state.next_obstacle -= dt;
    if state.next_obstacle <= 0.0 {
        state.next_obstacle = obstacle_interval(&mut state.rng, state.elapsed);
        let obstacle = spawn_obstacle(&mut state.rng);
        log::trace!("obstacle spawned at x={:.1}", obstacle.pos.x);
        state.obstacles.push(obstacle);
        events.push(GameEvent::ObstacleSpawned);
    }

    state.next_coin -= dt;
    if state.next_coin <= 0.0 {
        state.next_coin = coin_interval(&mut state.rng);
        let coin = spawn_coin(&mut state.rng);
        log::trace!("coin spawned at x={:.1}", coin.pos.x);
        state.coins.push(coin);
        events.push(GameEvent::CoinSpawned);
    }

    for obstacle in &mut state.obstacles {
        obstacle.pos.y += forward * dt;
    }
    for coin in &mut state.coins {
        coin.pos.y += forward * dt;
    }

    state
        .obstacles
        .retain(|o| o.pos.y <= HEIGHT + OBSTACLE_PRUNE_MARGIN);
    state.coins.retain(|c| c.pos.y <= HEIGHT + COIN_PRUNE_MARGIN);

    // Crash ends the run before anything else is scored this frame
    let player_rect = state.player.rect();
    if state
        .obstacles
        .iter()
        .any(|o| rects_overlap(&player_rect, &o.rect()))
    {
        state.phase = GamePhase::GameOver;
        state.player.alive = false;
        log::info!(
            "Crashed after {:.1}s with score {}",
            state.elapsed,
            state.score
        );
        events.push(GameEvent::Crashed { score: state.score });
        return events;
    }

    let before = state.coins.len();
    state
        .coins
        .retain(|c| !circle_rect_overlap(c.pos, c.radius, &player_rect));
    for _ in state.coins.len()..before {
        state.score += COIN_BONUS;
        events.push(GameEvent::CoinCollected { bonus: COIN_BONUS });
    }

    // Distance score
    state.score += (forward * dt * DISTANCE_SCORE_RATE).floor() as u64;

    events
}
