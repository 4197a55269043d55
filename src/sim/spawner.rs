//! Obstacle and coin generation
//!
//! Spawns depend only on the fixed lane geometry and the RNG handed in, so any
//! `Rng` can drive them (the game uses the state's seeded `Pcg32`).

use glam::Vec2;
use rand::Rng;

use super::state::{Coin, Obstacle, ObstacleColor};
use crate::consts::*;
use crate::{lane_center, lane_left};

/// Create an obstacle in a random lane, fully above the visible area
pub fn spawn_obstacle<R: Rng + ?Sized>(rng: &mut R) -> Obstacle {
    let lane = rng.random_range(0..LANE_COUNT);
    let w = LANE_WIDTH * rng.random_range(OBSTACLE_WIDTH_RANGE.0..OBSTACLE_WIDTH_RANGE.1);
    let h = LANE_WIDTH * rng.random_range(OBSTACLE_HEIGHT_RANGE.0..OBSTACLE_HEIGHT_RANGE.1);
    let color = ObstacleColor::ALL[rng.random_range(0..ObstacleColor::ALL.len())];
    Obstacle {
        pos: Vec2::new(lane_left(lane) + (LANE_WIDTH - w) / 2.0, -h),
        size: Vec2::new(w, h),
        color,
    }
}

/// Create a coin at the centre of a random lane
pub fn spawn_coin<R: Rng + ?Sized>(rng: &mut R) -> Coin {
    let lane = rng.random_range(0..LANE_COUNT);
    Coin {
        pos: Vec2::new(lane_center(lane), COIN_START_Y),
        radius: COIN_RADIUS,
    }
}

/// Obstacle pacing multiplier: shrinks with elapsed time, never below the floor
#[inline]
pub fn difficulty_factor(elapsed: f32) -> f32 {
    (DIFFICULTY_START - elapsed * DIFFICULTY_DECAY).max(DIFFICULTY_FLOOR)
}

/// Seconds until the next obstacle
pub fn obstacle_interval<R: Rng + ?Sized>(rng: &mut R, elapsed: f32) -> f32 {
    rng.random_range(OBSTACLE_INTERVAL_RANGE.0..OBSTACLE_INTERVAL_RANGE.1)
        * difficulty_factor(elapsed)
}

/// Seconds until the next coin (time-invariant)
pub fn coin_interval<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(COIN_INTERVAL_RANGE.0..COIN_INTERVAL_RANGE.1)
}
