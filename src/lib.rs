//! Moto Racer - An endless lane-dodging road racer
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (movement, spawning, collisions, scoring)
//! - `session`: Idle/running/paused/game-over state machine and best score handoff
//! - `renderer`: WebGPU presentation adapter
//! - `platform`: Browser/native platform abstraction (input sampling)
//! - `persistence`: Best score and settings storage

pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::{FrameClock, Overlay, Session};
pub use settings::{SteerConflict, Settings};

/// Game configuration constants
pub mod consts {
    /// Logical playfield size (portrait)
    pub const WIDTH: f32 = 360.0;
    pub const HEIGHT: f32 = 640.0;

    /// Maximum simulated time per frame (seconds), bounds a stalled tab
    pub const MAX_FRAME_DT: f32 = 1.0;

    /// Road layout
    pub const LANE_COUNT: u32 = 3;
    pub const LANE_WIDTH: f32 = WIDTH * 0.20;
    pub const ROAD_MARGIN: f32 = 20.0;
    pub const ROAD_WIDTH: f32 = LANE_WIDTH * LANE_COUNT as f32 + ROAD_MARGIN * 2.0;
    pub const ROAD_X: f32 = (WIDTH - ROAD_WIDTH) / 2.0;
    /// Leftmost x the player may occupy
    pub const ROAD_LEFT: f32 = ROAD_X + ROAD_MARGIN;
    /// Rightmost x the player's right edge may reach
    pub const ROAD_RIGHT: f32 = ROAD_X + ROAD_WIDTH - ROAD_MARGIN;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = LANE_WIDTH * 0.6;
    pub const PLAYER_HEIGHT: f32 = LANE_WIDTH * 1.1;
    pub const PLAYER_Y: f32 = HEIGHT - 140.0;
    pub const PLAYER_START_LANE: u32 = 1;
    /// Lateral speed while steering (px/s)
    pub const STEER_SPEED: f32 = 260.0;

    /// Forward speed at the start of a run (px/s)
    pub const BASE_SPEED: f32 = 220.0;
    /// Linear difficulty ramp (px/s gained per second)
    pub const SPEED_RAMP: f32 = 6.0;

    /// Boost target while held, also the boost cap (px/s)
    pub const BOOST_MAX: f32 = 140.0;
    /// Exponential easing rate toward the boost target (1/s)
    pub const BOOST_EASE_RATE: f32 = 8.0;

    /// Lane divider lines
    pub const LINE_WIDTH: f32 = 8.0;
    pub const LINE_HEIGHT: f32 = 28.0;
    pub const LINE_PERIOD: f32 = 48.0;
    pub const LINE_FIRST_ROW: i32 = -10;
    pub const LINE_LAST_ROW: i32 = 20;
    /// Lines scroll slower than traffic (parallax)
    pub const LINE_PARALLAX: f32 = 0.9;
    pub const LINE_WRAP_MARGIN: f32 = 30.0;

    /// Obstacle sizing as fractions of lane width
    pub const OBSTACLE_WIDTH_RANGE: (f32, f32) = (0.55, 0.7);
    pub const OBSTACLE_HEIGHT_RANGE: (f32, f32) = (1.0, 1.3);
    /// Base respawn interval range (seconds), scaled by difficulty
    pub const OBSTACLE_INTERVAL_RANGE: (f32, f32) = (0.7, 1.3);
    pub const DIFFICULTY_START: f32 = 1.6;
    pub const DIFFICULTY_DECAY: f32 = 0.03;
    pub const DIFFICULTY_FLOOR: f32 = 0.5;

    /// Coins
    pub const COIN_RADIUS: f32 = 8.0;
    pub const COIN_START_Y: f32 = -20.0;
    pub const COIN_INTERVAL_RANGE: (f32, f32) = (0.8, 1.6);
    pub const COIN_BONUS: u64 = 25;

    /// Entities past `HEIGHT + margin` are pruned
    pub const OBSTACLE_PRUNE_MARGIN: f32 = 60.0;
    pub const COIN_PRUNE_MARGIN: f32 = 20.0;

    /// Passive score per pixel travelled
    pub const DISTANCE_SCORE_RATE: f32 = 0.15;
}

/// Left edge of a lane
#[inline]
pub fn lane_left(lane: u32) -> f32 {
    consts::ROAD_LEFT + lane as f32 * consts::LANE_WIDTH
}

/// Horizontal centre of a lane
#[inline]
pub fn lane_center(lane: u32) -> f32 {
    lane_left(lane) + consts::LANE_WIDTH / 2.0
}

/// Clamp a player x so that `[x, x + width]` stays on the road
#[inline]
pub fn clamp_to_road(x: f32, width: f32) -> f32 {
    x.min(consts::ROAD_RIGHT - width).max(consts::ROAD_LEFT)
}

#[cfg(test)]
mod tests {
    use super::consts::*;
    use super::*;

    #[test]
    fn test_lanes_span_road_interior() {
        assert!((lane_left(0) - ROAD_LEFT).abs() < 0.001);
        assert!((lane_left(LANE_COUNT) - ROAD_RIGHT).abs() < 0.001);
    }

    #[test]
    fn test_clamp_to_road() {
        assert_eq!(clamp_to_road(-100.0, PLAYER_WIDTH), ROAD_LEFT);
        assert_eq!(clamp_to_road(1000.0, PLAYER_WIDTH), ROAD_RIGHT - PLAYER_WIDTH);
        let mid = lane_left(1);
        assert_eq!(clamp_to_road(mid, PLAYER_WIDTH), mid);
    }
}
