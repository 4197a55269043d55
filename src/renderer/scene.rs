//! Frame assembly
//!
//! Turns a read-only [`GameState`] into a triangle list. No GPU access here,
//! so frames can be inspected in tests.

use glam::Vec2;

use super::shapes::{circle, rect, rounded_rect};
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::sim::{GameState, ObstacleColor};

/// Corner radii
const ROAD_RADIUS: f32 = 18.0;
const LINE_RADIUS: f32 = 4.0;
const OBSTACLE_RADIUS: f32 = 6.0;
const PLAYER_RADIUS: f32 = 8.0;

/// Color set used to draw a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: [f32; 4],
    pub road: [f32; 4],
    pub lane_line: [f32; 4],
    pub coin: [f32; 4],
    pub player: [f32; 4],
    pub obstacles: [[f32; 4]; 4],
}

impl Palette {
    pub const CLASSIC: Palette = Palette {
        background: colors::BACKGROUND,
        road: colors::ROAD,
        lane_line: colors::LANE_LINE,
        coin: colors::COIN,
        player: colors::PLAYER,
        obstacles: [
            colors::OBSTACLE_RED,
            colors::OBSTACLE_BLUE,
            colors::OBSTACLE_YELLOW,
            colors::OBSTACLE_VIOLET,
        ],
    };

    pub const HIGH_CONTRAST: Palette = Palette {
        background: [0.0, 0.0, 0.0, 1.0],
        road: [0.15, 0.15, 0.15, 1.0],
        lane_line: [1.0, 1.0, 1.0, 1.0],
        coin: [1.0, 1.0, 0.0, 1.0],
        player: [0.0, 1.0, 0.0, 1.0],
        obstacles: [
            [1.0, 0.0, 0.0, 1.0],
            [0.0, 0.6, 1.0, 1.0],
            [1.0, 0.5, 0.0, 1.0],
            [1.0, 0.0, 1.0, 1.0],
        ],
    };

    pub fn for_settings(high_contrast: bool) -> Self {
        if high_contrast {
            Self::HIGH_CONTRAST
        } else {
            Self::CLASSIC
        }
    }

    pub fn obstacle(&self, color: ObstacleColor) -> [f32; 4] {
        match color {
            ObstacleColor::Red => self.obstacles[0],
            ObstacleColor::Blue => self.obstacles[1],
            ObstacleColor::Yellow => self.obstacles[2],
            ObstacleColor::Violet => self.obstacles[3],
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::CLASSIC
    }
}

/// Background, road, divider lines, obstacles, coins, then the player
pub fn build_frame(state: &GameState, palette: &Palette) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(
        6 + 200 + state.lines.len() * 60 + state.obstacles.len() * 60 + state.coins.len() * 72,
    );

    rect(&mut out, Vec2::ZERO, Vec2::new(WIDTH, HEIGHT), palette.background);
    rounded_rect(
        &mut out,
        Vec2::new(ROAD_X, -10.0),
        Vec2::new(ROAD_WIDTH, HEIGHT + 20.0),
        ROAD_RADIUS,
        palette.road,
    );

    for line in &state.lines {
        rounded_rect(&mut out, line.pos, line.size, LINE_RADIUS, palette.lane_line);
    }
    for obstacle in &state.obstacles {
        rounded_rect(
            &mut out,
            obstacle.pos,
            obstacle.size,
            OBSTACLE_RADIUS,
            palette.obstacle(obstacle.color),
        );
    }
    for coin in &state.coins {
        circle(&mut out, coin.pos, coin.radius, palette.coin);
    }

    let player = &state.player;
    if player.alive {
        rounded_rect(&mut out, player.pos, player.size, PLAYER_RADIUS, palette.player);
    }

    out
}

/// Splash backdrop; the title text is drawn by the page overlay
pub fn build_splash(palette: &Palette) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(6);
    rect(&mut out, Vec2::ZERO, Vec2::new(WIDTH, HEIGHT), palette.background);
    out
}
