//! Game state and core simulation types
//!
//! Everything a run needs lives in [`GameState`]; nothing is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::*;
use crate::lane_left;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Splash screen, waiting for Play
    Idle,
    /// Active gameplay
    Running,
    /// Game is paused
    Paused,
    /// Run ended by a crash
    GameOver,
}

/// The player's vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Lateral velocity (px/s, negative = left)
    pub vx: f32,
    /// Lane the player started in
    pub lane: u32,
    pub alive: bool,
}

impl Default for Player {
    fn default() -> Self {
        let lane = PLAYER_START_LANE;
        Self {
            pos: Vec2::new(
                lane_left(lane) + (LANE_WIDTH - PLAYER_WIDTH) / 2.0,
                PLAYER_Y,
            ),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            vx: 0.0,
            lane,
            alive: true,
        }
    }
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Obstacle color tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleColor {
    Red,
    Blue,
    Yellow,
    Violet,
}

impl ObstacleColor {
    pub const ALL: [ObstacleColor; 4] = [
        ObstacleColor::Red,
        ObstacleColor::Blue,
        ObstacleColor::Yellow,
        ObstacleColor::Violet,
    ];

    pub fn hex(&self) -> &'static str {
        match self {
            ObstacleColor::Red => "#ff6b6b",
            ObstacleColor::Blue => "#6bc9ff",
            ObstacleColor::Yellow => "#ffd166",
            ObstacleColor::Violet => "#b28dff",
        }
    }
}

/// A car/barrier coming down a lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub color: ObstacleColor,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// A collectible coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    /// Centre
    pub pos: Vec2,
    pub radius: f32,
}

/// Cosmetic lane divider segment, wrapped vertically
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollLine {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl ScrollLine {
    /// Wrap a line that scrolled off the bottom back above the top
    pub fn wrap(&mut self) {
        if self.pos.y > HEIGHT + LINE_WRAP_MARGIN {
            let periods = ((self.pos.y + LINE_WRAP_MARGIN) / LINE_PERIOD).ceil();
            self.pos.y -= periods * LINE_PERIOD;
        }
    }
}

/// The fixed set of divider lines for a fresh road
pub fn divider_lines() -> Vec<ScrollLine> {
    let rows = (LINE_LAST_ROW - LINE_FIRST_ROW) as usize;
    let mut lines = Vec::with_capacity(rows * (LANE_COUNT as usize - 1));
    for row in LINE_FIRST_ROW..LINE_LAST_ROW {
        for boundary in 1..LANE_COUNT {
            lines.push(ScrollLine {
                pos: Vec2::new(
                    lane_left(boundary) - LINE_WIDTH / 2.0,
                    row as f32 * LINE_PERIOD,
                ),
                size: Vec2::new(LINE_WIDTH, LINE_HEIGHT),
            });
        }
    }
    lines
}

/// Complete game state (serializable, seeded)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Spawner randomness; carries over across resets
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Seconds of running time this run
    pub elapsed: f32,
    /// Base forward speed (px/s), ramps with elapsed time
    pub speed: f32,
    /// Current boost (px/s), always within `[0, BOOST_MAX]`
    pub boost: f32,
    pub score: u64,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub coins: Vec<Coin>,
    pub lines: Vec<ScrollLine>,
    /// Seconds until the next obstacle spawn
    pub next_obstacle: f32,
    /// Seconds until the next coin spawn
    pub next_coin: f32,
}

impl GameState {
    /// Create a fresh state in the Idle phase
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            elapsed: 0.0,
            speed: BASE_SPEED,
            boost: 0.0,
            score: 0,
            player: Player::default(),
            obstacles: Vec::new(),
            coins: Vec::new(),
            lines: divider_lines(),
            next_obstacle: 0.0,
            next_coin: 0.0,
        }
    }

    /// Reinitialize everything except the RNG stream and enter Idle
    pub fn reset(&mut self) {
        self.phase = GamePhase::Idle;
        self.elapsed = 0.0;
        self.speed = BASE_SPEED;
        self.boost = 0.0;
        self.score = 0;
        self.player = Player::default();
        self.obstacles.clear();
        self.coins.clear();
        self.lines = divider_lines();
        self.next_obstacle = 0.0;
        self.next_coin = 0.0;
    }

    /// Base speed plus boost
    #[inline]
    pub fn forward_speed(&self) -> f32 {
        self.speed + self.boost
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle_and_centered() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.lane, 1);
        let center = state.player.rect().center().x;
        assert!((center - crate::lane_center(1)).abs() < 0.001);
        assert!(state.player.alive);
    }

    #[test]
    fn test_divider_lines_layout() {
        let lines = divider_lines();
        assert_eq!(lines.len(), 30 * 2);
        assert!((lines[0].pos.y - (-480.0)).abs() < 0.001);
        // Each boundary line is centred on the lane edge
        let boundary = lines[0].pos.x + LINE_WIDTH / 2.0;
        assert!((boundary - lane_left(1)).abs() < 0.001);
    }

    #[test]
    fn test_line_wrap() {
        let mut line = divider_lines().remove(0);
        line.pos.y = HEIGHT + 31.0;
        line.wrap();
        // ceil((671 + 30) / 48) = 15 periods
        assert!((line.pos.y - (HEIGHT + 31.0 - 15.0 * LINE_PERIOD)).abs() < 0.001);
        assert!(line.pos.y < 0.0);

        let before = 100.0;
        line.pos.y = before;
        line.wrap();
        assert_eq!(line.pos.y, before);
    }

    #[test]
    fn test_reset_restores_initial_fields() {
        let mut state = GameState::new(3);
        state.phase = GamePhase::GameOver;
        state.score = 900;
        state.speed = 500.0;
        state.boost = 42.0;
        state.player.pos.x = 0.0;
        state.player.alive = false;
        state.coins.push(Coin {
            pos: Vec2::ZERO,
            radius: COIN_RADIUS,
        });
        state.reset();

        let fresh = GameState::new(3);
        assert_eq!(state.phase, fresh.phase);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed, fresh.speed);
        assert_eq!(state.boost, 0.0);
        assert_eq!(state.player, fresh.player);
        assert_eq!(state.lines, fresh.lines);
        assert!(state.coins.is_empty());
    }
}
