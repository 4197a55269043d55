//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - Seeded RNG only
//! - Input arrives as a per-tick snapshot
//! - State is mutated only while running

pub mod geometry;
pub mod spawner;
pub mod state;
pub mod tick;

pub use geometry::{Rect, circle_rect_overlap, rects_overlap};
pub use spawner::{coin_interval, difficulty_factor, obstacle_interval, spawn_coin, spawn_obstacle};
pub use state::{Coin, GamePhase, GameState, Obstacle, ObstacleColor, Player, ScrollLine};
pub use tick::{GameEvent, TickInput, tick};
