//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keyboard and on-screen buttons)
//! - Storage (see `persistence`)

pub mod input;

pub use input::{InputEvent, InputState, key_event};
