//! Key/value persistence for the best score and settings
//!
//! Features:
//! - `Storage` trait over a string key/value store
//! - LocalStorage backend on web, in-memory backend for native and tests
//! - Lenient best-score decoding (missing or invalid values read as 0)

pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod local;

pub use memory::MemoryStorage;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use thiserror::Error;

/// Storage key holding the best score
pub const BEST_SCORE_KEY: &str = "moto_racer_best_v1";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage is not available")]
    Unavailable,
    #[error("failed to read `{key}`")]
    Read { key: String },
    #[error("failed to write `{key}`")]
    Write { key: String },
    #[error("invalid value for `{key}`: {value:?}")]
    Invalid { key: String, value: String },
}

/// A string key/value store (LocalStorage-shaped)
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        (**self).set(key, value)
    }
}

/// Decode a stored best score
///
/// Whole numbers are taken as-is; a non-negative finite decimal is truncated.
pub fn parse_best(raw: &str) -> Result<u64, PersistError> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<u64>() {
        return Ok(value);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value as u64),
        _ => Err(PersistError::Invalid {
            key: BEST_SCORE_KEY.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Read the best score, treating anything missing or unreadable as 0
pub fn load_best<S: Storage + ?Sized>(storage: &S) -> u64 {
    match storage.get(BEST_SCORE_KEY) {
        Ok(Some(raw)) => match parse_best(&raw) {
            Ok(best) => {
                log::info!("Loaded best score {}", best);
                best
            }
            Err(e) => {
                log::warn!("{}, using 0", e);
                0
            }
        },
        Ok(None) => {
            log::info!("No best score found, starting fresh");
            0
        }
        Err(e) => {
            log::warn!("Best score unavailable ({}), using 0", e);
            0
        }
    }
}

pub fn save_best<S: Storage + ?Sized>(storage: &mut S, best: u64) -> Result<(), PersistError> {
    storage.set(BEST_SCORE_KEY, &best.to_string())
}
