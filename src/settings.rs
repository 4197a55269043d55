//! Game settings and preferences
//!
//! Persisted as JSON next to the best score.

use serde::{Deserialize, Serialize};

use crate::persistence::Storage;

/// What to do when left and right are held together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SteerConflict {
    /// Left is evaluated first and wins
    #[default]
    LeftWins,
    /// Both held cancel out
    Cancel,
}

impl SteerConflict {
    pub fn as_str(&self) -> &'static str {
        match self {
            SteerConflict::LeftWins => "Left wins",
            SteerConflict::Cancel => "Cancel",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" | "left wins" | "leftwins" => Some(SteerConflict::LeftWins),
            "cancel" => Some(SteerConflict::Cancel),
            _ => None,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Left+right resolution
    #[serde(default)]
    pub steer_conflict: SteerConflict,

    // === HUD ===
    /// Show FPS counter
    #[serde(default)]
    pub show_fps: bool,

    // === Accessibility ===
    /// High contrast palette
    #[serde(default)]
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            steer_conflict: SteerConflict::LeftWins,
            show_fps: false,
            high_contrast: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "moto_racer_settings";

    /// Load settings, falling back to defaults on any problem
    pub fn load<S: Storage + ?Sized>(storage: &S) -> Self {
        match storage.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring invalid settings: {}", e);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Settings unavailable ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings; failures are logged
    pub fn save<S: Storage + ?Sized>(&self, storage: &mut S) {
        match serde_json::to_string(self) {
            Ok(json) => match storage.set(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Settings not saved: {}", e),
            },
            Err(e) => log::warn!("Settings not serialized: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_steer_conflict_from_str() {
        assert_eq!(SteerConflict::from_str("Cancel"), Some(SteerConflict::Cancel));
        assert_eq!(SteerConflict::from_str("LEFT"), Some(SteerConflict::LeftWins));
        assert_eq!(SteerConflict::from_str("right"), None);
    }

    #[test]
    fn test_settings_round_trip_through_storage() {
        let mut storage = MemoryStorage::new();
        let settings = Settings {
            steer_conflict: SteerConflict::Cancel,
            show_fps: true,
            high_contrast: true,
        };
        settings.save(&mut storage);
        assert_eq!(Settings::load(&storage), settings);
    }

    #[test]
    fn test_invalid_or_partial_json() {
        let storage = MemoryStorage::with_entry(Settings::STORAGE_KEY, "{not json");
        assert_eq!(Settings::load(&storage), Settings::default());

        let storage = MemoryStorage::with_entry(Settings::STORAGE_KEY, r#"{"show_fps":true}"#);
        let loaded = Settings::load(&storage);
        assert!(loaded.show_fps);
        assert_eq!(loaded.steer_conflict, SteerConflict::LeftWins);
    }
}
