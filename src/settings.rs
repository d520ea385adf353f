//! User preferences
//!
//! Persisted separately from the gallery in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::paint::{DEFAULT_PALETTE, Rgba};
use crate::tuning::{CourtVariant, Tuning};

/// Preferences for the game and the paint pad
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Game ===
    /// Court layout
    pub court: CourtVariant,
    /// Overrides the court's default physics when set
    pub tuning: Option<Tuning>,

    // === Paint pad ===
    /// Starting brush width (pixels)
    pub brush_size: f32,
    /// Starting brush color
    pub brush_color: Rgba,
    /// Swatches offered in the toolbar
    pub palette: Vec<Rgba>,
    pub pad_width: u32,
    pub pad_height: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            court: CourtVariant::Vertical,
            tuning: None,

            brush_size: DEFAULT_BRUSH_SIZE,
            brush_color: Rgba::BLACK,
            palette: DEFAULT_PALETTE.to_vec(),
            pad_width: PAD_WIDTH,
            pad_height: PAD_HEIGHT,
        }
    }
}

impl Settings {
    /// Settings for a court, everything else default
    pub fn for_court(court: CourtVariant) -> Self {
        Self {
            court,
            ..Self::default()
        }
    }

    /// Physics the game should run with
    pub fn game_tuning(&self) -> Tuning {
        self.tuning.unwrap_or_else(|| self.court.tuning())
    }

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                log::warn!("Ignoring invalid settings: {}", e);
                None
            }
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "canvas_toys_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.court, CourtVariant::Vertical);
        assert_eq!(s.palette.len(), 8);
        assert_eq!((s.pad_width, s.pad_height), (400, 300));
        assert_eq!(s.game_tuning().gravity, 800.0);
    }

    #[test]
    fn test_court_tuning_and_override() {
        let mut s = Settings::for_court(CourtVariant::Horizontal);
        assert_eq!(s.game_tuning().gravity, 900.0);

        s.tuning = Some(Tuning {
            gravity: 500.0,
            ..Tuning::default()
        });
        assert_eq!(s.game_tuning().gravity, 500.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s = Settings::from_json(r#"{"court":"Horizontal","brush_size":10.0}"#).unwrap();
        assert_eq!(s.court, CourtVariant::Horizontal);
        assert_eq!(s.brush_size, 10.0);
        assert_eq!(s.pad_width, PAD_WIDTH);
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(Settings::from_json("{not json").is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let s = Settings::for_court(CourtVariant::Horizontal);
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(Settings::from_json(&json), Some(s));
    }
}
