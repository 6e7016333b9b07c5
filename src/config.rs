//! Board geometry, game constants and runtime settings

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

// Panel (ILI9341 in portrait)
pub const SCREEN_WIDTH: i32 = 240;
pub const SCREEN_HEIGHT: i32 = 320;

/// Size of one grid cell in pixels
pub const GRID_SIZE: i32 = 10;

// Playfield bounds, inclusive on both ends
pub const X_BOUNDARY: i32 = 10;
pub const Y_BOUNDARY: i32 = 40;
pub const PLAYFIELD_MIN_X: i32 = X_BOUNDARY;
pub const PLAYFIELD_MAX_X: i32 = SCREEN_WIDTH - X_BOUNDARY;
pub const PLAYFIELD_MIN_Y: i32 = Y_BOUNDARY;
pub const PLAYFIELD_MAX_Y: i32 = SCREEN_HEIGHT - Y_BOUNDARY;

pub const MAX_SNAKE_LENGTH: usize = 100;
pub const MAX_BAD_FOOD: usize = 50;

/// Body segments closer to the head than this are skipped by the self-collision check
pub const SELF_COLLISION_SKIP: usize = 3;

/// Attempts made by every rejection-sampling placement
pub const MAX_PLACEMENT_ATTEMPTS: usize = 20;

// Level gates
pub const BARRIER_LEVEL: u32 = 2;
pub const FOOD_TIMER_LEVEL: u32 = 3;
pub const BAD_FOOD_LEVEL: u32 = 4;
pub const SPEEDUP_LEVEL: u32 = 5;

// Barrier placement rules
pub const BARRIER_CLEARANCE: i32 = 30;
pub const BARRIER_NUDGE: i32 = 40;
pub const CENTER_MIN_X: i32 = 100;
pub const CENTER_MAX_X: i32 = 140;
pub const CENTER_MIN_Y: i32 = 140;
pub const CENTER_MAX_Y: i32 = 180;
pub const CORNER_LEFT_X: (i32, i32) = (10, 40);
pub const CORNER_RIGHT_X: (i32, i32) = (200, 230);
pub const CORNER_TOP_Y: (i32, i32) = (40, 60);
pub const CORNER_BOTTOM_Y: (i32, i32) = (230, 260);

// Timing
pub const BASE_MOVE_DELAY: Duration = Duration::from_millis(200);
pub const SPEEDUP_FACTOR: f64 = 0.8;
pub const FOOD_LIFETIME: Duration = Duration::from_millis(5000);
pub const COUNTDOWN_INTERVAL: Duration = Duration::from_millis(1000);
pub const BUTTON_DEBOUNCE: Duration = Duration::from_millis(200);
pub const MENU_REPEAT: Duration = Duration::from_millis(200);
pub const GAME_OVER_HOLD: Duration = Duration::from_millis(1000);

// Joystick scaling
pub const ADC_MAX: u16 = 1023;
pub const AXIS_RANGE: i32 = 4;
pub const AXIS_THRESHOLD: i32 = AXIS_RANGE / 4;
pub const AXIS_CENTER: i32 = AXIS_RANGE / 2;

// EEPROM layout
pub const EEPROM_SIZE: usize = 1024;
pub const HIGH_SCORE_ADDRESS: usize = 0;

/// Default location of the runtime settings file
pub const SETTINGS_FILE: &str = "tft_snake.json";

/// Runtime settings for the simulator binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the EEPROM image is kept between runs
    pub eeprom_path: PathBuf,
    /// Buzzer volume, 0.0..=1.0
    pub volume: f32,
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
    /// Window pixels per panel pixel
    pub scale: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            eeprom_path: PathBuf::from("tft_snake_eeprom.json"),
            volume: 1.0,
            seed: None,
            scale: 2.0,
        }
    }
}

impl Settings {
    /// Load settings from `path`. A missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&text)?;
        Ok(settings.sanitized())
    }

    fn sanitized(mut self) -> Self {
        self.volume = self.volume.clamp(0.0, 1.0);
        if !(self.scale.is_finite() && self.scale > 0.0) {
            self.scale = Self::default().scale;
        }
        self
    }
}
