//! Snake for a 240×320 TFT panel with an analog joystick, a push-button and a piezo buzzer.
//!
//! The hardware sits behind small traits (`Display`, `Joystick`, `Buzzer`, `Eeprom`) so the
//! game loop in [`app::GameContext`] runs the same against a board or the desktop simulator.

pub mod app;
pub mod config;
pub mod display;
pub mod error;
pub mod game;
pub mod input;
pub mod sound;
pub mod storage;

pub use app::{Clock, GameContext, Screen};
pub use error::{SettingsError, StorageError};
