//! Storage errors

use thiserror::Error;

/// Errors raised by the persistent store
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Access of {len} bytes at address {address} exceeds the {capacity}-byte store")]
    OutOfBounds {
        address: usize,
        len: usize,
        capacity: usize,
    },

    #[error("EEPROM image has {found} bytes, expected {expected}")]
    ImageSize { found: usize, expected: usize },

    #[error("EEPROM image I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("EEPROM image is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while reading the settings file
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Cannot read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
