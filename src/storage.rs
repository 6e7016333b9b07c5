//! Byte-addressable EEPROM and the high score kept in it

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{EEPROM_SIZE, HIGH_SCORE_ADDRESS};
use crate::error::StorageError;

/// Value of a never-written EEPROM byte
pub const ERASED: u8 = 0xFF;

/// A byte-addressable persistent store
pub trait Eeprom {
    fn capacity(&self) -> usize;
    fn read(&mut self, address: usize, buf: &mut [u8]) -> Result<(), StorageError>;
    fn write(&mut self, address: usize, bytes: &[u8]) -> Result<(), StorageError>;
}

fn check_bounds(address: usize, len: usize, capacity: usize) -> Result<(), StorageError> {
    match address.checked_add(len) {
        Some(end) if end <= capacity => Ok(()),
        _ => Err(StorageError::OutOfBounds { address, len, capacity }),
    }
}

/// EEPROM held in memory, starting erased
#[derive(Debug, Clone)]
pub struct MemoryEeprom {
    bytes: Vec<u8>,
}

impl MemoryEeprom {
    pub fn new() -> Self {
        Self::with_capacity(EEPROM_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { bytes: vec![ERASED; capacity] }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for MemoryEeprom {
    fn default() -> Self {
        Self::new()
    }
}

impl Eeprom for MemoryEeprom {
    fn capacity(&self) -> usize {
        self.bytes.len()
    }

    fn read(&mut self, address: usize, buf: &mut [u8]) -> Result<(), StorageError> {
        check_bounds(address, buf.len(), self.capacity())?;
        buf.copy_from_slice(&self.bytes[address..address + buf.len()]);
        Ok(())
    }

    fn write(&mut self, address: usize, bytes: &[u8]) -> Result<(), StorageError> {
        check_bounds(address, bytes.len(), self.capacity())?;
        self.bytes[address..address + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }
}

// On-disk form of the EEPROM image
#[derive(Serialize, Deserialize)]
struct EepromImage {
    bytes: Vec<u8>,
}

/// EEPROM image kept in a JSON file, rewritten after every write
#[derive(Debug)]
pub struct FileEeprom {
    path: PathBuf,
    memory: MemoryEeprom,
}

impl FileEeprom {
    /// Open the image at `path`. A missing file gives an erased EEPROM.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let memory = if path.exists() {
            let text = fs::read_to_string(&path)?;
            let image: EepromImage = serde_json::from_str(&text)?;
            if image.bytes.len() != EEPROM_SIZE {
                return Err(StorageError::ImageSize {
                    found: image.bytes.len(),
                    expected: EEPROM_SIZE,
                });
            }
            MemoryEeprom { bytes: image.bytes }
        } else {
            debug!("No EEPROM image at {}, starting erased", path.display());
            MemoryEeprom::new()
        };
        Ok(Self { path, memory })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        let image = EepromImage {
            bytes: self.memory.bytes.clone(),
        };
        fs::write(&self.path, serde_json::to_string(&image)?)?;
        Ok(())
    }
}

impl Eeprom for FileEeprom {
    fn capacity(&self) -> usize {
        self.memory.capacity()
    }

    fn read(&mut self, address: usize, buf: &mut [u8]) -> Result<(), StorageError> {
        self.memory.read(address, buf)
    }

    fn write(&mut self, address: usize, bytes: &[u8]) -> Result<(), StorageError> {
        self.memory.write(address, bytes)?;
        self.flush()
    }
}

/// The best score, stored as a little-endian `i32` at a fixed address.
///
/// Negative values, the erased pattern included, mean no score has been recorded.
#[derive(Debug)]
pub struct HighScoreStore<E> {
    eeprom: E,
}

impl<E: Eeprom> HighScoreStore<E> {
    pub fn new(eeprom: E) -> Self {
        Self { eeprom }
    }

    pub fn into_inner(self) -> E {
        self.eeprom
    }

    /// The recorded best, or `None` on a fresh store
    pub fn recorded(&mut self) -> Result<Option<u32>, StorageError> {
        let mut raw = [0u8; 4];
        self.eeprom.read(HIGH_SCORE_ADDRESS, &mut raw)?;
        let value = i32::from_le_bytes(raw);
        Ok(u32::try_from(value).ok())
    }

    /// The best score, 0 when nothing is recorded
    pub fn read(&mut self) -> Result<u32, StorageError> {
        Ok(self.recorded()?.unwrap_or(0))
    }

    /// Store `score` unconditionally
    pub fn write(&mut self, score: u32) -> Result<(), StorageError> {
        let value = i32::try_from(score).unwrap_or(i32::MAX);
        self.eeprom.write(HIGH_SCORE_ADDRESS, &value.to_le_bytes())
    }

    /// Store `score` if it beats the current best. Returns whether it was stored.
    pub fn record(&mut self, score: u32) -> Result<bool, StorageError> {
        let best = self.recorded()?;
        if best.is_some_and(|best| score <= best) {
            return Ok(false);
        }
        if best.is_none() && score == 0 {
            return Ok(false);
        }
        self.write(score)?;
        info!("New high score {}", score);
        Ok(true)
    }
}
