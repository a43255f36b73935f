//! Persisted drive configuration
//!
//! A drive configuration wrapped in a small header and serialized with
//! postcard so it can be written to flash or EEPROM by the embedding
//! firmware.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::types::DriveTrainConfig;

/// Magic number to identify a stored drive configuration
pub const DRIVE_CONFIG_MAGIC: u32 = 0x5452_4456; // "TRDV"

/// Current stored configuration version
pub const DRIVE_CONFIG_VERSION: u8 = 1;

/// Upper bound on the encoded size of a [`StoredDriveConfig`]
pub const MAX_STORED_SIZE: usize = 128;

/// Drive configuration record with a validation header
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StoredDriveConfig {
    /// Magic number for validation
    pub magic: u32,
    /// Data format version
    pub version: u8,
    /// The drive configuration
    pub drive: DriveTrainConfig,
}

impl StoredDriveConfig {
    pub const fn new(drive: DriveTrainConfig) -> Self {
        Self {
            magic: DRIVE_CONFIG_MAGIC,
            version: DRIVE_CONFIG_VERSION,
            drive,
        }
    }

    /// Check if the header matches this build
    pub fn is_valid(&self) -> bool {
        self.magic == DRIVE_CONFIG_MAGIC && self.version == DRIVE_CONFIG_VERSION
    }

    /// Serialize into `buf`, returning the used prefix
    pub fn encode<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Serialize)
    }

    /// Decode and validate a stored record
    ///
    /// The header is checked first, then the contained drive configuration.
    pub fn decode(bytes: &[u8]) -> Result<Self, ConfigError> {
        let stored: StoredDriveConfig =
            postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;

        if stored.magic != DRIVE_CONFIG_MAGIC {
            return Err(ConfigError::BadMagic);
        }
        if stored.version != DRIVE_CONFIG_VERSION {
            return Err(ConfigError::VersionMismatch);
        }
        if let Err(e) = stored.drive.validate() {
            #[cfg(feature = "defmt")]
            defmt::warn!("stored drive config rejected: {}", e);
            return Err(e);
        }

        Ok(stored)
    }
}
