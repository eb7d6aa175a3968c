//! Settings persistence
//!
//! Loads the settings record from storage at boot, falls back to the
//! compiled-in defaults when the checksum does not match, and re-persists
//! on demand.

use humivent_hal::{RecordStorage, StorageError};

use super::record::{PersistedRecord, RECORD_SIZE};
use super::settings::Settings;

/// Offset of the settings record in the storage area
pub const RECORD_OFFSET: usize = 0;

/// Which path [`ConfigStore::load`] took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadSource {
    /// Stored record had a valid checksum
    Stored,
    /// Checksum mismatch or unreadable storage; defaults substituted
    Defaults,
}

/// Settings persistence manager
///
/// Owns the storage handle; the settings value itself is owned by the
/// caller and passed in by reference.
pub struct ConfigStore<S> {
    storage: S,
}

impl<S: RecordStorage> ConfigStore<S> {
    /// Create a new store over a storage area
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Consume the store and return the underlying storage
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Load settings, substituting defaults on integrity failure
    ///
    /// Always returns sanitized settings. Logs which path was taken and
    /// the resulting field values.
    pub fn load(&mut self) -> Settings {
        let (settings, _) = self.load_with_source();
        settings
    }

    /// Like [`Self::load`], also reporting where the values came from
    pub fn load_with_source(&mut self) -> (Settings, LoadSource) {
        let (raw, source) = match self.read_record() {
            Ok(record) if record.verify() => {
                log_info!("Loaded settings from flash, CRC correct");
                (record.settings, LoadSource::Stored)
            }
            Ok(_) => {
                log_warn!("Invalid CRC of settings in flash, using defaults");
                (Settings::defaults(), LoadSource::Defaults)
            }
            Err(e) => {
                log_warn!("Failed to read settings: {:?}, using defaults", e);
                (Settings::defaults(), LoadSource::Defaults)
            }
        };

        // Values behind a valid checksum may still be out of range
        let settings = raw.sanitized();
        describe(&settings);

        (settings, source)
    }

    /// Persist settings: record plus fresh checksum, then commit
    pub fn save(&mut self, settings: &Settings) -> Result<(), StorageError> {
        self.check_capacity()?;
        let bytes = PersistedRecord::seal(settings).to_bytes();
        self.storage.write(RECORD_OFFSET, &bytes)?;
        self.storage.commit()?;
        log_debug!("Settings saved ({} bytes)", RECORD_SIZE);
        Ok(())
    }

    fn read_record(&mut self) -> Result<PersistedRecord, StorageError> {
        self.check_capacity()?;
        let mut bytes = [0u8; RECORD_SIZE];
        self.storage.read(RECORD_OFFSET, &mut bytes)?;
        Ok(PersistedRecord::from_bytes(&bytes))
    }

    /// Reject a medium too small for the record before touching it
    fn check_capacity(&self) -> Result<(), StorageError> {
        if self.storage.capacity() < RECORD_OFFSET + RECORD_SIZE {
            return Err(StorageError::OutOfBounds);
        }
        Ok(())
    }
}

/// Log every settings field, one line each
///
/// Formats through the [`Settings`] `Display` impl.
pub fn describe(settings: &Settings) {
    #[cfg(feature = "defmt")]
    defmt::info!("{}", defmt::Display2Format(settings));
    #[cfg(not(feature = "defmt"))]
    let _ = settings;
}
