//! Persistent record storage abstractions
//!
//! Models an EEPROM-style area: byte-addressed reads and writes go to a
//! working copy, and nothing reaches the medium until [`RecordStorage::commit`]
//! is called. Board implementations typically back this with one flash
//! sector that is erased and reprogrammed on commit.

/// Errors from record storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Access outside the storage area
    OutOfBounds,
    /// The underlying medium reported a failure
    Io,
}

/// Fixed-size record storage
///
/// Commit is atomic from the caller's point of view: after it returns
/// `Ok`, a subsequent power cycle observes every write made before it.
pub trait RecordStorage {
    /// Size of the storage area in bytes
    fn capacity(&self) -> usize;

    /// Read `buffer.len()` bytes starting at `offset`
    fn read(&mut self, offset: usize, buffer: &mut [u8]) -> Result<(), StorageError>;

    /// Stage `data` at `offset`; visible to reads immediately, persisted on commit
    fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageError>;

    /// Persist all staged writes to the medium
    fn commit(&mut self) -> Result<(), StorageError>;
}

impl<T: RecordStorage + ?Sized> RecordStorage for &mut T {
    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    fn read(&mut self, offset: usize, buffer: &mut [u8]) -> Result<(), StorageError> {
        (**self).read(offset, buffer)
    }

    fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageError> {
        (**self).write(offset, data)
    }

    fn commit(&mut self) -> Result<(), StorageError> {
        (**self).commit()
    }
}

/// Value of a byte on a freshly erased medium
pub const ERASED_BYTE: u8 = 0xFF;

/// In-memory record storage
///
/// Keeps a staged working copy and a committed medium image, so host
/// tests and simulators can observe exactly what would survive a reset.
#[derive(Debug, Clone)]
pub struct RamStorage<const N: usize> {
    /// Working copy (what reads and writes see)
    staged: [u8; N],
    /// Committed medium contents
    medium: [u8; N],
    /// Number of successful commits
    commits: u32,
}

impl<const N: usize> Default for RamStorage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RamStorage<N> {
    /// Create storage with an erased medium
    pub const fn new() -> Self {
        Self {
            staged: [ERASED_BYTE; N],
            medium: [ERASED_BYTE; N],
            commits: 0,
        }
    }

    /// Create storage whose medium already holds `image`
    ///
    /// Bytes past the end of `image` stay erased; excess bytes are ignored.
    pub fn with_contents(image: &[u8]) -> Self {
        let mut storage = Self::new();
        let len = image.len().min(N);
        storage.medium[..len].copy_from_slice(&image[..len]);
        storage.staged = storage.medium;
        storage
    }

    /// Discard uncommitted writes, as a reset would
    pub fn power_cycle(&mut self) {
        self.staged = self.medium;
    }

    /// Committed medium contents
    pub fn medium(&self) -> &[u8; N] {
        &self.medium
    }

    /// Number of successful commits so far
    pub fn commit_count(&self) -> u32 {
        self.commits
    }

    /// Flip every bit in a committed range (for testing error recovery)
    pub fn corrupt(&mut self, offset: usize, len: usize) {
        let end = offset.saturating_add(len).min(N);
        for byte in self.medium[offset.min(end)..end].iter_mut() {
            *byte = !*byte;
        }
        self.staged = self.medium;
    }

    fn range(offset: usize, len: usize) -> Result<core::ops::Range<usize>, StorageError> {
        let end = offset.checked_add(len).ok_or(StorageError::OutOfBounds)?;
        if end > N {
            return Err(StorageError::OutOfBounds);
        }
        Ok(offset..end)
    }
}

impl<const N: usize> RecordStorage for RamStorage<N> {
    fn capacity(&self) -> usize {
        N
    }

    fn read(&mut self, offset: usize, buffer: &mut [u8]) -> Result<(), StorageError> {
        let range = Self::range(offset, buffer.len())?;
        buffer.copy_from_slice(&self.staged[range]);
        Ok(())
    }

    fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageError> {
        let range = Self::range(offset, data.len())?;
        self.staged[range].copy_from_slice(data);
        Ok(())
    }

    fn commit(&mut self) -> Result<(), StorageError> {
        self.medium = self.staged;
        self.commits = self.commits.saturating_add(1);
        Ok(())
    }
}
