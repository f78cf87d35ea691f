use super::record::SaveRecord;
use super::PersistenceError;
use std::io;

/// Backing store for the flat save record.
///
/// Writes are synchronous and best-effort; a failed write leaves whatever
/// was stored before.
pub trait KeyValueStore: Send {
    /// Reads the stored record. `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<SaveRecord>, PersistenceError>;

    /// Replaces the stored record.
    fn save(&mut self, record: &SaveRecord) -> Result<(), PersistenceError>;

    /// Deletes the stored record.
    fn clear(&mut self) -> Result<(), PersistenceError>;
}

/// In-process store used by tests and the simulator.
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: Option<SaveRecord>,
    fail_writes: bool,
    writes: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `record`.
    pub fn with_record(record: SaveRecord) -> Self {
        Self {
            record: Some(record),
            ..Self::default()
        }
    }

    /// Makes every subsequent write fail with an i/o error.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn record(&self) -> Option<&SaveRecord> {
        self.record.as_ref()
    }

    /// Number of successful writes.
    pub fn writes(&self) -> u64 {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self) -> Result<Option<SaveRecord>, PersistenceError> {
        Ok(self.record.clone())
    }

    fn save(&mut self, record: &SaveRecord) -> Result<(), PersistenceError> {
        if self.fail_writes {
            return Err(PersistenceError::Io(io::Error::new(
                io::ErrorKind::Other,
                "write rejected",
            )));
        }
        self.record = Some(record.clone());
        self.writes += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), PersistenceError> {
        self.record = None;
        Ok(())
    }
}
