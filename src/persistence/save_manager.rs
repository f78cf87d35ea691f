use super::record::SaveRecord;
use super::store::KeyValueStore;
use super::PersistenceError;
use crate::core::constants::SAVE_VERSION_MAGIC;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// File-backed store with a checksummed binary format.
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Store at `save_path`, creating the parent directory if needed.
    pub fn new(save_path: impl Into<PathBuf>) -> io::Result<Self> {
        let save_path = save_path.into();
        if let Some(parent) = save_path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { save_path })
    }

    /// Creates a SaveManager for testing with a unique temporary directory
    #[cfg(test)]
    fn new_for_test() -> io::Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

        let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let temp_dir = std::env::temp_dir().join(format!(
            "idle-mmorpg-test-{}-{}",
            std::process::id(),
            test_id
        ));
        Self::new(temp_dir.join("save.dat"))
    }

    pub fn path(&self) -> &Path {
        &self.save_path
    }

    /// Checks if a save file exists
    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }

    fn checksum(version: &[u8], length: &[u8], data: &[u8]) -> Vec<u8> {
        let mut hasher = Sha256::new();
        hasher.update(version);
        hasher.update(length);
        hasher.update(data);
        hasher.finalize().to_vec()
    }

    fn read_record(&self, file: &mut fs::File) -> Result<SaveRecord, PersistenceError> {
        let truncated = |e: io::Error| match e.kind() {
            io::ErrorKind::UnexpectedEof => PersistenceError::Corrupt("truncated file".to_string()),
            _ => PersistenceError::Io(e),
        };

        // Read and verify version magic
        let mut version_bytes = [0u8; 8];
        file.read_exact(&mut version_bytes).map_err(truncated)?;
        let version = u64::from_le_bytes(version_bytes);

        if version != SAVE_VERSION_MAGIC {
            return Err(PersistenceError::Corrupt(format!(
                "invalid save version: expected 0x{:016X}, got 0x{:016X}",
                SAVE_VERSION_MAGIC, version
            )));
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes).map_err(truncated)?;
        let data_len = u32::from_le_bytes(length_bytes);

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data).map_err(truncated)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum).map_err(truncated)?;

        if stored_checksum.as_slice() != Self::checksum(&version_bytes, &length_bytes, &data) {
            return Err(PersistenceError::Corrupt(
                "checksum verification failed".to_string(),
            ));
        }

        bincode::deserialize(&data).map_err(|e| PersistenceError::Corrupt(e.to_string()))
    }
}

impl KeyValueStore for SaveManager {
    /// File format:
    /// - Version magic (8 bytes)
    /// - Data length (4 bytes)
    /// - bincode-encoded record (variable length)
    /// - SHA256 checksum over the three fields above (32 bytes)
    fn load(&self) -> Result<Option<SaveRecord>, PersistenceError> {
        let mut file = match fs::File::open(&self.save_path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        self.read_record(&mut file).map(Some)
    }

    /// Writes to a sibling temp file and renames it over the save, so a
    /// crash mid-write leaves the previous save intact.
    fn save(&mut self, record: &SaveRecord) -> Result<(), PersistenceError> {
        let data = bincode::serialize(record)?;
        let data_len = u32::try_from(data.len())
            .map_err(|_| PersistenceError::Corrupt("save record too large".to_string()))?;

        let version_bytes = SAVE_VERSION_MAGIC.to_le_bytes();
        let length_bytes = data_len.to_le_bytes();
        let checksum = Self::checksum(&version_bytes, &length_bytes, &data);

        let tmp_path = self.save_path.with_extension("tmp");
        {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(&version_bytes)?;
            file.write_all(&length_bytes)?;
            file.write_all(&data)?;
            file.write_all(&checksum)?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.save_path)?;

        Ok(())
    }

    fn clear(&mut self) -> Result<(), PersistenceError> {
        match fs::remove_file(&self.save_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
