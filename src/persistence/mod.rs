//! Persistence adapter: the flat save record and the stores that hold it.

pub mod record;
pub mod save_manager;
pub mod store;

pub use record::{LoadedSave, RecordError, SaveRecord, StoredValue};
pub use save_manager::SaveManager;
pub use store::{KeyValueStore, MemoryStore};

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("could not encode save: {0}")]
    Encode(#[from] bincode::Error),

    #[error("corrupt save: {0}")]
    Corrupt(String),
}
