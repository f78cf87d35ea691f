//! Player-editable settings in ~/.idle-mmorpg/config.json.

use super::persistence::{game_path, read_json_or_default, write_json};
use crate::core::constants::{BATTLE_TICK_INTERVAL_MS, UI_REFRESH_INTERVAL_MS};
use serde::{Deserialize, Serialize};
use log::warn;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Period of the battle tick.
    pub tick_interval_ms: u64,
    /// Period of the read-only screen refresh.
    pub ui_refresh_interval_ms: u64,
    /// Save file name inside the game directory.
    pub save_file: String,
    /// `env_logger` filter; `RUST_LOG` wins when set.
    pub log_filter: String,
    /// Log file name inside the game directory.
    pub log_file: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: BATTLE_TICK_INTERVAL_MS,
            ui_refresh_interval_ms: UI_REFRESH_INTERVAL_MS,
            save_file: "save.dat".to_string(),
            log_filter: "info".to_string(),
            log_file: "game.log".to_string(),
        }
    }
}

impl GameConfig {
    /// Reads ~/.idle-mmorpg/config.json, falling back to defaults when the
    /// game directory is unavailable.
    pub fn load() -> Self {
        match game_path(CONFIG_FILE) {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                warn!("no game directory ({}), using default config", e);
                Self::default()
            }
        }
    }

    /// Reads the config at `path`. An invalid file yields defaults; a missing
    /// one is created with the defaults so there is something to edit.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            return read_json_or_default(path);
        }
        let config = Self::default();
        if let Err(e) = write_json(path, &config) {
            warn!("could not write {}: {}", path.display(), e);
        }
        config
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn ui_refresh_interval(&self) -> Duration {
        Duration::from_millis(self.ui_refresh_interval_ms.max(1))
    }

    pub fn save_path(&self) -> io::Result<PathBuf> {
        game_path(&self.save_file)
    }

    pub fn log_path(&self) -> io::Result<PathBuf> {
        game_path(&self.log_file)
    }
}
