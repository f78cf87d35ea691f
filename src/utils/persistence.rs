//! JSON helpers for files under ~/.idle-mmorpg/.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const GAME_DIR_NAME: &str = ".idle-mmorpg";

/// Get the ~/.idle-mmorpg/ directory path, creating it if needed.
pub fn game_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(GAME_DIR_NAME);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a file in ~/.idle-mmorpg/.
pub fn game_path(filename: &str) -> io::Result<PathBuf> {
    Ok(game_dir()?.join(filename))
}

/// Reads a JSON file, returning `T::default()` if missing or invalid.
pub fn read_json_or_default<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("ignoring invalid {}: {}", path.display(), e);
            T::default()
        }),
        Err(_) => T::default(),
    }
}

/// Writes `data` as pretty-printed JSON.
pub fn write_json<T: serde::Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "idle-mmorpg-json-{}-{}",
            std::process::id(),
            name
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_game_path_format() {
        if let Ok(path) = game_path("test.json") {
            assert!(path.ends_with(".idle-mmorpg/test.json"));
        }
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = scratch_dir("missing").join("nonexistent.json");
        let val: Vec<String> = read_json_or_default(&path);
        assert!(val.is_empty());
    }

    #[test]
    fn test_invalid_file_returns_default() {
        let path = scratch_dir("invalid").join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let val: Vec<String> = read_json_or_default(&path);
        assert!(val.is_empty());
    }

    #[test]
    fn test_write_and_read_roundtrip() {
        let path = scratch_dir("roundtrip").join("data.json");
        let data = vec!["hello".to_string(), "world".to_string()];
        write_json(&path, &data).expect("write should succeed");

        let loaded: Vec<String> = read_json_or_default(&path);
        assert_eq!(loaded, data);

        fs::remove_file(path).ok();
    }
}
