//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Crate version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// One-line version banner for `--version`.
pub fn version_line() -> String {
    format!("idle-mmorpg {} (built {}, commit {})", VERSION, BUILD_DATE, BUILD_COMMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_info_not_empty() {
        assert!(!BUILD_COMMIT.is_empty());
        assert!(!BUILD_DATE.is_empty());
    }

    #[test]
    fn test_build_commit_format() {
        // 7 hex chars or "unknown"
        assert!(BUILD_COMMIT == "unknown" || BUILD_COMMIT.len() == 7);
    }

    #[test]
    fn test_version_line_mentions_commit() {
        let line = version_line();
        assert!(line.starts_with("idle-mmorpg "));
        assert!(line.contains(BUILD_COMMIT));
    }
}
