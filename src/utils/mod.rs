//! Utility modules: build info, config, JSON files in the game directory.

pub mod build_info;
pub mod config;
pub mod persistence;

pub use config::GameConfig;
