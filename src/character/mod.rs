//! The player character.

pub mod player;

pub use player::*;
