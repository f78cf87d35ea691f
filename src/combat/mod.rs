//! Monsters and the monster generator.

pub mod generation;
pub mod types;

pub use generation::*;
pub use types::*;
