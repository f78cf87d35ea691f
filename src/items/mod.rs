//! Weapons, armors, potions, the shop catalogs and inventory transactions.

pub mod catalog;
pub mod shop;
pub mod types;

pub use types::*;
