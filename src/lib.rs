//! Idle MMORPG - deterministic auto-battle simulation core.
//!
//! This module exposes the game logic for the terminal binary, the balance
//! simulator and the integration tests.

pub mod character;
pub mod combat;
pub mod core;
pub mod items;
pub mod persistence;
pub mod simulator;
pub mod utils;
pub mod zones;
