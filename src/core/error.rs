//! Recoverable gameplay errors surfaced to the presentation layer.

use crate::items::types::EquipmentSlot;
use crate::persistence::PersistenceError;
use thiserror::Error;

/// Why a manual potion use did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NoHealReason {
    #[error("HP is already full")]
    FullHealth,

    #[error("no potion of that kind left")]
    OutOfStock,
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("not enough gold: costs {cost}, have {available}")]
    InsufficientFunds { cost: u64, available: u64 },

    #[error("{item} is not in the inventory")]
    ItemNotInInventory { item: String },

    #[error("no {slot} equipped")]
    NothingEquipped { slot: EquipmentSlot },

    #[error("{0}")]
    NoHealableTarget(NoHealReason),

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("could not save progress: {0}")]
    Persistence(#[from] PersistenceError),
}

impl GameError {
    /// Gold still missing for a failed purchase.
    pub fn shortfall(&self) -> Option<u64> {
        match self {
            GameError::InsufficientFunds { cost, available } => {
                Some(cost.saturating_sub(*available))
            }
            _ => None,
        }
    }
}

pub type GameResult<T> = Result<T, GameError>;
