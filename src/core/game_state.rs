use crate::character::player::Player;
use crate::combat::types::Monster;
use crate::zones::Location;
use serde::{Deserialize, Serialize};

/// Auto-battle state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BattleState {
    /// No auto-battle.
    #[default]
    Idle,
    /// Auto-battle active against a live monster.
    Fighting,
    /// Player HP ran out; battle was force-stopped.
    StoppedOnDeath,
}

/// Everything the simulation mutates: the player, where they are, and the
/// current fight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub player: Player,
    pub location: Location,
    /// Current opponent (transient, not saved)
    #[serde(skip)]
    pub monster: Option<Monster>,
    pub battle: BattleState,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// A new game in the main city.
    pub fn new() -> Self {
        Self::with_player(Player::new(), Location::main_city())
    }

    /// Restores a saved player at `location`. No monster is spawned until
    /// battle starts.
    pub fn with_player(player: Player, location: Location) -> Self {
        Self {
            player,
            location,
            monster: None,
            battle: BattleState::Idle,
        }
    }

    pub fn is_fighting(&self) -> bool {
        self.battle == BattleState::Fighting
    }
}
