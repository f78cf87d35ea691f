//! Core game state and logic.

pub mod constants;
pub mod error;
pub mod game_logic;
pub mod game_state;
pub mod offline;
pub mod progression;
pub mod scheduler;
pub mod session;
pub mod tick;

pub use error::{GameError, GameResult, NoHealReason};
pub use game_logic::{change_location, start_auto_battle, stop_auto_battle};
pub use game_state::{BattleState, GameState};
pub use offline::{process_offline_progression, OfflineReport};
pub use progression::{apply_experience, damage, xp_for_next_level, Combatant};
pub use scheduler::{SharedSession, TickScheduler};
pub use session::{Clock, GameSession};
pub use tick::{advance, TickEvent, TickResult};
