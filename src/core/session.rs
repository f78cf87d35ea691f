//! The simulation context object.
//!
//! A [`GameSession`] owns the game state and its store. Every command and
//! every tick goes through `&mut self`, so wrapping the session in a mutex
//! is enough to serialize user commands with the battle loop. Each
//! successful mutation is persisted before the call returns.

use super::error::GameResult;
use super::game_logic;
use super::game_state::GameState;
use super::offline::{process_offline_progression, OfflineReport};
use super::tick::{advance, TickEvent, TickResult};
use crate::character::player::Player;
use crate::combat::types::Monster;
use crate::items::shop;
use crate::items::types::{Armor, PotionKind, Weapon};
use crate::persistence::{KeyValueStore, PersistenceError, SaveRecord};
use crate::zones::Location;
use log::{debug, info, warn};

/// Source of the current time in epoch milliseconds.
pub type Clock = Box<dyn Fn() -> i64 + Send>;

fn system_clock() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub struct GameSession<S: KeyValueStore> {
    state: GameState,
    store: S,
    clock: Clock,
    battle_epoch: u64,
    last_persistence_error: Option<String>,
    offline_report: Option<OfflineReport>,
}

impl<S: KeyValueStore> GameSession<S> {
    /// Loads the saved game from `store` using the system clock.
    pub fn load(store: S) -> Self {
        Self::load_with_clock(store, Box::new(system_clock))
    }

    /// Loads the saved game from `store`.
    ///
    /// An unreadable or invalid record yields a fresh game. If the save was
    /// taken mid-battle, the elapsed time is credited through the offline
    /// estimator and the result is written back straight away, so the same
    /// window is never credited twice. The battle itself is not resumed.
    pub fn load_with_clock(store: S, clock: Clock) -> Self {
        let loaded = match store.load() {
            Ok(Some(record)) => match record.restore() {
                Ok(loaded) => Some(loaded),
                Err(e) => {
                    warn!("save record is invalid ({}), starting a new game", e);
                    None
                }
            },
            Ok(None) => {
                info!("no save found, starting a new game");
                None
            }
            Err(e) => {
                warn!("could not read save ({}), starting a new game", e);
                None
            }
        };

        let mut session = Self {
            state: GameState::new(),
            store,
            clock,
            battle_epoch: 0,
            last_persistence_error: None,
            offline_report: None,
        };

        let Some(loaded) = loaded else {
            return session;
        };
        session.state = loaded.state;
        info!(
            "loaded level {} character at {}",
            session.state.player.level, session.state.location
        );

        if loaded.was_auto_battling && session.state.location.is_combat() {
            let now = (session.clock)();
            let last_save = loaded.last_save_millis.unwrap_or(now);
            let report = process_offline_progression(
                &mut session.state.player,
                &session.state.location,
                last_save,
                now,
            );
            session.offline_report = Some(report);
            if let Err(e) = session.persist() {
                warn!("offline rewards not saved, they may be credited again: {}", e);
            }
        }

        session
    }

    /// Offline rewards computed at load, handed out once.
    pub fn take_offline_report(&mut self) -> Option<OfflineReport> {
        self.offline_report.take()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn player(&self) -> &Player {
        &self.state.player
    }

    pub fn location(&self) -> &Location {
        &self.state.location
    }

    pub fn monster(&self) -> Option<&Monster> {
        self.state.monster.as_ref()
    }

    pub fn is_fighting(&self) -> bool {
        self.state.is_fighting()
    }

    pub fn inventory_weapons(&self) -> &[Weapon] {
        &self.state.player.inventory_weapons
    }

    pub fn inventory_armors(&self) -> &[Armor] {
        &self.state.player.inventory_armors
    }

    /// Incremented every time a battle starts. A scheduler bound to an older
    /// epoch must not fire.
    pub fn battle_epoch(&self) -> u64 {
        self.battle_epoch
    }

    pub fn last_persistence_error(&self) -> Option<&str> {
        self.last_persistence_error.as_deref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Writes a snapshot of the current state.
    pub fn persist(&mut self) -> Result<(), PersistenceError> {
        let record = SaveRecord::capture(&self.state, (self.clock)());
        match self.store.save(&record) {
            Ok(()) => {
                self.last_persistence_error = None;
                Ok(())
            }
            Err(e) => {
                warn!("failed to save game: {}", e);
                self.last_persistence_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    fn commit<T>(&mut self, value: T) -> GameResult<T> {
        self.persist()?;
        Ok(value)
    }

    /// Moves to `location`. Any running battle stops.
    pub fn change_location(&mut self, location: Location) -> GameResult<()> {
        game_logic::change_location(&mut self.state, location);
        self.commit(())
    }

    /// Starts auto-battle. Returns false, without saving, when already
    /// fighting or when the current location has no monsters.
    pub fn start_auto_battle(&mut self) -> GameResult<bool> {
        if !game_logic::start_auto_battle(&mut self.state) {
            return Ok(false);
        }
        self.battle_epoch += 1;
        debug!("battle epoch {}", self.battle_epoch);
        self.commit(true)
    }

    /// Stops auto-battle. Returns false when no battle was running.
    pub fn stop_auto_battle(&mut self) -> GameResult<bool> {
        if !game_logic::stop_auto_battle(&mut self.state) {
            return Ok(false);
        }
        self.commit(true)
    }

    pub fn buy_weapon(&mut self, weapon: &Weapon) -> GameResult<()> {
        shop::buy_weapon(&mut self.state.player, weapon)?;
        self.commit(())
    }

    pub fn buy_armor(&mut self, armor: &Armor) -> GameResult<()> {
        shop::buy_armor(&mut self.state.player, armor)?;
        self.commit(())
    }

    pub fn buy_potion(&mut self, kind: PotionKind, quantity: u32) -> GameResult<()> {
        shop::buy_potion(&mut self.state.player, kind, quantity)?;
        self.commit(())
    }

    pub fn equip_weapon(&mut self, weapon: &Weapon) -> GameResult<()> {
        shop::equip_weapon(&mut self.state.player, weapon)?;
        self.commit(())
    }

    pub fn equip_armor(&mut self, armor: &Armor) -> GameResult<()> {
        shop::equip_armor(&mut self.state.player, armor)?;
        self.commit(())
    }

    pub fn unequip_weapon(&mut self) -> GameResult<Weapon> {
        let weapon = shop::unequip_weapon(&mut self.state.player)?;
        self.commit(weapon)
    }

    pub fn unequip_armor(&mut self) -> GameResult<Armor> {
        let armor = shop::unequip_armor(&mut self.state.player)?;
        self.commit(armor)
    }

    /// Drinks one potion of `kind`. Returns the HP restored.
    pub fn use_potion(&mut self, kind: PotionKind) -> GameResult<i32> {
        let healed = shop::use_potion(&mut self.state.player, kind)?;
        self.commit(healed)
    }

    /// Drinks the potion that best fits the missing HP.
    pub fn quick_heal(&mut self) -> GameResult<(PotionKind, i32)> {
        let used = shop::quick_heal(&mut self.state.player)?;
        self.commit(used)
    }

    /// Runs one battle tick and saves the result.
    ///
    /// Does nothing, and writes nothing, unless a battle is running.
    pub fn tick(&mut self) -> TickResult {
        let mut result = advance(&mut self.state);
        if !result.executed {
            return result;
        }
        if let Err(e) = self.persist() {
            result.events.push(TickEvent::PersistenceFailed {
                message: e.to_string(),
            });
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::GameError;
    use crate::persistence::{MemoryStore, StoredValue};

    const HOUR_MS: i64 = 3_600_000;

    fn fixed_clock(now: i64) -> Clock {
        Box::new(move || now)
    }

    fn battling_record(save_millis: i64) -> SaveRecord {
        let mut state = GameState::with_player(Player::new(), Location::training_ground(1));
        assert!(game_logic::start_auto_battle(&mut state));
        SaveRecord::capture(&state, save_millis)
    }

    #[test]
    fn test_empty_store_starts_new_game() {
        let session = GameSession::load_with_clock(MemoryStore::new(), fixed_clock(0));

        assert_eq!(session.player(), &Player::new());
        assert_eq!(session.location(), &Location::main_city());
        assert!(!session.is_fighting());
        assert_eq!(session.store().writes(), 0, "loading alone must not write");
    }

    #[test]
    fn test_offline_progress_credited_once() {
        let store = MemoryStore::with_record(battling_record(0));
        let mut session = GameSession::load_with_clock(store, fixed_clock(HOUR_MS));

        let report = session.take_offline_report().expect("offline report");
        assert_eq!(report.monsters_killed, 900);
        assert_eq!(session.player().gold, 4500);
        assert!(!session.is_fighting(), "battle is not resumed on load");
        assert!(session.take_offline_report().is_none());

        // The credit was written back with the battle flag cleared.
        let record = session.store().record().cloned().expect("saved record");
        assert_eq!(
            record.get("wasAutoBattling"),
            Some(&StoredValue::Bool(false))
        );

        let mut reloaded =
            GameSession::load_with_clock(MemoryStore::with_record(record), fixed_clock(2 * HOUR_MS));
        assert!(reloaded.take_offline_report().is_none());
        assert_eq!(reloaded.player().gold, 4500);
    }

    #[test]
    fn test_invalid_record_falls_back_to_defaults() {
        let mut record = battling_record(0);
        record.set_str("level", "seven");

        let mut session =
            GameSession::load_with_clock(MemoryStore::with_record(record), fixed_clock(HOUR_MS));

        assert_eq!(session.player(), &Player::new());
        assert!(session.take_offline_report().is_none());
    }

    #[test]
    fn test_start_battle_outside_combat_is_noop() {
        let mut session = GameSession::load_with_clock(MemoryStore::new(), fixed_clock(0));

        assert!(!session.start_auto_battle().unwrap());
        assert_eq!(session.battle_epoch(), 0);
        assert_eq!(session.store().writes(), 0);
    }

    #[test]
    fn test_each_battle_start_bumps_epoch() {
        let mut session = GameSession::load_with_clock(MemoryStore::new(), fixed_clock(0));
        session.change_location(Location::training_ground(2)).unwrap();

        assert!(session.start_auto_battle().unwrap());
        assert!(!session.start_auto_battle().unwrap(), "already fighting");
        assert!(session.stop_auto_battle().unwrap());
        assert!(session.start_auto_battle().unwrap());

        assert_eq!(session.battle_epoch(), 2);
    }

    #[test]
    fn test_failed_purchase_does_not_write() {
        let mut session = GameSession::load_with_clock(MemoryStore::new(), fixed_clock(0));

        let err = session.buy_potion(PotionKind::Small, 10).unwrap_err();

        assert_eq!(err.shortfall(), Some(10));
        assert_eq!(session.store().writes(), 0);
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let mut session = GameSession::load_with_clock(MemoryStore::new(), fixed_clock(0));
        session.state.player.gold = 100;
        session.store_mut().set_fail_writes(true);

        let err = session.buy_potion(PotionKind::Small, 10).unwrap_err();

        assert!(matches!(err, GameError::Persistence(_)));
        assert_eq!(session.player().gold, 90, "in-memory purchase stands");
        assert_eq!(session.player().potion_count(PotionKind::Small), 10);
        assert!(session.last_persistence_error().is_some());

        session.store_mut().set_fail_writes(false);
        session.persist().unwrap();
        assert!(session.last_persistence_error().is_none());
    }

    #[test]
    fn test_tick_persists_only_when_fighting() {
        let mut session = GameSession::load_with_clock(MemoryStore::new(), fixed_clock(0));

        let idle = session.tick();
        assert!(!idle.executed);
        assert_eq!(session.store().writes(), 0);

        session.change_location(Location::training_ground(1)).unwrap();
        session.start_auto_battle().unwrap();
        let writes_before = session.store().writes();

        let result = session.tick();
        assert!(result.executed);
        assert_eq!(session.store().writes(), writes_before + 1);
    }

    #[test]
    fn test_tick_reports_write_failure() {
        let mut session = GameSession::load_with_clock(MemoryStore::new(), fixed_clock(0));
        session.change_location(Location::training_ground(1)).unwrap();
        session.start_auto_battle().unwrap();
        session.store_mut().set_fail_writes(true);

        let result = session.tick();

        assert!(result
            .events
            .iter()
            .any(|e| matches!(e, TickEvent::PersistenceFailed { .. })));
        assert_eq!(session.monster().map(|m| m.current_hp), Some(22));
    }
}
