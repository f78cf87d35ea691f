//! Battle state transitions driven by player commands.

use super::game_state::{BattleState, GameState};
use crate::combat::generation::monster_for;
use crate::zones::Location;
use log::debug;

/// Starts auto-battle. Only valid at a combat location; elsewhere it is a
/// silent no-op and returns false. Also returns false if already fighting.
pub fn start_auto_battle(state: &mut GameState) -> bool {
    if state.is_fighting() {
        return false;
    }
    if !state.location.is_combat() {
        debug!("ignoring battle start at non-combat location {}", state.location);
        return false;
    }

    if state.monster.is_none() {
        state.monster = Some(monster_for(&state.location));
    }
    state.battle = BattleState::Fighting;
    debug!("auto-battle started at {}", state.location);
    true
}

/// Stops auto-battle. Returns false if it was not running.
pub fn stop_auto_battle(state: &mut GameState) -> bool {
    if !state.is_fighting() {
        return false;
    }
    state.battle = BattleState::Idle;
    debug!("auto-battle stopped at {}", state.location);
    true
}

/// Moves the player. Any running battle stops first; combat locations get a
/// fresh monster, others hold none.
pub fn change_location(state: &mut GameState, location: Location) {
    stop_auto_battle(state);

    state.monster = location.is_combat().then(|| monster_for(&location));
    debug!("moved from {} to {}", state.location, location);
    state.location = location;
}

/// Marks the battle as lost. The caller has already floored HP.
pub(crate) fn stop_on_death(state: &mut GameState) {
    state.battle = BattleState::StoppedOnDeath;
    debug!("auto-battle stopped: player defeated at {}", state.location);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_outside_combat_is_ignored() {
        let mut state = GameState::new();
        assert!(!start_auto_battle(&mut state));
        assert_eq!(state.battle, BattleState::Idle);
        assert!(state.monster.is_none());
    }

    #[test]
    fn test_start_spawns_monster_when_missing() {
        let mut state = GameState::new();
        state.location = Location::training_ground(3);

        assert!(start_auto_battle(&mut state));

        assert_eq!(state.battle, BattleState::Fighting);
        assert_eq!(state.monster.as_ref().map(|m| m.name.as_str()), Some("Orc"));
    }

    #[test]
    fn test_start_keeps_existing_monster() {
        let mut state = GameState::new();
        change_location(&mut state, Location::training_ground(1));
        if let Some(monster) = state.monster.as_mut() {
            monster.take_damage(10);
        }

        start_auto_battle(&mut state);

        assert_eq!(state.monster.as_ref().map(|m| m.current_hp), Some(20));
    }

    #[test]
    fn test_start_twice_is_noop() {
        let mut state = GameState::new();
        change_location(&mut state, Location::training_ground(1));
        assert!(start_auto_battle(&mut state));
        assert!(!start_auto_battle(&mut state));
        assert!(state.is_fighting());
    }

    #[test]
    fn test_restart_after_death() {
        let mut state = GameState::new();
        change_location(&mut state, Location::training_ground(1));
        start_auto_battle(&mut state);
        stop_on_death(&mut state);

        assert!(!stop_auto_battle(&mut state), "stop is only valid while fighting");
        assert_eq!(state.battle, BattleState::StoppedOnDeath);
        assert!(start_auto_battle(&mut state));
        assert!(state.is_fighting());
    }

    #[test]
    fn test_change_location_always_stops_battle() {
        let mut state = GameState::new();
        change_location(&mut state, Location::training_ground(1));
        start_auto_battle(&mut state);

        change_location(&mut state, Location::training_ground(2));

        assert_eq!(state.battle, BattleState::Idle);
        assert_eq!(state.monster.as_ref().map(|m| m.name.as_str()), Some("Goblin"));
    }

    #[test]
    fn test_change_to_non_combat_clears_monster() {
        let mut state = GameState::new();
        change_location(&mut state, Location::training_ground(4));
        start_auto_battle(&mut state);

        change_location(&mut state, Location::new("weapon-shop"));

        assert_eq!(state.battle, BattleState::Idle);
        assert!(state.monster.is_none());
        assert_eq!(state.location.id(), "weapon-shop");
    }
}
