//! Integration tests for offline progression, alone and through a session
//! load.

use idle_mmorpg::character::player::Player;
use idle_mmorpg::combat::generation::template_for_tier;
use idle_mmorpg::core::game_logic::{change_location, start_auto_battle};
use idle_mmorpg::core::game_state::GameState;
use idle_mmorpg::core::offline::{estimate_kills, process_offline_progression, ticks_per_kill};
use idle_mmorpg::core::session::GameSession;
use idle_mmorpg::core::tick::advance;
use idle_mmorpg::persistence::{MemoryStore, SaveRecord, StoredValue};
use idle_mmorpg::zones::Location;

const HOUR_MS: i64 = 3_600_000;

fn saved_mid_battle(tier: u32, save_millis: i64) -> SaveRecord {
    let mut state = GameState::new();
    change_location(&mut state, Location::training_ground(tier));
    assert!(start_auto_battle(&mut state));
    SaveRecord::capture(&state, save_millis)
}

#[test]
fn test_one_hour_of_slimes_offline() {
    let mut player = Player::new();

    let report = process_offline_progression(&mut player, &Location::training_ground(1), 0, HOUR_MS);

    assert_eq!(ticks_per_kill(&Player::new(), &template_for_tier(1)), 4);
    assert_eq!(report.monsters_killed, 900);
    assert_eq!(report.experience_gained, 9000);
    assert_eq!(report.gold_gained, 4500);
}

#[test]
fn test_estimate_never_decreases_with_time() {
    let player = Player::new();
    for tier in 1..=5 {
        let template = template_for_tier(tier);
        let mut previous = 0;
        for seconds in (0..5000).step_by(7) {
            let kills = estimate_kills(seconds, &player, &template);
            assert!(kills >= previous, "tier {} at {}s", tier, seconds);
            previous = kills;
        }
    }
}

/// The offline estimate never loses a fight; the live loop can. This is
/// kept on purpose and locked in here.
#[test]
fn test_offline_is_optimistic_where_live_battle_dies() {
    let location = Location::training_ground(5);

    let mut live = GameState::new();
    change_location(&mut live, location.clone());
    start_auto_battle(&mut live);
    let mut live_kills = 0;
    for _ in 0..3600 {
        let result = advance(&mut live);
        if result.killed_monster() {
            live_kills += 1;
        }
        if result.player_died() {
            break;
        }
    }

    let mut offline = Player::new();
    let report = process_offline_progression(&mut offline, &location, 0, HOUR_MS);

    assert_eq!(live_kills, 0, "a fresh character loses to a dragon");
    assert_eq!(report.monsters_killed, 3600 / 350);
}

#[test]
fn test_load_credits_offline_time_exactly_once() {
    let store = MemoryStore::with_record(saved_mid_battle(1, 1_000));
    let mut session = GameSession::load_with_clock(store, Box::new(|| 1_000 + HOUR_MS));

    let report = session.take_offline_report().expect("credited on load");
    assert_eq!(report.elapsed_seconds, 3600);
    assert_eq!(report.monsters_killed, 900);
    assert_eq!(session.player().gold, 4500);

    let record = session.store().record().cloned().unwrap();
    assert_eq!(record.get("wasAutoBattling"), Some(&StoredValue::Bool(false)));
    assert_eq!(
        record.get("lastSaveTime"),
        Some(&StoredValue::Int(1_000 + HOUR_MS))
    );

    // Reopening later credits nothing more for the same battle.
    let mut again = GameSession::load_with_clock(
        MemoryStore::with_record(record),
        Box::new(|| 1_000 + 3 * HOUR_MS),
    );
    assert!(again.take_offline_report().is_none());
    assert_eq!(again.player().gold, 4500);
}

#[test]
fn test_no_credit_when_battle_was_not_running() {
    let mut state = GameState::new();
    change_location(&mut state, Location::training_ground(1));
    let record = SaveRecord::capture(&state, 0);

    let mut session =
        GameSession::load_with_clock(MemoryStore::with_record(record), Box::new(|| HOUR_MS));

    assert!(session.take_offline_report().is_none());
    assert_eq!(session.player().gold, 0);
    assert_eq!(session.store().writes(), 0);
}

#[test]
fn test_missing_save_time_credits_nothing() {
    let mut record = saved_mid_battle(1, 0);
    record.remove("lastSaveTime");

    let mut session =
        GameSession::load_with_clock(MemoryStore::with_record(record), Box::new(|| HOUR_MS));

    let report = session.take_offline_report().expect("battle flag was set");
    assert!(report.is_empty());
    assert_eq!(session.player().gold, 0);
}
