//! Save/load through the file store and the session.

use idle_mmorpg::core::game_state::GameState;
use idle_mmorpg::core::session::GameSession;
use idle_mmorpg::items::catalog::{armor_tier, weapon_tier};
use idle_mmorpg::items::types::PotionKind;
use idle_mmorpg::persistence::{KeyValueStore, MemoryStore, SaveManager, SaveRecord, StoredValue};
use idle_mmorpg::zones::Location;
use std::fs;
use std::path::PathBuf;

fn temp_save(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "idle-mmorpg-it-{}-{}",
        std::process::id(),
        name
    ));
    let _ = fs::remove_dir_all(&dir);
    dir.join("save.dat")
}

/// A store holding a fresh character with `gold` to spend.
fn funded<S: KeyValueStore>(mut store: S, gold: i64) -> S {
    let mut record = SaveRecord::capture(&GameState::new(), 0);
    record.set_int("gold", gold);
    store.save(&record).unwrap();
    store
}

fn play_a_little<S: KeyValueStore>(session: &mut GameSession<S>) {
    let weapon = weapon_tier(2).unwrap();
    let armor = armor_tier(1).unwrap();

    session.buy_weapon(&weapon).unwrap();
    session.buy_armor(&armor).unwrap();
    session.buy_weapon(&weapon_tier(1).unwrap()).unwrap();
    session.buy_potion(PotionKind::Small, 3).unwrap();
    session.buy_potion(PotionKind::Medium, 1).unwrap();
    session.equip_weapon(&weapon).unwrap();
    session.equip_armor(&armor).unwrap();
    session.change_location(Location::training_ground(2)).unwrap();
    session.start_auto_battle().unwrap();
    for _ in 0..5 {
        session.tick();
    }
}

#[test]
fn test_file_store_roundtrip_restores_player() {
    let path = temp_save("roundtrip");
    let store = funded(SaveManager::new(&path).unwrap(), 1_000);

    let mut session = GameSession::load_with_clock(store, Box::new(|| 10_000));
    play_a_little(&mut session);
    session.stop_auto_battle().unwrap();
    let expected = session.player().clone();
    drop(session);

    let reloaded = GameSession::load_with_clock(SaveManager::new(&path).unwrap(), Box::new(|| 20_000));

    assert_eq!(reloaded.player(), &expected);
    assert_eq!(reloaded.location(), &Location::training_ground(2));
    assert!(!reloaded.is_fighting());
    assert_eq!(
        reloaded.player().equipped_weapon.as_ref().map(|w| w.name.as_str()),
        Some("Steel Sword")
    );
    assert_eq!(reloaded.inventory_weapons().len(), 1);
    assert!(reloaded.inventory_armors().is_empty());
}

#[test]
fn test_serialization_is_idempotent() {
    let store = funded(MemoryStore::new(), 1_000);
    let mut session = GameSession::load_with_clock(store, Box::new(|| 10_000));
    play_a_little(&mut session);
    session.stop_auto_battle().unwrap();

    let first = session.store().record().cloned().unwrap();
    let reloaded = GameSession::load_with_clock(MemoryStore::with_record(first.clone()), Box::new(|| 10_000));
    let second = SaveRecord::capture(reloaded.state(), 10_000);

    assert_eq!(second, first);
}

#[test]
fn test_record_carries_contract_keys() {
    let store = funded(MemoryStore::new(), 1_000);
    let mut session = GameSession::load_with_clock(store, Box::new(|| 42));
    play_a_little(&mut session);

    let record = session.store().record().unwrap();
    for key in [
        "level",
        "experience",
        "maxHp",
        "currentHp",
        "baseAttack",
        "baseDefense",
        "gold",
        "weaponAttack",
        "armorDefense",
        "currentLocation",
        "lastSaveTime",
        "wasAutoBattling",
        "potions",
        "inventoryWeapons",
        "inventoryArmors",
    ] {
        assert!(record.get(key).is_some(), "missing key {}", key);
    }
    assert_eq!(record.get("weaponAttack"), Some(&StoredValue::Int(25)));
    assert_eq!(record.get("armorDefense"), Some(&StoredValue::Int(5)));
    assert_eq!(
        record.get("currentLocation"),
        Some(&StoredValue::Str("training-ground-2".to_string()))
    );
    assert_eq!(record.get("wasAutoBattling"), Some(&StoredValue::Bool(true)));
    assert_eq!(
        record.get("inventoryWeapons"),
        Some(&StoredValue::Str("Iron Sword:10:100".to_string()))
    );
}

#[test]
fn test_non_positive_entries_are_dropped_on_load() {
    let mut record = SaveRecord::capture(&GameState::new(), 0);
    record.set_str(
        "potions",
        "Small Healing Potion:2;Medium Healing Potion:0;Large Healing Potion:-4",
    );
    record.set_str("inventoryWeapons", "Iron Sword:10:100;Broken Sword:0:5;garbage");

    let session = GameSession::load_with_clock(MemoryStore::with_record(record), Box::new(|| 0));

    let player = session.player();
    assert_eq!(player.potion_count(PotionKind::Small), 2);
    assert_eq!(player.potions.len(), 1);
    assert_eq!(session.inventory_weapons().len(), 1);
}

#[test]
fn test_legacy_record_infers_equipment_and_location() {
    let mut record = SaveRecord::new();
    record.set_int("level", 3);
    record.set_int("maxHp", 140);
    record.set_int("currentHp", 100);
    record.set_int("weaponAttack", 50);
    record.set_int("armorDefense", 7);
    record.set_str("currentLocation", "trainingGround3");

    let session = GameSession::load_with_clock(MemoryStore::with_record(record), Box::new(|| 0));

    let player = session.player();
    assert_eq!(player.level, 3);
    assert_eq!(
        player.equipped_weapon.as_ref().map(|w| w.name.as_str()),
        Some("Silver Sword")
    );
    assert_eq!(player.armor_defense_bonus(), 7, "unknown armor keeps its bonus");
    assert_eq!(session.location(), &Location::training_ground(3));
}

#[test]
fn test_corrupt_file_starts_fresh_game() {
    let path = temp_save("corrupt");
    let mut store = funded(SaveManager::new(&path).unwrap(), 777);
    let mut bytes = fs::read(&path).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x55;
    fs::write(&path, bytes).unwrap();

    assert!(store.load().is_err());
    store.clear().unwrap();
    fs::write(&path, b"garbage").unwrap();

    let session = GameSession::load_with_clock(store, Box::new(|| 0));
    assert_eq!(session.player().gold, 0);
    assert_eq!(session.location(), &Location::main_city());
}

#[test]
fn test_failed_write_keeps_playing() {
    let mut store = funded(MemoryStore::new(), 1_000);
    store.set_fail_writes(true);
    let mut session = GameSession::load_with_clock(store, Box::new(|| 0));

    assert!(session.buy_potion(PotionKind::Small, 5).is_err());
    assert_eq!(session.player().potion_count(PotionKind::Small), 5);
    assert!(session.last_persistence_error().is_some());

    session.store_mut().set_fail_writes(false);
    session.buy_potion(PotionKind::Small, 1).unwrap();
    assert!(session.last_persistence_error().is_none());

    let saved = session.store().record().unwrap();
    assert_eq!(
        saved.get("potions"),
        Some(&StoredValue::Str("Small Healing Potion:6".to_string()))
    );
}

#[test]
fn test_overflowing_potion_counts_load_without_crash() {
    let mut record = SaveRecord::capture(&GameState::new(), 0);
    record.set_str(
        "potions",
        "Small Healing Potion:4294967295;Small Healing Potion:1",
    );

    let session = GameSession::load_with_clock(MemoryStore::with_record(record), Box::new(|| 0));

    assert_eq!(session.player().potion_count(PotionKind::Small), u32::MAX);
}

#[test]
fn test_negative_save_time_starts_fresh_game() {
    let mut record = SaveRecord::capture(&GameState::new(), 0);
    record.set_int("gold", 500);
    record.set_int("lastSaveTime", i64::MIN);
    record.set_bool("wasAutoBattling", true);
    record.set_str("currentLocation", "training-ground-1");

    let mut session = GameSession::load_with_clock(
        MemoryStore::with_record(record),
        Box::new(|| 1_700_000_000_000),
    );

    assert!(session.take_offline_report().is_none());
    assert_eq!(session.player().gold, 0);
    assert_eq!(session.location(), &Location::main_city());
}

#[test]
fn test_offline_credit_write_failure_is_reported() {
    let mut record = SaveRecord::capture(&GameState::new(), 0);
    record.set_bool("wasAutoBattling", true);
    record.set_str("currentLocation", "training-ground-1");
    let mut store = MemoryStore::with_record(record);
    store.set_fail_writes(true);

    let mut session = GameSession::load_with_clock(store, Box::new(|| 3_600_000));

    let report = session.take_offline_report().unwrap();
    assert_eq!(report.monsters_killed, 900);
    assert_eq!(session.player().gold, 4_500, "credit stays in memory");
    assert!(session.last_persistence_error().is_some());
    assert_eq!(
        session.store().record().unwrap().get("wasAutoBattling"),
        Some(&StoredValue::Bool(true)),
        "old save is left untouched"
    );
}
