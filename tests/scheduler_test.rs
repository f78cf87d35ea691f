//! Battle timer driving a shared session, with commands interleaved from
//! another thread.

use idle_mmorpg::core::game_state::BattleState;
use idle_mmorpg::core::scheduler::TickScheduler;
use idle_mmorpg::core::session::GameSession;
use idle_mmorpg::core::tick::TickEvent;
use idle_mmorpg::items::types::PotionKind;
use idle_mmorpg::persistence::{MemoryStore, SaveRecord};
use idle_mmorpg::zones::Location;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

const FAST: Duration = Duration::from_millis(2);
const WAIT: Duration = Duration::from_secs(5);

fn shared_battle(tier: u32, gold: i64) -> Arc<Mutex<GameSession<MemoryStore>>> {
    let mut record = SaveRecord::new();
    record.set_int("gold", gold);
    let mut session =
        GameSession::load_with_clock(MemoryStore::with_record(record), Box::new(|| 0));
    session.change_location(Location::training_ground(tier)).unwrap();
    assert!(session.start_auto_battle().unwrap());
    Arc::new(Mutex::new(session))
}

#[test]
fn test_each_fired_tick_is_persisted() {
    let session = shared_battle(1, 0);
    let writes_before = session.lock().unwrap().store().writes();
    let (tx, rx) = mpsc::channel();
    let scheduler = TickScheduler::spawn(Arc::clone(&session), FAST, tx);

    for _ in 0..8 {
        let result = rx.recv_timeout(WAIT).unwrap();
        assert!(result.executed);
    }
    scheduler.stop();

    let received = 8 + rx.try_iter().count() as u64;
    let writes = session.lock().unwrap().store().writes() - writes_before;
    assert_eq!(writes, received, "one write per executed tick");
}

#[test]
fn test_purchases_interleave_with_ticks_without_lost_updates() {
    let session = shared_battle(1, 1_000);
    let (tx, rx) = mpsc::channel();
    let scheduler = TickScheduler::spawn(Arc::clone(&session), FAST, tx);

    let buyer = {
        let session = Arc::clone(&session);
        thread::spawn(move || {
            for _ in 0..50 {
                session
                    .lock()
                    .unwrap()
                    .buy_potion(PotionKind::Small, 1)
                    .unwrap();
                thread::sleep(Duration::from_millis(1));
            }
        })
    };
    buyer.join().unwrap();
    scheduler.stop();

    let gold_from_kills: u64 = rx
        .try_iter()
        .flat_map(|r| r.events)
        .filter_map(|e| match e {
            TickEvent::MonsterKilled { gold_gained, .. } => Some(gold_gained),
            _ => None,
        })
        .sum();

    let guard = session.lock().unwrap();
    assert_eq!(guard.player().gold, 1_000 - 50 + gold_from_kills);
}

#[test]
fn test_death_ends_the_timer() {
    let session = shared_battle(5, 0);
    let (tx, rx) = mpsc::channel();
    let scheduler = TickScheduler::spawn(Arc::clone(&session), FAST, tx);

    let mut died = false;
    while let Ok(result) = rx.recv_timeout(WAIT) {
        if result.player_died() {
            died = true;
            break;
        }
    }
    thread::sleep(Duration::from_millis(20));

    assert!(died);
    assert!(scheduler.is_finished());
    assert_eq!(
        session.lock().unwrap().state().battle,
        BattleState::StoppedOnDeath
    );
    assert_eq!(session.lock().unwrap().player().current_hp, 1);
}

#[test]
fn test_travel_stops_ticks() {
    let session = shared_battle(2, 0);
    let (tx, rx) = mpsc::channel();
    let scheduler = TickScheduler::spawn(Arc::clone(&session), FAST, tx);
    rx.recv_timeout(WAIT).unwrap();

    let hp_after_travel = {
        let mut guard = session.lock().unwrap();
        guard.change_location(Location::main_city()).unwrap();
        guard.player().current_hp
    };
    thread::sleep(Duration::from_millis(30));

    assert!(scheduler.is_finished());
    assert_eq!(session.lock().unwrap().player().current_hp, hp_after_travel);
    assert!(session.lock().unwrap().monster().is_none());
}
