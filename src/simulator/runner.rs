//! Simulation runner built on the live battle tick.
//!
//! Statistics are tracked externally from `TickResult` events, so the run
//! follows exactly the rules the game uses.

use super::config::SimConfig;
use super::report::SimReport;
use crate::combat::generation::template_for;
use crate::core::constants::MILLIS_PER_SECOND;
use crate::core::game_logic::start_auto_battle;
use crate::core::game_state::GameState;
use crate::core::offline::process_offline_progression;
use crate::core::tick::{advance, TickEvent};

/// Tracks statistics during a simulation run.
#[derive(Debug, Default)]
struct SimStats {
    ticks: u64,
    kills: u64,
    experience: u64,
    gold: u64,
    potions_used: u64,
    hp_healed: u64,
    damage_dealt: u64,
    damage_taken: u64,
    death_tick: Option<u64>,
}

impl SimStats {
    fn record(&mut self, event: &TickEvent) {
        match event {
            TickEvent::MonsterDamaged { damage } => self.damage_dealt += *damage as u64,
            TickEvent::PlayerDamaged { damage } => self.damage_taken += *damage as u64,
            TickEvent::MonsterKilled {
                exp_gained,
                gold_gained,
                ..
            } => {
                self.kills += 1;
                self.experience += exp_gained;
                self.gold += gold_gained;
            }
            TickEvent::PotionUsed { healed, .. } => {
                self.potions_used += 1;
                self.hp_healed += *healed as u64;
            }
            TickEvent::PlayerDied { .. } => self.death_tick = Some(self.ticks),
            TickEvent::LeveledUp { .. } | TickEvent::PersistenceFailed { .. } => {}
        }
    }
}

/// Run the simulation and return a report.
///
/// The live run stops at the first death, like the game does.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let player = config.build_player();
    let template = template_for(&config.location);
    let mut state = GameState::with_player(player.clone(), config.location.clone());
    let mut stats = SimStats::default();

    if start_auto_battle(&mut state) {
        while stats.ticks < config.seconds && state.is_fighting() {
            stats.ticks += 1;
            let result = advance(&mut state);
            for event in &result.events {
                stats.record(event);
            }
        }
    }

    let mut offline_player = player.clone();
    let offline = if config.location.is_combat() {
        let elapsed_millis = (config.seconds as i64).saturating_mul(MILLIS_PER_SECOND);
        Some(process_offline_progression(
            &mut offline_player,
            &config.location,
            0,
            elapsed_millis,
        ))
    } else {
        None
    };

    SimReport {
        location: config.location.id().to_string(),
        monster: config
            .location
            .is_combat()
            .then(|| template.name.to_string()),
        seconds: config.seconds,
        ticks_run: stats.ticks,
        kills: stats.kills,
        experience_gained: stats.experience,
        gold_gained: stats.gold,
        potions_used: stats.potions_used,
        hp_healed: stats.hp_healed,
        damage_dealt: stats.damage_dealt,
        damage_taken: stats.damage_taken,
        death_tick: stats.death_tick,
        level_before: player.level,
        level_after: state.player.level,
        final_hp: state.player.current_hp,
        offline_kills: offline.as_ref().map_or(0, |o| o.monsters_killed),
        offline_experience: offline.as_ref().map_or(0, |o| o.experience_gained),
        offline_gold: offline.as_ref().map_or(0, |o| o.gold_gained),
        offline_level_after: offline_player.level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::Location;

    #[test]
    fn test_live_slime_hour_outpaces_offline_estimate() {
        let report = run_simulation(&SimConfig::default());

        // Offline uses the starting stats for the whole window; the live
        // run levels up and kills faster as it goes.
        assert!(!report.died());
        assert_eq!(report.offline_kills, 900);
        assert_eq!(report.offline_experience, 9000);
        assert!(report.kills >= report.offline_kills);
        assert_eq!(report.ticks_run, 3600);
    }

    #[test]
    fn test_dragon_kills_fresh_character() {
        let config = SimConfig {
            location: Location::training_ground(5),
            ..Default::default()
        };
        let report = run_simulation(&config);

        assert!(report.died(), "a level 1 character cannot survive a dragon");
        assert_eq!(report.kills, 0);
        assert_eq!(report.final_hp, 1);
        assert!(report.offline_kills > 0, "offline estimate never loses");
    }

    #[test]
    fn test_non_combat_location_runs_nothing() {
        let config = SimConfig {
            location: Location::main_city(),
            ..Default::default()
        };
        let report = run_simulation(&config);

        assert_eq!(report.ticks_run, 0);
        assert!(report.monster.is_none());
        assert_eq!(report.offline_kills, 0);
    }

    #[test]
    fn test_potions_extend_the_run() {
        let base = SimConfig {
            location: Location::training_ground(2),
            seconds: 600,
            ..Default::default()
        };
        let stocked = SimConfig {
            small_potions: 10,
            ..base.clone()
        };

        let without = run_simulation(&base);
        let with = run_simulation(&stocked);

        assert!(with.ticks_run >= without.ticks_run);
        assert!(with.potions_used <= 10);
    }
}
