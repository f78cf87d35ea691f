//! Offline progression.
//!
//! Projects the battle the player left running onto the time the game was
//! closed. This is a closed-form estimate: every elapsed second counts as a
//! tick, every monster dies in `ceil(hp / damage)` ticks, and the monster
//! never hurts the player. The live tick loop can lose a fight; this
//! estimate cannot.

use super::constants::MILLIS_PER_SECOND;
use super::progression::{apply_experience, damage};
use crate::character::player::Player;
use crate::combat::generation::template_for;
use crate::combat::types::MonsterTemplate;
use crate::zones::Location;
use log::info;

/// Report of offline progression results
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OfflineReport {
    pub elapsed_seconds: i64,
    pub monsters_killed: u64,
    pub experience_gained: u64,
    pub gold_gained: u64,
    pub level_before: u32,
    pub level_after: u32,
}

impl OfflineReport {
    pub fn is_empty(&self) -> bool {
        self.monsters_killed == 0
    }
}

/// Whole seconds between two epoch-millisecond timestamps. Zero if the
/// clock went backwards.
pub fn elapsed_seconds(last_save_millis: i64, now_millis: i64) -> i64 {
    (now_millis.saturating_sub(last_save_millis) / MILLIS_PER_SECOND).max(0)
}

/// Ticks needed to kill a full-health monster.
pub fn ticks_per_kill(player: &Player, template: &MonsterTemplate) -> u64 {
    let per_tick = damage(player, template) as u64;
    (template.max_hp.max(1) as u64).div_ceil(per_tick)
}

/// Whole kills achievable in `elapsed_seconds` ticks. Never fractional.
pub fn estimate_kills(elapsed_seconds: i64, player: &Player, template: &MonsterTemplate) -> u64 {
    if elapsed_seconds <= 0 {
        return 0;
    }
    elapsed_seconds as u64 / ticks_per_kill(player, template)
}

/// Credits the kills the battle at `location` would have produced between
/// `last_save_millis` and `now_millis`.
pub fn process_offline_progression(
    player: &mut Player,
    location: &Location,
    last_save_millis: i64,
    now_millis: i64,
) -> OfflineReport {
    let elapsed_seconds = elapsed_seconds(last_save_millis, now_millis);
    let level_before = player.level;

    let template = template_for(location);
    let monsters_killed = estimate_kills(elapsed_seconds, player, &template);
    let experience_gained = monsters_killed.saturating_mul(template.exp_reward);
    let gold_gained = monsters_killed.saturating_mul(template.gold_reward);

    apply_experience(player, experience_gained);
    player.gold = player.gold.saturating_add(gold_gained);

    let report = OfflineReport {
        elapsed_seconds,
        monsters_killed,
        experience_gained,
        gold_gained,
        level_before,
        level_after: player.level,
    };

    if !report.is_empty() {
        info!(
            "offline for {}s at {}: {} {} killed, +{} exp, +{} gold",
            elapsed_seconds,
            location,
            monsters_killed,
            template.name,
            experience_gained,
            gold_gained
        );
    }

    report
}
