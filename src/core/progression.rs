//! Experience curve, level-up effects and the damage formula.
//!
//! Shared by the live tick loop, the offline estimator and the simulator.

use super::constants::*;
use crate::character::player::Player;

/// Anything that can deal and receive damage.
pub trait Combatant {
    /// Total attack including equipment.
    fn attack(&self) -> i32;

    /// Total defense including equipment.
    fn defense(&self) -> i32;
}

/// Experience required to advance past `level`.
pub fn xp_for_next_level(level: u32) -> u64 {
    level as u64 * XP_PER_LEVEL
}

/// Damage dealt by `attacker` to `defender`. Never below 1.
pub fn damage(attacker: &impl Combatant, defender: &impl Combatant) -> i32 {
    damage_from_stats(attacker.attack(), defender.defense())
}

pub fn damage_from_stats(attack: i32, defense: i32) -> i32 {
    MIN_DAMAGE.max(attack.saturating_sub(defense))
}

/// Adds experience and processes every level-up it pays for.
///
/// Returns the number of levels gained. Afterwards
/// `player.experience < xp_for_next_level(player.level)` always holds.
pub fn apply_experience(player: &mut Player, amount: u64) -> u32 {
    player.experience = player.experience.saturating_add(amount);

    let mut levelups = 0;
    loop {
        let xp_needed = xp_for_next_level(player.level);
        if player.experience < xp_needed {
            break;
        }
        player.experience -= xp_needed;
        level_up(player);
        levelups += 1;
    }

    levelups
}

fn level_up(player: &mut Player) {
    player.level = player.level.saturating_add(1);
    player.max_hp = player.max_hp.saturating_add(LEVEL_UP_MAX_HP);
    player.current_hp = player.max_hp;
    player.base_attack = player.base_attack.saturating_add(LEVEL_UP_ATTACK);
    player.base_defense = player.base_defense.saturating_add(LEVEL_UP_DEFENSE);
}
