//! Monster generator: maps a location to its fixed monster template.

use super::types::{Monster, MonsterTemplate};
use crate::core::constants::MONSTER_TEMPLATES;
use crate::zones::Location;

/// Template for a 1-based tier. Unknown tiers fall back to tier 1.
pub fn template_for_tier(tier: u32) -> MonsterTemplate {
    let index = match tier {
        1..=5 => (tier - 1) as usize,
        _ => 0,
    };
    let (name, level, max_hp, attack, defense, exp_reward, gold_reward) = MONSTER_TEMPLATES[index];
    MonsterTemplate {
        name,
        level,
        max_hp,
        attack,
        defense,
        exp_reward,
        gold_reward,
    }
}

/// Template selected by the trailing digit of the location identifier.
pub fn template_for(location: &Location) -> MonsterTemplate {
    template_for_tier(location.tier().unwrap_or(1))
}

/// A fresh full-health monster for `location`.
pub fn monster_for(location: &Location) -> Monster {
    template_for(location).spawn()
}
