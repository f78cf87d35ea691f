//! Simulation configuration.

use crate::character::player::Player;
use crate::core::progression::{apply_experience, xp_for_next_level};
use crate::items::catalog::{armor_tier, weapon_tier};
use crate::items::types::PotionKind;
use crate::zones::Location;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Where the battle takes place
    pub location: Location,

    /// Simulated seconds; one battle tick per second
    pub seconds: u64,

    /// Starting character level
    pub level: u32,

    /// Equipped catalog weapon tier (0 = none)
    pub weapon_tier: usize,

    /// Equipped catalog armor tier (0 = none)
    pub armor_tier: usize,

    /// Small healing potions carried
    pub small_potions: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            location: Location::training_ground(1),
            seconds: 3600,
            level: 1,
            weapon_tier: 0,
            armor_tier: 0,
            small_potions: 0,
        }
    }
}

impl SimConfig {
    /// Quick config for one tier with a matching catalog loadout
    pub fn tier_preset(tier: u32) -> Self {
        Self {
            location: Location::training_ground(tier),
            weapon_tier: tier as usize,
            armor_tier: tier as usize,
            small_potions: 20,
            ..Default::default()
        }
    }

    /// Builds the preset character: leveled through normal level-ups, then
    /// equipped and stocked.
    pub fn build_player(&self) -> Player {
        let mut player = Player::new();
        let experience: u64 = (1..self.level.max(1)).map(xp_for_next_level).sum();
        apply_experience(&mut player, experience);

        player.equipped_weapon = weapon_tier(self.weapon_tier);
        player.equipped_armor = armor_tier(self.armor_tier);
        player.add_potions(PotionKind::Small, self.small_potions);
        player
    }
}
