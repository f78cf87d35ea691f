use crate::core::constants::*;
use crate::core::progression::{xp_for_next_level, Combatant};
use crate::items::types::{Armor, PotionKind, Weapon};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The player aggregate. One instance per save file.
///
/// Equipped items are stored explicitly per slot; the attack and defense
/// bonuses are derived from them rather than stored on their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub level: u32,
    pub experience: u64,
    pub max_hp: i32,
    pub current_hp: i32,
    pub base_attack: i32,
    pub base_defense: i32,
    pub gold: u64,
    pub equipped_weapon: Option<Weapon>,
    pub equipped_armor: Option<Armor>,
    /// Held potions. A kind is never present with a zero count.
    pub potions: BTreeMap<PotionKind, u32>,
    pub inventory_weapons: Vec<Weapon>,
    pub inventory_armors: Vec<Armor>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    /// Creates a fresh level 1 character.
    pub fn new() -> Self {
        Self {
            level: STARTING_LEVEL,
            experience: 0,
            max_hp: STARTING_MAX_HP,
            current_hp: STARTING_MAX_HP,
            base_attack: STARTING_ATTACK,
            base_defense: STARTING_DEFENSE,
            gold: STARTING_GOLD,
            equipped_weapon: None,
            equipped_armor: None,
            potions: BTreeMap::new(),
            inventory_weapons: Vec::new(),
            inventory_armors: Vec::new(),
        }
    }

    pub fn weapon_attack_bonus(&self) -> i32 {
        self.equipped_weapon.as_ref().map_or(0, |w| w.attack)
    }

    pub fn armor_defense_bonus(&self) -> i32 {
        self.equipped_armor.as_ref().map_or(0, |a| a.defense)
    }

    pub fn xp_to_next_level(&self) -> u64 {
        xp_for_next_level(self.level)
    }

    pub fn missing_hp(&self) -> i32 {
        self.max_hp.saturating_sub(self.current_hp)
    }

    pub fn is_full_hp(&self) -> bool {
        self.current_hp >= self.max_hp
    }

    /// Heals by `amount`, never above max HP.
    pub fn heal(&mut self, amount: i32) {
        self.current_hp = self.max_hp.min(self.current_hp.saturating_add(amount));
    }

    pub fn potion_count(&self, kind: PotionKind) -> u32 {
        self.potions.get(&kind).copied().unwrap_or(0)
    }

    pub fn add_potions(&mut self, kind: PotionKind, quantity: u32) {
        if quantity == 0 {
            return;
        }
        let held = self.potions.entry(kind).or_insert(0);
        *held = held.saturating_add(quantity);
    }

    /// Consumes one potion of `kind` and applies its heal.
    ///
    /// Returns false when none are held. Does not look at current HP; the
    /// callers decide whether drinking is worthwhile.
    pub fn consume_potion(&mut self, kind: PotionKind) -> bool {
        let Some(count) = self.potions.get_mut(&kind) else {
            return false;
        };
        *count -= 1;
        if *count == 0 {
            self.potions.remove(&kind);
        }
        self.heal(kind.heal_amount());
        true
    }

    /// The held potion with the lowest heal amount.
    pub fn smallest_available_potion(&self) -> Option<PotionKind> {
        self.potions
            .iter()
            .filter(|(_, &count)| count > 0)
            .map(|(&kind, _)| kind)
            .min_by_key(|kind| kind.heal_amount())
    }

    /// The cheapest held potion that restores all missing HP, or the
    /// strongest held potion if none does. `None` at full HP.
    pub fn most_efficient_potion(&self) -> Option<PotionKind> {
        let missing = self.missing_hp();
        if missing <= 0 {
            return None;
        }

        let held = || {
            self.potions
                .iter()
                .filter(|(_, &count)| count > 0)
                .map(|(&kind, _)| kind)
        };

        held()
            .filter(|kind| kind.heal_amount() >= missing)
            .min_by_key(|kind| kind.heal_amount())
            .or_else(|| held().max_by_key(|kind| kind.heal_amount()))
    }

    pub fn total_potions(&self) -> u32 {
        self.potions.values().sum()
    }

    /// Strongest unequipped weapon.
    pub fn best_inventory_weapon(&self) -> Option<&Weapon> {
        self.inventory_weapons.iter().max_by_key(|w| w.attack)
    }

    /// Strongest unequipped armor.
    pub fn best_inventory_armor(&self) -> Option<&Armor> {
        self.inventory_armors.iter().max_by_key(|a| a.defense)
    }
}

impl Combatant for Player {
    fn attack(&self) -> i32 {
        self.base_attack.saturating_add(self.weapon_attack_bonus())
    }

    fn defense(&self) -> i32 {
        self.base_defense.saturating_add(self.armor_defense_bonus())
    }
}
