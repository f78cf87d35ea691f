//! Fixed shop catalogs.

use super::types::{Armor, PotionKind, Weapon};
use crate::character::player::Player;
use crate::core::constants::{ARMOR_CATALOG, WEAPON_CATALOG};

/// Weapons sold at the weapon shop, cheapest first.
pub fn weapons() -> Vec<Weapon> {
    WEAPON_CATALOG
        .iter()
        .map(|&(name, attack, price)| Weapon::new(name, attack, price))
        .collect()
}

/// Armors sold at the armor shop, cheapest first.
pub fn armors() -> Vec<Armor> {
    ARMOR_CATALOG
        .iter()
        .map(|&(name, defense, price)| Armor::new(name, defense, price))
        .collect()
}

/// Potions sold at the convenience store, weakest first.
pub fn potions() -> [PotionKind; 5] {
    PotionKind::all()
}

/// Returns the catalog weapon for a 1-based tier.
pub fn weapon_tier(tier: usize) -> Option<Weapon> {
    weapons().into_iter().nth(tier.checked_sub(1)?)
}

/// Returns the catalog armor for a 1-based tier.
pub fn armor_tier(tier: usize) -> Option<Armor> {
    armors().into_iter().nth(tier.checked_sub(1)?)
}

/// Finds the catalog weapon granting exactly `attack`.
///
/// Only used to recover the equipped weapon from saves that predate the
/// explicit equipped-item keys.
pub fn weapon_by_attack(attack: i32) -> Option<Weapon> {
    weapons().into_iter().find(|w| w.attack == attack)
}

/// Finds the catalog armor granting exactly `defense`.
pub fn armor_by_defense(defense: i32) -> Option<Armor> {
    armors().into_iter().find(|a| a.defense == defense)
}

/// Cheapest catalog weapon stronger than every weapon the player owns.
pub fn next_weapon_upgrade(player: &Player) -> Option<Weapon> {
    let best = player
        .inventory_weapons
        .iter()
        .chain(player.equipped_weapon.as_ref())
        .map(|w| w.attack)
        .max()
        .unwrap_or(0);
    weapons().into_iter().find(|w| w.attack > best)
}

/// Cheapest catalog armor stronger than every armor the player owns.
pub fn next_armor_upgrade(player: &Player) -> Option<Armor> {
    let best = player
        .inventory_armors
        .iter()
        .chain(player.equipped_armor.as_ref())
        .map(|a| a.defense)
        .max()
        .unwrap_or(0);
    armors().into_iter().find(|a| a.defense > best)
}
