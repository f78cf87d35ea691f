//! Shop and inventory transactions.
//!
//! Every operation either fully applies or leaves the player untouched.

use super::types::{Armor, EquipmentSlot, PotionKind, Weapon};
use crate::character::player::Player;
use crate::core::error::{GameError, GameResult, NoHealReason};

fn debit(player: &mut Player, cost: u64) -> GameResult<()> {
    if player.gold < cost {
        return Err(GameError::InsufficientFunds {
            cost,
            available: player.gold,
        });
    }
    player.gold -= cost;
    Ok(())
}

/// Buys a weapon into the inventory. Equipping is a separate step.
pub fn buy_weapon(player: &mut Player, weapon: &Weapon) -> GameResult<()> {
    debit(player, weapon.price)?;
    player.inventory_weapons.push(weapon.clone());
    Ok(())
}

/// Buys an armor into the inventory. Equipping is a separate step.
pub fn buy_armor(player: &mut Player, armor: &Armor) -> GameResult<()> {
    debit(player, armor.price)?;
    player.inventory_armors.push(armor.clone());
    Ok(())
}

pub fn buy_potion(player: &mut Player, kind: PotionKind, quantity: u32) -> GameResult<()> {
    if quantity == 0 {
        return Err(GameError::InvalidQuantity);
    }
    let cost = kind.price().saturating_mul(quantity as u64);
    debit(player, cost)?;
    player.add_potions(kind, quantity);
    Ok(())
}

/// Moves one copy of `weapon` from the inventory into the weapon slot.
/// Whatever was equipped before goes back to the inventory.
pub fn equip_weapon(player: &mut Player, weapon: &Weapon) -> GameResult<()> {
    let index = player
        .inventory_weapons
        .iter()
        .position(|w| w == weapon)
        .ok_or_else(|| GameError::ItemNotInInventory {
            item: weapon.name.clone(),
        })?;

    let equipped = player.inventory_weapons.remove(index);
    if let Some(previous) = player.equipped_weapon.replace(equipped) {
        player.inventory_weapons.push(previous);
    }
    Ok(())
}

pub fn equip_armor(player: &mut Player, armor: &Armor) -> GameResult<()> {
    let index = player
        .inventory_armors
        .iter()
        .position(|a| a == armor)
        .ok_or_else(|| GameError::ItemNotInInventory {
            item: armor.name.clone(),
        })?;

    let equipped = player.inventory_armors.remove(index);
    if let Some(previous) = player.equipped_armor.replace(equipped) {
        player.inventory_armors.push(previous);
    }
    Ok(())
}

/// Returns the equipped weapon to the inventory.
pub fn unequip_weapon(player: &mut Player) -> GameResult<Weapon> {
    let weapon = player
        .equipped_weapon
        .take()
        .ok_or(GameError::NothingEquipped {
            slot: EquipmentSlot::Weapon,
        })?;
    player.inventory_weapons.push(weapon.clone());
    Ok(weapon)
}

pub fn unequip_armor(player: &mut Player) -> GameResult<Armor> {
    let armor = player
        .equipped_armor
        .take()
        .ok_or(GameError::NothingEquipped {
            slot: EquipmentSlot::Armor,
        })?;
    player.inventory_armors.push(armor.clone());
    Ok(armor)
}

/// Drinks one potion of `kind`. Returns the HP actually restored.
pub fn use_potion(player: &mut Player, kind: PotionKind) -> GameResult<i32> {
    if player.is_full_hp() {
        return Err(GameError::NoHealableTarget(NoHealReason::FullHealth));
    }
    let before = player.current_hp;
    if !player.consume_potion(kind) {
        return Err(GameError::NoHealableTarget(NoHealReason::OutOfStock));
    }
    Ok(player.current_hp - before)
}

/// Drinks the most efficient held potion for the current missing HP.
pub fn quick_heal(player: &mut Player) -> GameResult<(PotionKind, i32)> {
    if player.is_full_hp() {
        return Err(GameError::NoHealableTarget(NoHealReason::FullHealth));
    }
    let kind = player
        .most_efficient_potion()
        .ok_or(GameError::NoHealableTarget(NoHealReason::OutOfStock))?;
    let healed = use_potion(player, kind)?;
    Ok((kind, healed))
}
