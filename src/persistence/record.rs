//! The flat key-value save record.
//!
//! This layout is the durable contract: other tooling and the offline
//! estimator read these keys. Lists are packed into strings as
//! `name:count;...` (potions) and `name:bonus:price;...` (equipment).

use crate::character::player::Player;
use crate::core::game_state::GameState;
use crate::core::progression::xp_for_next_level;
use crate::items::catalog;
use crate::items::types::{Armor, PotionKind, Weapon};
use crate::zones::Location;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

pub const KEY_LEVEL: &str = "level";
pub const KEY_EXPERIENCE: &str = "experience";
pub const KEY_MAX_HP: &str = "maxHp";
pub const KEY_CURRENT_HP: &str = "currentHp";
pub const KEY_BASE_ATTACK: &str = "baseAttack";
pub const KEY_BASE_DEFENSE: &str = "baseDefense";
pub const KEY_GOLD: &str = "gold";
pub const KEY_WEAPON_ATTACK: &str = "weaponAttack";
pub const KEY_ARMOR_DEFENSE: &str = "armorDefense";
pub const KEY_CURRENT_LOCATION: &str = "currentLocation";
pub const KEY_LAST_SAVE_TIME: &str = "lastSaveTime";
pub const KEY_WAS_AUTO_BATTLING: &str = "wasAutoBattling";
pub const KEY_POTIONS: &str = "potions";
pub const KEY_INVENTORY_WEAPONS: &str = "inventoryWeapons";
pub const KEY_INVENTORY_ARMORS: &str = "inventoryArmors";
pub const KEY_EQUIPPED_WEAPON: &str = "equippedWeapon";
pub const KEY_EQUIPPED_ARMOR: &str = "equippedArmor";

const ENTRY_SEPARATOR: char = ';';
const FIELD_SEPARATOR: char = ':';

/// Name given to an equipped item recovered from an old save whose bonus
/// matches no catalog entry.
const UNKNOWN_WEAPON_NAME: &str = "Unknown Weapon";
const UNKNOWN_ARMOR_NAME: &str = "Unknown Armor";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoredValue {
    Int(i64),
    Str(String),
    Bool(bool),
}

/// A persisted field that is present but unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("field {key} has the wrong type")]
    WrongType { key: &'static str },

    #[error("field {key} is out of range: {value}")]
    OutOfRange { key: &'static str, value: i64 },

    #[error("field {key} is malformed: {value:?}")]
    Malformed { key: &'static str, value: String },
}

/// A save as read back from the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSave {
    pub state: GameState,
    /// Epoch millis of the save, if the record had one.
    pub last_save_millis: Option<i64>,
    pub was_auto_battling: bool,
}

/// Flat, ordered key-value record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRecord {
    entries: BTreeMap<String, StoredValue>,
}

impl SaveRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&StoredValue> {
        self.entries.get(key)
    }

    pub fn set(&mut self, key: &str, value: StoredValue) {
        self.entries.insert(key.to_string(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<StoredValue> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn set_int(&mut self, key: &str, value: i64) {
        self.set(key, StoredValue::Int(value));
    }

    pub fn set_str(&mut self, key: &str, value: impl Into<String>) {
        self.set(key, StoredValue::Str(value.into()));
    }

    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.set(key, StoredValue::Bool(value));
    }

    fn int_or(&self, key: &'static str, default: i64) -> Result<i64, RecordError> {
        match self.get(key) {
            None => Ok(default),
            Some(StoredValue::Int(v)) => Ok(*v),
            Some(_) => Err(RecordError::WrongType { key }),
        }
    }

    fn str_or<'a>(&'a self, key: &'static str, default: &'a str) -> Result<&'a str, RecordError> {
        match self.get(key) {
            None => Ok(default),
            Some(StoredValue::Str(v)) => Ok(v),
            Some(_) => Err(RecordError::WrongType { key }),
        }
    }

    fn bool_or(&self, key: &'static str, default: bool) -> Result<bool, RecordError> {
        match self.get(key) {
            None => Ok(default),
            Some(StoredValue::Bool(v)) => Ok(*v),
            Some(_) => Err(RecordError::WrongType { key }),
        }
    }

    /// Snapshots `state` as saved at `save_millis`.
    pub fn capture(state: &GameState, save_millis: i64) -> Self {
        let player = &state.player;
        let mut record = Self::new();

        record.set_int(KEY_LEVEL, player.level as i64);
        record.set_int(KEY_EXPERIENCE, player.experience as i64);
        record.set_int(KEY_MAX_HP, player.max_hp as i64);
        record.set_int(KEY_CURRENT_HP, player.current_hp as i64);
        record.set_int(KEY_BASE_ATTACK, player.base_attack as i64);
        record.set_int(KEY_BASE_DEFENSE, player.base_defense as i64);
        record.set_int(KEY_GOLD, player.gold as i64);
        record.set_int(KEY_WEAPON_ATTACK, player.weapon_attack_bonus() as i64);
        record.set_int(KEY_ARMOR_DEFENSE, player.armor_defense_bonus() as i64);
        record.set_str(KEY_CURRENT_LOCATION, state.location.id());
        record.set_int(KEY_LAST_SAVE_TIME, save_millis);
        record.set_bool(KEY_WAS_AUTO_BATTLING, state.is_fighting());

        record.set_str(KEY_POTIONS, encode_potions(player));
        record.set_str(
            KEY_INVENTORY_WEAPONS,
            join_entries(player.inventory_weapons.iter().map(encode_weapon)),
        );
        record.set_str(
            KEY_INVENTORY_ARMORS,
            join_entries(player.inventory_armors.iter().map(encode_armor)),
        );
        record.set_str(
            KEY_EQUIPPED_WEAPON,
            player
                .equipped_weapon
                .as_ref()
                .map(encode_weapon)
                .unwrap_or_default(),
        );
        record.set_str(
            KEY_EQUIPPED_ARMOR,
            player
                .equipped_armor
                .as_ref()
                .map(encode_armor)
                .unwrap_or_default(),
        );

        record
    }

    /// Rebuilds the game from the record.
    ///
    /// Missing keys take their default. Present keys of the wrong type or
    /// with impossible values are errors. Unreadable or non-positive list
    /// entries are dropped.
    pub fn restore(&self) -> Result<LoadedSave, RecordError> {
        let defaults = Player::new();

        let level = self.int_or(KEY_LEVEL, defaults.level as i64)?;
        let experience = self.int_or(KEY_EXPERIENCE, 0)?;
        let max_hp = self.int_or(KEY_MAX_HP, defaults.max_hp as i64)?;
        let current_hp = self.int_or(KEY_CURRENT_HP, defaults.current_hp as i64)?;
        let base_attack = self.int_or(KEY_BASE_ATTACK, defaults.base_attack as i64)?;
        let base_defense = self.int_or(KEY_BASE_DEFENSE, defaults.base_defense as i64)?;
        let gold = self.int_or(KEY_GOLD, defaults.gold as i64)?;
        let weapon_attack = self.int_or(KEY_WEAPON_ATTACK, 0)?;
        let armor_defense = self.int_or(KEY_ARMOR_DEFENSE, 0)?;

        let level = in_range(KEY_LEVEL, level, 1, u32::MAX as i64)? as u32;
        let xp_ceiling = xp_for_next_level(level) as i64 - 1;
        let experience = in_range(KEY_EXPERIENCE, experience, 0, xp_ceiling)? as u64;
        let max_hp = in_range(KEY_MAX_HP, max_hp, 1, i32::MAX as i64)? as i32;
        let current_hp = in_range(KEY_CURRENT_HP, current_hp, 1, max_hp as i64)? as i32;
        let base_attack = in_range(KEY_BASE_ATTACK, base_attack, 0, i32::MAX as i64)? as i32;
        let base_defense = in_range(KEY_BASE_DEFENSE, base_defense, 0, i32::MAX as i64)? as i32;
        let gold = in_range(KEY_GOLD, gold, 0, i64::MAX)? as u64;
        let weapon_attack = in_range(KEY_WEAPON_ATTACK, weapon_attack, 0, i32::MAX as i64)? as i32;
        let armor_defense = in_range(KEY_ARMOR_DEFENSE, armor_defense, 0, i32::MAX as i64)? as i32;

        let equipped_weapon = match self.get(KEY_EQUIPPED_WEAPON) {
            Some(StoredValue::Str(raw)) if raw.is_empty() => None,
            Some(StoredValue::Str(raw)) => Some(decode_weapon(raw).ok_or_else(|| {
                RecordError::Malformed {
                    key: KEY_EQUIPPED_WEAPON,
                    value: raw.clone(),
                }
            })?),
            Some(_) => return Err(RecordError::WrongType { key: KEY_EQUIPPED_WEAPON }),
            None => infer_weapon(weapon_attack),
        };
        let equipped_armor = match self.get(KEY_EQUIPPED_ARMOR) {
            Some(StoredValue::Str(raw)) if raw.is_empty() => None,
            Some(StoredValue::Str(raw)) => Some(decode_armor(raw).ok_or_else(|| {
                RecordError::Malformed {
                    key: KEY_EQUIPPED_ARMOR,
                    value: raw.clone(),
                }
            })?),
            Some(_) => return Err(RecordError::WrongType { key: KEY_EQUIPPED_ARMOR }),
            None => infer_armor(armor_defense),
        };

        let player = Player {
            level,
            experience,
            max_hp,
            current_hp,
            base_attack,
            base_defense,
            gold,
            equipped_weapon,
            equipped_armor,
            potions: decode_potions(self.str_or(KEY_POTIONS, "")?),
            inventory_weapons: split_entries(self.str_or(KEY_INVENTORY_WEAPONS, "")?)
                .filter_map(decode_weapon)
                .collect(),
            inventory_armors: split_entries(self.str_or(KEY_INVENTORY_ARMORS, "")?)
                .filter_map(decode_armor)
                .collect(),
        };

        let location = Location::new(
            self.str_or(KEY_CURRENT_LOCATION, crate::core::constants::DEFAULT_LOCATION)?,
        );
        let last_save_millis = match self.get(KEY_LAST_SAVE_TIME) {
            None => None,
            Some(StoredValue::Int(v)) => Some(in_range(KEY_LAST_SAVE_TIME, *v, 0, i64::MAX)?),
            Some(_) => return Err(RecordError::WrongType { key: KEY_LAST_SAVE_TIME }),
        };

        Ok(LoadedSave {
            state: GameState::with_player(player, location),
            last_save_millis,
            was_auto_battling: self.bool_or(KEY_WAS_AUTO_BATTLING, false)?,
        })
    }
}

fn in_range(key: &'static str, value: i64, min: i64, max: i64) -> Result<i64, RecordError> {
    if value < min || value > max {
        return Err(RecordError::OutOfRange { key, value });
    }
    Ok(value)
}

fn join_entries(entries: impl Iterator<Item = String>) -> String {
    entries.collect::<Vec<_>>().join(&ENTRY_SEPARATOR.to_string())
}

fn split_entries(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(ENTRY_SEPARATOR).filter(|entry| !entry.is_empty())
}

fn encode_potions(player: &Player) -> String {
    join_entries(
        player
            .potions
            .iter()
            .map(|(kind, count)| format!("{}{}{}", kind.name(), FIELD_SEPARATOR, count)),
    )
}

fn decode_potions(raw: &str) -> BTreeMap<PotionKind, u32> {
    let mut potions = BTreeMap::new();
    for entry in split_entries(raw) {
        let parts: Vec<&str> = entry.split(FIELD_SEPARATOR).collect();
        let [name, count] = parts.as_slice() else {
            continue;
        };
        let (Some(kind), Ok(count)) = (PotionKind::from_name(name), count.parse::<i64>()) else {
            continue;
        };
        if count > 0 {
            let held = potions.entry(kind).or_insert(0u32);
            *held = held.saturating_add(count.min(u32::MAX as i64) as u32);
        }
    }
    potions
}

fn encode_weapon(weapon: &Weapon) -> String {
    format!(
        "{}{sep}{}{sep}{}",
        weapon.name,
        weapon.attack,
        weapon.price,
        sep = FIELD_SEPARATOR
    )
}

fn encode_armor(armor: &Armor) -> String {
    format!(
        "{}{sep}{}{sep}{}",
        armor.name,
        armor.defense,
        armor.price,
        sep = FIELD_SEPARATOR
    )
}

/// Parses `name:bonus:price`. `None` for malformed or non-positive bonus.
fn decode_item(raw: &str) -> Option<(String, i32, u64)> {
    let parts: Vec<&str> = raw.split(FIELD_SEPARATOR).collect();
    let [name, bonus, price] = parts.as_slice() else {
        return None;
    };
    let bonus: i32 = bonus.parse().ok()?;
    let price: u64 = price.parse().ok()?;
    (bonus > 0 && !name.is_empty()).then(|| (name.to_string(), bonus, price))
}

fn decode_weapon(raw: &str) -> Option<Weapon> {
    decode_item(raw).map(|(name, attack, price)| Weapon::new(name, attack, price))
}

fn decode_armor(raw: &str) -> Option<Armor> {
    decode_item(raw).map(|(name, defense, price)| Armor::new(name, defense, price))
}

/// Recovers the equipped weapon of a save that only stored the bonus.
fn infer_weapon(attack: i32) -> Option<Weapon> {
    if attack <= 0 {
        return None;
    }
    let weapon = catalog::weapon_by_attack(attack)
        .unwrap_or_else(|| Weapon::new(UNKNOWN_WEAPON_NAME, attack, 0));
    Some(weapon)
}

fn infer_armor(defense: i32) -> Option<Armor> {
    if defense <= 0 {
        return None;
    }
    let armor = catalog::armor_by_defense(defense)
        .unwrap_or_else(|| Armor::new(UNKNOWN_ARMOR_NAME, defense, 0));
    Some(armor)
}
