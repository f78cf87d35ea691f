use serde::{Deserialize, Serialize};
use std::fmt;

/// Equipment slot an item is worn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
}

impl EquipmentSlot {
    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "weapon",
            EquipmentSlot::Armor => "armor",
        }
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub attack: i32,
    pub price: u64,
}

impl Weapon {
    pub fn new(name: impl Into<String>, attack: i32, price: u64) -> Self {
        Self {
            name: name.into(),
            attack,
            price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Armor {
    pub name: String,
    pub defense: i32,
    pub price: u64,
}

impl Armor {
    pub fn new(name: impl Into<String>, defense: i32, price: u64) -> Self {
        Self {
            name: name.into(),
            defense,
            price,
        }
    }
}

/// Healing potion kind. Used as the potion map key, so identity is the
/// variant rather than any of the potion's display fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PotionKind {
    Small,
    Medium,
    Large,
    Super,
    Divine,
}

impl PotionKind {
    pub fn all() -> [PotionKind; 5] {
        [
            PotionKind::Small,
            PotionKind::Medium,
            PotionKind::Large,
            PotionKind::Super,
            PotionKind::Divine,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            PotionKind::Small => "Small Healing Potion",
            PotionKind::Medium => "Medium Healing Potion",
            PotionKind::Large => "Large Healing Potion",
            PotionKind::Super => "Super Healing Potion",
            PotionKind::Divine => "Divine Healing Potion",
        }
    }

    pub fn heal_amount(&self) -> i32 {
        match self {
            PotionKind::Small => 50,
            PotionKind::Medium => 150,
            PotionKind::Large => 300,
            PotionKind::Super => 500,
            PotionKind::Divine => 1000,
        }
    }

    pub fn price(&self) -> u64 {
        match self {
            PotionKind::Small => 1,
            PotionKind::Medium => 5,
            PotionKind::Large => 20,
            PotionKind::Super => 50,
            PotionKind::Divine => 200,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PotionKind::Small => "A basic potion that restores 50 HP",
            PotionKind::Medium => "An improved potion that restores 150 HP",
            PotionKind::Large => "A potent potion that restores 300 HP",
            PotionKind::Super => "A rare potion that restores 500 HP",
            PotionKind::Divine => "A legendary potion that restores 1000 HP",
        }
    }

    /// Looks a kind up by its display name (the persisted key).
    pub fn from_name(name: &str) -> Option<PotionKind> {
        Self::all().into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for PotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_potion_kinds_ordered_by_heal_amount() {
        let heals: Vec<i32> = PotionKind::all().iter().map(|k| k.heal_amount()).collect();
        let mut sorted = heals.clone();
        sorted.sort();
        assert_eq!(heals, sorted);
    }

    #[test]
    fn test_potion_from_name() {
        for kind in PotionKind::all() {
            assert_eq!(PotionKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(PotionKind::from_name("Elixir of Nothing"), None);
    }

    #[test]
    fn test_potion_names_are_record_safe() {
        for kind in PotionKind::all() {
            assert!(!kind.name().contains(':'));
            assert!(!kind.name().contains(';'));
        }
    }
}
