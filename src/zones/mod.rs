//! Static locations: the city, shops, menus and the five training grounds.

use crate::core::constants::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque location identifier.
///
/// Training grounds (`training-ground-N`) are the only combat-capable
/// locations; everything else holds no monster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location(String);

/// Static description of a known location.
#[derive(Debug, Clone, Copy)]
pub struct LocationInfo {
    pub id: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
}

pub const LOCATIONS: [LocationInfo; 11] = [
    LocationInfo {
        id: "main-city",
        display_name: "Main City",
        description: "Where every adventure begins",
    },
    LocationInfo {
        id: "inventory",
        display_name: "Inventory",
        description: "Your items and character",
    },
    LocationInfo {
        id: "settings",
        display_name: "Settings",
        description: "Game information",
    },
    LocationInfo {
        id: "weapon-shop",
        display_name: "Weapon Shop",
        description: "Swords of every grade",
    },
    LocationInfo {
        id: "armor-shop",
        display_name: "Armor Shop",
        description: "Protective gear",
    },
    LocationInfo {
        id: "convenience-store",
        display_name: "Convenience Store",
        description: "Healing potions",
    },
    LocationInfo {
        id: "training-ground-1",
        display_name: "Training Ground - Floor 1",
        description: "Slimes, gentle enough for beginners",
    },
    LocationInfo {
        id: "training-ground-2",
        display_name: "Training Ground - Floor 2",
        description: "Goblins lurk here",
    },
    LocationInfo {
        id: "training-ground-3",
        display_name: "Training Ground - Floor 3",
        description: "Orc territory",
    },
    LocationInfo {
        id: "training-ground-4",
        display_name: "Training Ground - Floor 4",
        description: "A troll den",
    },
    LocationInfo {
        id: "training-ground-5",
        display_name: "Training Ground - Floor 5",
        description: "Sanctuary of dragons",
    },
];

impl Location {
    /// Wraps an identifier, normalizing the legacy camel-case ids
    /// (`mainCity`, `trainingGround3`, ...) to their kebab-case form.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let normalized = match id.as_str() {
            "mainCity" => "main-city".to_string(),
            "weaponShop" => "weapon-shop".to_string(),
            "armorShop" => "armor-shop".to_string(),
            "convenienceStore" => "convenience-store".to_string(),
            other => match other.strip_prefix(LEGACY_TRAINING_GROUND_PREFIX) {
                Some(rest) => format!("{}{}", TRAINING_GROUND_PREFIX, rest),
                None => id,
            },
        };
        Self(normalized)
    }

    pub fn main_city() -> Self {
        Self::new(DEFAULT_LOCATION)
    }

    /// The training ground for a tier (1-5).
    pub fn training_ground(tier: u32) -> Self {
        Self(format!("{}{}", TRAINING_GROUND_PREFIX, tier))
    }

    pub fn id(&self) -> &str {
        &self.0
    }

    /// True for locations that hold a monster.
    pub fn is_combat(&self) -> bool {
        self.0.starts_with(TRAINING_GROUND_PREFIX)
    }

    /// The trailing digit of the identifier, if any.
    ///
    /// Not range checked; the monster generator maps unknown tiers to tier 1.
    pub fn tier(&self) -> Option<u32> {
        self.0.chars().last().and_then(|c| c.to_digit(10))
    }

    pub fn info(&self) -> Option<&'static LocationInfo> {
        LOCATIONS.iter().find(|info| info.id == self.0)
    }

    pub fn display_name(&self) -> String {
        self.info()
            .map(|info| info.display_name.to_string())
            .unwrap_or_else(|| self.0.clone())
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::main_city()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Location {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
