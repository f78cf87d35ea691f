use crate::core::progression::Combatant;
use serde::{Deserialize, Serialize};

/// Fixed stat block for one training ground tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonsterTemplate {
    pub name: &'static str,
    pub level: u32,
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub exp_reward: u64,
    pub gold_reward: u64,
}

impl MonsterTemplate {
    /// A fresh, full-health monster from this template.
    pub fn spawn(&self) -> Monster {
        Monster {
            name: self.name.to_string(),
            level: self.level,
            max_hp: self.max_hp,
            current_hp: self.max_hp,
            attack: self.attack,
            defense: self.defense,
            exp_reward: self.exp_reward,
            gold_reward: self.gold_reward,
        }
    }
}

/// The current combat opponent. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub name: String,
    pub level: u32,
    pub max_hp: i32,
    /// May go to zero or below on the killing blow, before replacement.
    pub current_hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub exp_reward: u64,
    pub gold_reward: u64,
}

impl Monster {
    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.current_hp -= amount;
    }
}

impl Combatant for Monster {
    fn attack(&self) -> i32 {
        self.attack
    }

    fn defense(&self) -> i32 {
        self.defense
    }
}

impl Combatant for MonsterTemplate {
    fn attack(&self) -> i32 {
        self.attack
    }

    fn defense(&self) -> i32 {
        self.defense
    }
}
