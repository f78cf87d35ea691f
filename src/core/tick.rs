//! The battle tick: one fixed-period round of auto-battle.
//!
//! [`advance`] mutates [`GameState`] and reports what happened as a list of
//! [`TickEvent`]s. It never touches storage, timers or UI; the session
//! persists after each tick and the host decides when ticks fire.

use super::constants::{DEATH_HP_FLOOR, KILL_HEAL_AMOUNT};
use super::game_logic::stop_on_death;
use super::game_state::GameState;
use super::progression::{apply_experience, damage};
use crate::character::player::Player;
use crate::combat::generation::monster_for;
use crate::items::types::PotionKind;
use log::info;

/// A single event produced by a battle tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickEvent {
    /// Player hit the monster.
    MonsterDamaged { damage: i32 },

    /// Monster hit the player.
    PlayerDamaged { damage: i32 },

    /// Monster died and was replaced by a fresh one.
    MonsterKilled {
        monster_name: String,
        exp_gained: u64,
        gold_gained: u64,
    },

    /// Player leveled up (may occur several times in one tick).
    LeveledUp { new_level: u32 },

    /// Auto-heal drank a potion.
    PotionUsed { kind: PotionKind, healed: i32 },

    /// Player HP ran out; auto-battle stopped.
    PlayerDied { monster_name: String },

    /// State could not be saved after the tick. Gameplay continues.
    PersistenceFailed { message: String },
}

/// Result of processing a single battle tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickResult {
    /// False when the state was not fighting and nothing happened.
    pub executed: bool,

    /// Events produced during this tick, in chronological order.
    pub events: Vec<TickEvent>,
}

impl TickResult {
    pub fn killed_monster(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, TickEvent::MonsterKilled { .. }))
    }

    pub fn player_died(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, TickEvent::PlayerDied { .. }))
    }
}

/// Advances one round of combat.
///
/// Order: the player strikes; a kill pays out, heals 2 HP and spawns a new
/// monster; otherwise the monster strikes back, auto-heal is considered,
/// and HP at or below zero is floored to 1 and stops the battle.
pub fn advance(state: &mut GameState) -> TickResult {
    let mut result = TickResult::default();
    if !state.is_fighting() {
        return result;
    }
    let Some(monster) = state.monster.as_mut() else {
        return result;
    };
    result.executed = true;

    let player_damage = damage(&state.player, &*monster);
    monster.take_damage(player_damage);
    result.events.push(TickEvent::MonsterDamaged {
        damage: player_damage,
    });

    if !monster.is_alive() {
        let monster_name = monster.name.clone();
        let exp_reward = monster.exp_reward;
        let gold_reward = monster.gold_reward;

        let level_before = state.player.level;
        apply_experience(&mut state.player, exp_reward);
        state.player.gold = state.player.gold.saturating_add(gold_reward);
        state.player.heal(KILL_HEAL_AMOUNT);
        state.monster = Some(monster_for(&state.location));

        info!(
            "defeated {} (+{} exp, +{} gold)",
            monster_name, exp_reward, gold_reward
        );
        result.events.push(TickEvent::MonsterKilled {
            monster_name,
            exp_gained: exp_reward,
            gold_gained: gold_reward,
        });
        for new_level in (level_before + 1)..=state.player.level {
            info!("reached level {}", new_level);
            result.events.push(TickEvent::LeveledUp { new_level });
        }
        return result;
    }

    let monster_damage = damage(&*monster, &state.player);
    state.player.current_hp = state.player.current_hp.saturating_sub(monster_damage);
    result.events.push(TickEvent::PlayerDamaged {
        damage: monster_damage,
    });

    if let Some((kind, healed)) = try_auto_heal(&mut state.player) {
        result.events.push(TickEvent::PotionUsed { kind, healed });
    }

    if state.player.current_hp <= 0 {
        state.player.current_hp = DEATH_HP_FLOOR;
        let monster_name = monster.name.clone();
        stop_on_death(state);
        info!("defeated by {}, auto-battle stopped", monster_name);
        result.events.push(TickEvent::PlayerDied { monster_name });
    }

    result
}

/// Auto-heal policy: the trigger threshold is the heal amount of the
/// smallest held potion, regardless of how much HP is missing. If the gap is
/// at least that large, one of that potion is consumed.
///
/// Runs before the death check, so HP may still be negative here.
fn try_auto_heal(player: &mut Player) -> Option<(PotionKind, i32)> {
    let missing_hp = player.missing_hp();
    let kind = player.smallest_available_potion()?;
    if missing_hp < kind.heal_amount() {
        return None;
    }

    let before = player.current_hp;
    player
        .consume_potion(kind)
        .then(|| (kind, player.current_hp - before))
}
