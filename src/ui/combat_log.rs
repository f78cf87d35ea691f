//! Rolling message log shown under the battle panels.

use idle_mmorpg::core::constants::COMBAT_LOG_CAPACITY;
use idle_mmorpg::core::{GameError, OfflineReport, TickEvent, TickResult};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    PlayerAction,
    MonsterAction,
    Reward,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub message: String,
    pub kind: LogKind,
}

/// The last few messages, oldest first.
#[derive(Debug, Default)]
pub struct CombatLog {
    entries: VecDeque<LogEntry>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: LogKind, message: impl Into<String>) {
        if self.entries.len() == COMBAT_LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            message: message.into(),
            kind,
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(LogKind::Info, message);
    }

    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn record_tick(&mut self, result: &TickResult) {
        for event in &result.events {
            let (kind, message) = match event {
                TickEvent::MonsterDamaged { damage } => {
                    (LogKind::PlayerAction, format!("You hit for {}", damage))
                }
                TickEvent::PlayerDamaged { damage } => {
                    (LogKind::MonsterAction, format!("You take {} damage", damage))
                }
                TickEvent::MonsterKilled {
                    monster_name,
                    exp_gained,
                    gold_gained,
                } => (
                    LogKind::Reward,
                    format!(
                        "Defeated {}! +{} exp, +{} gold",
                        monster_name, exp_gained, gold_gained
                    ),
                ),
                TickEvent::LeveledUp { new_level } => {
                    (LogKind::Reward, format!("Level up! Now level {}", new_level))
                }
                TickEvent::PotionUsed { kind, healed } => (
                    LogKind::PlayerAction,
                    format!("Drank {} (+{} HP)", kind, healed),
                ),
                TickEvent::PlayerDied { monster_name } => (
                    LogKind::Warning,
                    format!("Knocked out by {}. Auto-battle stopped", monster_name),
                ),
                TickEvent::PersistenceFailed { message } => {
                    (LogKind::Warning, save_failed(message))
                }
            };
            self.push(kind, message);
        }
    }

    pub fn record_offline(&mut self, report: &OfflineReport) {
        if report.is_empty() {
            return;
        }
        self.push(
            LogKind::Reward,
            format!(
                "While away ({}s): {} kills, +{} exp, +{} gold",
                report.elapsed_seconds,
                report.monsters_killed,
                report.experience_gained,
                report.gold_gained
            ),
        );
        if report.level_after > report.level_before {
            self.push(
                LogKind::Reward,
                format!(
                    "Leveled up while away: {} -> {}",
                    report.level_before, report.level_after
                ),
            );
        }
    }

    /// A write that failed outside of a command or tick, such as at load.
    pub fn record_save_failure(&mut self, message: &str) {
        self.push(LogKind::Warning, save_failed(message));
    }

    pub fn record_error(&mut self, error: &GameError) {
        let message = match error.shortfall() {
            Some(short) => format!("Not enough gold ({} more needed)", short),
            None => error.to_string(),
        };
        self.push(LogKind::Warning, message);
    }
}

fn save_failed(message: &str) -> String {
    format!("Save failed: {}", message)
}
