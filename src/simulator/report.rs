//! Simulation report generation.

use serde::Serialize;

/// Results of one simulated battle window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimReport {
    pub location: String,
    /// Monster fought, `None` at a location without monsters
    pub monster: Option<String>,
    pub seconds: u64,

    // Live battle
    pub ticks_run: u64,
    pub kills: u64,
    pub experience_gained: u64,
    pub gold_gained: u64,
    pub potions_used: u64,
    pub hp_healed: u64,
    pub damage_dealt: u64,
    pub damage_taken: u64,
    /// Tick on which the player dropped to 1 HP and the battle stopped
    pub death_tick: Option<u64>,
    pub level_before: u32,
    pub level_after: u32,
    pub final_hp: i32,

    // Offline estimate for the same window
    pub offline_kills: u64,
    pub offline_experience: u64,
    pub offline_gold: u64,
    pub offline_level_after: u32,
}

impl SimReport {
    pub fn died(&self) -> bool {
        self.death_tick.is_some()
    }

    /// Offline kills minus live kills. Positive when the offline estimate is
    /// more generous than actually playing.
    pub fn kill_gap(&self) -> i64 {
        self.offline_kills as i64 - self.kills as i64
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Location: {}  Monster: {}  Window: {}s\n\n",
            self.location,
            self.monster.as_deref().unwrap_or("none"),
            self.seconds
        ));

        report.push_str("── LIVE BATTLE ──────────────────────────────────────────────────\n");
        report.push_str(&format!("  Ticks Run:      {}\n", self.ticks_run));
        report.push_str(&format!("  Kills:          {}\n", self.kills));
        report.push_str(&format!("  Experience:     {}\n", self.experience_gained));
        report.push_str(&format!("  Gold:           {}\n", self.gold_gained));
        report.push_str(&format!(
            "  Level:          {} -> {}\n",
            self.level_before, self.level_after
        ));
        report.push_str(&format!(
            "  Damage:         {} dealt, {} taken\n",
            self.damage_dealt, self.damage_taken
        ));
        report.push_str(&format!(
            "  Potions Used:   {} ({} HP)\n",
            self.potions_used, self.hp_healed
        ));
        match self.death_tick {
            Some(tick) => report.push_str(&format!("  Died on tick:   {}\n\n", tick)),
            None => report.push_str(&format!("  Final HP:       {}\n\n", self.final_hp)),
        }

        report.push_str("── OFFLINE ESTIMATE ─────────────────────────────────────────────\n");
        report.push_str(&format!("  Kills:          {}\n", self.offline_kills));
        report.push_str(&format!("  Experience:     {}\n", self.offline_experience));
        report.push_str(&format!("  Gold:           {}\n", self.offline_gold));
        report.push_str(&format!(
            "  Level:          {} -> {}\n\n",
            self.level_before, self.offline_level_after
        ));

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let gap = self.kill_gap();
        if self.monster.is_none() {
            report.push_str("  Nothing to fight here.\n");
        } else if self.died() {
            report.push_str(&format!(
                "  ⚠️  Live battle lost; offline would still credit {} kills\n",
                self.offline_kills
            ));
        } else if gap > 0 {
            report.push_str(&format!(
                "  Offline estimate is ahead by {} kills\n",
                gap
            ));
        } else {
            report.push_str(&format!(
                "  Live battle is ahead by {} kills (level-ups mid-window)\n",
                -gap
            ));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
