use idle_mmorpg::character::player::Player;
use idle_mmorpg::core::progression::Combatant;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Draws the stats panel: level, HP, combat stats, equipment and potions
pub fn draw_stats_panel(frame: &mut Frame, area: Rect, player: &Player) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // HP bar
            Constraint::Length(6), // Combat stats
            Constraint::Min(4),    // Equipment and potions
        ])
        .split(area);

    draw_header(frame, chunks[0], player);
    draw_player_hp(frame, chunks[1], player);
    draw_combat_stats(frame, chunks[2], player);
    draw_equipment(frame, chunks[3], player);
}

/// Draws the header with character level and XP
fn draw_header(frame: &mut Frame, area: Rect, player: &Player) {
    let xp_needed = player.xp_to_next_level();
    let xp_progress = if xp_needed > 0 {
        player.experience as f64 / xp_needed as f64
    } else {
        0.0
    };

    let header_text = vec![Line::from(vec![
        Span::styled(
            format!("Level {}", player.level),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(
            format!(
                "XP: {}/{} ({:.1}%)",
                player.experience,
                xp_needed,
                xp_progress * 100.0
            ),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(" | "),
        Span::styled(
            format!("Gold: {}", player.gold),
            Style::default().fg(Color::LightYellow),
        ),
    ])];

    let header = Paragraph::new(header_text)
        .block(Block::default().borders(Borders::ALL).title("Character"))
        .alignment(Alignment::Center);

    frame.render_widget(header, area);
}

fn draw_player_hp(frame: &mut Frame, area: Rect, player: &Player) {
    let hp_ratio = (player.current_hp as f64 / player.max_hp.max(1) as f64).clamp(0.0, 1.0);

    let hp_color = if hp_ratio > 0.66 {
        Color::Green
    } else if hp_ratio > 0.33 {
        Color::Yellow
    } else {
        Color::Red
    };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("HP"))
        .gauge_style(Style::default().fg(hp_color).add_modifier(Modifier::BOLD))
        .label(format!("{}/{}", player.current_hp, player.max_hp))
        .ratio(hp_ratio);

    frame.render_widget(gauge, area);
}

fn stat_line(label: &str, total: i32, base: i32, bonus: i32) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:<8}", label),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{:>5}", total), Style::default().fg(Color::White)),
        Span::styled(
            format!("  ({} base + {} gear)", base, bonus),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

fn draw_combat_stats(frame: &mut Frame, area: Rect, player: &Player) {
    let lines = vec![
        stat_line(
            "Attack",
            player.attack(),
            player.base_attack,
            player.weapon_attack_bonus(),
        ),
        stat_line(
            "Defense",
            player.defense(),
            player.base_defense,
            player.armor_defense_bonus(),
        ),
    ];

    let stats = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Stats"));
    frame.render_widget(stats, area);
}

fn draw_equipment(frame: &mut Frame, area: Rect, player: &Player) {
    let slot = |label: &str, item: Option<String>| {
        Line::from(vec![
            Span::styled(
                format!("{:<8}", label),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            match item {
                Some(name) => Span::styled(name, Style::default().fg(Color::Cyan)),
                None => Span::styled("(none)", Style::default().fg(Color::DarkGray)),
            },
        ])
    };

    let mut lines = vec![
        slot(
            "Weapon",
            player
                .equipped_weapon
                .as_ref()
                .map(|w| format!("{} (+{})", w.name, w.attack)),
        ),
        slot(
            "Armor",
            player
                .equipped_armor
                .as_ref()
                .map(|a| format!("{} (+{})", a.name, a.defense)),
        ),
        Line::from(Span::styled(
            format!(
                "Bag: {} weapons, {} armors",
                player.inventory_weapons.len(),
                player.inventory_armors.len()
            ),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    if player.potions.is_empty() {
        lines.push(Line::from(Span::styled(
            "No potions",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (kind, count) in &player.potions {
        lines.push(Line::from(vec![
            Span::styled(format!("{:>3}x ", count), Style::default().fg(Color::Green)),
            Span::raw(format!("{} ({} HP)", kind, kind.heal_amount())),
        ]));
    }

    let equipment =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Equipment"));
    frame.render_widget(equipment, area);
}
