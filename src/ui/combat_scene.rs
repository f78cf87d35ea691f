use idle_mmorpg::combat::types::Monster;
use idle_mmorpg::core::game_state::{BattleState, GameState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Draws the location header, the monster HP bar and the battle status
pub fn draw_combat_scene(frame: &mut Frame, area: Rect, game_state: &GameState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Location info
            Constraint::Length(3), // Enemy HP bar
            Constraint::Min(3),    // Battle status
        ])
        .split(area);

    draw_location_info(frame, chunks[0], game_state);
    draw_enemy_hp(frame, chunks[1], game_state.monster.as_ref());
    draw_battle_status(frame, chunks[2], game_state);
}

fn draw_location_info(frame: &mut Frame, area: Rect, game_state: &GameState) {
    let location = &game_state.location;
    let description = location.info().map_or("", |info| info.description);

    let text = vec![
        Line::from(Span::styled(
            location.display_name(),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            description,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Location"))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Draws the enemy HP bar
fn draw_enemy_hp(frame: &mut Frame, area: Rect, monster: Option<&Monster>) {
    if let Some(enemy) = monster {
        let hp_ratio = (enemy.current_hp as f64 / enemy.max_hp.max(1) as f64).clamp(0.0, 1.0);
        let label = format!(
            "{} Lv.{}: {}/{}",
            enemy.name, enemy.level, enemy.current_hp, enemy.max_hp
        );

        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("Enemy"))
            .gauge_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .label(label)
            .ratio(hp_ratio);

        frame.render_widget(gauge, area);
    } else {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "No monsters here",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )))
        .block(Block::default().borders(Borders::ALL).title("Enemy"))
        .alignment(Alignment::Center);

        frame.render_widget(paragraph, area);
    }
}

fn draw_battle_status(frame: &mut Frame, area: Rect, game_state: &GameState) {
    let (text, color) = match game_state.battle {
        BattleState::Fighting => ("⚔️  Auto-battle running", Color::Green),
        BattleState::StoppedOnDeath => ("Knocked out. Heal up, then press B", Color::Red),
        BattleState::Idle if game_state.location.is_combat() => {
            ("Press B to start auto-battle", Color::Yellow)
        }
        BattleState::Idle => ("Travel to a training ground (1-5) to fight", Color::DarkGray),
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL).title("Battle"))
    .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
