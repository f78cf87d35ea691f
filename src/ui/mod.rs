pub mod combat_log;
mod combat_scene;
mod info_panel;
mod stats_panel;

use combat_log::CombatLog;
use idle_mmorpg::core::game_state::GameState;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Main UI drawing function
pub fn draw_ui(frame: &mut Frame, game_state: &GameState, log: &CombatLog) {
    let size = frame.size();

    // Split vertically: main content, full-width log, footer
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),     // Main content (stats + battle)
            Constraint::Length(12), // Full-width log
            Constraint::Length(4),  // Full-width footer
        ])
        .split(size);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50), // Stats panel
            Constraint::Percentage(50), // Location and battle
        ])
        .split(v_chunks[0]);

    stats_panel::draw_stats_panel(frame, chunks[0], &game_state.player);
    combat_scene::draw_combat_scene(frame, chunks[1], game_state);
    info_panel::draw_combat_log(frame, v_chunks[1], log);
    draw_footer(frame, v_chunks[2]);
}

fn key(label: &'static str) -> Span<'static> {
    Span::styled(
        label,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

fn draw_footer(frame: &mut Frame, area: Rect) {
    let footer_text = vec![
        Line::from(vec![
            key("1-5"),
            Span::raw(" Training ground | "),
            key("C"),
            Span::raw(" City | "),
            key("B"),
            Span::raw(" Start/stop battle | "),
            key("H"),
            Span::raw(" Quick heal | "),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Quit"),
        ]),
        Line::from(vec![
            key("W/A"),
            Span::raw(" Buy weapon/armor | "),
            key("P"),
            Span::raw(" Buy 10 potions | "),
            key("E/R"),
            Span::raw(" Equip best | "),
            key("U/I"),
            Span::raw(" Unequip"),
        ]),
    ];

    let footer = Paragraph::new(footer_text)
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .alignment(Alignment::Center);

    frame.render_widget(footer, area);
}
