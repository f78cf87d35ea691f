use super::combat_log::{CombatLog, LogKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draws the combat log panel (newest first)
pub fn draw_combat_log(frame: &mut Frame, area: Rect, log: &CombatLog) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Log ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let max_entries = inner.height as usize;
    let max_width = inner.width as usize;

    let lines: Vec<Line> = log
        .entries()
        .rev()
        .take(max_entries)
        .map(|entry| {
            let style = match entry.kind {
                LogKind::PlayerAction => Style::default().fg(Color::Green),
                LogKind::MonsterAction => Style::default().fg(Color::Red),
                LogKind::Reward => Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                LogKind::Warning => Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
                LogKind::Info => Style::default().fg(Color::Gray),
            };

            // Truncate long messages to fit panel width
            let msg = if entry.message.chars().count() > max_width {
                let cut: String = entry
                    .message
                    .chars()
                    .take(max_width.saturating_sub(1))
                    .collect();
                format!("{}…", cut)
            } else {
                entry.message.clone()
            };

            Line::from(Span::styled(msg, style))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}
