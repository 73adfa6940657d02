//! Notification banner rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::commands::NotificationLevel;
use crate::app::App;

/// Render the active banner as an overlay at the bottom of `area`
pub fn render_notifications(f: &mut Frame, app: &App, area: Rect) {
    let Some(notification) = app.banner.active() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(4)])
        .split(area);

    let (bg_color, fg_color, icon) = match notification.level {
        NotificationLevel::Error => (Color::Red, Color::White, "✗"),
        NotificationLevel::Warning => (Color::Yellow, Color::Black, "⚠"),
        NotificationLevel::Success => (Color::Green, Color::White, "✓"),
    };

    let text = vec![
        Line::from(vec![
            Span::styled(
                format!("{} {} ", icon, notification.title),
                Style::default()
                    .fg(fg_color)
                    .bg(bg_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  [D] dismiss", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(notification.message.clone()),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(bg_color));

    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(Clear, chunks[1]);
    f.render_widget(paragraph, chunks[1]);
}
