//! Header and footer rendering functions

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, View};

fn key(label: &'static str) -> Span<'static> {
    Span::styled(label, Style::default().add_modifier(Modifier::BOLD))
}

pub fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let title = match (app.current_view, app.active_tab()) {
        (View::Tabs, Some(tab)) => {
            format!("MineLab v{} - {}", env!("CARGO_PKG_VERSION"), tab.screen.title())
        }
        _ => format!("MineLab v{} - Analyses", env!("CARGO_PKG_VERSION")),
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            title,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("      "),
        Span::styled(app.config.api_url.clone(), Style::default().fg(Color::DarkGray)),
        Span::raw("      "),
        key("[Q]"),
        Span::raw("uit"),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

pub fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let footer_text = if app.show_file_browser {
        Line::from(vec![
            Span::styled(
                "TYPE",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" to search  "),
            key("[↑↓]"),
            Span::raw(" Navigate  "),
            key("[Enter]"),
            Span::raw(" Open/Select  "),
            key("[Esc]"),
            Span::raw(" Cancel"),
        ])
    } else if app.is_editing {
        Line::from(vec![
            Span::styled(
                "TYPE",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" to edit  "),
            key("[Enter]"),
            Span::raw(" Save  "),
            key("[Tab]"),
            Span::raw(" History  "),
            key("[Esc]"),
            Span::raw(" Cancel"),
        ])
    } else {
        match app.current_view {
            View::Home => Line::from(vec![
                key("[↑↓]"),
                Span::raw(" Navigate  "),
                key("[Enter]"),
                Span::raw(" Open  "),
                key("[Tab]"),
                Span::raw(" Tabs  "),
                key("[Q]"),
                Span::raw(" Quit"),
            ]),
            View::Tabs => Line::from(vec![
                key("[↑↓]"),
                Span::raw(" Field  "),
                key("[Enter]"),
                Span::raw(" Edit  "),
                key("[←→]"),
                Span::raw(" Option  "),
                key("[S]"),
                Span::raw(" Submit  "),
                key("[PgUp/PgDn]"),
                Span::raw(" Scroll  "),
                key("[E]"),
                Span::raw(" Export  "),
                key("[Tab]"),
                Span::raw(" Switch  "),
                key("[C]"),
                Span::raw(" Close  "),
                key("[Esc/H]"),
                Span::raw(" Home  "),
                key("[Q]"),
                Span::raw(" Quit"),
            ]),
        }
    };

    let footer = Paragraph::new(footer_text).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}
