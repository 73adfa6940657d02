//! Home catalog of analyses

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use minelab_sdk::Screen;

use crate::app::App;

pub fn render_home(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Available Analyses ");

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let items: Vec<ListItem> = Screen::ALL
        .iter()
        .enumerate()
        .map(|(i, screen)| {
            let is_selected = i == app.home_selected;
            let bullet = if is_selected { "▶" } else { " " };
            let is_open = app.open_tabs.iter().any(|t| t.screen == *screen);

            let lines = vec![
                Line::from(vec![
                    Span::raw(format!(" {} ", bullet)),
                    Span::styled(
                        screen.title(),
                        Style::default()
                            .fg(if is_selected { Color::White } else { Color::Gray })
                            .add_modifier(if is_selected {
                                Modifier::BOLD
                            } else {
                                Modifier::empty()
                            }),
                    ),
                    Span::raw(" "),
                    Span::styled(
                        if is_open { "[open]" } else { "" },
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
                Line::from(vec![Span::styled(
                    format!("     {}", screen.description()),
                    Style::default().fg(Color::DarkGray),
                )]),
                Line::from(""),
            ];

            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items);
    f.render_widget(list, inner_area);
}
