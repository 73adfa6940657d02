//! Reusable UI components (dropdowns, file browser, helpers)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem},
    Frame,
};

use crate::app::App;

/// Lines taken by one form field in the tab view
pub const FIELD_HEIGHT: u16 = 4;

pub fn render_dropdown(f: &mut Frame, area: Rect, app: &App) {
    if app.history_items.is_empty() {
        return;
    }
    let selected_field = app.active_tab().map(|t| t.selected_field).unwrap_or(0);

    // Calculate dropdown position (below current field)
    let dropdown_y = area.y + 1 + selected_field as u16 * FIELD_HEIGHT + 3;
    let dropdown_height = std::cmp::min(10, app.history_items.len() as u16 + 2);

    let dropdown_area = Rect {
        x: area.x + 2,
        y: std::cmp::min(dropdown_y, area.bottom().saturating_sub(dropdown_height)),
        width: area.width.saturating_sub(4),
        height: dropdown_height.min(area.height),
    };

    let items: Vec<ListItem> = app
        .history_items
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let style = if i == app.dropdown_selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            ListItem::new(Line::from(vec![Span::raw("  "), Span::styled(value.as_str(), style)]))
        })
        .collect();

    // Calculate scroll offset to keep selected item visible
    let visible_items = dropdown_height.saturating_sub(2).max(1) as usize; // Subtract 2 for borders
    let scroll_offset = if app.dropdown_selected >= visible_items {
        app.dropdown_selected.saturating_sub(visible_items - 1)
    } else {
        0
    };

    let visible_items: Vec<ListItem> = items
        .into_iter()
        .skip(scroll_offset)
        .take(visible_items)
        .collect();

    let list = List::new(visible_items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" History ")
            .style(Style::default().bg(Color::DarkGray)),
    );

    f.render_widget(Clear, dropdown_area);
    f.render_widget(list, dropdown_area);
}

pub fn render_file_browser(f: &mut Frame, area: Rect, app: &App) {
    // Create centered overlay
    let popup_area = centered_rect(80, 80, area);
    let visible = popup_area.height.saturating_sub(2).max(1) as usize;
    let scroll_offset = app.file_browser_selected.saturating_sub(visible - 1);
    let parent = app.current_dir.parent();

    let items: Vec<ListItem> = app
        .filtered_file_browser_items()
        .into_iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible)
        .map(|(i, path)| {
            let is_selected = i == app.file_browser_selected;
            let is_dir = path.is_dir();

            let icon = if is_dir { "📁" } else { "📄" };
            let name = if Some(path.as_path()) == parent {
                "..".to_string()
            } else {
                path.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| "..".to_string())
            };

            let style = if is_selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else if is_dir {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            };

            ListItem::new(Line::from(vec![
                Span::raw(if is_selected { "▶ " } else { "  " }),
                Span::raw(format!("{} ", icon)),
                Span::styled(name, style),
            ]))
        })
        .collect();

    let accepted: Vec<String> = app
        .file_browser_extensions
        .iter()
        .map(|e| format!(".{}", e))
        .collect();
    let title = if app.file_browser_search.is_empty() {
        format!(" {} ({}) ", app.current_dir.display(), accepted.join(", "))
    } else {
        format!(" File Browser [search: {}] ", app.file_browser_search)
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().bg(Color::Black)),
    );

    f.render_widget(Clear, popup_area);
    f.render_widget(list, popup_area);
}

/// Helper to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
