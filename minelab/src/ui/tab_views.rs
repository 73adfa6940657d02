//! Tab rendering functions

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use minelab_sdk::{NormalizedResult, WorkflowState};

use super::components::{centered_rect, FIELD_HEIGHT};
use super::results::render_result;
use crate::app::{App, ScreenTab, View};
use crate::screens::FieldKind;

/// Status glyph shown next to a tab title
pub fn status_icon(state: &WorkflowState<NormalizedResult>) -> &'static str {
    match state {
        WorkflowState::Idle => "○",
        WorkflowState::Validating => "…",
        WorkflowState::Submitting => "●",
        WorkflowState::Success(_) => "✓",
        WorkflowState::Failed(_) => "✗",
    }
}

pub fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();

    let home_style = if app.current_view == View::Home {
        Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    spans.push(Span::styled("[ Home ]", home_style));
    spans.push(Span::raw(" "));

    for (i, tab) in app.open_tabs.iter().enumerate() {
        let is_active = app.current_view == View::Tabs && i == app.active_tab_idx;
        let title = format!("[ {} {} ]", tab.screen.title(), status_icon(&tab.binding.state()));

        let style = if is_active {
            Style::default()
                .fg(Color::White)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        spans.push(Span::styled(title, style));
        spans.push(Span::raw(" ")); // Space between tabs
    }

    let tabs_line = Line::from(spans);
    let separator = Line::from("━".repeat(area.width as usize));

    let paragraph = Paragraph::new(vec![tabs_line, separator]);
    f.render_widget(paragraph, area);
}

pub fn render_close_confirmation(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(50, 30, area);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Close Screen?",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "A request is still in flight.",
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            "Closing discards its response.",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "[Y]",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Yes  "),
            Span::styled(
                "[N]",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" No"),
        ]),
    ];

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .style(Style::default().bg(Color::Black)),
    );

    f.render_widget(Clear, popup_area);
    f.render_widget(paragraph, popup_area);
}

pub fn render_tab_content(f: &mut Frame, area: Rect, app: &App, tab: &ScreenTab) {
    let fields = tab.binding.fields();
    let validation_height = if tab.validation.is_empty() {
        0
    } else {
        tab.validation.len() as u16 + 1
    };
    let form_height = fields.len() as u16 * FIELD_HEIGHT + validation_height + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(form_height), Constraint::Min(5)])
        .split(area);

    render_form(f, chunks[0], app, tab);
    render_status(f, chunks[1], app, tab);
}

fn render_form(f: &mut Frame, area: Rect, app: &App, tab: &ScreenTab) {
    let mut items: Vec<ListItem> = tab
        .binding
        .fields()
        .into_iter()
        .enumerate()
        .map(|(i, field)| {
            let is_selected = i == tab.selected_field;
            let is_editing_this = is_selected && app.is_editing;

            let current_value = if is_editing_this {
                app.edit_buffer.clone()
            } else {
                tab.binding.value(field.name)
            };

            let (display_text, is_empty) = match (&field.kind, current_value.is_empty()) {
                (FieldKind::File(extensions), true) => {
                    let accepted: Vec<String> =
                        extensions.iter().map(|e| format!(".{}", e)).collect();
                    (format!("<select a file ({})>", accepted.join(", ")), true)
                }
                (FieldKind::Choice(_), true) => ("<choose with ←/→>".to_string(), true),
                (FieldKind::Choice(_), false) => (format!("◀ {} ▶", current_value), false),
                (_, true) => ("<empty>".to_string(), true),
                (_, false) => (current_value, false),
            };

            let value_style = if is_editing_this {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else if is_selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else if is_empty {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC)
            } else {
                Style::default().fg(Color::White)
            };

            let mut value_line = vec![Span::raw("  "), Span::styled(display_text, value_style)];
            if is_editing_this {
                value_line.push(Span::styled(" █", Style::default().fg(Color::White)));
            }

            ListItem::new(vec![
                Line::from(vec![Span::styled(
                    format!("{}: ", field.label),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )]),
                Line::from(vec![Span::styled(
                    format!("  {}", field.help),
                    Style::default().fg(Color::DarkGray),
                )]),
                Line::from(value_line),
                Line::from(""),
            ])
        })
        .collect();

    if !tab.validation.is_empty() {
        let mut lines = vec![Line::from(Span::styled(
            "Please fix the following:",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))];
        for reason in &tab.validation {
            lines.push(Line::from(Span::styled(
                format!("  • {}", reason),
                Style::default().fg(Color::Red),
            )));
        }
        items.push(ListItem::new(lines));
    }

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", tab.screen.title())),
    );
    f.render_widget(list, area);
}

fn render_status(f: &mut Frame, area: Rect, app: &App, tab: &ScreenTab) {
    let submitted = tab
        .submitted_at
        .map(|t| format!(" submitted {} ", t.format("%H:%M:%S")))
        .unwrap_or_default();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Result ")
        .title_bottom(Line::from(submitted).right_aligned());

    match tab.binding.state() {
        WorkflowState::Success(result) => {
            render_result(f, area, block, app, tab, &result);
        }
        WorkflowState::Failed(reason) => {
            let paragraph = Paragraph::new(vec![
                Line::from(Span::styled(
                    "The analysis failed",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(reason),
                Line::from(""),
                Line::from(Span::styled(
                    "Fix the input and press [S] to try again.",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .block(block)
            .wrap(Wrap { trim: true });
            f.render_widget(paragraph, area);
        }
        WorkflowState::Submitting | WorkflowState::Validating => {
            let paragraph = Paragraph::new(Line::from(Span::styled(
                "● Sending request…",
                Style::default().fg(Color::Yellow),
            )))
            .block(block);
            f.render_widget(paragraph, area);
        }
        WorkflowState::Idle => {
            let paragraph = Paragraph::new(Line::from(Span::styled(
                "Fill in the form and press [S] to submit.",
                Style::default().fg(Color::DarkGray),
            )))
            .block(block);
            f.render_widget(paragraph, area);
        }
    }
}
