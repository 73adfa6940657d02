//! UI rendering functions for the MineLab TUI
//!
//! This module contains the rendering logic for the home catalog, the
//! screen tabs with their forms and results, and the overlays.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::{App, View};

// Module declarations
mod components;
mod header_footer;
mod home;
mod notifications;
mod results;
mod tab_views;

// Re-export public functions
pub use components::{centered_rect, render_dropdown, render_file_browser};
pub use header_footer::{render_footer, render_header};
pub use home::render_home;
pub use notifications::render_notifications;
pub use results::render_result;
pub use tab_views::{render_close_confirmation, render_tab_bar, render_tab_content};

/// Main UI rendering function - orchestrates all view rendering
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    // Header
    render_header(f, chunks[0], app);

    // Split screen: tab bar + content
    let tab_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Tab bar
            Constraint::Min(0),    // Content
        ])
        .split(chunks[1]);

    render_tab_bar(f, tab_chunks[0], app);

    match (app.current_view, app.active_tab()) {
        (View::Tabs, Some(tab)) => render_tab_content(f, tab_chunks[1], app, tab),
        _ => render_home(f, tab_chunks[1], app),
    }

    // Footer
    render_footer(f, chunks[2], app);

    // Dropdown overlay
    if app.show_dropdown {
        render_dropdown(f, tab_chunks[1], app);
    }

    // File browser overlay
    if app.show_file_browser {
        render_file_browser(f, f.area(), app);
    }

    // Close confirmation overlay
    if app.show_close_confirmation {
        render_close_confirmation(f, f.area());
    }

    render_notifications(f, app, chunks[1]);
}
