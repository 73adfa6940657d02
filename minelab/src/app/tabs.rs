//! Tab management operations

use minelab_sdk::Screen;
use tracing::info;

use super::*;
use crate::screens::binding_for;

impl App {
    /// Focus the screen's tab, opening it first if needed
    pub fn open_screen(&mut self, screen: Screen) {
        self.current_view = View::Tabs;

        if let Some(idx) = self.open_tabs.iter().position(|t| t.screen == screen) {
            self.active_tab_idx = idx;
            return;
        }

        let id = self.next_tab_id;
        self.next_tab_id += 1;
        self.open_tabs.push(ScreenTab::new(id, screen, binding_for(screen)));
        self.active_tab_idx = self.open_tabs.len() - 1;
        self.load_latest_values_from_history(self.active_tab_idx);
        info!(screen = %screen, tab_id = id, "Opened screen");
    }

    /// Open the screen highlighted in the home catalog
    pub fn open_selected_screen(&mut self) {
        if let Some(screen) = Screen::ALL.get(self.home_selected) {
            self.open_screen(*screen);
        }
    }

    pub fn go_home(&mut self) {
        self.current_view = View::Home;
    }

    // Home catalog navigation
    pub fn home_next(&mut self) {
        if self.home_selected < Screen::ALL.len() - 1 {
            self.home_selected += 1;
        }
    }

    pub fn home_previous(&mut self) {
        if self.home_selected > 0 {
            self.home_selected -= 1;
        }
    }

    // Tab navigation
    pub fn next_tab(&mut self) {
        if self.open_tabs.is_empty() {
            return;
        }
        if self.current_view == View::Home {
            self.current_view = View::Tabs;
            return;
        }
        self.active_tab_idx = (self.active_tab_idx + 1) % self.open_tabs.len();
    }

    pub fn previous_tab(&mut self) {
        if self.open_tabs.is_empty() {
            return;
        }
        if self.current_view == View::Home {
            self.current_view = View::Tabs;
            return;
        }
        self.active_tab_idx = if self.active_tab_idx == 0 {
            self.open_tabs.len() - 1
        } else {
            self.active_tab_idx - 1
        };
    }

    // Tab management actions
    pub fn close_current_tab(&mut self) {
        let Some(tab) = self.active_tab() else {
            return;
        };

        // A request is in flight, ask first
        if tab.is_submitting() {
            self.show_close_confirmation = true;
            return;
        }

        self.close_tab_confirmed();
    }

    pub fn close_tab_confirmed(&mut self) {
        self.show_close_confirmation = false;
        if self.active_tab_idx >= self.open_tabs.len() {
            return;
        }

        let mut tab = self.open_tabs.remove(self.active_tab_idx);
        tab.binding.dispose();
        if let Some(handle) = tab.pending.take() {
            handle.abort();
        }
        info!(screen = %tab.screen, tab_id = tab.id, "Closed screen");

        if self.open_tabs.is_empty() {
            self.active_tab_idx = 0;
            self.current_view = View::Home;
        } else if self.active_tab_idx >= self.open_tabs.len() {
            self.active_tab_idx = self.open_tabs.len() - 1;
        }
    }

    pub fn cancel_close_tab(&mut self) {
        self.show_close_confirmation = false;
    }
}
