//! Input history management

use minelab_sdk::Screen;
use tracing::warn;

use super::*;

impl App {
    /// Prefill text fields of a freshly opened tab with their latest values
    pub fn load_latest_values_from_history(&mut self, tab_idx: usize) {
        let Some(tab) = self.open_tabs.get_mut(tab_idx) else {
            return;
        };
        let slug = tab.screen.slug();

        for (field, _) in tab.binding.text_values() {
            if let Some(latest) = self.history.latest(slug, field) {
                tab.binding.set_value(field, latest);
            }
        }
    }

    /// Remember submitted text values and persist the history file
    pub fn record_history(&mut self, screen: Screen, values: &[(&'static str, String)]) {
        for (field, value) in values {
            self.history.record(screen.slug(), field, value);
        }

        if let Err(e) = crate::utils::save_history(&self.config.history_file, &self.history) {
            warn!(error = %e, "Failed to save input history");
        }
    }

    pub fn show_history_dropdown(&mut self) {
        let Some(tab) = self.active_tab() else {
            return;
        };
        let Some(field) = tab.binding.fields().into_iter().nth(tab.selected_field) else {
            return;
        };

        let values = self.history.values(tab.screen.slug(), field.name).to_vec();
        if !values.is_empty() {
            self.history_items = values;
            self.dropdown_selected = 0;
            self.show_dropdown = true;
        }
    }

    pub fn dropdown_next(&mut self) {
        if self.dropdown_selected < self.history_items.len().saturating_sub(1) {
            self.dropdown_selected += 1;
        }
    }

    pub fn dropdown_previous(&mut self) {
        if self.dropdown_selected > 0 {
            self.dropdown_selected -= 1;
        }
    }

    pub fn dropdown_select(&mut self) {
        if let Some(value) = self.history_items.get(self.dropdown_selected) {
            self.edit_buffer = value.clone();
        }
        self.close_dropdown();
    }

    pub fn close_dropdown(&mut self) {
        self.show_dropdown = false;
        self.dropdown_selected = 0;
        self.history_items.clear();
    }
}
