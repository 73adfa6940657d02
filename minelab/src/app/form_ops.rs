//! Form field operations on the active tab

use crate::screens::{FieldKind, FieldSpec};

use super::*;

impl App {
    /// Field under the cursor of the active tab
    pub fn selected_field(&self) -> Option<FieldSpec> {
        let tab = self.active_tab()?;
        tab.binding.fields().into_iter().nth(tab.selected_field)
    }

    pub fn next_field(&mut self) {
        if let Some(tab) = self.active_tab_mut() {
            let count = tab.binding.fields().len();
            if tab.selected_field + 1 < count {
                tab.selected_field += 1;
            }
        }
    }

    pub fn previous_field(&mut self) {
        if let Some(tab) = self.active_tab_mut() {
            tab.selected_field = tab.selected_field.saturating_sub(1);
        }
    }

    /// Enter on a field: edit text, browse for a file, or step a choice
    pub fn activate_field(&mut self) {
        let Some(field) = self.selected_field() else {
            return;
        };
        match field.kind {
            FieldKind::Text => self.start_editing_field(),
            FieldKind::File(extensions) => self.open_file_browser(extensions),
            FieldKind::Choice(_) => self.cycle_field(true),
        }
    }

    pub fn cycle_field(&mut self, forward: bool) {
        let Some(field) = self.selected_field() else {
            return;
        };
        if let Some(tab) = self.active_tab_mut() {
            tab.binding.cycle(field.name, forward);
            // Switching naive-Bayes mode changes the field list
            let count = tab.binding.fields().len();
            tab.selected_field = tab.selected_field.min(count.saturating_sub(1));
        }
    }

    pub fn start_editing_field(&mut self) {
        let Some(field) = self.selected_field() else {
            return;
        };
        if field.kind != FieldKind::Text {
            return;
        }
        if let Some(tab) = self.active_tab() {
            self.edit_buffer = tab.binding.value(field.name);
            self.is_editing = true;
        }
    }

    pub fn save_edited_field(&mut self) {
        if let Some(field) = self.selected_field() {
            let value = std::mem::take(&mut self.edit_buffer);
            if let Some(tab) = self.active_tab_mut() {
                tab.binding.set_value(field.name, &value);
            }
        }
        self.is_editing = false;
        self.edit_buffer.clear();
    }

    pub fn cancel_editing(&mut self) {
        self.is_editing = false;
        self.edit_buffer.clear();
    }

    pub fn scroll_result_down(&mut self) {
        if let Some(tab) = self.active_tab_mut() {
            tab.result_scroll = tab.result_scroll.saturating_add(1);
        }
    }

    pub fn scroll_result_up(&mut self) {
        if let Some(tab) = self.active_tab_mut() {
            tab.result_scroll = tab.result_scroll.saturating_sub(1);
        }
    }
}
