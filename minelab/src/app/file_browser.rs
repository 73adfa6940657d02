//! File browser overlay for upload fields

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::path::{Path, PathBuf};

use super::*;

/// Directories always, files only with an accepted extension
pub fn is_browsable(path: &Path, extensions: &[&str]) -> bool {
    if path.is_dir() {
        return true;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|a| a.eq_ignore_ascii_case(ext)))
}

impl App {
    pub fn open_file_browser(&mut self, extensions: &'static [&'static str]) {
        // Start next to the file already chosen, if any
        if let Some(field) = self.selected_field() {
            if let Some(tab) = self.active_tab() {
                let current = PathBuf::from(tab.binding.value(field.name));
                if let Some(parent) = current.parent().filter(|p| p.is_dir()) {
                    self.current_dir = parent.to_path_buf();
                }
            }
        }

        self.file_browser_extensions = extensions.to_vec();
        self.show_file_browser = true;
        self.file_browser_search.clear();
        self.load_file_browser_items();
    }

    pub fn close_file_browser(&mut self) {
        self.show_file_browser = false;
        self.file_browser_items.clear();
        self.file_browser_selected = 0;
        self.file_browser_search.clear();
    }

    pub fn load_file_browser_items(&mut self) {
        let mut items = Vec::new();

        if let Ok(entries) = std::fs::read_dir(&self.current_dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if is_browsable(&path, &self.file_browser_extensions) {
                    items.push(path);
                }
            }
        }

        // Sort: directories first, then files
        items.sort_by(|a, b| match (a.is_dir(), b.is_dir()) {
            (true, false) => std::cmp::Ordering::Less,
            (false, true) => std::cmp::Ordering::Greater,
            _ => a.file_name().cmp(&b.file_name()),
        });

        // Parent directory goes first
        if let Some(parent) = self.current_dir.parent() {
            items.insert(0, parent.to_path_buf());
        }

        self.file_browser_items = items;
        self.file_browser_selected = 0;
    }

    /// Items matching the fuzzy search, in display order
    pub fn filtered_file_browser_items(&self) -> Vec<&PathBuf> {
        if self.file_browser_search.is_empty() {
            return self.file_browser_items.iter().collect();
        }

        let matcher = SkimMatcherV2::default();
        self.file_browser_items
            .iter()
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .and_then(|name| matcher.fuzzy_match(name, &self.file_browser_search))
                    .is_some()
            })
            .collect()
    }

    pub fn file_browser_search_push(&mut self, c: char) {
        self.file_browser_search.push(c);
        self.file_browser_selected = 0;
    }

    pub fn file_browser_search_pop(&mut self) {
        self.file_browser_search.pop();
        self.file_browser_selected = 0;
    }

    pub fn file_browser_next(&mut self) {
        let count = self.filtered_file_browser_items().len();
        if self.file_browser_selected < count.saturating_sub(1) {
            self.file_browser_selected += 1;
        }
    }

    pub fn file_browser_previous(&mut self) {
        if self.file_browser_selected > 0 {
            self.file_browser_selected -= 1;
        }
    }

    pub fn file_browser_select(&mut self) {
        let Some(path) = self
            .filtered_file_browser_items()
            .get(self.file_browser_selected)
            .map(|p| p.to_path_buf())
        else {
            return;
        };

        if path.is_dir() {
            // Navigate into directory
            self.current_dir = path;
            self.file_browser_search.clear();
            self.load_file_browser_items();
            return;
        }

        if let Some(field) = self.selected_field() {
            if let Some(tab) = self.active_tab_mut() {
                tab.binding.set_value(field.name, &path.to_string_lossy());
            }
        }
        self.close_file_browser();
    }
}
