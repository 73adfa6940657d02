//! History data structures

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Most values kept per field
pub const MAX_HISTORY_ITEMS: usize = 10;

/// History storage: screen slug -> field name -> values, most recent first
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct InputHistory {
    pub screens: HashMap<String, HashMap<String, Vec<String>>>,
}

impl InputHistory {
    /// Remember a submitted value, moving it to the front if already known
    pub fn record(&mut self, screen: &str, field: &str, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }

        let field_history = self
            .screens
            .entry(screen.to_string())
            .or_default()
            .entry(field.to_string())
            .or_default();

        if let Some(pos) = field_history.iter().position(|v| v == value) {
            field_history.remove(pos);
        }
        field_history.insert(0, value.to_string());
        field_history.truncate(MAX_HISTORY_ITEMS);
    }

    pub fn values(&self, screen: &str, field: &str) -> &[String] {
        self.screens
            .get(screen)
            .and_then(|fields| fields.get(field))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn latest(&self, screen: &str, field: &str) -> Option<&str> {
        self.values(screen, field).first().map(String::as_str)
    }
}
