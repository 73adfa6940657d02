//! Tab state management

use chrono::{DateTime, Local};
use minelab_sdk::Screen;
use tokio::task::JoinHandle;

use crate::screens::ScreenBinding;

/// Per-tab state container for tabbed interface
pub struct ScreenTab {
    // Identity
    pub id: usize, // Unique for the lifetime of the app, never reused
    pub screen: Screen,

    // Form and workflow
    pub binding: Box<dyn ScreenBinding>,
    pub validation: Vec<String>,
    pub submitted_at: Option<DateTime<Local>>,
    pub pending: Option<JoinHandle<()>>,

    // UI state
    pub selected_field: usize,
    pub result_scroll: u16,
}

impl ScreenTab {
    pub fn new(id: usize, screen: Screen, binding: Box<dyn ScreenBinding>) -> Self {
        Self {
            id,
            screen,
            binding,
            validation: Vec::new(),
            submitted_at: None,
            pending: None,
            selected_field: 0,
            result_scroll: 0,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.binding.is_submitting()
    }
}
