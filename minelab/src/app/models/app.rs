//! Main application state

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;

use minelab_sdk::Transport;

use super::{InputHistory, ScreenTab, View};
use crate::app::commands::Completion;
use crate::app::notifications::NotificationBanner;
use crate::config::Config;

/// Main application state
pub struct App {
    pub config: Config,

    // Tab management
    pub open_tabs: Vec<ScreenTab>,
    pub active_tab_idx: usize,
    pub next_tab_id: usize,
    pub show_close_confirmation: bool,

    pub home_selected: usize,
    pub current_view: View,
    pub should_quit: bool,

    // Edit mode state
    pub edit_buffer: String,
    pub is_editing: bool,

    // File browser state
    pub show_file_browser: bool,
    pub file_browser_items: Vec<PathBuf>,
    pub file_browser_selected: usize,
    pub file_browser_search: String,
    pub file_browser_extensions: Vec<&'static str>,
    pub current_dir: PathBuf,

    // History dropdown state
    pub show_dropdown: bool,
    pub dropdown_selected: usize,
    pub history: InputHistory,
    pub history_items: Vec<String>,

    pub banner: NotificationBanner,

    // Requests run on the runtime and report back over the channel
    pub transport: Arc<dyn Transport>,
    pub tokio_runtime: tokio::runtime::Runtime,
    pub completion_tx: Sender<Completion>,
    pub completion_rx: Receiver<Completion>,
}
