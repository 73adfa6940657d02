//! Application state and module organization
//!
//! This module contains the main App struct and re-exports all functionality
//! organized by domain.

use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use minelab_sdk::{HttpTransport, NormalizedResult, Transport, WorkflowState};
use tracing::{debug, info, warn};

use crate::config::Config;

mod models;
pub use models::*;

pub mod commands;
pub mod notifications;

// Declare submodules
mod file_browser;
mod form_ops;
mod history;
mod tabs;

use commands::Completion;
use notifications::NotificationBanner;

impl App {
    /// App talking to the configured HTTP service
    pub fn new(config: Config) -> Result<Self> {
        let transport = HttpTransport::new(config.api_url.clone(), config.timeout)
            .context("Failed to build HTTP client")?;
        Self::with_transport(config, Arc::new(transport))
    }

    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Result<Self> {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        let history = crate::utils::load_history(&config.history_file);

        // Requests are spawned here and report back over the channel
        let tokio_runtime =
            tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
        let (completion_tx, completion_rx) = mpsc::channel();

        Ok(Self {
            config,
            open_tabs: Vec::new(),
            active_tab_idx: 0,
            next_tab_id: 0,
            show_close_confirmation: false,
            home_selected: 0,
            current_view: View::Home,
            should_quit: false,
            edit_buffer: String::new(),
            is_editing: false,
            show_file_browser: false,
            file_browser_items: Vec::new(),
            file_browser_selected: 0,
            file_browser_search: String::new(),
            file_browser_extensions: Vec::new(),
            current_dir,
            show_dropdown: false,
            dropdown_selected: 0,
            history,
            history_items: Vec::new(),
            banner: NotificationBanner::new(),
            transport,
            tokio_runtime,
            completion_tx,
            completion_rx,
        })
    }

    pub fn active_tab(&self) -> Option<&ScreenTab> {
        self.open_tabs.get(self.active_tab_idx)
    }

    pub fn active_tab_mut(&mut self) -> Option<&mut ScreenTab> {
        self.open_tabs.get_mut(self.active_tab_idx)
    }

    /// Validate the active form and spawn its request
    pub fn submit_current_tab(&mut self) {
        if self.current_view != View::Tabs {
            return;
        }
        let Some(tab) = self.open_tabs.get_mut(self.active_tab_idx) else {
            return;
        };

        match tab.binding.submit() {
            Ok(Some(ticket)) => {
                tab.validation.clear();
                tab.result_scroll = 0;
                tab.submitted_at = Some(chrono::Local::now());

                let endpoint = self.config.endpoints.endpoint(ticket.kind());
                let transport = Arc::clone(&self.transport);
                let tx = self.completion_tx.clone();
                let tab_id = tab.id;
                let submitted = tab.binding.text_values();
                info!(
                    screen = %tab.screen,
                    generation = ticket.generation(),
                    path = %endpoint.path,
                    "Spawning request"
                );

                let handle = self.tokio_runtime.spawn(async move {
                    let outcome = transport.send(&endpoint, ticket.request()).await;
                    // Receiver is gone only during shutdown
                    let _ = tx.send(Completion {
                        tab_id,
                        ticket,
                        submitted,
                        outcome,
                    });
                });
                tab.pending = Some(handle);
            }
            Ok(None) => {
                debug!(screen = %tab.screen, "Submit ignored while a request is in flight");
            }
            Err(failure) => {
                debug!(screen = %tab.screen, reasons = ?failure.reasons(), "Validation failed");
                tab.validation = failure.reasons().to_vec();
            }
        }
    }

    /// Apply every completion that has arrived; returns how many took effect
    pub fn drain_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completion_rx.try_recv() {
            if self.apply_completion(completion) {
                applied += 1;
            }
        }
        applied
    }

    /// Block until one completion arrives and apply it
    ///
    /// Returns false on timeout or when the completion was stale.
    pub fn await_completion(&mut self, timeout: Duration) -> bool {
        match self.completion_rx.recv_timeout(timeout) {
            Ok(completion) => self.apply_completion(completion),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => false,
        }
    }

    fn apply_completion(&mut self, completion: Completion) -> bool {
        let Completion {
            tab_id,
            ticket,
            submitted,
            outcome,
        } = completion;
        let Some(tab) = self.open_tabs.iter_mut().find(|t| t.id == tab_id) else {
            debug!(tab_id, "Discarding response for a closed screen");
            return false;
        };
        tab.pending = None;

        if !tab.binding.settle(&ticket, outcome) {
            return false;
        }

        let screen = tab.screen;
        match tab.binding.state() {
            WorkflowState::Success(_) => {
                self.banner.success(screen.title(), "Analysis complete");
                self.record_history(screen, &submitted);
            }
            WorkflowState::Failed(reason) => {
                warn!(screen = %screen, reason = %reason, "Analysis failed");
                self.banner.error(screen.title(), reason);
            }
            _ => {}
        }
        true
    }

    /// Periodic housekeeping from the event loop
    pub fn tick(&mut self) {
        self.drain_completions();
        self.banner.cleanup_expired();
    }

    /// Write the active tab's embedded decision-tree images to the current directory
    pub fn export_tree_images(&mut self) {
        let Some(tab) = self.active_tab() else {
            return;
        };
        let WorkflowState::Success(NormalizedResult::Classification(result)) = tab.binding.state()
        else {
            self.banner
                .warning("Export", "Only decision-tree results have images to export");
            return;
        };

        match crate::render::export_tree_images(&result, &self.current_dir) {
            Ok(written) if written.is_empty() => {
                self.banner.warning(
                    "Export",
                    "The trees are remote images; open the listed URLs instead",
                );
            }
            Ok(written) => {
                let names: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
                self.banner.success("Export", format!("Saved {}", names.join(", ")));
            }
            Err(e) => {
                warn!(error = %e, "Tree export failed");
                self.banner.error("Export", e.to_string());
            }
        }
    }
}
