//! Messages sent back to the App from spawned request tasks

use minelab_sdk::{Ticket, TransportError};
use serde_json::Value;

/// Outcome of one spawned request, applied on the UI thread
#[derive(Debug)]
pub struct Completion {
    pub tab_id: usize,
    pub ticket: Ticket,
    /// Text field values as they were when the request was sent
    pub submitted: Vec<(&'static str, String)>,
    pub outcome: Result<Value, TransportError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}
