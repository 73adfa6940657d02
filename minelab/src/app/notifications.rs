//! Notification banner for user-visible feedback
//!
//! Only one notification is shown at a time. A new one replaces the
//! current one instead of stacking under it.

use std::time::{Duration, Instant};

use super::commands::NotificationLevel;

/// How long a banner stays up without interaction
pub const AUTO_DISMISS_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: usize,
    pub timestamp: Instant,
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
    pub auto_dismiss_after: Option<Duration>,
}

impl Notification {
    fn is_expired(&self, now: Instant) -> bool {
        match self.auto_dismiss_after {
            Some(duration) => now.duration_since(self.timestamp) >= duration,
            None => false,
        }
    }
}

#[derive(Debug, Default)]
pub struct NotificationBanner {
    current: Option<Notification>,
    next_id: usize,
}

impl NotificationBanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, title: impl Into<String>, message: impl Into<String>) -> usize {
        self.push(NotificationLevel::Error, title.into(), message.into())
    }

    pub fn success(&mut self, title: impl Into<String>, message: impl Into<String>) -> usize {
        self.push(NotificationLevel::Success, title.into(), message.into())
    }

    pub fn warning(&mut self, title: impl Into<String>, message: impl Into<String>) -> usize {
        self.push(NotificationLevel::Warning, title.into(), message.into())
    }

    /// Replace whatever is showing
    pub fn push(&mut self, level: NotificationLevel, title: String, message: String) -> usize {
        let id = self.next_id;
        self.next_id += 1;

        self.current = Some(Notification {
            id,
            timestamp: Instant::now(),
            level,
            title,
            message,
            auto_dismiss_after: Some(AUTO_DISMISS_AFTER),
        });

        id
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// The banner to draw, if it has not expired
    pub fn active(&self) -> Option<&Notification> {
        let now = Instant::now();
        self.current.as_ref().filter(|n| !n.is_expired(now))
    }

    pub fn cleanup_expired(&mut self) {
        let now = Instant::now();
        if self.current.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.current = None;
        }
    }
}
