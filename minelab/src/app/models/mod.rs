//! Data models for the application
//!
//! This module contains all data structures used by the terminal client.

mod app;
mod history;
mod tab;
mod view;

// Re-export all public types
pub use app::*;
pub use history::*;
pub use tab::*;
pub use view::*;
