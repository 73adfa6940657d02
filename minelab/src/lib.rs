//! Terminal client for the MineLab analysis service
//!
//! The analysis logic lives in `minelab-sdk`; this crate adds configuration,
//! logging, the tabbed terminal UI and the headless `submit` command.

pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
pub mod render;
pub mod screens;
pub mod ui;
pub mod utils;
