//! Tests for the App submission lifecycle
//!
//! The App owns its own tokio runtime, so these are plain tests that wait on
//! the completion channel.

use super::common::*;
use minelab::app::commands::NotificationLevel;
use minelab::app::{App, View};
use minelab::screens::ScreenBinding;
use minelab_sdk::{AnalysisKind, NormalizedResult, Screen, TransportError, WorkflowState};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn app_with(transport: Arc<FakeTransport>) -> (TempDir, App) {
    let dir = tempfile::tempdir().unwrap();
    let app = App::with_transport(test_config(dir.path()), transport).unwrap();
    (dir, app)
}

fn fill_correlation(app: &mut App) {
    app.open_screen(Screen::Correlation);
    let tab = app.active_tab_mut().unwrap();
    tab.binding.set_value("first", "175, 133, 185");
    tab.binding.set_value("second", "65, 67, 71");
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn test_starts_on_home() {
    let (_dir, app) = app_with(Arc::new(FakeTransport::new()));
    assert_eq!(app.current_view, View::Home);
    assert!(app.open_tabs.is_empty());
}

#[test]
fn test_opening_a_screen_twice_focuses_one_tab() {
    let (_dir, mut app) = app_with(Arc::new(FakeTransport::new()));
    app.open_screen(Screen::Cluster);
    app.open_screen(Screen::Association);
    app.open_screen(Screen::Cluster);

    assert_eq!(app.open_tabs.len(), 2);
    assert_eq!(app.active_tab_idx, 0);
    assert_eq!(app.current_view, View::Tabs);
}

#[test]
fn test_tab_cycling_wraps() {
    let (_dir, mut app) = app_with(Arc::new(FakeTransport::new()));
    app.open_screen(Screen::Correlation);
    app.open_screen(Screen::Cluster);
    app.open_screen(Screen::RoughSet);

    app.next_tab();
    assert_eq!(app.active_tab().unwrap().screen, Screen::Correlation);
    app.previous_tab();
    assert_eq!(app.active_tab().unwrap().screen, Screen::RoughSet);

    app.go_home();
    app.next_tab();
    assert_eq!(app.current_view, View::Tabs);
    assert_eq!(app.active_tab().unwrap().screen, Screen::RoughSet);
}

#[test]
fn test_home_selection_opens_catalog_entry() {
    let (_dir, mut app) = app_with(Arc::new(FakeTransport::new()));
    app.home_next();
    app.home_next();
    app.open_selected_screen();
    assert_eq!(app.active_tab().unwrap().screen, Screen::ALL[2]);

    app.go_home();
    for _ in 0..20 {
        app.home_next();
    }
    assert_eq!(app.home_selected, Screen::ALL.len() - 1);
}

// ============================================================================
// Submission
// ============================================================================

#[test]
fn test_successful_submit_shows_result_and_records_history() {
    let transport = Arc::new(FakeTransport::new().respond(Ok(json!({"correlation": 0.8234}))));
    let (_dir, mut app) = app_with(transport.clone());
    fill_correlation(&mut app);

    app.submit_current_tab();
    assert!(app.active_tab().unwrap().is_submitting());
    assert!(app.active_tab().unwrap().submitted_at.is_some());
    assert!(app.await_completion(Duration::from_secs(5)));

    let tab = app.active_tab().unwrap();
    assert!(tab.pending.is_none());
    match tab.binding.state() {
        WorkflowState::Success(NormalizedResult::Correlation(r)) => {
            assert_eq!(r.coefficient, Some(0.8234))
        }
        other => panic!("unexpected state {:?}", other),
    }
    assert_eq!(transport.calls(), vec![AnalysisKind::Correlation]);

    let banner = app.banner.active().unwrap();
    assert_eq!(banner.level, NotificationLevel::Success);
    assert_eq!(
        app.history.latest(Screen::Correlation.slug(), "first"),
        Some("175, 133, 185")
    );
    assert!(app.config.history_file.exists());
}

#[test]
fn test_history_keeps_values_that_were_sent() {
    let transport = Arc::new(
        FakeTransport::new()
            .with_delay(Duration::from_millis(300))
            .respond(Ok(json!({"correlation": 0.8234}))),
    );
    let (_dir, mut app) = app_with(transport);
    fill_correlation(&mut app);

    app.submit_current_tab();
    let tab = app.active_tab_mut().unwrap();
    tab.binding.set_value("first", "9, 9, 9, 9");
    assert!(app.await_completion(Duration::from_secs(5)));

    assert_eq!(
        app.history.latest(Screen::Correlation.slug(), "first"),
        Some("175, 133, 185")
    );
    assert_eq!(app.active_tab().unwrap().binding.value("first"), "9, 9, 9, 9");
}

#[test]
fn test_validation_failure_is_listed_and_nothing_is_sent() {
    let transport = Arc::new(FakeTransport::new());
    let (_dir, mut app) = app_with(transport.clone());
    app.open_screen(Screen::Cluster);

    app.submit_current_tab();

    let tab = app.active_tab().unwrap();
    assert!(tab.validation.iter().any(|r| r.contains("select a file")));
    assert!(tab.pending.is_none());
    assert_eq!(tab.binding.state(), WorkflowState::Idle);
    assert!(transport.calls().is_empty());
}

#[test]
fn test_valid_resubmit_clears_validation_summary() {
    let transport = Arc::new(FakeTransport::new().respond(Ok(json!({"correlation": 0.1}))));
    let (_dir, mut app) = app_with(transport);
    app.open_screen(Screen::Correlation);
    app.submit_current_tab();
    assert!(!app.active_tab().unwrap().validation.is_empty());

    fill_correlation(&mut app);
    app.submit_current_tab();
    assert!(app.active_tab().unwrap().validation.is_empty());
    assert!(app.await_completion(Duration::from_secs(5)));
}

#[test]
fn test_server_error_sets_failed_state_and_error_banner() {
    let transport = Arc::new(FakeTransport::new().respond(Err(TransportError::Http {
        status: 500,
        body: r#"{"error":"bad data"}"#.into(),
    })));
    let (_dir, mut app) = app_with(transport);
    fill_correlation(&mut app);

    app.submit_current_tab();
    assert!(app.await_completion(Duration::from_secs(5)));

    assert_eq!(
        app.active_tab().unwrap().binding.state(),
        WorkflowState::Failed("bad data".into())
    );
    let banner = app.banner.active().unwrap();
    assert_eq!(banner.level, NotificationLevel::Error);
    assert_eq!(banner.message, "bad data");
    assert!(app.history.latest(Screen::Correlation.slug(), "first").is_none());
}

#[test]
fn test_second_submit_while_in_flight_is_ignored() {
    let transport = Arc::new(
        FakeTransport::new()
            .with_delay(Duration::from_millis(200))
            .respond(Ok(json!({"correlation": 0.5}))),
    );
    let (_dir, mut app) = app_with(transport.clone());
    fill_correlation(&mut app);

    app.submit_current_tab();
    app.submit_current_tab();
    assert!(app.await_completion(Duration::from_secs(5)));
    assert!(!app.await_completion(Duration::from_millis(300)));

    assert_eq!(transport.calls().len(), 1);
}

#[test]
fn test_submit_from_home_does_nothing() {
    let transport = Arc::new(FakeTransport::new());
    let (_dir, mut app) = app_with(transport.clone());
    fill_correlation(&mut app);
    app.go_home();

    app.submit_current_tab();

    assert!(!app.active_tab().unwrap().is_submitting());
    assert!(transport.calls().is_empty());
}

// ============================================================================
// Closing screens
// ============================================================================

#[test]
fn test_closing_idle_tab_is_immediate() {
    let (_dir, mut app) = app_with(Arc::new(FakeTransport::new()));
    app.open_screen(Screen::Correlation);
    app.open_screen(Screen::Cluster);

    app.close_current_tab();

    assert!(!app.show_close_confirmation);
    assert_eq!(app.open_tabs.len(), 1);
    assert_eq!(app.active_tab().unwrap().screen, Screen::Correlation);
}

#[test]
fn test_closing_submitting_tab_asks_first() {
    let transport = Arc::new(FakeTransport::new().with_delay(Duration::from_secs(30)));
    let (_dir, mut app) = app_with(transport);
    fill_correlation(&mut app);
    app.submit_current_tab();

    app.close_current_tab();
    assert!(app.show_close_confirmation);
    assert_eq!(app.open_tabs.len(), 1);

    app.cancel_close_tab();
    assert!(!app.show_close_confirmation);
    assert!(app.active_tab().unwrap().is_submitting());
}

#[test]
fn test_response_after_close_is_discarded() {
    let transport = Arc::new(
        FakeTransport::new()
            .with_delay(Duration::from_millis(100))
            .respond(Ok(json!({"correlation": 0.9}))),
    );
    let (_dir, mut app) = app_with(transport);
    fill_correlation(&mut app);
    app.submit_current_tab();

    app.close_current_tab();
    app.close_tab_confirmed();
    assert!(app.open_tabs.is_empty());
    assert_eq!(app.current_view, View::Home);

    // A fresh tab for the same screen gets a new id
    app.open_screen(Screen::Correlation);
    assert!(!app.await_completion(Duration::from_millis(400)));
    assert_eq!(app.active_tab().unwrap().binding.state(), WorkflowState::Idle);
    assert!(app.banner.active().is_none());
}
