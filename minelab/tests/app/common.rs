//! Common test utilities for the terminal client tests

use minelab::config::Config;
use minelab_sdk::{async_trait, AnalysisKind, Endpoint, RequestPayload, Transport, TransportError};
use serde_json::Value;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

/// Transport returning scripted outcomes, optionally after a delay
#[derive(Default)]
pub struct FakeTransport {
    outcomes: Mutex<VecDeque<Result<Value, TransportError>>>,
    calls: Mutex<Vec<AnalysisKind>>,
    delay: Option<Duration>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, outcome: Result<Value, TransportError>) -> Self {
        self.outcomes.lock().unwrap().push_back(outcome);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<AnalysisKind> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(
        &self,
        endpoint: &Endpoint,
        _payload: &RequestPayload,
    ) -> Result<Value, TransportError> {
        self.calls.lock().unwrap().push(endpoint.kind);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.outcomes.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(TransportError::Network("no scripted response".into())))
    }
}

/// Config whose history and log files live in `dir`
pub fn test_config(dir: &Path) -> Config {
    Config {
        history_file: dir.join("history.json"),
        log_file: dir.join("minelab.log"),
        ..Config::default()
    }
}

/// Temporary directory with one file of the given name
pub fn upload_fixture(name: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, b"PK\x03\x04 fixture").unwrap();
    (dir, path)
}

/// 1x1 transparent PNG header bytes, base64
pub const PNG_HEADER_B64: &str = "iVBORw==";
