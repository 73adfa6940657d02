//! Common fixtures for the sdk tests

use minelab_sdk::async_trait;
use minelab_sdk::{AnalysisKind, Endpoint, RequestPayload, Transport, TransportError};
use serde_json::Value;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;

/// Transport that replays scripted outcomes and records every call
#[derive(Default)]
pub struct FakeTransport {
    outcomes: Mutex<VecDeque<Result<Value, TransportError>>>,
    calls: Mutex<Vec<(AnalysisKind, String)>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, outcome: Result<Value, TransportError>) -> Self {
        self.outcomes.lock().unwrap().push_back(outcome);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(AnalysisKind, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(
        &self,
        endpoint: &Endpoint,
        request: &RequestPayload,
    ) -> Result<Value, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((request.kind(), endpoint.path.clone()));
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted response".into())))
    }
}

/// Write a small file with the given name into a fresh temp dir
pub fn upload_fixture(name: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, b"PK\x03\x04 not really a workbook").unwrap();
    (dir, path)
}
