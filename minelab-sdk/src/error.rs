//! Error types for validation, transport and configuration

use std::path::PathBuf;
use thiserror::Error;

use crate::shape::{shape_error, GENERIC_ERROR};

/// Ordered, never-empty list of reasons why raw input was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .reasons.join("; "))]
pub struct ValidationFailure {
    reasons: Vec<String>,
}

impl ValidationFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reasons: vec![reason.into()],
        }
    }

    /// Returns `None` when there is nothing to report
    pub fn from_reasons(reasons: Vec<String>) -> Option<Self> {
        if reasons.is_empty() {
            None
        } else {
            Some(Self { reasons })
        }
    }

    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    /// True when any reason contains `needle`
    pub fn mentions(&self, needle: &str) -> bool {
        self.reasons.iter().any(|r| r.contains(needle))
    }
}

/// Failure of a single call to the analytics service
#[derive(Debug, Error)]
pub enum TransportError {
    /// No response was received
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// A 2xx response whose body is not valid JSON
    #[error("could not decode response: {0}")]
    Decode(String),

    /// The file to upload could not be read
    #[error("could not read {}: {source}", .path.display())]
    Attachment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TransportError {
    /// Human-readable reason shown to the user
    pub fn reason(&self) -> String {
        match self {
            TransportError::Network(_) => shape_error(None),
            TransportError::Http { status, body } => {
                let message = shape_error(Some(body));
                if message == GENERIC_ERROR {
                    format!("{} (HTTP {})", GENERIC_ERROR, status)
                } else {
                    message
                }
            }
            TransportError::Decode(_) => {
                "The analysis service sent a response that could not be read.".to_string()
            }
            TransportError::Attachment { path, source } => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string());
                format!("Could not read {}: {}", name, source)
            }
        }
    }
}

/// Invalid endpoint configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown analysis kind '{0}'")]
    UnknownKind(String),

    #[error("endpoint path for '{kind}' must start with '/', got '{path}'")]
    InvalidPath { kind: String, path: String },
}
