//! Transport boundary and the endpoint table

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{ConfigError, TransportError};
use crate::kind::AnalysisKind;
use crate::payload::RequestPayload;

/// Where one analysis kind is served
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub kind: AnalysisKind,
    pub path: String,
}

/// Endpoint path per analysis kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTable {
    paths: BTreeMap<AnalysisKind, String>,
}

impl Default for EndpointTable {
    fn default() -> Self {
        let paths = AnalysisKind::ALL
            .into_iter()
            .map(|kind| (kind, kind.default_path().to_string()))
            .collect();
        Self { paths }
    }
}

impl EndpointTable {
    /// Default table with per-slug overrides applied
    pub fn with_overrides<'a, I>(overrides: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut table = Self::default();
        for (slug, path) in overrides {
            let kind: AnalysisKind = slug.trim().parse()?;
            table.set(kind, path)?;
        }
        Ok(table)
    }

    pub fn set(&mut self, kind: AnalysisKind, path: &str) -> Result<(), ConfigError> {
        let path = path.trim();
        if !path.starts_with('/') {
            return Err(ConfigError::InvalidPath {
                kind: kind.slug().to_string(),
                path: path.to_string(),
            });
        }
        self.paths.insert(kind, path.to_string());
        Ok(())
    }

    pub fn endpoint(&self, kind: AnalysisKind) -> Endpoint {
        let path = self
            .paths
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| kind.default_path().to_string());
        Endpoint { kind, path }
    }

    pub fn iter(&self) -> impl Iterator<Item = Endpoint> + '_ {
        self.paths.iter().map(|(kind, path)| Endpoint {
            kind: *kind,
            path: path.clone(),
        })
    }
}

/// Sends one validated payload and returns the raw JSON response body
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        endpoint: &Endpoint,
        request: &RequestPayload,
    ) -> Result<Value, TransportError>;
}
