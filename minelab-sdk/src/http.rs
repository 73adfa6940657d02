//! reqwest-backed transport

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::time::Duration;

use crate::error::TransportError;
use crate::payload::{FileHandle, RequestBody, RequestPayload};
use crate::transport::{Endpoint, Transport};

const USER_AGENT: &str = concat!("minelab/", env!("CARGO_PKG_VERSION"));

/// Sends payloads to the analytics service over HTTP
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, endpoint: &Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path)
    }

    async fn multipart(
        &self,
        file: &FileHandle,
        fields: Vec<(&'static str, String)>,
    ) -> Result<Form, TransportError> {
        let bytes = tokio::fs::read(file.path())
            .await
            .map_err(|source| TransportError::Attachment {
                path: file.path().to_path_buf(),
                source,
            })?;

        let part = Part::bytes(bytes).file_name(file.name().to_string());
        let mut form = Form::new().part("file", part);
        for (name, value) in fields {
            form = form.text(name, value);
        }
        Ok(form)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        endpoint: &Endpoint,
        request: &RequestPayload,
    ) -> Result<Value, TransportError> {
        let url = self.url_for(endpoint);
        tracing::debug!(kind = %endpoint.kind, url = %url, "sending analysis request");

        let builder = match request.body() {
            RequestBody::Json(body) => self.client.post(&url).json(&body),
            RequestBody::Multipart { file, fields } => {
                let form = self.multipart(&file, fields).await?;
                self.client.post(&url).multipart(form)
            }
        };

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!(
                kind = %endpoint.kind,
                status = status.as_u16(),
                "analysis service returned an error"
            );
            return Err(TransportError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| TransportError::Decode(e.to_string()))
    }
}
