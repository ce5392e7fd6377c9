//! HTTP transport for the chat completions endpoint.

use async_trait::async_trait;

use super::prompt::ChatRequest;
use super::{AnalysisError, CompletionTransport, TransportResponse};

/// `reqwest`-backed transport posting to a fixed endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl CompletionTransport for HttpTransport {
    async fn send(
        &self,
        credential: &str,
        request: &ChatRequest,
    ) -> Result<TransportResponse, AnalysisError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            model = %request.model,
            "sending analysis request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {credential}"))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| AnalysisError::Network(e.to_string()))?;

        let status = response.status();
        let reason = status.canonical_reason().unwrap_or("").to_string();

        // Error bodies are not inspected.
        if !status.is_success() {
            return Ok(TransportResponse {
                status: status.as_u16(),
                reason,
                body: String::new(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| AnalysisError::Network(e.to_string()))?;

        Ok(TransportResponse {
            status: status.as_u16(),
            reason,
            body,
        })
    }
}
