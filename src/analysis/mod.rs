//! Analysis client: request construction, transport, and reply parsing.
//!
//! Provides a [`CompletionTransport`] abstraction so the session can be
//! driven by a mock in tests and by [`HttpTransport`] in production.

pub mod extract;
pub mod prompt;
pub mod transport;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{AnalysisResult, IngestedFile};

pub use extract::{ExtractionStrategy, STRATEGIES, parse_analysis, reply_text};
pub use prompt::{ChatMessage, ChatRequest, build_request};
pub use transport::HttpTransport;

/// Errors from an analysis run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Please enter your Deepseek API key")]
    MissingCredential,

    #[error("Please upload a file to analyze")]
    MissingFile,

    #[error("API request failed: {status} {reason}")]
    Transport { status: u16, reason: String },

    #[error("API request failed: {0}")]
    Network(String),

    /// The detail is kept for logs; users only see the generic message.
    #[error("Failed to parse analysis results. Please try again.")]
    Parse(String),
}

/// Raw outcome of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a completions request on behalf of a credential.
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    /// Perform exactly one request. Implementations must not retry.
    async fn send(
        &self,
        credential: &str,
        request: &ChatRequest,
    ) -> Result<TransportResponse, AnalysisError>;
}

/// Check that a key and non-blank file content are present.
pub fn check_preconditions<'a>(
    credential: Option<&'a str>,
    file: Option<&'a IngestedFile>,
) -> Result<(&'a str, &'a IngestedFile), AnalysisError> {
    let credential = credential
        .filter(|c| !c.trim().is_empty())
        .ok_or(AnalysisError::MissingCredential)?;
    let file = file
        .filter(|f| !f.is_blank())
        .ok_or(AnalysisError::MissingFile)?;
    Ok((credential, file))
}

/// Send one file for review and parse the reply.
pub async fn analyze_file(
    transport: &dyn CompletionTransport,
    credential: &str,
    model: &str,
    file: &IngestedFile,
) -> Result<AnalysisResult, AnalysisError> {
    let request = build_request(model, file);
    let response = transport.send(credential, &request).await?;

    if !response.is_success() {
        tracing::warn!(
            status = response.status,
            reason = %response.reason,
            "analysis request rejected"
        );
        return Err(AnalysisError::Transport {
            status: response.status,
            reason: response.reason,
        });
    }

    let reply = reply_text(&response.body)?;
    let result = parse_analysis(&reply).inspect_err(|e| {
        if let AnalysisError::Parse(detail) = e {
            tracing::warn!(detail = %detail, "could not parse analysis reply");
        }
    })?;

    if !result.counts_consistent() {
        tracing::debug!("reported summary counts differ from the issue list");
    }

    Ok(result)
}
