//! Chat-completion adapter.
//!
//! Wraps the OpenRouter chat-completions endpoint. The public entry points
//! never fail across the boundary: any transport, status, or payload problem
//! becomes a human-readable string prefixed with [`AI_ERROR_PREFIX`], sent
//! back over the same reply channel as a normal answer.

use std::time::Duration;

use tracing::warn;

use crate::error::ServiceError;

/// Chat-completions endpoint.
const COMPLETIONS_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Upper bound on the completion size.
const MAX_COMPLETION_TOKENS: u32 = 800;

/// Per-call deadline; the adapter fails the call, not the process.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Marker prefixing every error reply from this adapter.
pub const AI_ERROR_PREFIX: &str = "⚠️ AI error:";

/// Client for the chat-completion endpoint.
#[derive(Clone)]
pub struct AiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl AiClient {
    /// Creates a client with a fixed model identifier.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: COMPLETIONS_URL.to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Points the client at a different completions endpoint (self-hosted
    /// gateways, tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sends `prompt` and returns the reply text, or an error string
    /// prefixed with [`AI_ERROR_PREFIX`]. Never returns `Err`.
    pub async fn complete(&self, prompt: &str) -> String {
        match self.complete_raw(prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "completion call failed");
                format!("{AI_ERROR_PREFIX} {e}")
            }
        }
    }

    /// The fallible call behind [`AiClient::complete`].
    ///
    /// On success returns the first choice's message content; a decodable
    /// body without one is returned verbatim as a fallback.
    pub async fn complete_raw(&self, prompt: &str) -> Result<String, ServiceError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": MAX_COMPLETION_TOKENS,
        });

        let response = self
            .http
            .post(&self.endpoint)
            .timeout(REQUEST_TIMEOUT)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status(status.as_u16()));
        }

        let raw = response.text().await?;
        let json: serde_json::Value =
            serde_json::from_str(&raw).map_err(|e| ServiceError::Malformed(e.to_string()))?;

        match json["choices"][0]["message"]["content"].as_str() {
            Some(content) => Ok(content.trim().to_string()),
            None => Ok(raw),
        }
    }

    /// Blocking variant of [`AiClient::complete`] for pure-sync callers.
    ///
    /// Must not be called from inside the async runtime; async callers use
    /// [`AiClient::complete`], which keeps the scheduler free.
    pub fn complete_blocking(&self, prompt: &str) -> String {
        match self.complete_blocking_raw(prompt) {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "completion call failed");
                format!("{AI_ERROR_PREFIX} {e}")
            }
        }
    }

    fn complete_blocking_raw(&self, prompt: &str) -> Result<String, ServiceError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": MAX_COMPLETION_TOKENS,
        });

        let client = reqwest::blocking::Client::new();
        let response = client
            .post(&self.endpoint)
            .timeout(REQUEST_TIMEOUT)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status(status.as_u16()));
        }

        let raw = response.text()?;
        let json: serde_json::Value =
            serde_json::from_str(&raw).map_err(|e| ServiceError::Malformed(e.to_string()))?;

        match json["choices"][0]["message"]["content"].as_str() {
            Some(content) => Ok(content.trim().to_string()),
            None => Ok(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Port 1 is never listening; the connect fails immediately.
    const DEAD_ENDPOINT: &str = "http://127.0.0.1:1/v1/chat/completions";

    #[tokio::test]
    async fn test_complete_unreachable_endpoint_returns_marker_string() {
        let client = AiClient::new("test-key", "test-model").with_endpoint(DEAD_ENDPOINT);

        let reply = client.complete("hello").await;

        assert!(reply.starts_with(AI_ERROR_PREFIX), "got: {reply}");
    }

    #[tokio::test]
    async fn test_complete_raw_surfaces_transport_error() {
        let client = AiClient::new("test-key", "test-model").with_endpoint(DEAD_ENDPOINT);

        let result = client.complete_raw("hello").await;

        assert!(matches!(result, Err(ServiceError::Request(_))));
    }

    #[test]
    fn test_complete_blocking_unreachable_endpoint_returns_marker_string() {
        let client = AiClient::new("test-key", "test-model").with_endpoint(DEAD_ENDPOINT);

        let reply = client.complete_blocking("hello");

        assert!(reply.starts_with(AI_ERROR_PREFIX), "got: {reply}");
    }
}
