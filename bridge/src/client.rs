//! HTTP interpretation client.
//!
//! One JSON `POST` per snapshot, no timeout, no retry. Pure parsing lives in
//! [`parse_response`] and [`error_message`] for testability.

use canvas::Snapshot;
use serde_json::Value;
use tracing::{debug, warn};

use super::config::BridgeConfig;
use super::types::{BridgeError, Interpret, SubmitRequest};

/// Shown when the endpoint answers successfully but without a result text.
pub const FALLBACK_TEXT: &str = "The AI could not interpret this drawing.";

/// JSON pointer to the result text in a success body.
const RESULT_TEXT_POINTER: &str = "/result/candidates/0/content/parts/0/text";

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpInterpreter {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpInterpreter {
    /// Build a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::HttpClientBuild`] if the HTTP client cannot be constructed.
    pub fn new(config: BridgeConfig) -> Result<Self, BridgeError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| BridgeError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, endpoint: config.endpoint })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl Interpret for HttpInterpreter {
    async fn interpret(&self, snapshot: &Snapshot) -> Result<String, BridgeError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&SubmitRequest::new(snapshot))
            .send()
            .await
            .map_err(|e| BridgeError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| BridgeError::Request(e.to_string()))?;
        debug!(status = status.as_u16(), bytes = text.len(), "endpoint responded");

        if !status.is_success() {
            let body = error_message(&text);
            warn!(status = status.as_u16(), error = %body, "endpoint rejected snapshot");
            return Err(BridgeError::Response { status: status.as_u16(), body });
        }

        parse_response(&text)
    }
}

// =============================================================================
// PARSING
// =============================================================================

/// Extract the display text from a success body.
///
/// # Errors
///
/// Returns [`BridgeError::Parse`] if the body is not JSON. Valid JSON without
/// a string at the result path yields [`FALLBACK_TEXT`].
pub fn parse_response(body: &str) -> Result<String, BridgeError> {
    let value: Value = serde_json::from_str(body).map_err(|e| BridgeError::Parse(e.to_string()))?;
    let text = value
        .pointer(RESULT_TEXT_POINTER)
        .and_then(Value::as_str)
        .map_or_else(|| FALLBACK_TEXT.to_string(), str::to_string);
    Ok(text)
}

/// The server's `{"error": "..."}` message, or the raw body when absent.
#[must_use]
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
