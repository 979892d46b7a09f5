//! Bridge types — wire request, errors, and the endpoint seam.

use canvas::Snapshot;
use serde::Serialize;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced while talking to the interpretation endpoint.
///
/// None of these reach the display layer: the [`crate::Submitter`] collapses
/// every variant into [`crate::SubmissionStatus::Failed`] after logging it.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// Transport failure: connection refused, reset, unreadable body.
    #[error("request failed: {0}")]
    Request(String),

    /// The endpoint answered with a non-success status.
    #[error("endpoint returned status {status}: {body}")]
    Response { status: u16, body: String },

    /// The success body was not JSON.
    #[error("response parse failed: {0}")]
    Parse(String),
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Body of the interpretation request.
#[derive(Debug, Serialize)]
pub struct SubmitRequest<'a> {
    #[serde(rename = "imageData")]
    pub image_data: &'a str,
}

impl<'a> SubmitRequest<'a> {
    #[must_use]
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self { image_data: snapshot.as_data_uri() }
    }
}

// =============================================================================
// INTERPRET TRAIT
// =============================================================================

/// Async seam between the submitter and whatever interprets a drawing.
#[async_trait::async_trait]
pub trait Interpret: Send + Sync {
    /// Interpret one snapshot, returning the text to display.
    ///
    /// # Errors
    ///
    /// Returns a [`BridgeError`] for transport, status, or parse failures.
    async fn interpret(&self, snapshot: &Snapshot) -> Result<String, BridgeError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
