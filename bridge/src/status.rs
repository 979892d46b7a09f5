//! The observable result of the most recent submission.

use std::fmt;

pub const IDLE_TEXT: &str = "No result yet...";
pub const PENDING_TEXT: &str = "AI is analyzing your drawing...";
pub const FAILED_TEXT: &str = "Something went wrong while analyzing your drawing.";

/// Replaced wholesale on every submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// A request is awaiting the endpoint.
    Pending,
    /// The endpoint's interpretation (or the fallback text).
    Succeeded(String),
    /// Any failure. The cause is logged, never displayed.
    Failed,
}

impl SubmissionStatus {
    /// The text the display layer shows for this status.
    #[must_use]
    pub fn display_text(&self) -> &str {
        match self {
            Self::Idle => IDLE_TEXT,
            Self::Pending => PENDING_TEXT,
            Self::Succeeded(text) => text,
            Self::Failed => FAILED_TEXT,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether this is an outcome of a finished submission.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed)
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_text())
    }
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
