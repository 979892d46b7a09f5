//! Submitter — drives one submission at a time and publishes its status.
//!
//! Status changes go out on a `tokio::sync::watch` channel: `Pending` is
//! published before the endpoint is awaited, then exactly one terminal state.
//! Errors from the [`Interpret`] implementation are logged and collapsed to
//! [`SubmissionStatus::Failed`]; the only error a caller sees is
//! [`SubmitError::InFlight`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use canvas::Snapshot;
use tokio::sync::watch;
use tracing::{info, warn};

use super::status::SubmissionStatus;
use super::types::Interpret;

/// Rejections raised before a submission starts.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// Another submission has not reached a terminal state yet.
    #[error("a submission is already in flight")]
    InFlight,
}

pub struct Submitter {
    interpreter: Arc<dyn Interpret>,
    status: watch::Sender<SubmissionStatus>,
    in_flight: AtomicBool,
}

impl Submitter {
    #[must_use]
    pub fn new(interpreter: Arc<dyn Interpret>) -> Self {
        let (status, _) = watch::channel(SubmissionStatus::Idle);
        Self { interpreter, status, in_flight: AtomicBool::new(false) }
    }

    /// Register an observer. The receiver starts at the current status.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SubmissionStatus> {
        self.status.subscribe()
    }

    #[must_use]
    pub fn status(&self) -> SubmissionStatus {
        self.status.borrow().clone()
    }

    /// Send `snapshot` to the endpoint and return the terminal status.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::InFlight`] without touching the status if a
    /// previous submission is still pending.
    pub async fn submit(&self, snapshot: Snapshot) -> Result<SubmissionStatus, SubmitError> {
        let mut guard = InFlightGuard::acquire(&self.in_flight, &self.status).ok_or(SubmitError::InFlight)?;

        info!(width = snapshot.width(), bytes = snapshot.as_data_uri().len(), "submission started");
        self.status.send_replace(SubmissionStatus::Pending);

        let next = match self.interpreter.interpret(&snapshot).await {
            Ok(text) => {
                info!(chars = text.chars().count(), "submission succeeded");
                SubmissionStatus::Succeeded(text)
            }
            Err(e) => {
                warn!(error = %e, "submission failed");
                SubmissionStatus::Failed
            }
        };
        guard.settle(next.clone());
        Ok(next)
    }
}

/// Holds the in-flight flag for one submission.
///
/// Dropping the guard before [`InFlightGuard::settle`] (the submit future was
/// dropped mid-await) publishes [`SubmissionStatus::Failed`]. The flag is
/// released last.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
    status: &'a watch::Sender<SubmissionStatus>,
    settled: bool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool, status: &'a watch::Sender<SubmissionStatus>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
            .then_some(Self { flag, status, settled: false })
    }

    /// Publish the terminal status of this submission.
    fn settle(&mut self, terminal: SubmissionStatus) {
        self.status.send_replace(terminal);
        self.settled = true;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("submission abandoned before the endpoint answered");
            self.status.send_replace(SubmissionStatus::Failed);
        }
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
#[path = "submitter_test.rs"]
mod tests;
