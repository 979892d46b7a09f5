//! Submission bridge — sends canvas snapshots to the interpretation endpoint.
//!
//! DESIGN
//! ======
//! The [`Submitter`] owns the observable [`SubmissionStatus`] and guarantees
//! the status contract (pending before the await, one terminal state after,
//! nothing thrown past it). The network exchange sits behind the
//! [`Interpret`] trait; [`HttpInterpreter`] is the production implementation
//! and tests substitute mocks.

pub mod client;
pub mod config;
pub mod status;
pub mod submitter;
pub mod types;

pub use client::HttpInterpreter;
pub use config::BridgeConfig;
pub use status::SubmissionStatus;
pub use submitter::{SubmitError, Submitter};
pub use types::{BridgeError, Interpret};
