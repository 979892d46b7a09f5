//! Recorded drawing sessions: a container width, a theme, and an input log.
//!
//! ```json
//! { "container_width": 400, "theme": "dark",
//!   "events": [ { "type": "pointer_down", "x": 10, "y": 10 }, { "type": "submit" } ] }
//! ```

use std::path::Path;

use canvas::consts::MAX_CANVAS_SIDE;
use canvas::{Action, CanvasError, Engine, InputEvent, InputQueue, Snapshot, Theme};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::CliError;

fn default_container_width() -> u32 {
    MAX_CANVAS_SIDE
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default = "default_container_width")]
    pub container_width: u32,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub events: Vec<InputEvent>,
}

/// Engine state after replaying a session.
pub struct Replay {
    pub engine: Engine,
    /// Snapshots produced by `submit` events, in order.
    pub submitted: Vec<Snapshot>,
    /// How many events asked for a repaint.
    pub renders: usize,
    /// The event error that stopped the replay early, if any. Everything
    /// above reflects the events applied before it.
    pub halted: Option<CanvasError>,
}

impl Session {
    /// Read and parse a session file.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Io`] or [`CliError::Json`].
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// # Errors
    ///
    /// Returns [`CliError::Json`] if `raw` is not a valid session.
    pub fn from_json(raw: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Mount a fresh engine and drain every event through it.
    ///
    /// An event that fails stops the replay; the returned [`Replay`] keeps
    /// the snapshots and renders produced before it and records the error.
    ///
    /// # Errors
    ///
    /// Returns a [`CanvasError`] only if the engine cannot be mounted.
    pub fn replay(&self) -> Result<Replay, CanvasError> {
        let mut engine = Engine::new(self.theme);
        engine.mount(self.container_width)?;
        let mut queue: InputQueue = self.events.iter().cloned().collect();
        let drained = engine.drain(&mut queue);

        let mut submitted = Vec::new();
        let mut renders = 0;
        for action in drained.actions {
            match action {
                Action::RenderNeeded => renders += 1,
                Action::SnapshotReady(snapshot) => submitted.push(snapshot),
                Action::SuppressDefault => {}
            }
        }
        if let Some(e) = &drained.error {
            warn!(error = %e, skipped = queue.len(), "session replay halted");
        }
        debug!(events = self.events.len(), renders, snapshots = submitted.len(), "session replayed");
        Ok(Replay { engine, submitted, renders, halted: drained.error })
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
