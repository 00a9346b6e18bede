//! Stream relay state types
//!
//! Defines the relay lifecycle states and the status snapshot reported to
//! the server's control surface.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a stream relay
///
/// There is no terminal state; `Idle` and `Configured` are both re-enterable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelayState {
    /// No destination configured, not running
    Idle,
    /// Destination set but no encoder running (disabled or not yet started)
    Configured,
    /// Encoder alive, frames being forwarded
    Running,
}

impl Default for RelayState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Snapshot of a stream relay for status queries
///
/// Failures inside the relay are silent by design; this snapshot is the only
/// way an operator observes "stream not forwarding".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamStatus {
    /// Target address passed to the encoder; empty when unconfigured
    pub destination: String,

    /// Operator toggle; when false, future starts are no-ops
    pub enabled: bool,

    /// Whether an encoder process is currently being fed
    pub running: bool,
}

impl StreamStatus {
    /// Lifecycle state implied by this snapshot
    pub fn state(&self) -> RelayState {
        if self.running {
            RelayState::Running
        } else if self.destination.is_empty() {
            RelayState::Idle
        } else {
            RelayState::Configured
        }
    }
}
