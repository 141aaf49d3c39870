//! Workflow stage types for session state management.

use serde::{Deserialize, Serialize};
use strum::Display;

/// One named state of the upload → encrypt → mine workflow.
///
/// `Encrypting` and `Mining` are transient: they are entered when a request is
/// dispatched and left when it resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    /// Nothing selected yet.
    Idle,
    /// A dataset has been selected and awaits encryption.
    Uploaded,
    /// An encryption request is outstanding.
    Encrypting,
    /// The dataset has been encrypted; mining may start.
    Encrypted,
    /// A mining request is outstanding.
    Mining,
    /// Patterns are available.
    MiningComplete,
    /// The last request failed; see the session's failure record.
    Failed,
}

impl Stage {
    /// Whether a backend request is outstanding in this stage.
    pub fn is_in_flight(self) -> bool {
        matches!(self, Stage::Encrypting | Stage::Mining)
    }

    /// Stages in which the session publishes an encryption result.
    pub fn publishes_encryption(self) -> bool {
        matches!(self, Stage::Encrypted | Stage::Mining | Stage::MiningComplete)
    }

    /// Stages in which the session publishes a mining result.
    pub fn publishes_mining(self) -> bool {
        matches!(self, Stage::MiningComplete)
    }
}

impl Default for Stage {
    fn default() -> Self {
        Stage::Idle
    }
}
