//! Session phases - the lifecycle of a single send.

use serde::{Deserialize, Serialize};

/// Defines the possible phases of a chat session.
///
/// A session is `Idle` between sends; one accepted send moves it through
/// `Sending` (reply source resolving) and `Revealing` (typewriter emitting)
/// before it returns to `Idle`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// The session is idle, awaiting user input.
    #[default]
    Idle,

    /// A send was accepted and the reply source has not resolved yet.
    Sending,

    /// The finished reply is being revealed into the placeholder message.
    Revealing,
}

impl SessionPhase {
    /// Check if this phase allows a new send.
    pub fn accepts_input(self) -> bool {
        matches!(self, Self::Idle)
    }

    /// True from send acceptance until the reveal completes.
    pub fn is_pending(self) -> bool {
        !matches!(self, Self::Idle)
    }

    pub fn is_revealing(self) -> bool {
        matches!(self, Self::Revealing)
    }

    /// Get a human-readable description of the current phase.
    pub fn description(self) -> &'static str {
        match self {
            Self::Idle => "Ready for input",
            Self::Sending => "Waiting for reply",
            Self::Revealing => "Typing reply",
        }
    }
}
