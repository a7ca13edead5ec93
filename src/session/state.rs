//! Session state types.

use crate::sse::{StreamWarning, TerminalUpdate};
use crate::traits::HttpError;
use uuid::Uuid;

/// Why a session ended without a result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FailureReason {
    /// The request or a body read failed, or the service answered with an error status
    #[error("transport failure: {0}")]
    Transport(#[from] HttpError),

    /// The stream ended before the service sent its final result
    #[error("stream ended before the final result arrived")]
    Incomplete,

    /// The session was aborted by the caller
    #[error("session cancelled")]
    Cancelled,
}

impl FailureReason {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            FailureReason::Transport(e) => e.error_code(),
            FailureReason::Incomplete => "E_SESSION_INCOMPLETE",
            FailureReason::Cancelled => "E_SESSION_CANCELLED",
        }
    }
}

/// Lifecycle state of one session.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    /// Request sent, no body line seen yet
    Requesting,
    /// At least one body line seen
    Streaming,
    Completed(TerminalUpdate),
    Failed(FailureReason),
}

impl SessionState {
    /// Whether the state ends the session.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Completed(_) | SessionState::Failed(_))
    }

    /// Returns the state name as a string for logging purposes.
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Requesting => "requesting",
            SessionState::Streaming => "streaming",
            SessionState::Completed(_) => "completed",
            SessionState::Failed(_) => "failed",
        }
    }
}

/// Cumulative progress seen during a session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Progress {
    /// Most recent iteration number
    pub iteration: Option<u32>,
    /// Every stage entered, in arrival order (repeats included)
    pub nodes: Vec<String>,
}

/// Everything a finished session produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    /// Identifier used in this session's log span
    pub session_id: Uuid,
    /// Terminal state: always `Completed` or `Failed`
    pub state: SessionState,
    /// Non-fatal problems, in the order they were found
    pub warnings: Vec<StreamWarning>,
    /// Number of records handed to the sink
    pub dispatched: usize,
    pub progress: Progress,
}

impl SessionOutcome {
    /// The final result, if the session completed.
    pub fn result(&self) -> Option<&TerminalUpdate> {
        match &self.state {
            SessionState::Completed(result) => Some(result),
            _ => None,
        }
    }

    /// The failure reason, if the session failed.
    pub fn failure(&self) -> Option<&FailureReason> {
        match &self.state {
            SessionState::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    /// Whether the session completed and the service reports a successful fix.
    pub fn is_fixed(&self) -> bool {
        self.result().is_some_and(|r| r.is_success)
    }
}

/// Reasons a submission is refused before any session starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("code to fix must not be empty")]
    EmptyCode,

    #[error("another fix session is already in progress")]
    Busy,
}
