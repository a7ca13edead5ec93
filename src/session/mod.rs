//! Fix sessions: state, the single-session slot, and the orchestrator.
//!
//! # Module structure
//! - `state` - Session states, failure reasons and outcomes
//! - `progress` - State machine dispatching records to a render sink
//! - `slot` - At-most-one-session guard with per-session abort channel
//! - `orchestrator` - [`FixClient`], tying request, pipeline and machine together

mod orchestrator;
mod progress;
mod slot;
mod state;

pub use orchestrator::FixClient;
pub use progress::ProgressMachine;
pub use slot::{AbortSignal, SessionGuard, SessionSlot};
pub use state::{FailureReason, Progress, SessionOutcome, SessionState, SubmitError};
