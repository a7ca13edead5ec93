//! Rendering sink trait abstraction.
//!
//! The session core never renders anything itself. Every visible change is a
//! call on a [`RenderSink`], made in the order the stream produced it.

use crate::session::FailureReason;
use crate::sse::TerminalUpdate;

/// Consumer of typed progress and result notifications.
///
/// For one session the call sequence is always: `on_reset`, any number of
/// `on_iteration_update` / `on_node_update` in stream order, then exactly one
/// of `on_result` or `on_error`, then `on_idle`. A submission rejected before
/// the session starts makes no calls at all.
pub trait RenderSink: Send {
    /// Clear everything shown for a previous session.
    fn on_reset(&mut self) {}

    /// The service started fix iteration `iteration`.
    fn on_iteration_update(&mut self, iteration: u32);

    /// The service entered the named stage. Calls accumulate; each one is a
    /// new progress entry, not a replacement of the last.
    fn on_node_update(&mut self, node: &str);

    /// The service delivered its final result. A result with
    /// `is_success == false` is still a result, not an error.
    fn on_result(&mut self, result: &TerminalUpdate);

    /// The session failed without a result.
    fn on_error(&mut self, reason: &FailureReason);

    /// The session is over and input may be accepted again.
    fn on_idle(&mut self) {}
}
