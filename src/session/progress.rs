//! Progress state machine.
//!
//! Drives one session through `Idle → Requesting → Streaming →
//! {Completed | Failed}` and forwards every dispatched record to the sink.
//! Calls that do not fit the current state are ignored and return `false`;
//! they never move a terminal session.

use crate::sse::EventRecord;
use crate::traits::RenderSink;

use super::state::{FailureReason, Progress, SessionState};

pub struct ProgressMachine<'s> {
    state: SessionState,
    sink: &'s mut dyn RenderSink,
    progress: Progress,
    dispatched: usize,
}

impl<'s> ProgressMachine<'s> {
    pub fn new(sink: &'s mut dyn RenderSink) -> Self {
        Self {
            state: SessionState::Idle,
            sink,
            progress: Progress::default(),
            dispatched: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// `Idle → Requesting`. Clears the sink before anything else happens.
    pub fn start(&mut self) -> bool {
        if self.state != SessionState::Idle {
            return false;
        }
        self.sink.on_reset();
        self.transition(SessionState::Requesting);
        true
    }

    /// `Requesting → Streaming` on the first body line.
    pub fn line_received(&mut self) -> bool {
        if self.state != SessionState::Requesting {
            return false;
        }
        self.transition(SessionState::Streaming);
        true
    }

    /// Dispatch one record to the sink.
    ///
    /// Returns `false` if the session is not streaming (before the first
    /// line, or after it ended) and the record was dropped.
    pub fn apply(&mut self, record: EventRecord) -> bool {
        if self.state != SessionState::Streaming {
            tracing::debug!(
                kind = record.kind_name(),
                state = self.state.name(),
                "record dropped outside streaming state"
            );
            return false;
        }

        self.dispatched += 1;
        match record {
            EventRecord::Iteration(iteration) => {
                self.progress.iteration = Some(iteration);
                self.sink.on_iteration_update(iteration);
            }
            EventRecord::Node(node) => {
                self.sink.on_node_update(&node);
                self.progress.nodes.push(node);
            }
            EventRecord::Terminal(result) => {
                self.sink.on_result(&result);
                self.transition(SessionState::Completed(result));
            }
        }
        true
    }

    /// `Requesting | Streaming → Failed(reason)`.
    pub fn fail(&mut self, reason: FailureReason) -> bool {
        if !matches!(self.state, SessionState::Requesting | SessionState::Streaming) {
            tracing::debug!(
                state = self.state.name(),
                %reason,
                "failure ignored outside an active session"
            );
            return false;
        }
        tracing::warn!(code = reason.error_code(), "session failed: {}", reason);
        self.sink.on_error(&reason);
        self.transition(SessionState::Failed(reason));
        true
    }

    /// The body ended. A session without a result is incomplete.
    pub fn end_of_stream(&mut self) {
        if !self.is_terminal() {
            self.fail(FailureReason::Incomplete);
        }
    }

    /// Give back the sink borrow together with what the session produced.
    pub fn finish(self) -> (SessionState, Progress, usize) {
        (self.state, self.progress, self.dispatched)
    }

    fn transition(&mut self, next: SessionState) {
        tracing::info!(from = self.state.name(), to = next.name(), "session transition");
        self.state = next;
    }
}
