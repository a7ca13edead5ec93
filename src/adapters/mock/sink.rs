//! Recording render sink for testing.

use std::sync::{Arc, Mutex};

use crate::session::FailureReason;
use crate::sse::TerminalUpdate;
use crate::traits::RenderSink;

/// One call observed by a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    Reset,
    Iteration(u32),
    Node(String),
    Result(TerminalUpdate),
    Error(FailureReason),
    Idle,
}

/// Sink that records every notification in order.
///
/// Clones share the same log, so a test can keep one handle while the
/// session owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    calls: Arc<Mutex<Vec<SinkCall>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls so far, oldest first.
    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Only the progress and terminal calls, without reset/idle bookkeeping.
    pub fn updates(&self) -> Vec<SinkCall> {
        self.calls()
            .into_iter()
            .filter(|call| !matches!(call, SinkCall::Reset | SinkCall::Idle))
            .collect()
    }

    /// Number of recorded calls matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&SinkCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| predicate(c)).count()
    }

    fn push(&self, call: SinkCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl RenderSink for RecordingSink {
    fn on_reset(&mut self) {
        self.push(SinkCall::Reset);
    }

    fn on_iteration_update(&mut self, iteration: u32) {
        self.push(SinkCall::Iteration(iteration));
    }

    fn on_node_update(&mut self, node: &str) {
        self.push(SinkCall::Node(node.to_string()));
    }

    fn on_result(&mut self, result: &TerminalUpdate) {
        self.push(SinkCall::Result(result.clone()));
    }

    fn on_error(&mut self, reason: &FailureReason) {
        self.push(SinkCall::Error(reason.clone()));
    }

    fn on_idle(&mut self) {
        self.push(SinkCall::Idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_shares_log_between_clones() {
        let sink = RecordingSink::new();
        let mut handle = sink.clone();

        handle.on_reset();
        handle.on_node_update("developer");
        handle.on_idle();

        assert_eq!(sink.calls().len(), 3);
        assert_eq!(sink.updates(), vec![SinkCall::Node("developer".to_string())]);
        assert_eq!(sink.count(|c| matches!(c, SinkCall::Idle)), 1);
    }
}
