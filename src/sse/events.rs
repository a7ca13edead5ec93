//! Event record types for the fix service stream
//!
//! Contains the EventRecord enum with one variant per update kind, the
//! terminal result payload, and the non-fatal warnings the pipeline records.

use serde::{Deserialize, Serialize};

/// One knowledge-base match attached to a terminal result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeItem {
    pub title: String,
    pub summary: String,
    /// Similarity score, always within `0..=100`
    pub score: u8,
}

/// The final result of a fix session as reported by the service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TerminalUpdate {
    /// The code after the service's fix attempts
    pub fixed_code: String,
    /// Human-readable summary; may contain simple markup, passed through as-is
    pub summary: String,
    /// Output of the service's test run, if it ran one
    pub test_output: Option<String>,
    /// Whether the service considers the fix successful
    pub is_success: bool,
    /// Knowledge-base matches, in service order
    pub knowledge: Vec<KnowledgeItem>,
    /// Reviewer reflection log entries, oldest first
    pub logs: Vec<String>,
}

/// A typed update parsed from one `data:` line.
#[derive(Debug, Clone, PartialEq)]
pub enum EventRecord {
    /// The service started fix iteration `n` (1-based)
    Iteration(u32),
    /// The service entered the named pipeline stage
    Node(String),
    /// The service finished; carries the full result
    Terminal(TerminalUpdate),
}

impl EventRecord {
    /// Returns the record kind as a string for logging purposes.
    pub fn kind_name(&self) -> &'static str {
        match self {
            EventRecord::Iteration(_) => "iteration",
            EventRecord::Node(_) => "node",
            EventRecord::Terminal(_) => "terminal",
        }
    }
}

/// What a single framed line turned into.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// Not a `data:` line, or an empty payload
    Ignored,
    /// Valid JSON with no recognized shape
    Unrecognized,
    /// One or more records, in dispatch order
    Records(Vec<EventRecord>),
    /// The line was skipped; the warning says why
    Rejected(StreamWarning),
}

/// Non-fatal problems recorded while consuming a stream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamWarning {
    /// A `data:` payload was not valid JSON
    #[error("malformed data line {line:?}: {message}")]
    MalformedLine { line: String, message: String },

    /// Valid JSON whose recognized fields violate their constraints
    #[error("invalid record {line:?}: {message}")]
    InvalidRecord { line: String, message: String },

    /// The stream ended with text after the last line terminator
    #[error("stream ended with unterminated line {remainder:?}, discarded")]
    UnterminatedLine { remainder: String },

    /// The stream ended inside a multi-byte character
    #[error("stream ended with {bytes} byte(s) of an incomplete UTF-8 sequence")]
    TruncatedUtf8 { bytes: usize },

    /// Byte sequences that can never be valid UTF-8 were replaced
    #[error("replaced {replaced} invalid UTF-8 sequence(s)")]
    InvalidUtf8 { replaced: usize },

    /// A record arrived after the session already completed
    #[error("record after completion ignored: {line:?}")]
    AfterTerminal { line: String },
}

impl StreamWarning {
    /// Get a short warning code for logging.
    pub fn warning_code(&self) -> &'static str {
        match self {
            StreamWarning::MalformedLine { .. } => "W_STREAM_JSON",
            StreamWarning::InvalidRecord { .. } => "W_STREAM_RECORD",
            StreamWarning::UnterminatedLine { .. } => "W_STREAM_UNTERMINATED",
            StreamWarning::TruncatedUtf8 { .. } => "W_STREAM_TRUNCATED",
            StreamWarning::InvalidUtf8 { .. } => "W_STREAM_UTF8",
            StreamWarning::AfterTerminal { .. } => "W_STREAM_AFTER_END",
        }
    }
}
