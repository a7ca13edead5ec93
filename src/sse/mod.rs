//! Incremental consumer for the fix service's line-oriented event stream
//!
//! The response body is a sequence of lines; meaningful ones look like
//! `data: <json object>`. Everything else (comments, keepalives, other SSE
//! fields) is ignored.
//!
//! # Module structure
//! - `decoder` - Byte chunks to text, carrying split UTF-8 sequences
//! - `framer` - Text to complete lines, carrying the unterminated remainder
//! - `parser` - Line filtering and JSON payload parsing
//! - `events` - Record, result and warning types
//! - `payloads` - Internal wire deserialization structs
//! - `stream` - Async adapter chaining the stages over a byte stream

mod decoder;
mod events;
mod framer;
mod parser;
mod payloads;
mod stream;

// Re-export public types
pub use decoder::ChunkDecoder;
pub use events::{EventRecord, KnowledgeItem, LineOutcome, StreamWarning, TerminalUpdate};
pub use framer::{LineFramer, Lines};
pub use parser::{data_payload, parse_event_line, DATA_PREFIX};
pub use stream::{event_lines, ItemStream, StreamItem};

/// Decode a legacy (non-streaming) response body into its terminal result.
pub fn parse_legacy_body(body: &[u8]) -> Result<TerminalUpdate, serde_json::Error> {
    serde_json::from_slice::<payloads::LegacyResponse>(body).map(|r| r.into_terminal())
}
