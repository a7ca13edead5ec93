//! Line filtering and payload parsing
//!
//! Turns one framed line into a [`LineOutcome`]. Only `data:` lines carry
//! records; anything else (comments, keepalives, `event:` lines) is ignored.
//! A bad line never aborts the stream: it comes back as a rejected outcome
//! carrying the warning, and the caller moves on to the next line.

use serde_json::Value;

use crate::sse::events::{LineOutcome, StreamWarning};
use crate::sse::payloads::WirePayload;

/// Protocol prefix of record-carrying lines.
pub const DATA_PREFIX: &str = "data:";

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Extract the payload text of a `data:` line.
///
/// Returns `None` for non-data lines and for data lines with an empty payload.
/// A leading byte order mark is skipped.
pub fn data_payload(line: &str) -> Option<&str> {
    let payload = line
        .trim_start_matches(BYTE_ORDER_MARK)
        .trim()
        .strip_prefix(DATA_PREFIX)?
        .trim();
    (!payload.is_empty()).then_some(payload)
}

/// Parse a single framed line.
pub fn parse_event_line(line: &str) -> LineOutcome {
    let Some(payload) = data_payload(line) else {
        return LineOutcome::Ignored;
    };

    let value: Value = match serde_json::from_str(payload) {
        Ok(value) => value,
        Err(e) => {
            return LineOutcome::Rejected(StreamWarning::MalformedLine {
                line: payload.to_string(),
                message: e.to_string(),
            });
        }
    };

    // Arrays, strings and numbers are valid JSON but carry no record
    if !value.is_object() {
        return LineOutcome::Unrecognized;
    }

    let wire: WirePayload = match serde_json::from_value(value) {
        Ok(wire) => wire,
        Err(e) => {
            return LineOutcome::Rejected(StreamWarning::InvalidRecord {
                line: payload.to_string(),
                message: e.to_string(),
            });
        }
    };

    match wire.into_records() {
        Ok(records) if records.is_empty() => LineOutcome::Unrecognized,
        Ok(records) => LineOutcome::Records(records),
        Err(message) => LineOutcome::Rejected(StreamWarning::InvalidRecord {
            line: payload.to_string(),
            message,
        }),
    }
}
