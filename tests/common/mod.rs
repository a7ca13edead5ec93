//! Common test utilities for integration tests.
//!
//! This module provides reusable stream fixtures and client builders for
//! driving fix sessions against the mock transport.
//!
//! # Example
//!
//! ```ignore
//! use common::{mock_client, ORDERING_STREAM};
//!
//! let (client, http) = mock_client(MockResponse::chunks([ORDERING_STREAM]));
//! ```

// Each test binary compiles this module and uses a different subset of it.
#![allow(dead_code, unused_imports)]

pub mod mocks;

pub use mocks::*;

/// Endpoint used by every mock-backed client.
pub const TEST_URL: &str = "http://fix.test/debug";

/// Three-line stream: iteration, one stage, final result.
pub const ORDERING_STREAM: &str = concat!(
    "data:{\"iteration\":1}\n",
    "data:{\"node\":\"analyzer\"}\n",
    "data:{\"status\":\"completed\",\"is_success\":true,\"fixed_code\":\"x=1\",\"summary\":\"ok\",\"knowledge\":[]}\n",
);

/// A realistic two-iteration session with every terminal field populated.
pub fn full_session_stream() -> String {
    [
        r#"data: {"iteration": 1}"#,
        r#"data: {"node": "developer"}"#,
        r#"data: {"node": "reviewer"}"#,
        r#"data: {"node": "qa_executor"}"#,
        r#"data: {"iteration": 2}"#,
        r#"data: {"node": "developer"}"#,
        r#"data: {"node": "qa_executor"}"#,
        concat!(
            r#"data: {"status": "completed", "is_success": true, "#,
            r#""fixed_code": "def add(a, b):\n    return a + b", "#,
            r#""summary": "Fixed the <b>operator</b>", "test_output": "3", "#,
            r#""knowledge": [{"title": "TypeError", "summary": "Check operand types", "score": 91.6}], "#,
            r#""logs": ["used - instead of +"]}"#,
        ),
    ]
    .iter()
    .map(|line| format!("{}\n", line))
    .collect()
}

/// Split `bytes` at every offset in `cuts` (ascending, in range).
pub fn split_at_offsets(bytes: &[u8], cuts: &[usize]) -> Vec<bytes::Bytes> {
    let mut chunks = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for &cut in cuts {
        chunks.push(bytes::Bytes::copy_from_slice(&bytes[start..cut]));
        start = cut;
    }
    chunks.push(bytes::Bytes::copy_from_slice(&bytes[start..]));
    chunks
}
