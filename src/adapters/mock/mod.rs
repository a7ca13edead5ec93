//! Mock implementations for testing.
//!
//! This module provides mock implementations of the trait abstractions,
//! enabling session tests without network access.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable chunked responses
//! - [`RecordingSink`] - Render sink that records every notification

pub mod http;
pub mod sink;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use sink::{RecordingSink, SinkCall};
