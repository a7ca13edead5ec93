//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (buffered and streaming POST)
//! - [`RenderSink`] - Consumer of session progress and results

pub mod http;
pub mod sink;

pub use http::{ByteStream, Headers, HttpClient, HttpError, Response};
pub use sink::RenderSink;
