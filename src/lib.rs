//! fixstream - a streaming client for a remote code-fixing service
//!
//! Submits code and its error context, consumes the service's `data:` line
//! stream as it arrives, and reports progress to a [`traits::RenderSink`].
//!
//! This library exposes modules for use in integration tests and benches.

pub mod adapters;
pub mod cli;
pub mod cli_output;
pub mod config;
pub mod session;
pub mod sse;
pub mod traits;
