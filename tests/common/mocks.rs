//! Mock implementations for test fixtures.
//!
//! This module re-exports the mock implementations from
//! `fixstream::adapters::mock` and provides client builders on top of them.

pub use fixstream::adapters::mock::{MockHttpClient, MockResponse, RecordingSink, SinkCall};
pub use fixstream::traits::{HttpError, Response};

use fixstream::config::{ClientConfig, ResponseMode};
use fixstream::session::FixClient;

use super::TEST_URL;

/// A streaming client whose transport answers every request with `response`.
///
/// The returned mock shares its request log with the one inside the client.
pub fn mock_client(response: MockResponse) -> (FixClient<MockHttpClient>, MockHttpClient) {
    mock_client_with_mode(response, ResponseMode::Streaming)
}

/// Same as [`mock_client`] with an explicit response mode.
pub fn mock_client_with_mode(
    response: MockResponse,
    mode: ResponseMode,
) -> (FixClient<MockHttpClient>, MockHttpClient) {
    let http = MockHttpClient::new();
    http.set_response(TEST_URL, response);
    let config = ClientConfig::default().with_endpoint(TEST_URL).with_mode(mode);
    (FixClient::new(http.clone(), config), http)
}
