//! HTTP client trait abstraction.
//!
//! Provides a trait-based abstraction for the two request shapes the fix
//! service needs, enabling dependency injection and mocking in tests.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::HashMap;
use std::pin::Pin;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// Streaming response body: byte chunks as the transport delivers them.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, HttpError>> + Send>>;

/// HTTP response wrapper.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Headers,
    /// Response body
    pub body: Bytes,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, body: Bytes) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body,
        }
    }

    /// Create a new response with headers.
    pub fn with_headers(status: u16, headers: Headers, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as a string.
    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }
}

/// HTTP client errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HttpError {
    /// Connection failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
    /// Server returned an error status
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },
    /// Reading the response body failed mid-way
    #[error("IO error: {0}")]
    Io(String),
    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// Response body could not be decoded
    #[error("Invalid response body: {0}")]
    InvalidBody(String),
    /// Other error
    #[error("HTTP error: {0}")]
    Other(String),
}

impl HttpError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            HttpError::ConnectionFailed(_) => "E_NET_CONN",
            HttpError::Timeout(_) => "E_NET_TIMEOUT",
            HttpError::ServerError { .. } => "E_NET_STATUS",
            HttpError::Io(_) => "E_NET_IO",
            HttpError::InvalidUrl(_) => "E_NET_URL",
            HttpError::InvalidBody(_) => "E_NET_BODY",
            HttpError::Other(_) => "E_NET_OTHER",
        }
    }
}

/// Trait for HTTP client operations.
///
/// Implementations include the production reqwest-based client and the mock
/// client used by tests.
///
/// # Example
///
/// ```ignore
/// use fixstream::traits::{HttpClient, Headers};
///
/// async fn fetch<C: HttpClient>(client: &C) {
///     let body = r#"{"code":"x = 1","error":""}"#;
///     let mut chunks = client.post_stream("http://127.0.0.1:8000/debug", body, &Headers::new()).await?;
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a POST request and buffer the whole response.
    ///
    /// Non-2xx statuses are returned as a normal [`Response`].
    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError>;

    /// Perform a POST request and return the body as it arrives.
    ///
    /// A non-2xx status is reported as [`HttpError::ServerError`] before any
    /// body chunk is read.
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError>;
}
