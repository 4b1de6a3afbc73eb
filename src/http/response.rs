use bytes::Bytes;
use std::collections::HashMap;

pub use crate::http::status::StatusCode;

/// Content type used when the caller does not supply a non-empty one.
pub const DEFAULT_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Represents a complete HTTP response ready to be sent to a client.
///
/// `headers` only holds what the caller asked for. The baseline headers
/// (`Content-Length`, `Content-Type`, `Connection`) are filled in when the
/// response is serialized, and any empty value here is dropped at that point.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Caller supplied headers
    pub headers: HashMap<String, String>,
    /// Response body as bytes
    pub body: Bytes,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use staticd::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::OK)
///     .header("Content-Type", "text/plain; charset=utf-8")
///     .body("hello")
///     .build();
/// assert_eq!(&response.body[..], b"hello");
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Bytes::new(),
        }
    }

    /// Adds or replaces a header.
    ///
    /// An empty value is accepted here but will not be emitted; the baseline
    /// value for the same key is used instead.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Response {
        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Creates a 200 OK response with the given body and content type.
    ///
    /// An empty `content_type` falls back to [`DEFAULT_CONTENT_TYPE`].
    pub fn ok(body: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        ResponseBuilder::new(StatusCode::OK)
            .header("Content-Type", content_type)
            .body(body)
            .build()
    }

    pub fn not_found() -> Self {
        Self::diagnostic(StatusCode::NOT_FOUND, "File not found")
    }

    pub fn read_error() -> Self {
        Self::diagnostic(StatusCode::BAD_GATEWAY, "File read error")
    }

    pub fn system_error() -> Self {
        Self::diagnostic(StatusCode::BAD_GATEWAY, "System error")
    }

    pub fn bad_request() -> Self {
        Self::diagnostic(StatusCode::BAD_REQUEST, "Bad request")
    }

    pub fn forbidden() -> Self {
        Self::diagnostic(StatusCode::FORBIDDEN, "Forbidden")
    }

    fn diagnostic(status: StatusCode, text: &'static str) -> Self {
        ResponseBuilder::new(status)
            .body(Bytes::from_static(text.as_bytes()))
            .build()
    }
}
