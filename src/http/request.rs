use std::collections::HashMap;

/// Represents a parsed HTTP request from a client.
///
/// Built once per connection by [`parse_request`](crate::http::parser::parse_request)
/// and never modified afterwards. Fields that could not be extracted from a
/// malformed request are left empty rather than reported as errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// The request method exactly as sent (e.g. "GET"); empty if missing
    pub method: String,
    /// The request target as sent, still percent-encoded (e.g. "/a%20b.txt")
    pub path: String,
    /// Request headers, trimmed; keys keep the client's casing
    pub headers: HashMap<String, String>,
    /// Whatever followed the blank line in the same read, as text
    pub body: String,
}

/// Builder for constructing Request objects.
#[derive(Default)]
pub struct RequestBuilder {
    method: String,
    path: String,
    headers: HashMap<String, String>,
    body: String,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Request {
        Request {
            method: self.method,
            path: self.path,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Request {
    /// Retrieves a header value by its exact name.
    ///
    /// Lookups are case-sensitive: `Host` and `host` are different keys.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(key)
            .map(|v| v.as_str())
    }

    /// True when the request line carried both a method and a path.
    pub fn is_well_formed(&self) -> bool {
        !self.method.is_empty() && !self.path.is_empty()
    }
}
