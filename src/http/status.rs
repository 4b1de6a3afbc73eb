use std::fmt;

/// HTTP status code sent back to the client.
///
/// Any numeric code can be represented; the associated constants cover the
/// statuses the server itself produces:
/// - `OK` (200): file served
/// - `BAD_REQUEST` (400): request head did not fit the read limit
/// - `FORBIDDEN` (403): path resolves outside the serving root
/// - `NOT_FOUND` (404): no such file
/// - `BAD_GATEWAY` (502): file exists but could not be read or stat'ed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub const OK: StatusCode = StatusCode(200);
    pub const BAD_REQUEST: StatusCode = StatusCode(400);
    pub const FORBIDDEN: StatusCode = StatusCode(403);
    pub const NOT_FOUND: StatusCode = StatusCode(404);
    pub const BAD_GATEWAY: StatusCode = StatusCode(502);

    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use staticd::http::status::StatusCode;
    /// assert_eq!(StatusCode::OK.as_u16(), 200);
    /// assert_eq!(StatusCode::NOT_FOUND.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns the reason phrase for this status code.
    ///
    /// Codes without an entry yield an empty string, which still serializes
    /// to a valid status line.
    ///
    /// # Example
    ///
    /// ```
    /// # use staticd::http::status::StatusCode;
    /// assert_eq!(StatusCode::OK.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::BAD_GATEWAY.reason_phrase(), "");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self.0 {
            200 => "OK",
            400 => "Bad Request",
            403 => "Forbidden",
            404 => "Not Found",
            _ => "",
        }
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        StatusCode(code)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
