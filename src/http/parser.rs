use crate::http::request::Request;
use serde::Deserialize;
use std::collections::HashMap;

/// What to do with a header line that has no `:` separator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderPolicy {
    /// Ignore the line and keep parsing the following ones.
    #[default]
    Skip,
    /// Stop parsing headers; entries seen before the line are kept.
    Abort,
}

const HEADERS_END: &[u8] = b"\r\n\r\n";

/// Parses one raw HTTP message into a [`Request`].
///
/// Never fails: a buffer that is truncated, empty or not HTTP at all yields a
/// request with whatever fields could be recovered (possibly all empty).
/// The path is kept exactly as received; decoding happens later.
pub fn parse_request(buf: &[u8], policy: HeaderPolicy) -> Request {
    let (head_bytes, body_bytes) = match find_headers_end(buf) {
        Some(end) => (&buf[..end], &buf[end + HEADERS_END.len()..]),
        None => (buf, &buf[buf.len()..]),
    };

    let head = String::from_utf8_lossy(head_bytes);
    let mut lines = head.split("\r\n");

    // Request line
    let mut method = String::new();
    let mut path = String::new();
    if let Some(request_line) = lines.next() {
        let mut parts = request_line.split(' ');
        if let (Some(m), Some(p)) = (parts.next(), parts.next()) {
            method = m.to_string();
            path = p.to_string();
        }
    }

    // Headers
    let mut headers = HashMap::new();

    for line in lines {
        if line.is_empty() {
            continue;
        }

        match line.split_once(':') {
            Some((key, value)) => {
                headers.insert(
                    key.trim().to_string(),
                    value.trim().to_string(),
                );
            }
            None => match policy {
                HeaderPolicy::Skip => continue,
                HeaderPolicy::Abort => break,
            },
        }
    }

    Request {
        method,
        path,
        headers,
        body: String::from_utf8_lossy(body_bytes).into_owned(),
    }
}

/// Offset of the blank line that ends the head, if the buffer contains one.
pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEADERS_END.len())
        .position(|w| w == HEADERS_END)
}
