use bytes::{BufMut, Bytes, BytesMut};
use std::collections::HashMap;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::{Response, DEFAULT_CONTENT_TYPE};

const HTTP_VERSION: &str = "HTTP/1.1";

/// Serializes a response into a single self-contained buffer.
///
/// Baseline headers are computed first and then overridden by every
/// non-empty header the response carries. Header order is unspecified.
pub fn serialize_response(resp: &Response) -> Bytes {
    let mut headers: HashMap<&str, String> = HashMap::new();
    headers.insert("Content-Length", resp.body.len().to_string());
    headers.insert("Content-Type", DEFAULT_CONTENT_TYPE.to_string());
    headers.insert("Connection", "close".to_string());

    for (k, v) in &resp.headers {
        if !v.is_empty() {
            headers.insert(k.as_str(), v.clone());
        }
    }

    let mut buf = BytesMut::with_capacity(128 + resp.body.len());

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.put_slice(status_line.as_bytes());

    // Headers
    for (k, v) in &headers {
        buf.put_slice(k.as_bytes());
        buf.put_slice(b": ");
        buf.put_slice(v.as_bytes());
        buf.put_slice(b"\r\n");
    }

    // Header/body separator
    buf.put_slice(b"\r\n");

    // Body
    buf.put_slice(&resp.body);

    buf.freeze()
}

pub struct ResponseWriter {
    buffer: Bytes,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream
                .write(&self.buffer[self.written..])
                .await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
