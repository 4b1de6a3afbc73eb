use bytes::BytesMut;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time;

use crate::config::{Config, FilesConfig};
use crate::files::{confine, decode_or_raw, resolve, Confined, Resolution};
use crate::http::parser::{find_headers_end, parse_request};
use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};
use crate::http::writer::ResponseWriter;

const READ_CHUNK: usize = 1024;

pub struct Connection<S> {
    stream: S,
    peer: Option<SocketAddr>,
    config: Arc<Config>,
    buffer: BytesMut,
    state: ConnectionState,
    served: Option<(StatusCode, String)>,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

/// How reading the request head ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The buffer holds everything that will be parsed. This covers a full
    /// head as well as a peer that closed, stalled or failed mid-request.
    Complete,
    /// The head did not fit in `max_request_bytes`.
    TooLarge,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, config: Arc<Config>) -> Self {
        Self {
            stream,
            peer: None,
            buffer: BytesMut::with_capacity(config.server.max_request_bytes.min(64 * 1024)),
            config,
            state: ConnectionState::Reading,
            served: None,
        }
    }

    pub fn with_peer(mut self, peer: SocketAddr) -> Self {
        self.peer = Some(peer);
        self
    }

    /// Runs exactly one request/response cycle and closes the stream.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    match self.read_request().await {
                        ReadOutcome::Complete => {
                            let req = parse_request(
                                &self.buffer,
                                self.config.files.malformed_headers,
                            );
                            self.state = ConnectionState::Processing(req);
                        }
                        ReadOutcome::TooLarge => {
                            tracing::debug!(
                                limit = self.config.server.max_request_bytes,
                                "Request head exceeds limit"
                            );
                            let response = Response::bad_request();
                            let path = parse_request(
                                &self.buffer,
                                self.config.files.malformed_headers,
                            )
                            .path;
                            self.served = Some((response.status, path));
                            self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                        }
                    }
                }

                ConnectionState::Processing(req) => {
                    let response = handle_request(req, &self.config.files).await;
                    self.served = Some((response.status, std::mem::take(&mut req.path)));
                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Writing(writer) => {
                    let written = writer.write_to_stream(&mut self.stream).await;
                    // Connections are never reused
                    let _ = self.stream.shutdown().await;
                    self.state = ConnectionState::Closed;
                    self.log_access();
                    written?;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Accumulates bytes until the head terminator shows up or the size
    /// limit is hit. Data beyond the limit is dropped.
    pub async fn read_request(&mut self) -> ReadOutcome {
        let limit = self.config.server.max_request_bytes;
        let read_timeout = self.config.server.read_timeout();

        loop {
            match find_headers_end(&self.buffer) {
                Some(end) if end + 4 <= limit => {
                    self.buffer.truncate(limit);
                    return ReadOutcome::Complete;
                }
                Some(_) => return ReadOutcome::TooLarge,
                None if self.buffer.len() >= limit => return ReadOutcome::TooLarge,
                None => {}
            }

            let mut temp = [0u8; READ_CHUNK];
            match time::timeout(read_timeout, self.stream.read(&mut temp)).await {
                Ok(Ok(0)) => return ReadOutcome::Complete,
                Ok(Ok(n)) => self.buffer.extend_from_slice(&temp[..n]),
                Ok(Err(e)) => {
                    tracing::debug!(error = %e, "Read failed, parsing what arrived");
                    return ReadOutcome::Complete;
                }
                Err(_) => {
                    tracing::debug!(
                        timeout_ms = self.config.server.read_timeout_ms,
                        received = self.buffer.len(),
                        "Read timed out, parsing what arrived"
                    );
                    return ReadOutcome::Complete;
                }
            }
        }
    }

    fn log_access(&self) {
        if let Some((status, path)) = &self.served {
            match self.peer {
                Some(peer) => tracing::info!(
                    status = status.as_u16(),
                    path = %path,
                    %peer,
                    "request served"
                ),
                None => tracing::info!(
                    status = status.as_u16(),
                    path = %path,
                    "request served"
                ),
            }
        }
    }
}

/// Builds the response for a parsed request.
pub async fn handle_request(req: &Request, files: &FilesConfig) -> Response {
    resolve_request(req, files).await.into_response()
}

/// Decodes the request path, confines it under the serving root and looks
/// it up on disk.
pub async fn resolve_request(req: &Request, files: &FilesConfig) -> Resolution {
    if req.path.is_empty() {
        return Resolution::NotFound;
    }

    let decoded = decode_or_raw(&req.path);
    match confine(&files.root, &decoded) {
        Confined::Inside(path) => resolve(&files.root, &path).await,
        Confined::Outside => Resolution::Forbidden,
    }
}
