//! HTTP protocol implementation.
//!
//! A deliberately small subset of HTTP/1.1: one request per connection, the
//! head read in a bounded buffer, and the response always closing the
//! connection.
//!
//! # Architecture
//!
//! - **`connection`**: per-connection request-response state machine
//! - **`parser`**: turns a raw byte buffer into a [`request::Request`]
//! - **`request`**: HTTP request representation
//! - **`response`**: HTTP response representation with builder pattern
//! - **`status`**: status codes and their reason phrases
//! - **`writer`**: serializes responses and writes them to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Accumulate until "\r\n\r\n" or the size limit
//!        └──────┬──────┘
//!               │ Head complete (or peer gave up)   Head too large
//!               ▼                                        │
//!        ┌──────────────────┐                            │
//!        │   Processing     │ ← Decode path, resolve file │
//!        └──────┬───────────┘                            │
//!               │ Response ready                         │ 400
//!               ▼                                        │
//!        ┌──────────────────┐ ◄──────────────────────────┘
//!        │    Writing       │ ← Send response, shut down
//!        └──────┬───────────┘
//!               ▼
//!            Closed
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod status;
pub mod writer;
