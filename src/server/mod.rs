//! TCP acceptor
//!
//! Owns the listening socket and hands every accepted connection to its own
//! task.

pub mod listener;

pub use listener::{run, serve};
