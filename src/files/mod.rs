//! Static file lookup
//!
//! Turns the path of a parsed request into a location under the serving root
//! and classifies what is found there.

pub mod path;
pub mod resolver;

pub use path::{confine, decode_or_raw, decode_path, Confined, DecodeError};
pub use resolver::{resolve, Resolution};
