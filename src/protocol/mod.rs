//! The stdin/stdout host protocol.
//!
//! Plain-text commands in, one JSON object per response line out.

pub mod parser;

pub use parser::{parse_command, Command};
