//! Pounce engine library.
//!
//! Exposes the board representation, rules resolver, move generation,
//! observation encoding, and session hosting modules for use by
//! integration tests and the binary entry points.

pub mod board;
pub mod engine;
pub mod movegen;
pub mod nn;
pub mod policy;
pub mod protocol;
pub mod resolve;
pub mod selfplay;
pub mod session;
