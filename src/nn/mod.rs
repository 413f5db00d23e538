//! Observation encoding for policy inference.
//!
//! Converts a `GameState` into the fixed-size 6x6x5 tensor consumed by
//! the external decision component.

pub mod encoding;
