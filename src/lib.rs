//! Regent engine library.
//!
//! Exposes the board model, referee protocol, decision policies, and engine
//! for use by integration tests, benchmarks, and the binary entry point.

pub mod board;
pub mod config;
pub mod engine;
pub mod policy;
pub mod protocol;
