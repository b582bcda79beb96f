//! Command handlers.
//!
//! Handlers are thin wrappers that:
//! 1. Turn parsed options into `RunSettings`
//! 2. Call into unitrun-core / unitrun-runtime
//! 3. Format output for the terminal

pub mod resolve;
pub mod run;
