//! CLI adapter for unitrun.
//!
//! Parses options (flags, environment, `.env`), wires logging, and maps
//! outcomes to process exit codes. All resolution and process logic lives in
//! unitrun-core and unitrun-runtime.

#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tempfile as _;

// Used by the binary entry point only
use dotenvy as _;

pub mod commands;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod parser;

pub use commands::{Commands, RunOptions};
pub use error::CliError;
pub use parser::Cli;
