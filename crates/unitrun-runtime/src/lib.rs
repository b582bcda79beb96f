//! Process runtime for unitrun.
//!
//! Launches a resolved test application, forwards its merged output to a
//! [`TestLogSink`](unitrun_core::TestLogSink) line by line, and maps the exit
//! status onto [`RunnerResult`](unitrun_core::RunnerResult).

#![deny(unused_crate_dependencies)]

pub mod invoker;
pub mod log_sink;
mod pipeline;

pub use invoker::{run, run_spec};
pub use log_sink::{CapturedLine, CapturingLogSink, TracingLogSink};
pub use pipeline::resolve_and_run;

// Re-exported so callers do not need a direct tokio-util dependency.
pub use tokio_util::sync::CancellationToken;

#[cfg(test)]
use tempfile as _;
