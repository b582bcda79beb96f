//! Core domain types and test application resolution for unitrun.
//!
//! This crate has no process or CLI dependencies. It provides:
//! - [`resolve`] to locate a verified test application under a CMake tree
//! - [`InvocationSpec`] to derive the argument vector and environment
//! - [`RunnerError`], the error taxonomy shared by every unitrun crate
//! - [`TestLogSink`], the port through which output reaches the build log

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod error;
pub mod invocation;
pub mod ports;
pub mod resolver;
pub mod settings;

pub use domain::{InvocationOptions, ProcessOutcome, ResolutionConfig, ResolvedApp};
pub use error::{RunnerError, RunnerResult};
pub use invocation::InvocationSpec;
pub use ports::TestLogSink;
pub use resolver::resolve;
pub use settings::{
    CMAKE_SUBDIR, DEFAULT_APP_NAME, DEFAULT_EXECUTION_MODEL, DEFAULT_PATTERN, LD_LIBRARY_PATH_VAR,
    REPORT_SUBDIR, RunSettings,
};

// serde_json is only exercised by the integration tests
#[cfg(test)]
use serde_json as _;
