//! Log sink port for test application output.
//!
//! This port abstracts the destination for the build log, allowing different
//! implementations for the CLI (tracing), embedding build tools (their own
//! logger), and tests (in-memory capture).

/// Port for forwarding test application output to a build log.
///
/// Implementations should be thread-safe and non-blocking where possible.
#[cfg_attr(test, mockall::automock)]
pub trait TestLogSink: Send + Sync {
    /// Record a diagnostic line about resolution or settings.
    fn debug(&self, message: &str);

    /// Forward one line of test application output, without trailing newline.
    fn info(&self, line: &str);
}
