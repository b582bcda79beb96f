//! Log sink adapters.

use std::sync::Mutex;

use tracing::{debug, info};
use unitrun_core::TestLogSink;

/// Sink that forwards everything to `tracing`.
///
/// Test application output is emitted at `INFO` under the
/// `unitrun::output` target so it can be filtered separately.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogSink;

impl TestLogSink for TracingLogSink {
    fn debug(&self, message: &str) {
        debug!("{message}");
    }

    fn info(&self, line: &str) {
        info!(target: "unitrun::output", "{line}");
    }
}

/// A single captured log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapturedLine {
    Debug(String),
    Info(String),
}

/// Sink that records every line in memory.
///
/// Useful for embedding callers that render the build log themselves.
#[derive(Debug, Default)]
pub struct CapturingLogSink {
    lines: Mutex<Vec<CapturedLine>>,
}

impl CapturingLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured entries in arrival order.
    pub fn entries(&self) -> Vec<CapturedLine> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// Only the forwarded output lines, in arrival order.
    pub fn output(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|entry| match entry {
                CapturedLine::Info(line) => Some(line),
                CapturedLine::Debug(_) => None,
            })
            .collect()
    }

    fn push(&self, entry: CapturedLine) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(entry);
        }
    }
}

impl TestLogSink for CapturingLogSink {
    fn debug(&self, message: &str) {
        self.push(CapturedLine::Debug(message.to_string()));
    }

    fn info(&self, line: &str) {
        self.push(CapturedLine::Info(line.to_string()));
    }
}
