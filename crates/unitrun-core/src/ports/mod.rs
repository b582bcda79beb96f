//! Port definitions implemented by adapters.

mod log_sink;

pub use log_sink::TestLogSink;

#[cfg(test)]
pub use log_sink::MockTestLogSink;
