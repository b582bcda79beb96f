//! Resolve-then-run for a single build step.

use tokio_util::sync::CancellationToken;
use unitrun_core::{ProcessOutcome, RunSettings, RunnerResult, TestLogSink, resolve};

use crate::invoker;

/// Resolve the test application from `settings` and run it once.
///
/// Resolution failures are returned before anything is launched; no step is
/// retried.
pub async fn resolve_and_run(
    settings: &RunSettings,
    sink: &dyn TestLogSink,
    cancel: &CancellationToken,
) -> RunnerResult<ProcessOutcome> {
    if let Some(cmake_dir) = settings.effective_cmake_dir() {
        sink.debug(&format!("cmakeBinaryDirectory = {}", cmake_dir.display()));
    }

    let app = resolve(&settings.resolution_config())?;
    sink.debug(&format!("appName        = {}", app.file_name));

    invoker::run(&app, &settings.invocation_options(), sink, cancel).await
}
