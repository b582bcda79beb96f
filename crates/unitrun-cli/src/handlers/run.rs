//! Run command handler.

use tracing::{info, warn};
use unitrun_core::{ProcessOutcome, RunSettings};
use unitrun_runtime::{CancellationToken, TracingLogSink, resolve_and_run};

use crate::error::CliError;

/// Execute the run command.
///
/// Ctrl-C cancels the run; the child is killed and the command fails with
/// an interrupted error rather than a test failure.
pub async fn execute(settings: &RunSettings) -> Result<ProcessOutcome, CliError> {
    let cancel = CancellationToken::new();
    let listener = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received");
                cancel.cancel();
            }
        })
    };

    let result = resolve_and_run(settings, &TracingLogSink, &cancel).await;
    listener.abort();

    let outcome = result?;
    info!("Test application completed successfully");
    Ok(outcome)
}
