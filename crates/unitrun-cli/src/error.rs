//! CLI-specific error types and exit code mapping.

use thiserror::Error;
use unitrun_core::RunnerError;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Resolution or test application failure.
    #[error(transparent)]
    Runner(#[from] RunnerError),

    /// Output could not be serialized.
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl CliError {
    /// Map error to the process exit code.
    ///
    /// A failing test application passes its own status through so build
    /// tools see what the test application reported. Other codes follow
    /// sysexits.h:
    /// - 66: Test application not found (`EX_NOINPUT`)
    /// - 70: Internal error (`EX_SOFTWARE`)
    /// - 71: Launch failure (`EX_OSERR`)
    /// - 78: Configuration error (`EX_CONFIG`)
    /// - 130: Interrupted (128 + SIGINT)
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Runner(RunnerError::Configuration(_)) => 78,
            Self::Runner(RunnerError::NotFound { .. }) => 66,
            Self::Runner(RunnerError::Launch { .. }) => 71,
            Self::Runner(RunnerError::Execution { exit_code }) => {
                u8::try_from(*exit_code).ok().filter(|c| *c != 0).unwrap_or(1)
            }
            Self::Runner(RunnerError::Interrupted) => 130,
            Self::Serialize(_) => 70,
        }
    }
}
