//! Error taxonomy for resolving and running a test application.
//!
//! Every failure a build step can observe maps to exactly one variant, so
//! callers can tell a misconfiguration from a missing binary, a failed test
//! run, or an operator cancellation without string matching.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving or running the test application.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// A required directory input was not supplied.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No valid executable was found at any checked location.
    #[error("{}", not_found_message(.checked))]
    NotFound {
        /// Every candidate path that was probed, in probe order.
        checked: Vec<PathBuf>,
    },

    /// The operating system refused to spawn the test application.
    #[error("Failed to launch test application {}: {source}", .program.display())]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The test application ran and exited with a nonzero status.
    #[error("The test application failed with exit status {exit_code}")]
    Execution { exit_code: i32 },

    /// Waiting for the test application was interrupted.
    #[error("The test application run was interrupted")]
    Interrupted,
}

impl RunnerError {
    /// Create a `Configuration` error with a message.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a `NotFound` error for a single checked path.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound {
            checked: vec![path.into()],
        }
    }

    /// Exit code carried by an `Execution` failure.
    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Execution { exit_code } => Some(*exit_code),
            _ => None,
        }
    }

    /// True when the failure came from an operator cancellation.
    pub const fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted)
    }
}

fn not_found_message(checked: &[PathBuf]) -> String {
    match checked {
        [] => "No test application found".to_string(),
        [single] => format!("No test application found at {}", single.display()),
        many => {
            let listed: Vec<String> = many.iter().map(|p| p.display().to_string()).collect();
            format!("No test application found in any of: {}", listed.join(", "))
        }
    }
}

/// Result type alias for resolution and invocation.
pub type RunnerResult<T> = Result<T, RunnerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_lists_every_checked_path() {
        let err = RunnerError::NotFound {
            checked: vec![
                PathBuf::from("/build/cmake/bin/Tests"),
                PathBuf::from("/build/cmake/Tests"),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("/build/cmake/bin/Tests"));
        assert!(msg.contains("/build/cmake/Tests"));
    }

    #[test]
    fn execution_message_embeds_exit_code() {
        let err = RunnerError::Execution { exit_code: 7 };
        assert!(err.to_string().contains('7'));
        assert_eq!(err.exit_code(), Some(7));
    }

    #[test]
    fn kinds_have_distinct_messages() {
        let launch = RunnerError::Launch {
            program: PathBuf::from("/x/Tests"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let execution = RunnerError::Execution { exit_code: 1 };
        let interrupted = RunnerError::Interrupted;

        assert_ne!(launch.to_string(), execution.to_string());
        assert_ne!(execution.to_string(), interrupted.to_string());
        assert!(interrupted.is_interrupted());
        assert!(!execution.is_interrupted());
        assert_eq!(launch.exit_code(), None);
    }
}
