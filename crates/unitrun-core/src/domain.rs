//! Domain types shared by the resolver and the invoker.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Inputs for locating the test application.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolutionConfig {
    /// Project build directory. Required when `cmake_dir` is absent.
    pub build_root_dir: Option<PathBuf>,
    /// CMake binary directory. Defaults to `build_root_dir/cmake`.
    pub cmake_dir: Option<PathBuf>,
    /// Slash- or backslash-separated path relative to the CMake directory.
    pub app_path: Option<String>,
}

/// A test application location verified on disk.
///
/// Only the resolver constructs this; `directory` is absolute and
/// `directory/file_name` was a readable regular file when it was resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolvedApp {
    pub directory: PathBuf,
    pub file_name: String,
}

impl ResolvedApp {
    pub(crate) fn new(directory: PathBuf, file_name: impl Into<String>) -> Self {
        Self {
            directory,
            file_name: file_name.into(),
        }
    }

    /// Full path to the executable.
    pub fn executable_path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    /// Directory the application runs in.
    pub fn working_dir(&self) -> &Path {
        &self.directory
    }
}

/// Caller-supplied options for a single run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvocationOptions {
    pub execution_model: Option<String>,
    pub report_dir: Option<PathBuf>,
    pub patterns: Vec<String>,
    pub ld_library_path: Option<String>,
}

/// How a test application process ended.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub exit_code: i32,
    pub interrupted: bool,
}

impl ProcessOutcome {
    /// Outcome of a process that ran to completion.
    pub const fn exited(exit_code: i32) -> Self {
        Self {
            exit_code,
            interrupted: false,
        }
    }

    /// Outcome of a run that was cancelled before the process finished.
    pub const fn interrupted(exit_code: i32) -> Self {
        Self {
            exit_code,
            interrupted: true,
        }
    }

    pub const fn success(&self) -> bool {
        self.exit_code == 0 && !self.interrupted
    }

    /// Map the outcome onto the build-step result.
    pub fn into_result(self) -> crate::RunnerResult<Self> {
        if self.interrupted {
            Err(crate::RunnerError::Interrupted)
        } else if self.exit_code != 0 {
            Err(crate::RunnerError::Execution {
                exit_code: self.exit_code,
            })
        } else {
            Ok(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RunnerError;

    #[test]
    fn executable_path_joins_directory_and_name() {
        let app = ResolvedApp::new(PathBuf::from("/b/cmake/bin"), "Tests");
        assert_eq!(app.executable_path(), PathBuf::from("/b/cmake/bin/Tests"));
        assert_eq!(app.working_dir(), Path::new("/b/cmake/bin"));
    }

    #[test]
    fn zero_exit_is_success() {
        let outcome = ProcessOutcome::exited(0);
        assert!(outcome.success());
        assert_eq!(outcome.into_result().unwrap(), outcome);
    }

    #[test]
    fn nonzero_exit_carries_code() {
        let err = ProcessOutcome::exited(7).into_result().unwrap_err();
        assert!(matches!(err, RunnerError::Execution { exit_code: 7 }));
    }

    #[test]
    fn interruption_wins_over_exit_code() {
        let outcome = ProcessOutcome::interrupted(0);
        assert!(!outcome.success());
        assert!(matches!(
            outcome.into_result(),
            Err(RunnerError::Interrupted)
        ));
    }
}
