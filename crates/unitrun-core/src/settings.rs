//! Run settings and their defaults.
//!
//! `RunSettings` is the flat set of values a build pipeline supplies. It is
//! split into a [`ResolutionConfig`] for the resolver and an
//! [`InvocationOptions`] for the invoker; all defaulting happens here so the
//! two components only ever see explicit values.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::{InvocationOptions, ResolutionConfig};

/// Subdirectory of the build root that holds the CMake binary tree.
pub const CMAKE_SUBDIR: &str = "cmake";

/// Subdirectory of the CMake binary tree that receives test reports.
pub const REPORT_SUBDIR: &str = "unitTestReports";

/// File name probed when no explicit app path is configured.
pub const DEFAULT_APP_NAME: &str = "Tests";

/// Directory under the CMake tree probed first during auto-discovery.
pub const DEFAULT_APP_BIN_DIR: &str = "bin";

/// Execution model passed with `-e` when none is configured.
pub const DEFAULT_EXECUTION_MODEL: &str = "SingleThreaded";

/// Test selection pattern used when none are configured.
pub const DEFAULT_PATTERN: &str = "*Test::*";

/// Environment variable populated from the library path override.
pub const LD_LIBRARY_PATH_VAR: &str = "LD_LIBRARY_PATH";

/// Settings for one resolve-and-run request.
///
/// All fields are optional to support partial configuration and graceful
/// defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RunSettings {
    /// Project build directory (the CMake tree lives under it).
    pub build_dir: Option<PathBuf>,

    /// CMake binary directory; overrides `build_dir/cmake`.
    pub cmake_dir: Option<PathBuf>,

    /// Report output directory; defaults to `<cmake>/unitTestReports`.
    pub report_dir: Option<PathBuf>,

    /// Suppress the report directory argument entirely.
    pub disable_reports: bool,

    /// Test application path relative to the CMake directory.
    pub app_path: Option<String>,

    /// Execution model forwarded to the test application.
    pub execution_model: Option<String>,

    /// Test selection patterns, forwarded in order.
    pub patterns: Vec<String>,

    /// Value for `LD_LIBRARY_PATH` in the child environment.
    pub ld_library_path: Option<String>,
}

impl RunSettings {
    /// Effective CMake directory, if one can be derived.
    pub fn effective_cmake_dir(&self) -> Option<PathBuf> {
        self.cmake_dir
            .clone()
            .or_else(|| self.build_dir.as_ref().map(|b| b.join(CMAKE_SUBDIR)))
    }

    /// Effective report directory, applying the `<cmake>/unitTestReports` default.
    pub fn effective_report_dir(&self) -> Option<PathBuf> {
        if self.disable_reports {
            return None;
        }
        self.report_dir.clone().or_else(|| {
            self.effective_cmake_dir()
                .map(|cmake| cmake.join(REPORT_SUBDIR))
        })
    }

    /// Configuration for the resolver.
    pub fn resolution_config(&self) -> ResolutionConfig {
        ResolutionConfig {
            build_root_dir: self.build_dir.clone(),
            cmake_dir: self.cmake_dir.clone(),
            app_path: self.app_path.clone(),
        }
    }

    /// Options for the invoker.
    pub fn invocation_options(&self) -> InvocationOptions {
        InvocationOptions {
            execution_model: self.execution_model.clone(),
            report_dir: self.effective_report_dir(),
            patterns: self.patterns.clone(),
            ld_library_path: self.ld_library_path.clone(),
        }
    }
}
