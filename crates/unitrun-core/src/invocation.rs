//! Invocation contract for the test application.
//!
//! [`InvocationSpec`] captures everything needed to launch the resolved
//! application: the argument vector, working directory and environment
//! overrides. It is derived from a [`ResolvedApp`] and [`InvocationOptions`]
//! and is immutable afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::{InvocationOptions, ResolvedApp};
use crate::error::{RunnerError, RunnerResult};
use crate::ports::TestLogSink;
use crate::settings::{DEFAULT_EXECUTION_MODEL, DEFAULT_PATTERN, LD_LIBRARY_PATH_VAR};

/// A fully derived test application invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvocationSpec {
    pub executable_path: PathBuf,
    pub working_dir: PathBuf,
    pub execution_model: String,
    pub report_dir: Option<PathBuf>,
    pub patterns: Vec<String>,
    /// Variables set in the child on top of the inherited environment.
    pub env_overrides: BTreeMap<String, String>,
}

impl InvocationSpec {
    /// Derive the invocation for `app` from caller options.
    ///
    /// The report directory is made absolute against the current directory.
    pub fn new(app: &ResolvedApp, options: &InvocationOptions) -> RunnerResult<Self> {
        let execution_model = options
            .execution_model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_EXECUTION_MODEL)
            .to_string();

        let report_dir = options
            .report_dir
            .as_deref()
            .map(|dir| {
                std::path::absolute(dir).map_err(|e| {
                    RunnerError::configuration(format!(
                        "cannot make report directory {} absolute: {e}",
                        dir.display()
                    ))
                })
            })
            .transpose()?;

        let mut env_overrides = BTreeMap::new();
        if let Some(path) = options.ld_library_path.as_deref().filter(|p| !p.is_empty()) {
            env_overrides.insert(LD_LIBRARY_PATH_VAR.to_string(), path.to_string());
        }

        Ok(Self {
            executable_path: app.executable_path(),
            working_dir: app.directory.clone(),
            execution_model,
            report_dir,
            patterns: normalize_patterns(&options.patterns),
            env_overrides,
        })
    }

    /// Arguments passed after the program path, in launch order.
    ///
    /// 1. Execution model (`-e`)
    /// 2. Report directory (`-r`) if configured
    /// 3. Test selection patterns
    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["-e".to_string(), self.execution_model.clone()];

        if let Some(dir) = &self.report_dir {
            args.push("-r".to_string());
            args.push(dir.display().to_string());
        }

        args.extend(self.patterns.iter().cloned());
        args
    }

    /// Full argument vector including the executable as element zero.
    pub fn command_line(&self) -> Vec<String> {
        let mut line = vec![self.executable_path.display().to_string()];
        line.extend(self.args());
        line
    }

    pub fn program(&self) -> &Path {
        &self.executable_path
    }

    /// Write the derived settings to the sink's debug channel.
    pub fn log_settings(&self, sink: &dyn TestLogSink) {
        sink.debug(&format!("appDirectory   = {}", self.working_dir.display()));
        sink.debug(&format!("executable     = {}", self.executable_path.display()));
        sink.debug(&format!("executionModel = {}", self.execution_model));
        if let Some(dir) = &self.report_dir {
            sink.debug(&format!("reportDirectory = {}", dir.display()));
        }
        sink.debug(&format!("patterns       = {}", self.patterns.join(" ")));
        for (key, value) in &self.env_overrides {
            sink.debug(&format!("{key} = {value}"));
        }
    }
}

/// Trim each pattern, keeping order; an empty list becomes the default pattern.
fn normalize_patterns(patterns: &[String]) -> Vec<String> {
    if patterns.is_empty() {
        return vec![DEFAULT_PATTERN.to_string()];
    }
    patterns.iter().map(|p| p.trim().to_string()).collect()
}
