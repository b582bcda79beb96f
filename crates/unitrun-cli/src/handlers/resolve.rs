//! Resolve command handler.
//!
//! Shows where the test application was found and the exact command line
//! `run` would use, without launching anything.

use std::fmt;

use serde::Serialize;
use unitrun_core::{InvocationSpec, ResolvedApp, RunSettings, resolve};

use crate::error::CliError;

/// Everything `run` would do, captured for display.
#[derive(Debug, Clone, Serialize)]
pub struct ResolveReport {
    pub app: ResolvedApp,
    pub command_line: Vec<String>,
    pub invocation: InvocationSpec,
}

impl ResolveReport {
    /// Resolve the test application and derive its invocation.
    pub fn build(settings: &RunSettings) -> Result<Self, CliError> {
        let app = resolve(&settings.resolution_config())?;
        let invocation = InvocationSpec::new(&app, &settings.invocation_options())?;
        Ok(Self {
            command_line: invocation.command_line(),
            app,
            invocation,
        })
    }
}

impl fmt::Display for ResolveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "app_directory = {}", self.app.directory.display())?;
        writeln!(f, "app_name = {}", self.app.file_name)?;
        writeln!(f, "execution_model = {}", self.invocation.execution_model)?;
        if let Some(dir) = &self.invocation.report_dir {
            writeln!(f, "report_directory = {}", dir.display())?;
        }
        for (key, value) in &self.invocation.env_overrides {
            writeln!(f, "env.{key} = {value}")?;
        }
        write!(f, "command_line = {}", self.command_line.join(" "))
    }
}

/// Execute the resolve command.
pub fn execute(settings: &RunSettings, json: bool) -> Result<(), CliError> {
    let report = ResolveReport::build(settings)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}
