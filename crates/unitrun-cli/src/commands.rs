//! Commands and their shared run options.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use unitrun_core::RunSettings;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve and execute the test application
    Run {
        #[command(flatten)]
        options: RunOptions,
    },

    /// Show the resolved test application and its command line without running it
    Resolve {
        #[command(flatten)]
        options: RunOptions,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Options describing where the test application lives and how to run it.
///
/// Every option can also come from the environment (or a `.env` file).
#[derive(Args, Debug, Clone, Default)]
pub struct RunOptions {
    /// Project build directory; the CMake tree is expected in its `cmake` subdirectory
    #[arg(long = "build-dir", env = "UNITRUN_BUILD_DIR")]
    pub build_dir: Option<PathBuf>,

    /// CMake binary directory (overrides `<build-dir>/cmake`)
    #[arg(long = "cmake-dir", env = "UNITRUN_CMAKE_DIR")]
    pub cmake_dir: Option<PathBuf>,

    /// Directory the test application writes reports to [default: <cmake-dir>/unitTestReports]
    #[arg(long = "report-dir", env = "UNITRUN_REPORT_DIR", conflicts_with = "no_reports")]
    pub report_dir: Option<PathBuf>,

    /// Do not pass a report directory to the test application
    #[arg(long = "no-reports")]
    pub no_reports: bool,

    /// Test application path relative to the CMake directory [default: bin/Tests, then Tests]
    #[arg(long = "app-path", env = "UNITRUN_APP_PATH")]
    pub app_path: Option<String>,

    /// Execution model passed to the test application
    #[arg(
        short = 'e',
        long = "execution-model",
        env = "UNITRUN_EXECUTION_MODEL",
        default_value = unitrun_core::DEFAULT_EXECUTION_MODEL
    )]
    pub execution_model: String,

    /// Test selection pattern; repeat for several [default: *Test::*]
    #[arg(
        short = 'p',
        long = "pattern",
        env = "UNITRUN_PATTERNS",
        value_delimiter = ','
    )]
    pub patterns: Vec<String>,

    /// Value for LD_LIBRARY_PATH in the test application's environment
    #[arg(long = "ld-library-path", env = "UNITRUN_LD_LIBRARY_PATH")]
    pub ld_library_path: Option<String>,
}

impl RunOptions {
    /// Convert parsed options into run settings.
    pub fn to_settings(&self) -> RunSettings {
        RunSettings {
            build_dir: self.build_dir.clone(),
            cmake_dir: self.cmake_dir.clone(),
            report_dir: self.report_dir.clone(),
            disable_reports: self.no_reports,
            app_path: self.app_path.clone(),
            execution_model: Some(self.execution_model.clone()),
            patterns: self.patterns.clone(),
            ld_library_path: self.ld_library_path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cli;
    use clap::Parser;

    fn run_options(args: &[&str]) -> RunOptions {
        let mut argv = vec!["unitrun", "run"];
        argv.extend_from_slice(args);
        match Cli::parse_from(argv).command {
            Commands::Run { options } => options,
            Commands::Resolve { .. } => panic!("expected run"),
        }
    }

    #[test]
    fn test_repeated_patterns_keep_order() {
        let options = run_options(&["-p", "Foo::*", "--pattern", "Bar::baz"]);
        assert_eq!(options.patterns, vec!["Foo::*", "Bar::baz"]);
    }

    #[test]
    fn test_comma_separated_patterns() {
        let options = run_options(&["-p", "Foo::*,Bar::baz"]);
        assert_eq!(options.patterns, vec!["Foo::*", "Bar::baz"]);
    }

    #[test]
    fn test_execution_model_default() {
        let options = run_options(&["--build-dir", "/t"]);
        assert_eq!(options.execution_model, "SingleThreaded");
    }

    #[test]
    fn test_to_settings_maps_every_field() {
        let options = run_options(&[
            "--build-dir",
            "/t",
            "--cmake-dir",
            "/c",
            "--app-path",
            "bin/App",
            "-e",
            "WorkerThreads",
            "--ld-library-path",
            "/opt/lib",
            "--no-reports",
        ]);
        let settings = options.to_settings();

        assert_eq!(settings.build_dir, Some(PathBuf::from("/t")));
        assert_eq!(settings.cmake_dir, Some(PathBuf::from("/c")));
        assert_eq!(settings.app_path.as_deref(), Some("bin/App"));
        assert_eq!(settings.execution_model.as_deref(), Some("WorkerThreads"));
        assert_eq!(settings.ld_library_path.as_deref(), Some("/opt/lib"));
        assert!(settings.disable_reports);
        assert!(settings.patterns.is_empty());
    }

    #[test]
    fn test_report_dir_conflicts_with_no_reports() {
        let result = Cli::try_parse_from([
            "unitrun",
            "run",
            "--report-dir",
            "/r",
            "--no-reports",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_json_flag() {
        let cli = Cli::parse_from(["unitrun", "resolve", "--cmake-dir", "/c", "--json"]);
        match cli.command {
            Commands::Resolve { options, json } => {
                assert!(json);
                assert_eq!(options.cmake_dir, Some(PathBuf::from("/c")));
            }
            Commands::Run { .. } => panic!("expected resolve"),
        }
    }
}
