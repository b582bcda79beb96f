//! Test application resolution.
//!
//! Resolution applies the following order:
//! 1. Working root: the CMake directory if configured, else `<build root>/cmake`
//! 2. No app path (absent or blank): `<root>/bin/Tests`, then `<root>/Tests`
//! 3. App path with one segment: `<root>/<segment>`
//! 4. App path with several segments: parent directory checked first, then the file
//!
//! Every terminal candidate is checked to exist, be readable and be a regular
//! file before it is returned.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::{ResolutionConfig, ResolvedApp};
use crate::error::{RunnerError, RunnerResult};
use crate::settings::{CMAKE_SUBDIR, DEFAULT_APP_BIN_DIR, DEFAULT_APP_NAME};

/// Resolve the test application described by `config`.
///
/// # Errors
///
/// - `RunnerError::Configuration` when neither the CMake directory nor the
///   build root is supplied, or the app path has no file name
/// - `RunnerError::NotFound` when no verified executable exists at the
///   candidate location(s)
pub fn resolve(config: &ResolutionConfig) -> RunnerResult<ResolvedApp> {
    let root = working_root(config)?;
    debug!(root = %root.display(), "Resolving test application");

    match config.app_path.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        None => discover_default(&root),
        Some(app_path) => resolve_explicit(&root, app_path),
    }
}

/// Determine the CMake directory everything else is relative to.
fn working_root(config: &ResolutionConfig) -> RunnerResult<PathBuf> {
    if let Some(cmake_dir) = &config.cmake_dir {
        return Ok(cmake_dir.clone());
    }

    config
        .build_root_dir
        .as_ref()
        .map(|build_root| build_root.join(CMAKE_SUBDIR))
        .ok_or_else(|| {
            RunnerError::configuration(
                "neither a CMake directory nor a build root directory was supplied",
            )
        })
}

fn discover_default(root: &Path) -> RunnerResult<ResolvedApp> {
    let bin_dir = root.join(DEFAULT_APP_BIN_DIR);
    let bin_candidate = bin_dir.join(DEFAULT_APP_NAME);
    if is_readable_file(&bin_candidate) {
        debug!(path = %bin_candidate.display(), "Found test application");
        return Ok(ResolvedApp::new(absolute(&bin_dir)?, DEFAULT_APP_NAME));
    }
    debug!(path = %bin_candidate.display(), "No test application");

    let root_candidate = root.join(DEFAULT_APP_NAME);
    if is_readable_file(&root_candidate) {
        debug!(path = %root_candidate.display(), "Found test application");
        return Ok(ResolvedApp::new(absolute(root)?, DEFAULT_APP_NAME));
    }
    debug!(path = %root_candidate.display(), "No test application");

    Err(RunnerError::NotFound {
        checked: vec![bin_candidate, root_candidate],
    })
}

fn resolve_explicit(root: &Path, app_path: &str) -> RunnerResult<ResolvedApp> {
    let segments = split_app_path(app_path);
    let Some((file_name, parents)) = segments.split_last() else {
        return Err(RunnerError::configuration(format!(
            "app path '{app_path}' does not name a file"
        )));
    };

    let parent = parents
        .iter()
        .fold(root.to_path_buf(), |dir, segment| dir.join(segment));

    if !parents.is_empty() && !is_readable_dir(&parent) {
        debug!(path = %parent.display(), "Test application directory missing");
        return Err(RunnerError::not_found(parent));
    }

    let candidate = parent.join(file_name);
    if !is_readable_file(&candidate) {
        debug!(path = %candidate.display(), "No test application");
        return Err(RunnerError::not_found(candidate));
    }

    debug!(path = %candidate.display(), "Found test application");
    Ok(ResolvedApp::new(absolute(&parent)?, *file_name))
}

/// Split an app path on either separator, ignoring empty segments.
fn split_app_path(app_path: &str) -> Vec<&str> {
    app_path
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Regular file (after following symlinks) that can be opened for reading.
fn is_readable_file(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|m| m.is_file()) && fs::File::open(path).is_ok()
}

/// Directory (after following symlinks) whose entries can be listed.
fn is_readable_dir(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|m| m.is_dir()) && fs::read_dir(path).is_ok()
}

fn absolute(path: &Path) -> RunnerResult<PathBuf> {
    std::path::absolute(path).map_err(|e| {
        RunnerError::configuration(format!(
            "cannot make {} absolute: {e}",
            path.display()
        ))
    })
}
