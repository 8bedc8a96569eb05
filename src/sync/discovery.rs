//! Local workflow file discovery
//!
//! The export process writes workflows as `workflow_<digits>_<originalId>.json`
//! under `<project>/workflows`. The original id is everything between the
//! numeric prefix and the `.json` extension, and may contain underscores.

use eyre::{Context, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Filename convention for exported workflows. The capture is greedy, so
/// `workflow_001_a_b.json` yields the original id `a_b`.
static FILE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^workflow_\d+_(.+)\.json$").expect("valid workflow file pattern"));

/// A local workflow file matched against the naming convention.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowFile {
    /// Full path to the JSON document
    pub path: PathBuf,
    /// Identifier embedded in the filename at export time
    pub original_id: String,
}

impl WorkflowFile {
    /// Match a path against the export naming convention.
    ///
    /// Returns `None` for paths whose filename does not follow the
    /// convention; those files are simply not ours to manage.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let filename = path.file_name()?.to_str()?;
        let original_id = FILE_PATTERN.captures(filename)?.get(1)?.as_str().to_string();
        Some(Self { path, original_id })
    }
}

/// Enumerate workflow files under a directory, sorted by filename.
///
/// Non-matching entries are ignored. A missing directory yields an empty
/// list rather than an error, since a project without exports is a valid
/// (if useless) state.
pub fn scan_workflow_dir(dir: impl AsRef<Path>) -> Result<Vec<WorkflowFile>> {
    let dir = dir.as_ref();

    if !dir.exists() {
        log::warn!("Workflow directory not found: {}", dir.display());
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read workflow directory: {}", dir.display()))?;

    let mut files: Vec<WorkflowFile> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| WorkflowFile::from_path(entry.path()))
        .collect();

    files.sort_by(|a, b| a.path.cmp(&b.path));

    log::debug!(
        "Found {} workflow file(s) in {}",
        files.len(),
        dir.display()
    );

    Ok(files)
}
