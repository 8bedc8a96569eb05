//! Workflow synchronizer
//!
//! The orchestration core: lists remote workflows, correlates them with
//! local export files by name, and pushes sanitized updates back to the
//! server. Every per-workflow failure is reported and tallied instead of
//! aborting the batch; only the operator can stop a run early.

use crate::client::WorkflowApi;
use crate::sync::{IdMapping, scan_workflow_dir};
use crate::transform::{PayloadSanitizer, Transformer};
use eyre::{Context, Result};
use owo_colors::OwoColorize;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Placeholder name for local documents without a `name` field.
const UNKNOWN_NAME: &str = "UNKNOWN";

/// A workflow record as returned by the server's listing endpoint.
/// All fields beyond id and name are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RemoteWorkflow {
    /// Server-assigned current identifier. Older n8n releases return
    /// numeric ids; those are stringified so the mapping stays uniform.
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    /// Declared workflow name
    pub name: String,
}

fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "workflow id must be a string or number, got {}",
            other
        ))),
    }
}

/// Listing response envelope: `{ "data": [ ... ] }`.
/// A body without a data array reads as an empty listing.
#[derive(Debug, Deserialize)]
struct WorkflowListing {
    #[serde(default)]
    data: Vec<Value>,
}

/// Tally of a batch update run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UpdateSummary {
    /// Workflows updated successfully (HTTP 200)
    pub updated: usize,
    /// Workflows that failed to update or had no mapping
    pub failed: usize,
    /// Workflows skipped (interactive decline, no mapping, unreadable file)
    pub skipped: usize,
}

impl UpdateSummary {
    /// Total number of workflows considered.
    pub fn total(&self) -> usize {
        self.updated + self.failed + self.skipped
    }
}

/// Synchronizes local workflow export files with a live n8n server.
///
/// Generic over [`WorkflowApi`] so tests can run the full correlation and
/// update logic against a fake transport.
///
/// # Example
/// ```no_run
/// use n8n_workflow_sync::client::{Auth, N8nClient};
/// use n8n_workflow_sync::sync::WorkflowSynchronizer;
/// use url::Url;
///
/// # async fn example() -> eyre::Result<()> {
/// let url = Url::parse("http://localhost:5678")?;
/// let client = N8nClient::try_new(url, Auth::Apikey("n8n_api_...".into()))?;
/// let sync = WorkflowSynchronizer::new(client, "my-project");
///
/// let summary = sync.update_all().await?;
/// println!("updated {}, failed {}", summary.updated, summary.failed);
/// # Ok(())
/// # }
/// ```
pub struct WorkflowSynchronizer<A> {
    api: A,
    workflow_dir: PathBuf,
    sanitizer: PayloadSanitizer,
}

impl<A: WorkflowApi> WorkflowSynchronizer<A> {
    /// Create a synchronizer for a project directory.
    ///
    /// Workflow exports are expected under `<project>/workflows`.
    pub fn new(api: A, project_dir: impl AsRef<Path>) -> Self {
        Self {
            api,
            workflow_dir: project_dir.as_ref().join("workflows"),
            sanitizer: PayloadSanitizer::server_managed_fields(),
        }
    }

    /// The directory scanned for workflow export files.
    pub fn workflow_dir(&self) -> &Path {
        &self.workflow_dir
    }

    /// Access the underlying API handle.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetch the current workflow listing from the server.
    ///
    /// Any transport error, non-2xx status, or unparseable body is reported
    /// and treated as an empty listing so callers proceed with an empty
    /// mapping instead of aborting.
    pub async fn list_remote_workflows(&self) -> Vec<RemoteWorkflow> {
        let response = match self.api.list_workflows().await {
            Ok(response) => response,
            Err(e) => {
                log::error!("Error fetching workflows: {}", e);
                return Vec::new();
            }
        };

        if !response.is_success() {
            log::error!(
                "Error fetching workflows ({}): {}",
                response.status,
                response.error_message()
            );
            return Vec::new();
        }

        let listing: WorkflowListing = match serde_json::from_str(&response.body) {
            Ok(listing) => listing,
            Err(e) => {
                log::error!("Error parsing workflow listing: {}", e);
                return Vec::new();
            }
        };

        let workflows: Vec<RemoteWorkflow> = listing
            .data
            .into_iter()
            .filter_map(|record| match serde_json::from_value(record) {
                Ok(workflow) => Some(workflow),
                Err(e) => {
                    log::debug!("Skipping malformed listing record: {}", e);
                    None
                }
            })
            .collect();

        log::debug!("Fetched {} remote workflow(s)", workflows.len());

        workflows
    }

    /// Build the original↔current identifier mapping.
    ///
    /// Correlation is by exact workflow name: each local file's declared
    /// `name` is looked up in the remote listing. Files whose name has no
    /// remote counterpart are left unmapped without error.
    pub async fn build_id_mapping(&self) -> Result<IdMapping> {
        let remote = self.list_remote_workflows().await;

        // Name-keyed lookup. Duplicate names silently overwrite; the last
        // record in the listing wins, matching the server's own ordering.
        let mut name_to_current: std::collections::HashMap<String, String> =
            std::collections::HashMap::new();
        for workflow in remote {
            name_to_current.insert(workflow.name, workflow.id);
        }

        log::info!("Creating ID mapping...");

        let mut mapping = IdMapping::new();

        for file in scan_workflow_dir(&self.workflow_dir)? {
            let document = match self.read_document(&file.path) {
                Ok(document) => document,
                Err(e) => {
                    log::error!("Error processing {}: {}", file.path.display(), e);
                    continue;
                }
            };

            let name = document
                .get("name")
                .and_then(|n| n.as_str())
                .unwrap_or(UNKNOWN_NAME);

            if let Some(current_id) = name_to_current.get(name) {
                mapping.insert(file.original_id.as_str(), current_id.as_str());
                log::info!(
                    "✓ {}: {} → {}",
                    name.cyan(),
                    file.original_id.bright_black(),
                    current_id.bright_black()
                );
            }
        }

        Ok(mapping)
    }

    /// Push one local workflow file to the server at the given current id.
    ///
    /// Returns true exactly when the server answers HTTP 200. Every failure
    /// mode (unreadable file, transport error, error status) is reported
    /// here and converted to false; nothing propagates to the caller.
    pub async fn push_update(&self, path: &Path, current_id: &str) -> bool {
        let document = match self.read_document(path) {
            Ok(document) => document,
            Err(e) => {
                log::error!("Error reading {}: {}", path.display(), e);
                return false;
            }
        };

        let name = document
            .get("name")
            .and_then(|n| n.as_str())
            .unwrap_or(UNKNOWN_NAME)
            .to_string();

        log::info!("Updating: {}...", name.cyan());

        let payload = match self.sanitizer.transform(document) {
            Ok(payload) => payload,
            Err(e) => {
                log::error!("Error sanitizing {}: {}", name.cyan(), e);
                return false;
            }
        };

        let response = match self.api.update_workflow(current_id, &payload).await {
            Ok(response) => response,
            Err(e) => {
                log::error!("Error updating {}: {}", name.cyan(), e);
                return false;
            }
        };

        if response.status == 200 {
            log::info!("✓ Updated {} (id: {})", name.cyan(), current_id.bright_black());
            true
        } else {
            log::error!(
                "✗ Failed to update {} (HTTP {}): {}",
                name.cyan(),
                response.status,
                response.error_message()
            );
            false
        }
    }

    /// Update every mapped local workflow, tallying successes and failures.
    ///
    /// Files without a mapping are counted as failures and reported; an
    /// individual failure never stops the batch.
    pub async fn update_all(&self) -> Result<UpdateSummary> {
        let mapping = self.build_id_mapping().await?;

        log::info!("Updating ALL workflows...");

        let mut summary = UpdateSummary::default();

        for file in scan_workflow_dir(&self.workflow_dir)? {
            match mapping.current_for(&file.original_id) {
                Some(current_id) => {
                    if self.push_update(&file.path, current_id).await {
                        summary.updated += 1;
                    } else {
                        summary.failed += 1;
                    }
                }
                None => {
                    log::error!("No mapping found for {}", file.original_id.bright_black());
                    summary.failed += 1;
                }
            }
        }

        log::info!("Update summary:");
        log::info!("  ✓ Updated: {}", summary.updated.green());
        log::info!("  ✗ Failed: {}", summary.failed.red());

        Ok(summary)
    }

    /// Update workflows one at a time, asking the operator before each.
    ///
    /// Prompts go to stdout and answers are read line-by-line from `input`
    /// (stdin in production). An answer starting with `y` or `Y` confirms.
    /// Unmapped or unreadable files are reported as skipped without a
    /// prompt. EOF on `input` ends the session; remaining files are skipped.
    pub async fn update_interactive(&self, input: &mut impl BufRead) -> Result<UpdateSummary> {
        let mapping = self.build_id_mapping().await?;

        log::info!("Interactive update mode");

        let files = scan_workflow_dir(&self.workflow_dir)?;
        let mut summary = UpdateSummary::default();

        for (index, file) in files.iter().enumerate() {
            let name = match self.read_document(&file.path) {
                Ok(document) => document
                    .get("name")
                    .and_then(|n| n.as_str())
                    .unwrap_or(UNKNOWN_NAME)
                    .to_string(),
                Err(e) => {
                    log::error!("Error processing {}: {}", file.path.display(), e);
                    summary.skipped += 1;
                    continue;
                }
            };

            let Some(current_id) = mapping.current_for(&file.original_id) else {
                log::info!("Skipped {} (no mapping)", name.cyan());
                summary.skipped += 1;
                continue;
            };

            let answer = match prompt(&name, &file.original_id, input) {
                Ok(Some(answer)) => answer,
                Ok(None) => {
                    // Operator input ended; leave the rest untouched
                    log::warn!("Input closed, ending interactive session");
                    summary.skipped += files.len() - index;
                    break;
                }
                Err(e) => {
                    log::error!("Error reading operator input: {}", e);
                    summary.skipped += files.len() - index;
                    break;
                }
            };

            if is_confirmed(&answer) {
                if self.push_update(&file.path, current_id).await {
                    summary.updated += 1;
                } else {
                    summary.failed += 1;
                }
            } else {
                log::info!("Skipped {}", name.cyan());
                summary.skipped += 1;
            }
        }

        Ok(summary)
    }

    /// Build and report the identifier mapping without any writes.
    ///
    /// Entries are printed sorted by original id, followed by a total.
    pub async fn list_mappings(&self) -> Result<IdMapping> {
        let mapping = self.build_id_mapping().await?;

        log::info!("ID mapping summary:");
        log::info!("  Total mappings: {}", mapping.len().green());

        if !mapping.is_empty() {
            log::info!("Original → Current ID mappings:");
            for (original_id, current_id) in mapping.iter_sorted() {
                log::info!(
                    "  {} → {}",
                    original_id.bright_black(),
                    current_id.bright_black()
                );
            }
        }

        Ok(mapping)
    }

    /// Read and parse a local workflow document.
    fn read_document(&self, path: &Path) -> Result<Value> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read workflow file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse workflow file: {}", path.display()))
    }
}

/// Ask the operator whether to update one workflow.
///
/// Returns `Ok(None)` when the input stream is exhausted.
fn prompt(name: &str, original_id: &str, input: &mut impl BufRead) -> Result<Option<String>> {
    let mut stdout = std::io::stdout();
    write!(stdout, "Update '{}' ({})? (y/n): ", name, original_id)?;
    stdout.flush()?;

    let mut line = String::new();
    let bytes = input.read_line(&mut line)?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Free-text confirmation: case-insensitive, anything starting with `y`.
fn is_confirmed(answer: &str) -> bool {
    answer.trim().to_lowercase().starts_with('y')
}
