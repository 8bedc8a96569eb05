//! Workflow synchronization.
//!
//! Correlates locally exported workflow files with the live records on an
//! n8n server and pushes sanitized updates back to the right objects.

mod discovery;
mod mapping;
mod synchronizer;

pub use discovery::{WorkflowFile, scan_workflow_dir};
pub use mapping::IdMapping;
pub use synchronizer::{RemoteWorkflow, UpdateSummary, WorkflowSynchronizer};
