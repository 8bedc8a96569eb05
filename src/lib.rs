//! n8n Workflow Sync
//!
//! Reconciles locally exported n8n workflow files with the live state of
//! an n8n server, and re-uploads modified definitions to the right object
//! even though the server reassigns identifiers on creation.

pub mod cli;
pub mod client;
pub mod sync;
pub mod transform;

// Re-exports for convenience
pub use client::{ApiResponse, Auth, N8nClient, WorkflowApi};
pub use sync::{IdMapping, UpdateSummary, WorkflowSynchronizer};
pub use transform::{PayloadSanitizer, Transformer};
