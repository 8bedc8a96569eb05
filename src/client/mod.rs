//! n8n API client and authentication.
//!
//! This module provides the [`N8nClient`] for talking to the n8n REST API,
//! the [`Auth`] credential type, and the [`WorkflowApi`] trait that the
//! synchronizer is written against so tests can substitute a fake transport.

mod auth;
mod n8n;

pub use auth::Auth;
pub use n8n::N8nClient;

use eyre::Result;
use serde_json::Value;

/// A completed HTTP exchange, reduced to what the synchronizer cares about.
///
/// The body is buffered eagerly so callers can inspect it more than once
/// (status handling first, error-message extraction second).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: String,
}

impl ApiResponse {
    /// Create a response from a status code and body text.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Best-effort error message extraction.
    ///
    /// n8n error bodies usually carry a `message` field; fall back to the
    /// raw body text when the body is not JSON or has no such field.
    pub fn error_message(&self) -> String {
        self.json()
            .ok()
            .and_then(|v| {
                v.get("message")
                    .and_then(|m| m.as_str())
                    .map(|m| m.to_string())
            })
            .unwrap_or_else(|| self.body.clone())
    }
}

/// Minimal transport seam over the n8n workflows API.
///
/// [`N8nClient`] is the production implementation; tests implement this
/// with canned responses so correlation and update logic run offline.
pub trait WorkflowApi: Send + Sync {
    /// GET the full workflow listing (`/api/v1/workflows`).
    fn list_workflows(&self) -> impl std::future::Future<Output = Result<ApiResponse>> + Send;

    /// PUT an updated workflow definition (`/api/v1/workflows/{id}`).
    fn update_workflow(
        &self,
        id: &str,
        body: &Value,
    ) -> impl std::future::Future<Output = Result<ApiResponse>> + Send;
}
