//! CLI helper functions

use crate::{
    client::{Auth, N8nClient},
    sync::{UpdateSummary, WorkflowSynchronizer},
};
use eyre::{Context, Result};
use url::Url;

/// Load n8n client from environment variables
///
/// Expected environment variables:
/// - N8N_URL: n8n base URL (required)
/// - N8N_APIKEY: API key for the X-N8N-API-KEY header (optional)
pub fn load_n8n_client() -> Result<N8nClient> {
    let url_str = std::env::var("N8N_URL").context("N8N_URL environment variable not set")?;
    let url = Url::parse(&url_str).with_context(|| format!("Invalid N8N_URL: {}", url_str))?;

    let auth = match std::env::var("N8N_APIKEY") {
        Ok(apikey) => Auth::Apikey(apikey),
        Err(_) => {
            log::warn!("N8N_APIKEY not set, sending unauthenticated requests");
            Auth::None
        }
    };

    N8nClient::try_new(url, auth).context("Failed to create n8n client")
}

/// Report the original↔current ID mapping for a project
///
/// Returns the number of mapped workflows.
pub async fn list_mappings(project: &str) -> Result<usize> {
    let client = load_n8n_client()?;
    let sync = WorkflowSynchronizer::new(client, project);

    let mapping = sync.list_mappings().await?;
    Ok(mapping.len())
}

/// Update every mapped workflow in a project
pub async fn update_all(project: &str) -> Result<UpdateSummary> {
    let client = load_n8n_client()?;
    let sync = WorkflowSynchronizer::new(client, project);

    sync.update_all().await
}

/// Update workflows one at a time with per-file confirmation on stdin
pub async fn update_interactive(project: &str) -> Result<UpdateSummary> {
    let client = load_n8n_client()?;
    let sync = WorkflowSynchronizer::new(client, project);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    sync.update_interactive(&mut input).await
}
