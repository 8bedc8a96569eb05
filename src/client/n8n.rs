//! n8n client module
//!
//! Provides [`N8nClient`] for making API requests to an n8n server.
//! The API key is installed as a default header at construction, so every
//! request carries it without the call sites repeating themselves.

use super::{ApiResponse, Auth, WorkflowApi};
use eyre::{Result, eyre};
use reqwest::{Client, Method};
use serde_json::Value;
use url::Url;

/// n8n client for making API requests.
///
/// # Example
/// ```no_run
/// use n8n_workflow_sync::client::{Auth, N8nClient, WorkflowApi};
/// use url::Url;
///
/// # async fn example() -> eyre::Result<()> {
/// let url = Url::parse("http://localhost:5678")?;
/// let client = N8nClient::try_new(url, Auth::Apikey("n8n_api_...".into()))?;
///
/// let listing = client.list_workflows().await?;
/// println!("status: {}", listing.status);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct N8nClient {
    client: Client,
    url: Url,
}

impl N8nClient {
    /// Create a new N8nClient from a base URL and credential.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built or the API key
    /// is not a valid header value.
    pub fn try_new(url: Url, auth: Auth) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Auth::Apikey(apikey) = auth {
            headers.insert("X-N8N-API-KEY", apikey.parse()?);
        }
        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self { client, url })
    }

    /// Get the base URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Send a request to a given path and buffer the response.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse> {
        // Strip leading slash from path if present, to avoid double slashes
        let path = path.strip_prefix('/').unwrap_or(path);
        let url = self.url.join(path)?;

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(body)?);
        }

        let response = request
            .send()
            .await
            .map_err(|e| eyre!("Failed to send request: {}", e))?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        Ok(ApiResponse::new(status, body))
    }

    /// Helper for GET requests.
    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.request(Method::GET, path, None).await
    }

    /// Helper for PUT requests with a JSON body.
    pub async fn put_json_value(&self, path: &str, value: &Value) -> Result<ApiResponse> {
        self.request(Method::PUT, path, Some(value)).await
    }
}

impl WorkflowApi for N8nClient {
    async fn list_workflows(&self) -> Result<ApiResponse> {
        self.get("/api/v1/workflows").await
    }

    async fn update_workflow(&self, id: &str, body: &Value) -> Result<ApiResponse> {
        let path = format!("/api/v1/workflows/{}", id);
        self.put_json_value(&path, body).await
    }
}

impl std::fmt::Display for N8nClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let url = Url::parse("http://localhost:5678").unwrap();
        let client = N8nClient::try_new(url, Auth::None).unwrap();
        assert_eq!(client.url().as_str(), "http://localhost:5678/");
    }

    #[test]
    fn test_client_creation_with_apikey() {
        let url = Url::parse("http://localhost:5678").unwrap();
        let auth = Auth::Apikey("n8n_api_test".to_string());
        assert!(N8nClient::try_new(url, auth).is_ok());
    }

    #[test]
    fn test_invalid_apikey_header_value() {
        let url = Url::parse("http://localhost:5678").unwrap();
        let auth = Auth::Apikey("bad\nkey".to_string());
        assert!(N8nClient::try_new(url, auth).is_err());
    }
}
