//! HTTP client for the bar service endpoints.
//!
//! All flows in the UI go through `ApiClient`:
//! - `fetch_snapshot` — inventory bootstrap (`GET /bar`, JSON)
//! - `ingredient_details` — category/subcategory metadata for one name
//! - `create_ingredient` — add a name to the master list
//! - `add_to_bar` — add an item to the bar contents
//! - `delete_item` — remove an item from the bar
//!
//! There is deliberately no retry loop here: a failed call surfaces once
//! and the user repeats the action.

use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Maximum accepted response body for any endpoint (1 MB). The snapshot is
/// the largest payload and a home bar is a few hundred rows at most.
const MAX_RESPONSE_SIZE: u64 = 1024 * 1024;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request failed with status {0}")]
    Status(u16),

    /// A logical error reported by the server in its payload. Surfaced to
    /// the user verbatim.
    #[error("{0}")]
    Server(String),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(u64),
}

// ============================================================================
// Response Payloads
// ============================================================================

/// One bar row from the inventory snapshot.
///
/// The `type` tag is assigned server-side from the spirit-category list;
/// anything the server does not tag deserializes as an empty string and is
/// treated as "other".
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotItem {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub sub_category: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Inventory snapshot: the data the server templates into the bar page,
/// requested as JSON.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BarSnapshot {
    #[serde(default)]
    pub items: Vec<SnapshotItem>,
    #[serde(default)]
    pub possible_names: Vec<String>,
    #[serde(default)]
    pub subcategories: HashMap<String, Vec<String>>,
}

/// Metadata for one master-list ingredient.
///
/// The server signals logical failures through the `error` field; its
/// presence means failure regardless of HTTP status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngredientDetails {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sub_category: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

// ============================================================================
// Client
// ============================================================================

/// Client for the bar service.
///
/// Wraps a pooled `reqwest::Client`; cheap to clone into spawned tasks.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// Build a client for the given validated base URL.
    pub fn new(base: Url) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(2)
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(60))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { http, base })
    }

    /// Base URL this client talks to (for status display).
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Build an endpoint URL from path segments, percent-escaping each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        {
            let mut parts = url
                .path_segments_mut()
                .map_err(|_| ApiError::Malformed("base URL cannot carry a path".into()))?;
            parts.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Fetch the inventory snapshot.
    pub async fn fetch_snapshot(&self) -> Result<BarSnapshot, ApiError> {
        let url = self.endpoint(&["bar"])?;
        let response = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        check_length(&response)?;

        let snapshot: BarSnapshot = response
            .json()
            .await
            .map_err(|e| ApiError::Malformed(e.to_string()))?;
        tracing::debug!(
            items = snapshot.items.len(),
            names = snapshot.possible_names.len(),
            "Fetched inventory snapshot"
        );
        Ok(snapshot)
    }

    /// Fetch category/subcategory metadata for one ingredient name.
    ///
    /// The body is parsed regardless of HTTP status: a payload with `error`
    /// set beats the status code either way.
    pub async fn ingredient_details(&self, name: &str) -> Result<IngredientDetails, ApiError> {
        let url = self.endpoint(&["ingredient-details", name])?;
        let response = self.http.get(url).send().await?;
        let status = response.status();
        check_length(&response)?;

        let details: IngredientDetails = response
            .json()
            .await
            .map_err(|e| ApiError::Malformed(e.to_string()))?;

        if let Some(message) = details.error {
            return Err(ApiError::Server(message));
        }
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        Ok(details)
    }

    /// Create a new master-list ingredient.
    pub async fn create_ingredient(
        &self,
        name: &str,
        category: &str,
        sub_category: &str,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&["possible-ingredients"])?;
        let response = self
            .http
            .post(url)
            .form(&[
                ("name", name),
                ("category", category),
                ("sub_category", sub_category),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        tracing::info!(name, category, sub_category, "Created master ingredient");
        Ok(())
    }

    /// Add an item to the bar contents.
    pub async fn add_to_bar(
        &self,
        name: &str,
        category: &str,
        sub_category: &str,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&["bar"])?;
        let response = self
            .http
            .post(url)
            .form(&[
                ("name", name),
                ("category", category),
                ("sub_category", sub_category),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        tracing::info!(name, "Added item to bar");
        Ok(())
    }

    /// Delete an item from the bar by name. The response body is ignored on
    /// success.
    pub async fn delete_item(&self, name: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["bar", "delete_bar_item", name])?;
        let response = self.http.delete(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        tracing::info!(name, "Deleted bar item");
        Ok(())
    }
}

/// Reject oversized responses before attempting to buffer them.
fn check_length(response: &reqwest::Response) -> Result<(), ApiError> {
    if let Some(len) = response.content_length() {
        if len > MAX_RESPONSE_SIZE {
            return Err(ApiError::ResponseTooLarge(MAX_RESPONSE_SIZE));
        }
    }
    Ok(())
}
