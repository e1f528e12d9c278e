//! Search index client.
//!
//! Talks to an Elasticsearch-compatible node over its REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;

use common::{AppError, AppResult, SearchConfig};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Search index operations needed by the maintenance routines.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Check that the search node answers
    async fn ping(&self) -> AppResult<()>;

    /// Clear the caches of every index
    async fn clear_cache(&self) -> AppResult<()>;

    /// Names of every concrete index
    async fn list_indices(&self) -> AppResult<Vec<String>>;

    /// Delete every document of an index, returns the number deleted
    async fn delete_all_documents(&self, index: &str) -> AppResult<u64>;
}

/// One row of `_cat/indices?format=json`.
#[derive(Debug, Deserialize)]
struct CatIndex {
    index: String,
}

#[derive(Debug, Deserialize)]
struct DeleteByQueryResponse {
    #[serde(default)]
    deleted: u64,
}

/// HTTP implementation of [`SearchIndex`].
pub struct EsClient {
    client: Client,
    base_url: String,
}

impl EsClient {
    /// Build a client for the configured search node.
    pub fn new(config: &SearchConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self::with_client(config.url.clone(), client))
    }

    /// Build a client on top of an existing HTTP client.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Turn a non-2xx answer into an error carrying status and body.
    async fn check(response: Response, action: &str) -> AppResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Could not read error body".to_string());

        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!("{}: not found ({})", action, text);
            return Err(AppError::NotFound);
        }

        Err(AppError::search_index(format!(
            "Failed to {}. Status: {}. Body: {}",
            action, status, text
        )))
    }
}

#[async_trait]
impl SearchIndex for EsClient {
    async fn ping(&self) -> AppResult<()> {
        let response = self.client.get(&self.base_url).send().await?;
        Self::check(response, "ping search node").await?;
        Ok(())
    }

    async fn clear_cache(&self) -> AppResult<()> {
        let response = self
            .client
            .post(format!("{}/_cache/clear", self.base_url))
            .send()
            .await?;
        Self::check(response, "clear index caches").await?;
        Ok(())
    }

    async fn list_indices(&self) -> AppResult<Vec<String>> {
        let response = self
            .client
            .get(format!("{}/_cat/indices", self.base_url))
            .query(&[("format", "json"), ("h", "index")])
            .send()
            .await?;
        let rows: Vec<CatIndex> = Self::check(response, "list indices").await?.json().await?;

        let mut indices: Vec<String> = rows.into_iter().map(|row| row.index).collect();
        indices.sort();
        Ok(indices)
    }

    async fn delete_all_documents(&self, index: &str) -> AppResult<u64> {
        let response = self
            .client
            .post(format!("{}/{}/_delete_by_query", self.base_url, index))
            .query(&[("refresh", "true"), ("conflicts", "proceed")])
            .json(&json!({ "query": { "match_all": {} } }))
            .send()
            .await?;
        let body: DeleteByQueryResponse = Self::check(response, "delete documents")
            .await?
            .json()
            .await?;

        tracing::debug!(index, deleted = body.deleted, "Index emptied");
        Ok(body.deleted)
    }
}
