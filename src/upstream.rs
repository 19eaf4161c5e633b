//! Upstream Client Module
//!
//! HTTP client for the recipe data provider. One fixed GET endpoint per
//! logical query; responses are passed through as raw JSON. A non-success
//! status becomes an upstream error, transport failures a network error.
//! No retries here, that policy belongs to callers.

use std::time::Duration;

use serde_json::Value;

use crate::error::{ProxyError, Result};

// == Upstream Client ==
/// Client for the fixed recipe provider endpoints.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    // == Constructor ==
    /// Builds a client for the given provider base URL.
    ///
    /// The timeout bounds every fetch; exceeding it surfaces as a network
    /// error for that call only.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("mealproxy/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    // == Core Fetch ==
    /// Issues a GET against one provider endpoint and parses the body.
    ///
    /// Query parameters are URL-encoded by the client, so raw user input
    /// is safe to pass through.
    async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self.http.get(&url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProxyError::Upstream(status));
        }

        Ok(response.json::<Value>().await?)
    }

    // == Query Operations ==
    /// Searches meals by name.
    pub async fn search(&self, term: &str) -> Result<Value> {
        self.get_json("search.php", &[("s", term)]).await
    }

    /// Lists all meal categories.
    pub async fn categories(&self) -> Result<Value> {
        self.get_json("categories.php", &[]).await
    }

    /// Lists meals in a category.
    pub async fn filter_by_category(&self, category: &str) -> Result<Value> {
        self.get_json("filter.php", &[("c", category)]).await
    }

    /// Lists all areas.
    pub async fn areas(&self) -> Result<Value> {
        self.get_json("list.php", &[("a", "list")]).await
    }

    /// Lists meals from an area.
    pub async fn filter_by_area(&self, area: &str) -> Result<Value> {
        self.get_json("filter.php", &[("a", area)]).await
    }

    /// Fetches one random meal.
    pub async fn random(&self) -> Result<Value> {
        self.get_json("random.php", &[]).await
    }

    /// Fetches a meal by id.
    pub async fn lookup(&self, id: &str) -> Result<Value> {
        self.get_json("lookup.php", &[("i", id)]).await
    }
}
