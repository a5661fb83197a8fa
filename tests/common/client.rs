//! HTTP client for end-to-end tests
//!
//! Wraps reqwest and provides one method per server endpoint.
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::Value;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("GET request failed")
    }

    // ========================================================================
    // Server
    // ========================================================================

    /// GET /
    pub async fn get_stats(&self) -> Response {
        self.get("/").await
    }

    // ========================================================================
    // Catalog Endpoints
    // ========================================================================

    /// GET /v1/catalog
    pub async fn get_catalog(&self) -> Response {
        self.get("/v1/catalog").await
    }

    /// GET /v1/catalog?status={status}
    pub async fn get_catalog_with_status(&self, status: &str) -> Response {
        self.client
            .get(format!("{}/v1/catalog", self.base_url))
            .query(&[("status", status)])
            .send()
            .await
            .expect("Get catalog request failed")
    }

    /// GET /v1/catalog/categories/{id}
    pub async fn get_category(&self, id: &str) -> Response {
        self.get(&format!("/v1/catalog/categories/{}", id)).await
    }

    // ========================================================================
    // Router Endpoints
    // ========================================================================

    /// GET /v1/routes
    pub async fn get_routes(&self) -> Response {
        self.get("/v1/routes").await
    }

    /// GET /v1/navigate?path={path}
    pub async fn navigate(&self, path: &str) -> Response {
        self.client
            .get(format!("{}/v1/navigate", self.base_url))
            .query(&[("path", path)])
            .send()
            .await
            .expect("Navigate request failed")
    }

    // ========================================================================
    // Tool Endpoints
    // ========================================================================

    /// POST /v1/tools/{tool} with a JSON body
    pub async fn run_tool(&self, tool: &str, input: &Value) -> Response {
        self.client
            .post(format!("{}/v1/tools/{}", self.base_url, tool))
            .json(input)
            .send()
            .await
            .expect("Run tool request failed")
    }

    /// POST /v1/tools/{tool} with a raw body
    pub async fn run_tool_raw(&self, tool: &str, body: impl Into<reqwest::Body>) -> Response {
        self.client
            .post(format!("{}/v1/tools/{}", self.base_url, tool))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Run tool request failed")
    }
}
