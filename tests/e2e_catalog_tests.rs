//! End-to-end tests for catalog endpoints
//!
//! Tests the category listing, status filtering and single-category lookup.

mod common;

use common::{
    TestClient, TestServer, CATEGORY_IDS, DEVELOPED_TOOL_COUNT, ROUTE_COUNT, TOOL_COUNT,
};
use reqwest::StatusCode;
use serde_json::Value;

fn count_tools(categories: &[Value]) -> usize {
    categories
        .iter()
        .map(|c| c["tools"].as_array().unwrap().len())
        .sum()
}

#[tokio::test]
async fn test_home_reports_catalog_and_route_counts() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.get_stats().await;
    assert_eq!(response.status(), StatusCode::OK);

    let stats: Value = response.json().await.unwrap();
    assert_eq!(stats["tools"], TOOL_COUNT);
    assert_eq!(stats["routes"], ROUTE_COUNT);
    assert!(stats["uptime"].as_str().unwrap().starts_with("0d "));
}

#[tokio::test]
async fn test_catalog_lists_categories_in_order() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.get_catalog().await;
    assert_eq!(response.status(), StatusCode::OK);

    let categories: Vec<Value> = response.json().await.unwrap();
    let ids: Vec<&str> = categories
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, CATEGORY_IDS);
    assert_eq!(count_tools(&categories), TOOL_COUNT);

    let first_tool = &categories[0]["tools"][0];
    assert_eq!(first_tool["path"], "/json-formatter");
    assert_eq!(first_tool["status"], "developed");
    assert_eq!(first_tool["icon"], "file-json");
}

#[tokio::test]
async fn test_catalog_paths_are_unique() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let categories: Vec<Value> = client.get_catalog().await.json().await.unwrap();
    let mut paths: Vec<&str> = categories
        .iter()
        .flat_map(|c| c["tools"].as_array().unwrap())
        .map(|t| t["path"].as_str().unwrap())
        .collect();
    let total = paths.len();
    paths.sort();
    paths.dedup();
    assert_eq!(paths.len(), total);
}

#[tokio::test]
async fn test_catalog_filter_by_status() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.get_catalog_with_status("developed").await;
    assert_eq!(response.status(), StatusCode::OK);
    let developed: Vec<Value> = response.json().await.unwrap();
    assert_eq!(count_tools(&developed), DEVELOPED_TOOL_COUNT);

    let planned: Vec<Value> = client
        .get_catalog_with_status("planned")
        .await
        .json()
        .await
        .unwrap();
    // Only the life category has planned tools
    let with_planned: Vec<&Value> = planned
        .iter()
        .filter(|c| !c["tools"].as_array().unwrap().is_empty())
        .collect();
    assert_eq!(with_planned.len(), 1);
    assert_eq!(with_planned[0]["id"], "life-tools");
    assert_eq!(count_tools(&planned), TOOL_COUNT - DEVELOPED_TOOL_COUNT);
}

#[tokio::test]
async fn test_catalog_rejects_unknown_status() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.get_catalog_with_status("abandoned").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "invalid_input");
}

#[tokio::test]
async fn test_get_category() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.get_category("image-tools").await;
    assert_eq!(response.status(), StatusCode::OK);

    let category: Value = response.json().await.unwrap();
    assert_eq!(category["title"], "图形与设计");
    let paths: Vec<&str> = category["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, ["/qrcode", "/color", "/image-compress"]);
}

#[tokio::test]
async fn test_get_nonexistent_category_returns_404() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.get_category("games").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
