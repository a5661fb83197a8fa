use axum::{http::StatusCode, response::IntoResponse};
use lazy_static::lazy_static;
use prometheus::{
    Counter, CounterVec, Encoder, Gauge, GaugeVec, HistogramOpts, HistogramVec, Opts, Registry,
    TextEncoder,
};
use std::time::Duration;

use crate::catalog::{Catalog, ToolStatus};

/// Metric name prefix for all toolbox metrics
const PREFIX: &str = "toolbox";

lazy_static! {
    // Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // HTTP Request Metrics
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_http_requests_total"), "Total number of HTTP requests"),
        &["method", "path", "status"]
    ).expect("Failed to create http_requests_total metric");

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_http_request_duration_seconds"),
            "HTTP request duration in seconds"
        )
        .buckets(vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0]),
        &["method", "path"]
    ).expect("Failed to create http_request_duration_seconds metric");

    // Router Metrics
    pub static ref VIEW_LOADS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_view_loads_total"), "View loads by route and result"),
        &["route", "result"]
    ).expect("Failed to create view_loads_total metric");

    pub static ref VIEW_LOAD_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_view_load_duration_seconds"),
            "Time spent loading a view on first navigation"
        )
        .buckets(vec![0.0001, 0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
        &["route"]
    ).expect("Failed to create view_load_duration_seconds metric");

    pub static ref ROUTE_NOT_FOUND_TOTAL: Counter = Counter::new(
        format!("{PREFIX}_route_not_found_total"),
        "Navigations to paths without a route"
    ).expect("Failed to create route_not_found_total metric");

    // Tool Metrics
    pub static ref TOOL_RUNS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_tool_runs_total"), "Tool executions by route and outcome"),
        &["route", "outcome"]
    ).expect("Failed to create tool_runs_total metric");

    // Catalog Metrics
    pub static ref CATALOG_TOOLS_TOTAL: GaugeVec = GaugeVec::new(
        Opts::new(format!("{PREFIX}_catalog_tools_total"), "Tools in the catalog by status"),
        &["status"]
    ).expect("Failed to create catalog_tools_total metric");

    pub static ref CATALOG_CATEGORIES_TOTAL: Gauge = Gauge::new(
        format!("{PREFIX}_catalog_categories_total"),
        "Categories in the catalog"
    ).expect("Failed to create catalog_categories_total metric");
}

/// Initialize all metrics and register them with the Prometheus registry
pub fn init_metrics() {
    // Register all metrics - ignore errors if already registered (for tests)
    let _ = REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(VIEW_LOADS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(VIEW_LOAD_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(ROUTE_NOT_FOUND_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(TOOL_RUNS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(CATALOG_TOOLS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(CATALOG_CATEGORIES_TOTAL.clone()));

    tracing::info!("Metrics system initialized successfully");
}

/// Initialize catalog-specific metrics
pub fn init_catalog_metrics(catalog: &Catalog) {
    let developed = catalog.tools_with_status(ToolStatus::Developed).count();
    let planned = catalog.tools_with_status(ToolStatus::Planned).count();

    CATALOG_TOOLS_TOTAL
        .with_label_values(&["developed"])
        .set(developed as f64);
    CATALOG_TOOLS_TOTAL
        .with_label_values(&["planned"])
        .set(planned as f64);
    CATALOG_CATEGORIES_TOTAL.set(catalog.categories().len() as f64);

    tracing::info!(
        "Catalog metrics initialized: {} categories, {} developed tools, {} planned tools",
        catalog.categories().len(),
        developed,
        planned
    );
}

/// Record an HTTP request
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration.as_secs_f64());
}

/// Record the outcome of a view load
pub fn record_view_load(route: &str, result: &str, duration: Duration) {
    VIEW_LOADS_TOTAL.with_label_values(&[route, result]).inc();

    VIEW_LOAD_DURATION_SECONDS
        .with_label_values(&[route])
        .observe(duration.as_secs_f64());
}

pub fn record_route_not_found() {
    ROUTE_NOT_FOUND_TOTAL.inc();
}

/// Record a tool execution
pub fn record_tool_run(route: &str, outcome: &str) {
    TOOL_RUNS_TOTAL.with_label_values(&[route, outcome]).inc();
}

/// Collapses request paths into a bounded set of metric labels.
pub fn categorize_endpoint(path: &str) -> &'static str {
    if path.starts_with("/v1/catalog") {
        "catalog"
    } else if path.starts_with("/v1/routes") {
        "routes"
    } else if path.starts_with("/v1/navigate") {
        "navigate"
    } else if path.starts_with("/v1/tools") {
        "tools"
    } else if path == "/" {
        "home"
    } else {
        "static"
    }
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = vec![];
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => {
            let response = String::from_utf8(buffer).unwrap_or_else(|_| String::from(""));
            (StatusCode::OK, response)
        }
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", e),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gathered(name: &str) -> bool {
        REGISTRY.gather().iter().any(|m| m.get_name() == name)
    }

    #[test]
    fn test_metrics_initialization() {
        init_metrics();

        let metric_families = REGISTRY.gather();
        assert!(!metric_families.is_empty(), "Metrics should be registered");
    }

    #[test]
    fn test_record_http_request() {
        init_metrics();

        record_http_request("GET", "catalog", 200, Duration::from_millis(50));

        assert!(gathered("toolbox_http_requests_total"));
        assert!(gathered("toolbox_http_request_duration_seconds"));
    }

    #[test]
    fn test_record_view_load() {
        init_metrics();

        record_view_load("metrics-test-route", "loaded", Duration::from_millis(3));

        let count = VIEW_LOADS_TOTAL
            .with_label_values(&["metrics-test-route", "loaded"])
            .get();
        assert_eq!(count, 1.0);
        assert!(gathered("toolbox_view_load_duration_seconds"));
    }

    #[test]
    fn test_record_tool_run_and_not_found() {
        init_metrics();

        record_tool_run("metrics-test-tool", "ok");
        record_route_not_found();

        assert!(gathered("toolbox_tool_runs_total"));
        assert!(ROUTE_NOT_FOUND_TOTAL.get() >= 1.0);
    }

    #[test]
    fn test_catalog_metrics() {
        init_metrics();

        init_catalog_metrics(&Catalog::builtin());

        assert_eq!(
            CATALOG_TOOLS_TOTAL.with_label_values(&["developed"]).get(),
            14.0
        );
        assert_eq!(
            CATALOG_TOOLS_TOTAL.with_label_values(&["planned"]).get(),
            3.0
        );
        assert!(gathered("toolbox_catalog_categories_total"));
    }

    #[test]
    fn test_categorize_endpoint() {
        assert_eq!(categorize_endpoint("/v1/catalog/categories/dev-tools"), "catalog");
        assert_eq!(categorize_endpoint("/v1/tools/base64"), "tools");
        assert_eq!(categorize_endpoint("/"), "home");
        assert_eq!(categorize_endpoint("/assets/app.js"), "static");
    }
}
