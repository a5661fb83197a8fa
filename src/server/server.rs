use anyhow::{Context, Result};
use std::time::Duration;

use tracing::{debug, error, info, warn};

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::services::ServeDir;

#[cfg(feature = "slowdown")]
use super::slowdown_request;
use super::{http_cache, log_requests, metrics, state::*, ServerConfig};
use crate::catalog::{Catalog, ToolStatus};
use crate::router::{RouteError, RouteTable};
use crate::views::{ViewError, ViewInfo};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
    pub tools: usize,
    pub routes: usize,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

#[derive(Deserialize, Debug)]
struct CatalogQuery {
    pub status: Option<String>,
}

#[derive(Deserialize, Debug)]
struct NavigateQuery {
    pub path: String,
}

#[derive(Serialize)]
struct NavigationResponse {
    route: String,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    view: ViewInfo,
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        match self {
            RouteError::NotFound { path } => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "route_not_found",
                    "path": path,
                    "fallback": "/",
                })),
            )
                .into_response(),
            RouteError::LoadFailed { route, source } => {
                error!("Failed to load view for route {}: {}", route, source);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({
                        "error": "view_load_failed",
                        "route": route,
                        "message": source.to_string(),
                    })),
                )
                    .into_response()
            }
        }
    }
}

impl IntoResponse for ViewError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ViewError::InvalidInput(message) => (StatusCode::BAD_REQUEST, "invalid_input", message),
            ViewError::NotAvailable(message) => {
                (StatusCode::NOT_IMPLEMENTED, "not_available", message)
            }
            ViewError::Internal(message) => {
                error!("Tool failed: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
            }
        };
        (status, Json(json!({ "error": code, "message": message }))).into_response()
    }
}

fn outcome_label(error: &ViewError) -> &'static str {
    match error {
        ViewError::InvalidInput(_) => "invalid_input",
        ViewError::NotAvailable(_) => "not_available",
        ViewError::Internal(_) => "error",
    }
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
        tools: state.catalog.tool_count(),
        routes: state.routes.len(),
    };
    Json(stats)
}

async fn get_catalog(State(catalog): State<Catalog>, Query(query): Query<CatalogQuery>) -> Response {
    match query.status.as_deref() {
        None => Json(catalog.categories()).into_response(),
        Some(raw) => match ToolStatus::parse(raw) {
            Some(status) => Json(catalog.filtered(status)).into_response(),
            None => ViewError::InvalidInput(format!("unknown status '{}'", raw)).into_response(),
        },
    }
}

async fn get_category(State(catalog): State<Catalog>, Path(id): Path<String>) -> Response {
    match catalog.category(&id) {
        Some(category) => Json(category).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn get_routes(State(routes): State<GuardedRouteTable>) -> impl IntoResponse {
    Json(routes.statuses())
}

async fn navigate(
    State(routes): State<GuardedRouteTable>,
    Query(query): Query<NavigateQuery>,
) -> Response {
    match routes.navigate(&query.path).await {
        Ok(navigation) => Json(NavigationResponse {
            route: navigation.route,
            path: navigation.path,
            title: navigation.title,
            view: navigation.view.info(),
        })
        .into_response(),
        Err(err) => err.into_response(),
    }
}

async fn run_tool(
    State(routes): State<GuardedRouteTable>,
    Path(segment): Path<String>,
    body: Bytes,
) -> Response {
    let input: Value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        match serde_json::from_slice(&body) {
            Ok(value) => value,
            Err(e) => {
                return ViewError::InvalidInput(format!("request body is not JSON: {}", e))
                    .into_response()
            }
        }
    };

    let navigation = match routes.navigate(&format!("/{}", segment)).await {
        Ok(navigation) => navigation,
        Err(err) => return err.into_response(),
    };

    debug!("Running tool {}", navigation.route);
    match navigation.view.run(input).await {
        Ok(output) => {
            metrics::record_tool_run(&navigation.route, "ok");
            Json(output).into_response()
        }
        Err(err) => {
            metrics::record_tool_run(&navigation.route, outcome_label(&err));
            err.into_response()
        }
    }
}

pub fn make_app(config: ServerConfig, catalog: Catalog, routes: GuardedRouteTable) -> Router {
    let state = ServerState::new(config.clone(), catalog, routes);

    let catalog_routes: Router = Router::new()
        .route("/", get(get_catalog))
        .route("/categories/{id}", get(get_category))
        .layer(middleware::from_fn_with_state(
            config.content_cache_age_sec,
            http_cache,
        ))
        .with_state(state.clone());

    let router_routes: Router = Router::new()
        .route("/v1/routes", get(get_routes))
        .route("/v1/navigate", get(navigate))
        .route("/v1/tools/{tool}", post(run_tool))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .with_state(state.clone());

    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    let mut app: Router = home_router
        .nest("/v1/catalog", catalog_routes)
        .merge(router_routes);

    #[cfg(feature = "slowdown")]
    {
        app = app.layer(middleware::from_fn(slowdown_request));
    }
    app = app.layer(middleware::from_fn_with_state(state.clone(), log_requests));

    app
}

fn make_metrics_app() -> Router {
    Router::new().route("/metrics", get(metrics::metrics_handler))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

pub async fn run_server(config: ServerConfig, catalog: Catalog, routes: RouteTable) -> Result<()> {
    let port = config.port;
    let metrics_port = config.metrics_port;
    let app = make_app(config, catalog, std::sync::Arc::new(routes));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    let metrics_listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", metrics_port))
        .await
        .with_context(|| format!("Failed to bind metrics port {}", metrics_port))?;

    info!("Ready to serve at port {}!", port);
    info!("Metrics available at port {}!", metrics_port);

    let metrics_server = tokio::spawn(async move {
        if let Err(e) = axum::serve(metrics_listener, make_metrics_app()).await {
            error!("Metrics server failed: {}", e);
        }
    });

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;
    metrics_server.abort();

    Ok(result?)
}
