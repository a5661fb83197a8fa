//! Router
//!
//! Binds normalized paths to views and per-route metadata. Views behind a
//! route are loaded lazily on the first navigation and cached for the life
//! of the process.

mod lazy_view;
mod navigator;
mod table;

pub use lazy_view::{LazyView, LoadState};
pub use navigator::{NavigationOutcome, Navigator};
pub use table::{
    Navigation, RouteEntry, RouteMeta, RouteStatus, RouteTable, RouteTableBuilder, TableViolation,
    ViewSource, HOME_ROUTE, PRO_ROUTE, PRO_TITLE,
};

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::views::ToolView;

/// Boxed future producing a loaded view
pub type ViewFuture = Pin<Box<dyn Future<Output = Result<Arc<dyn ToolView>, LoadError>> + Send>>;

/// Deferred view constructor
pub type ViewLoader = Arc<dyn Fn() -> ViewFuture + Send + Sync>;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("view load timed out after {}ms", .0.as_millis())]
    TimedOut(Duration),

    #[error("view load failed: {0}")]
    Failed(String),
}

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("No route matches '{path}'")]
    NotFound { path: String },

    #[error("Route '{route}' could not be loaded: {source}")]
    LoadFailed {
        route: String,
        #[source]
        source: LoadError,
    },
}
