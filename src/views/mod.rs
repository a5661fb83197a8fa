//! Tool views
//!
//! Each tool in the catalog is backed by a view: a JSON-in / JSON-out
//! transformation. Views are not constructed at startup; the router holds a
//! loader per route and builds the view the first time the route is visited.

pub mod dev;
pub mod graphics;
pub mod home;
pub mod life;
pub mod planned;
pub mod pro;
pub mod text;

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::catalog::{Catalog, ToolStatus};
use crate::router::{LoadError, ViewLoader};

/// Errors a view can report while running.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not available: {0}")]
    NotAvailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ViewResult = Result<Value, ViewError>;

/// Self-description returned when a view is mounted.
#[derive(Debug, Clone, Serialize)]
pub struct ViewInfo {
    pub component: &'static str,
    pub summary: &'static str,
    pub input_schema: Value,
}

/// A mountable tool implementation.
#[async_trait]
pub trait ToolView: Send + Sync {
    fn info(&self) -> ViewInfo;

    async fn run(&self, input: Value) -> ViewResult;
}

/// Tunables handed to views that produce batches.
#[derive(Debug, Clone)]
pub struct ViewLimits {
    pub max_uuid_batch: usize,
    pub max_password_batch: usize,
}

impl Default for ViewLimits {
    fn default() -> Self {
        Self {
            max_uuid_batch: 500,
            max_password_batch: 50,
        }
    }
}

/// Deserializes a view's input object.
pub(crate) fn parse_input<T: DeserializeOwned>(input: Value) -> Result<T, ViewError> {
    // An empty body arrives as null; treat it as an empty object so that
    // fully-defaulted inputs work.
    let input = if input.is_null() {
        Value::Object(Default::default())
    } else {
        input
    };
    serde_json::from_value(input).map_err(|e| ViewError::InvalidInput(e.to_string()))
}

pub(crate) fn to_output<T: Serialize>(output: &T) -> ViewResult {
    serde_json::to_value(output).map_err(|e| ViewError::Internal(e.to_string()))
}

/// Wraps an async constructor into a route loader.
pub fn lazy<F, Fut>(load: F) -> ViewLoader
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Arc<dyn ToolView>, LoadError>> + Send + 'static,
{
    Arc::new(move || Box::pin(load()))
}

fn mounted<V: ToolView + 'static>(view: V) -> Result<Arc<dyn ToolView>, LoadError> {
    Ok(Arc::new(view))
}

/// Loader for the view backing a catalog path, if one exists.
pub fn loader_for(path: &str, limits: &ViewLimits) -> Option<ViewLoader> {
    let limits = limits.clone();
    let loader = match path {
        "/json-formatter" => lazy(|| async { mounted(dev::JsonFormatter) }),
        "/timestamp" => lazy(|| async { mounted(dev::TimestampConverter) }),
        "/base64" => lazy(|| async { mounted(dev::Base64Converter) }),
        "/uuid" => lazy(move || {
            let max = limits.max_uuid_batch;
            async move { mounted(dev::UuidGenerator::new(max)) }
        }),
        "/regex" => lazy(|| async { mounted(dev::RegexTester) }),
        "/url-encode" => lazy(|| async { mounted(dev::UrlEncoder) }),
        "/word-count" => lazy(|| async { mounted(text::WordCount) }),
        "/diff" => lazy(|| async { mounted(text::TextDiff) }),
        "/password-gen" => lazy(move || {
            let max = limits.max_password_batch;
            async move { mounted(text::PasswordGenerator::new(max)) }
        }),
        "/case-converter" => lazy(|| async { mounted(text::CaseConverter) }),
        "/qrcode" => lazy(|| async { mounted(graphics::QrCodeGenerator) }),
        "/color" => lazy(|| async { mounted(graphics::ColorConverter) }),
        "/image-compress" => lazy(|| async { mounted(graphics::ImageCompressor) }),
        "/unit" => lazy(|| async { mounted(life::UnitConverter::load()) }),
        _ => return None,
    };
    Some(loader)
}

/// Loader for a tool, falling back to the placeholder for planned tools
/// without an implementation.
pub fn loader_for_tool(
    path: &'static str,
    name: &'static str,
    status: ToolStatus,
    limits: &ViewLimits,
) -> Option<ViewLoader> {
    match (loader_for(path, limits), status) {
        (Some(loader), _) => Some(loader),
        (None, ToolStatus::Planned) => Some(lazy(move || async move {
            mounted(planned::PlannedView::new(name))
        })),
        (None, ToolStatus::Developed) => None,
    }
}

pub fn home_view(catalog: Catalog) -> Arc<dyn ToolView> {
    Arc::new(home::HomeView::new(catalog))
}

pub fn pro_loader() -> ViewLoader {
    lazy(|| async { mounted(pro::ProView) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_input_treats_null_as_empty_object() {
        #[derive(serde::Deserialize)]
        struct Input {
            #[serde(default)]
            count: usize,
        }
        let input: Input = parse_input(Value::Null).unwrap();
        assert_eq!(input.count, 0);
    }

    #[test]
    fn parse_input_reports_type_errors() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Input {
            count: usize,
        }
        let err = parse_input::<Input>(serde_json::json!({"count": "many"})).unwrap_err();
        assert!(matches!(err, ViewError::InvalidInput(_)));
    }

    #[test]
    fn every_developed_builtin_tool_has_a_loader() {
        let limits = ViewLimits::default();
        for tool in Catalog::builtin().tools_with_status(ToolStatus::Developed) {
            assert!(
                loader_for(tool.path, &limits).is_some(),
                "no view for {}",
                tool.path
            );
        }
    }

    #[test]
    fn planned_tools_fall_back_to_placeholder() {
        let limits = ViewLimits::default();
        assert!(loader_for("/todo", &limits).is_none());
        assert!(loader_for_tool("/todo", "待办清单", ToolStatus::Planned, &limits).is_some());
        assert!(loader_for_tool("/nope", "x", ToolStatus::Developed, &limits).is_none());
    }

    #[tokio::test]
    async fn loaders_build_views_on_call() {
        let loader = loader_for("/json-formatter", &ViewLimits::default()).unwrap();
        let view = loader().await.unwrap();
        assert_eq!(view.info().component, "JsonFormatter");
    }
}
