use async_trait::async_trait;
use serde_json::{json, Value};

use crate::catalog::{Catalog, ToolStatus};
use crate::views::{ToolView, ViewInfo, ViewResult};

/// The landing page: every category and its tools.
pub struct HomeView {
    catalog: Catalog,
}

impl HomeView {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl ToolView for HomeView {
    fn info(&self) -> ViewInfo {
        ViewInfo {
            component: "Home",
            summary: "Browse all tools by category",
            input_schema: json!({ "type": "object" }),
        }
    }

    async fn run(&self, _input: Value) -> ViewResult {
        Ok(json!({
            "tool_count": self.catalog.tool_count(),
            "developed_count": self.catalog.tools_with_status(ToolStatus::Developed).count(),
            "categories": self.catalog.categories(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_the_catalog() {
        let out = HomeView::new(Catalog::builtin())
            .run(Value::Null)
            .await
            .unwrap();
        assert_eq!(out["tool_count"], 17);
        assert_eq!(out["developed_count"], 14);
        assert_eq!(out["categories"][0]["id"], "dev-tools");
        assert_eq!(out["categories"][0]["tools"][0]["path"], "/json-formatter");
    }
}
