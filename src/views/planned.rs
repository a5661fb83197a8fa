use async_trait::async_trait;
use serde_json::{json, Value};

use crate::views::{ToolView, ViewError, ViewInfo, ViewResult};

/// Stands in for a catalog tool that is not built yet.
pub struct PlannedView {
    name: &'static str,
}

impl PlannedView {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

#[async_trait]
impl ToolView for PlannedView {
    fn info(&self) -> ViewInfo {
        ViewInfo {
            component: "Planned",
            summary: "This tool is planned but not yet available",
            input_schema: json!({ "type": "object" }),
        }
    }

    async fn run(&self, _input: Value) -> ViewResult {
        Err(ViewError::NotAvailable(format!("{} 待开发", self.name)))
    }
}
