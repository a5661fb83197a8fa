use async_trait::async_trait;
use serde_json::{json, Value};

use crate::views::{ToolView, ViewInfo, ViewResult};

pub struct ProView;

#[async_trait]
impl ToolView for ProView {
    fn info(&self) -> ViewInfo {
        ViewInfo {
            component: "Pro",
            summary: "Pro edition information",
            input_schema: json!({ "type": "object" }),
        }
    }

    async fn run(&self, _input: Value) -> ViewResult {
        Ok(json!({
            "edition": "pro",
            "title": crate::router::PRO_TITLE,
            "available": false,
            "message": "Pro 版本即将推出，敬请期待",
        }))
    }
}
