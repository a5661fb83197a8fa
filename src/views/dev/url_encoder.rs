use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::views::{parse_input, to_output, ToolView, ViewError, ViewInfo, ViewResult};

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(rename_all = "snake_case")]
enum Mode {
    Encode,
    Decode,
}

#[derive(Debug, Deserialize)]
struct Input {
    mode: Mode,
    text: String,
}

#[derive(Debug, Serialize)]
struct Output {
    output: String,
}

/// Percent-encodes or decodes URL components.
pub struct UrlEncoder;

#[async_trait]
impl ToolView for UrlEncoder {
    fn info(&self) -> ViewInfo {
        ViewInfo {
            component: "UrlEncoder",
            summary: "Percent-encode or decode URL parameters",
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "mode": { "enum": ["encode", "decode"] },
                    "text": { "type": "string" }
                },
                "required": ["mode", "text"]
            }),
        }
    }

    async fn run(&self, input: Value) -> ViewResult {
        let input: Input = parse_input(input)?;
        let output = match input.mode {
            Mode::Encode => urlencoding::encode(&input.text).into_owned(),
            Mode::Decode => {
                // Form encoding uses '+' for spaces.
                let text = input.text.replace('+', " ");
                urlencoding::decode(&text)
                    .map_err(|e| ViewError::InvalidInput(format!("invalid encoding: {}", e)))?
                    .into_owned()
            }
        };
        to_output(&Output { output })
    }
}
