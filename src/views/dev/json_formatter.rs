use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::views::{parse_input, to_output, ToolView, ViewError, ViewInfo, ViewResult};

const MAX_INDENT: usize = 8;

#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
enum Mode {
    #[default]
    Format,
    Minify,
    Validate,
}

#[derive(Debug, Deserialize)]
struct Input {
    text: String,
    #[serde(default)]
    mode: Mode,
    #[serde(default = "default_indent")]
    indent: usize,
    #[serde(default)]
    sort_keys: bool,
}

fn default_indent() -> usize {
    2
}

#[derive(Debug, Serialize)]
struct Output {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<SyntaxError>,
}

#[derive(Debug, Serialize)]
struct SyntaxError {
    message: String,
    line: usize,
    column: usize,
}

/// Pretty-prints, minifies or validates JSON text.
pub struct JsonFormatter;

#[async_trait]
impl ToolView for JsonFormatter {
    fn info(&self) -> ViewInfo {
        ViewInfo {
            component: "JsonFormatter",
            summary: "Format, minify or validate JSON",
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string" },
                    "mode": { "enum": ["format", "minify", "validate"] },
                    "indent": { "type": "integer", "minimum": 0, "maximum": MAX_INDENT },
                    "sort_keys": { "type": "boolean" }
                },
                "required": ["text"]
            }),
        }
    }

    async fn run(&self, input: Value) -> ViewResult {
        let input: Input = parse_input(input)?;
        if input.indent > MAX_INDENT {
            return Err(ViewError::InvalidInput(format!(
                "indent must be at most {}",
                MAX_INDENT
            )));
        }

        let parsed: Value = match serde_json::from_str(&input.text) {
            Ok(value) => value,
            Err(err) => {
                return to_output(&Output {
                    valid: false,
                    output: None,
                    error: Some(SyntaxError {
                        message: err.to_string(),
                        line: err.line(),
                        column: err.column(),
                    }),
                })
            }
        };
        let parsed = if input.sort_keys {
            sort_keys(parsed)
        } else {
            parsed
        };

        let output = match input.mode {
            Mode::Validate => None,
            Mode::Minify => Some(
                serde_json::to_string(&parsed).map_err(|e| ViewError::Internal(e.to_string()))?,
            ),
            Mode::Format => Some(pretty(&parsed, input.indent)?),
        };

        to_output(&Output {
            valid: true,
            output,
            error: None,
        })
    }
}

fn pretty(value: &Value, indent: usize) -> Result<String, ViewError> {
    let indent = " ".repeat(indent);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| ViewError::Internal(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| ViewError::Internal(e.to_string()))
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, sort_keys(value)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
