use async_trait::async_trait;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::views::{parse_input, to_output, ToolView, ViewError, ViewInfo, ViewResult};

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
enum Mode {
    Encode,
    Decode,
}

#[derive(Debug, Deserialize)]
struct Input {
    mode: Mode,
    #[serde(default)]
    text: String,
    #[serde(default)]
    data: String,
    #[serde(default)]
    url_safe: bool,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Output {
    Encoded {
        data: String,
    },
    Text {
        text: String,
    },
    Binary {
        mime_type: String,
        size: usize,
        data_url: String,
    },
}

/// Base64 encoding and decoding of text and binary payloads.
pub struct Base64Converter;

#[async_trait]
impl ToolView for Base64Converter {
    fn info(&self) -> ViewInfo {
        ViewInfo {
            component: "Base64Converter",
            summary: "Encode text to Base64 or decode Base64 to text or files",
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "mode": { "enum": ["encode", "decode"] },
                    "text": { "type": "string" },
                    "data": { "type": "string", "description": "Base64 payload or data: URL" },
                    "url_safe": { "type": "boolean" }
                },
                "required": ["mode"]
            }),
        }
    }

    async fn run(&self, input: Value) -> ViewResult {
        let input: Input = parse_input(input)?;
        let output = match input.mode {
            Mode::Encode => {
                let data = if input.url_safe {
                    URL_SAFE.encode(input.text.as_bytes())
                } else {
                    STANDARD.encode(input.text.as_bytes())
                };
                Output::Encoded { data }
            }
            Mode::Decode => decode(&input.data)?,
        };
        to_output(&output)
    }
}

/// Decodes a payload, accepting both alphabets, missing padding and
/// `data:` URLs.
pub(crate) fn decode_payload(data: &str) -> Result<Vec<u8>, ViewError> {
    let payload = match data.trim().split_once(";base64,") {
        Some((prefix, payload)) if prefix.starts_with("data:") => payload,
        _ => data.trim(),
    };
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    let normalized = compact.replace('-', "+").replace('_', "/");
    let padded = match normalized.len() % 4 {
        2 => format!("{}==", normalized),
        3 => format!("{}=", normalized),
        _ => normalized,
    };
    STANDARD
        .decode(padded.as_bytes())
        .map_err(|e| ViewError::InvalidInput(format!("invalid base64: {}", e)))
}

fn decode(data: &str) -> Result<Output, ViewError> {
    let bytes = decode_payload(data)?;

    // Known binary signatures win over UTF-8 validity.
    if let Some(kind) = infer::get(&bytes) {
        return Ok(binary(kind.mime_type(), &bytes));
    }
    match String::from_utf8(bytes) {
        Ok(text) => Ok(Output::Text { text }),
        Err(err) => Ok(binary("application/octet-stream", err.as_bytes())),
    }
}

fn binary(mime_type: &str, bytes: &[u8]) -> Output {
    Output::Binary {
        mime_type: mime_type.to_string(),
        size: bytes.len(),
        data_url: format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes)),
    }
}
