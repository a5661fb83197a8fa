use async_trait::async_trait;
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::color::normalize_to_hex;
use crate::views::{parse_input, to_output, ToolView, ViewError, ViewInfo, ViewResult};

const MIN_SIZE: u32 = 64;
const MAX_SIZE: u32 = 2048;

#[derive(Debug, Deserialize, Clone, Copy)]
enum Level {
    L,
    M,
    Q,
    H,
}

impl From<Level> for EcLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::L => EcLevel::L,
            Level::M => EcLevel::M,
            Level::Q => EcLevel::Q,
            Level::H => EcLevel::H,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Input {
    text: String,
    #[serde(default = "default_level")]
    ec_level: Level,
    #[serde(default = "default_size")]
    size: u32,
    #[serde(default = "default_dark")]
    dark_color: String,
    #[serde(default = "default_light")]
    light_color: String,
}

fn default_level() -> Level {
    Level::M
}

fn default_size() -> u32 {
    256
}

fn default_dark() -> String {
    "#000000".to_string()
}

fn default_light() -> String {
    "#ffffff".to_string()
}

#[derive(Debug, Serialize)]
struct Output {
    svg: String,
    modules: usize,
}

/// Renders text or URLs as QR codes in SVG.
pub struct QrCodeGenerator;

#[async_trait]
impl ToolView for QrCodeGenerator {
    fn info(&self) -> ViewInfo {
        ViewInfo {
            component: "QrCodeGenerator",
            summary: "Generate a QR code for text or a URL",
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string" },
                    "ec_level": { "enum": ["L", "M", "Q", "H"] },
                    "size": { "type": "integer", "minimum": MIN_SIZE, "maximum": MAX_SIZE },
                    "dark_color": { "type": "string" },
                    "light_color": { "type": "string" }
                },
                "required": ["text"]
            }),
        }
    }

    async fn run(&self, input: Value) -> ViewResult {
        let input: Input = parse_input(input)?;
        if input.text.is_empty() {
            return Err(ViewError::InvalidInput("text is empty".to_string()));
        }
        if !(MIN_SIZE..=MAX_SIZE).contains(&input.size) {
            return Err(ViewError::InvalidInput(format!(
                "size must be between {} and {}",
                MIN_SIZE, MAX_SIZE
            )));
        }

        let dark = svg_color("dark_color", &input.dark_color)?;
        let light = svg_color("light_color", &input.light_color)?;

        let code = QrCode::with_error_correction_level(input.text.as_bytes(), input.ec_level.into())
            .map_err(|e| ViewError::InvalidInput(format!("cannot encode text: {}", e)))?;
        let svg = code
            .render::<svg::Color>()
            .min_dimensions(input.size, input.size)
            .dark_color(svg::Color(&dark))
            .light_color(svg::Color(&light))
            .build();

        to_output(&Output {
            svg,
            modules: code.width(),
        })
    }
}

/// Colours are written into SVG attributes verbatim, so only values that
/// parse as a colour are accepted, and they are re-rendered as hex.
fn svg_color(field: &str, value: &str) -> Result<String, ViewError> {
    normalize_to_hex(value)
        .ok_or_else(|| ViewError::InvalidInput(format!("{} is not a colour: '{}'", field, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn renders_svg() {
        let out = QrCodeGenerator
            .run(json!({ "text": "https://example.com" }))
            .await
            .unwrap();
        let svg = out["svg"].as_str().unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("#000000"));
        assert!(out["modules"].as_u64().unwrap() >= 21);
    }

    #[tokio::test]
    async fn higher_correction_needs_more_modules() {
        let text = "a fairly long piece of text that needs a few versions";
        let low = QrCodeGenerator
            .run(json!({ "text": text, "ec_level": "L" }))
            .await
            .unwrap();
        let high = QrCodeGenerator
            .run(json!({ "text": text, "ec_level": "H" }))
            .await
            .unwrap();
        assert!(high["modules"].as_u64() > low["modules"].as_u64());
    }

    #[tokio::test]
    async fn rejects_oversized_and_empty_input() {
        let huge = "x".repeat(8000);
        assert!(QrCodeGenerator.run(json!({ "text": huge })).await.is_err());
        assert!(QrCodeGenerator.run(json!({ "text": "" })).await.is_err());
        assert!(QrCodeGenerator
            .run(json!({ "text": "a", "size": 8 }))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn normalizes_custom_colours() {
        let out = QrCodeGenerator
            .run(json!({ "text": "a", "dark_color": "rgb(255, 0, 0)", "light_color": "#FFF" }))
            .await
            .unwrap();
        let svg = out["svg"].as_str().unwrap();
        assert!(svg.contains("#ff0000"));
        assert!(svg.contains("#ffffff"));
    }

    #[tokio::test]
    async fn rejects_colours_that_are_not_colours() {
        let markup = "#000\"/><script>alert(1)</script><x a=\"";
        let result = QrCodeGenerator
            .run(json!({ "text": "a", "dark_color": markup }))
            .await;
        assert!(matches!(result, Err(ViewError::InvalidInput(_))));

        let result = QrCodeGenerator
            .run(json!({ "text": "a", "light_color": "white" }))
            .await;
        assert!(matches!(result, Err(ViewError::InvalidInput(_))));
    }
}
