use ::image::codecs::jpeg::JpegEncoder;
use ::image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use ::image::imageops::FilterType;
use ::image::{DynamicImage, GenericImageView};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::views::dev::decode_payload;
use crate::views::{parse_input, to_output, ToolView, ViewError, ViewInfo, ViewResult};

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
enum Format {
    Jpeg,
    Png,
}

impl Format {
    fn mime_type(self) -> &'static str {
        match self {
            Format::Jpeg => "image/jpeg",
            Format::Png => "image/png",
        }
    }
}

#[derive(Debug, Deserialize)]
struct Input {
    data: String,
    #[serde(default = "default_quality")]
    quality: u8,
    max_width: Option<u32>,
    format: Option<Format>,
}

fn default_quality() -> u8 {
    75
}

#[derive(Debug, Serialize)]
struct Output {
    mime_type: &'static str,
    width: u32,
    height: u32,
    original_size: usize,
    compressed_size: usize,
    ratio: f64,
    data_url: String,
}

/// Re-encodes images at a lower quality and optionally a smaller width.
pub struct ImageCompressor;

#[async_trait]
impl ToolView for ImageCompressor {
    fn info(&self) -> ViewInfo {
        ViewInfo {
            component: "ImageCompressor",
            summary: "Compress JPEG and PNG images",
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "data": { "type": "string", "description": "Base64 payload or data: URL" },
                    "quality": { "type": "integer", "minimum": 1, "maximum": 100 },
                    "max_width": { "type": "integer", "minimum": 1 },
                    "format": { "enum": ["jpeg", "png"] }
                },
                "required": ["data"]
            }),
        }
    }

    async fn run(&self, input: Value) -> ViewResult {
        let input: Input = parse_input(input)?;
        if !(1..=100).contains(&input.quality) {
            return Err(ViewError::InvalidInput(
                "quality must be between 1 and 100".to_string(),
            ));
        }
        if input.max_width == Some(0) {
            return Err(ViewError::InvalidInput("max_width must be positive".to_string()));
        }
        let bytes = decode_payload(&input.data)?;

        let output = tokio::task::spawn_blocking(move || compress(&bytes, &input))
            .await
            .map_err(|e| ViewError::Internal(e.to_string()))??;
        to_output(&output)
    }
}

fn compress(bytes: &[u8], input: &Input) -> Result<Output, ViewError> {
    let source_format = match infer::get(bytes).map(|kind| kind.mime_type()) {
        Some("image/jpeg") => Format::Jpeg,
        Some("image/png") => Format::Png,
        Some(other) => {
            return Err(ViewError::InvalidInput(format!(
                "unsupported image type {}",
                other
            )))
        }
        None => return Err(ViewError::InvalidInput("payload is not an image".to_string())),
    };
    let format = input.format.unwrap_or(source_format);

    let mut image = ::image::load_from_memory(bytes)
        .map_err(|e| ViewError::InvalidInput(format!("cannot decode image: {}", e)))?;

    let (width, height) = image.dimensions();
    if let Some(max_width) = input.max_width {
        if width > max_width {
            let scaled = (height as u64 * max_width as u64 / width as u64).max(1) as u32;
            image = image.resize_exact(max_width, scaled, FilterType::Lanczos3);
        }
    }

    let mut encoded = Vec::new();
    let written = match format {
        Format::Jpeg => {
            let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut encoded, input.quality))
        }
        Format::Png => image.write_with_encoder(PngEncoder::new_with_quality(
            &mut encoded,
            CompressionType::Best,
            PngFilter::Adaptive,
        )),
    };
    written.map_err(|e| ViewError::Internal(format!("cannot encode image: {}", e)))?;

    let (width, height) = image.dimensions();
    let ratio = encoded.len() as f64 / bytes.len() as f64;
    Ok(Output {
        mime_type: format.mime_type(),
        width,
        height,
        original_size: bytes.len(),
        compressed_size: encoded.len(),
        ratio: (ratio * 1000.0).round() / 1000.0,
        data_url: format!("data:{};base64,{}", format.mime_type(), STANDARD.encode(&encoded)),
    })
}
