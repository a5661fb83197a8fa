use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::views::{parse_input, to_output, ToolView, ViewError, ViewInfo, ViewResult};

#[derive(Debug, Deserialize)]
struct Input {
    value: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Rgba {
    r: u8,
    g: u8,
    b: u8,
    a: f64,
}

#[derive(Debug, Serialize)]
struct Output {
    hex: String,
    rgb: String,
    hsl: String,
    components: Components,
}

#[derive(Debug, Serialize)]
struct Components {
    r: u8,
    g: u8,
    b: u8,
    a: f64,
    h: f64,
    s: f64,
    l: f64,
}

/// Converts colours between HEX, RGB and HSL notations.
pub struct ColorConverter;

#[async_trait]
impl ToolView for ColorConverter {
    fn info(&self) -> ViewInfo {
        ViewInfo {
            component: "ColorConverter",
            summary: "Convert colours between HEX, RGB and HSL",
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "value": { "type": "string", "description": "#rgb, #rrggbb, #rrggbbaa, rgb(), rgba(), hsl() or hsla()" }
                },
                "required": ["value"]
            }),
        }
    }

    async fn run(&self, input: Value) -> ViewResult {
        let input: Input = parse_input(input)?;
        let color = parse_color(&input.value)
            .ok_or_else(|| ViewError::InvalidInput(format!("unrecognized colour '{}'", input.value)))?;
        let (h, s, l) = rgb_to_hsl(color.r, color.g, color.b);
        let (h, s, l) = (h.round(), s.round(), l.round());
        let opaque = color.a >= 1.0;

        let hex = to_hex(&color);
        let (rgb, hsl) = if opaque {
            (
                format!("rgb({}, {}, {})", color.r, color.g, color.b),
                format!("hsl({}, {}%, {}%)", h, s, l),
            )
        } else {
            let a = (color.a * 100.0).round() / 100.0;
            (
                format!("rgba({}, {}, {}, {})", color.r, color.g, color.b, a),
                format!("hsla({}, {}%, {}%, {})", h, s, l, a),
            )
        };

        to_output(&Output {
            hex,
            rgb,
            hsl,
            components: Components {
                r: color.r,
                g: color.g,
                b: color.b,
                a: color.a,
                h,
                s,
                l,
            },
        })
    }
}

/// Parses any supported colour notation and returns it as lowercase hex,
/// `#rrggbb` or `#rrggbbaa` when translucent.
pub(super) fn normalize_to_hex(value: &str) -> Option<String> {
    parse_color(value).map(|color| to_hex(&color))
}

fn to_hex(color: &Rgba) -> String {
    if color.a >= 1.0 {
        format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
    } else {
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            color.r,
            color.g,
            color.b,
            (color.a * 255.0).round() as u8
        )
    }
}

fn parse_color(value: &str) -> Option<Rgba> {
    let value = value.trim().to_ascii_lowercase();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }
    let (name, args) = value.split_once('(')?;
    let args: Vec<&str> = args
        .strip_suffix(')')?
        .split([',', ' ', '/'])
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .collect();
    let alpha = match args.len() {
        3 => 1.0,
        4 => parse_alpha(args[3])?,
        _ => return None,
    };
    match name.trim() {
        "rgb" | "rgba" => Some(Rgba {
            r: parse_channel(args[0])?,
            g: parse_channel(args[1])?,
            b: parse_channel(args[2])?,
            a: alpha,
        }),
        "hsl" | "hsla" => {
            let h: f64 = args[0].trim_end_matches("deg").parse().ok()?;
            let s = parse_percent(args[1])?;
            let l = parse_percent(args[2])?;
            let (r, g, b) = hsl_to_rgb(h, s, l);
            Some(Rgba { r, g, b, a: alpha })
        }
        _ => None,
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let expanded: String = match hex.len() {
        3 | 4 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => hex.to_string(),
        _ => return None,
    };
    let byte = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some(Rgba {
        r: byte(0)?,
        g: byte(2)?,
        b: byte(4)?,
        a: if expanded.len() == 8 {
            byte(6)? as f64 / 255.0
        } else {
            1.0
        },
    })
}

fn parse_channel(arg: &str) -> Option<u8> {
    match arg.strip_suffix('%') {
        Some(pct) => {
            let pct: f64 = pct.parse().ok()?;
            (0.0..=100.0)
                .contains(&pct)
                .then(|| (pct * 2.55).round() as u8)
        }
        None => {
            let value: f64 = arg.parse().ok()?;
            (0.0..=255.0).contains(&value).then(|| value.round() as u8)
        }
    }
}

fn parse_alpha(arg: &str) -> Option<f64> {
    let alpha = match arg.strip_suffix('%') {
        Some(pct) => pct.parse::<f64>().ok()? / 100.0,
        None => arg.parse().ok()?,
    };
    (0.0..=1.0).contains(&alpha).then_some(alpha)
}

fn parse_percent(arg: &str) -> Option<f64> {
    let value: f64 = arg.strip_suffix('%').unwrap_or(arg).parse().ok()?;
    (0.0..=100.0).contains(&value).then_some(value)
}

/// Hue in degrees, saturation and lightness in percent.
fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let (r, g, b) = (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let delta = max - min;
    if delta == 0.0 {
        return (0.0, 0.0, l * 100.0);
    }
    let s = delta / (1.0 - (2.0 * l - 1.0).abs());
    let h = if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    (h, s * 100.0, l * 100.0)
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    let h = h.rem_euclid(360.0);
    let (s, l) = (s / 100.0, l / 100.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = l - c / 2.0;
    let (r, g, b) = match h as u32 / 60 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (channel(r), channel(g), channel(b))
}
