use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::views::{parse_input, to_output, ToolView, ViewError, ViewInfo, ViewResult};

/// A unit expressed as a linear mapping onto its category's base unit:
/// `base = value * factor + offset`.
#[derive(Debug, Clone, Copy)]
struct Unit {
    symbol: &'static str,
    name: &'static str,
    factor: f64,
    offset: f64,
}

const fn linear(symbol: &'static str, name: &'static str, factor: f64) -> Unit {
    Unit {
        symbol,
        name,
        factor,
        offset: 0.0,
    }
}

const LENGTH: &[Unit] = &[
    linear("mm", "毫米", 0.001),
    linear("cm", "厘米", 0.01),
    linear("m", "米", 1.0),
    linear("km", "千米", 1000.0),
    linear("in", "英寸", 0.0254),
    linear("ft", "英尺", 0.3048),
    linear("yd", "码", 0.9144),
    linear("mi", "英里", 1609.344),
    linear("li", "里", 500.0),
    linear("chi", "尺", 1.0 / 3.0),
];

const MASS: &[Unit] = &[
    linear("mg", "毫克", 0.000_001),
    linear("g", "克", 0.001),
    linear("kg", "千克", 1.0),
    linear("t", "吨", 1000.0),
    linear("oz", "盎司", 0.028_349_523_125),
    linear("lb", "磅", 0.453_592_37),
    linear("jin", "斤", 0.5),
    linear("liang", "两", 0.05),
];

const TEMPERATURE: &[Unit] = &[
    linear("c", "摄氏度", 1.0),
    Unit {
        symbol: "f",
        name: "华氏度",
        factor: 5.0 / 9.0,
        offset: -160.0 / 9.0,
    },
    Unit {
        symbol: "k",
        name: "开尔文",
        factor: 1.0,
        offset: -273.15,
    },
];

const AREA: &[Unit] = &[
    linear("m2", "平方米", 1.0),
    linear("km2", "平方千米", 1_000_000.0),
    linear("ha", "公顷", 10_000.0),
    linear("mu", "亩", 2000.0 / 3.0),
    linear("ft2", "平方英尺", 0.092_903_04),
    linear("acre", "英亩", 4_046.856_422_4),
];

const VOLUME: &[Unit] = &[
    linear("ml", "毫升", 0.001),
    linear("l", "升", 1.0),
    linear("m3", "立方米", 1000.0),
    linear("gal", "美制加仑", 3.785_411_784),
    linear("cup", "杯", 0.236_588_236_5),
];

const DATA: &[Unit] = &[
    linear("b", "字节", 1.0),
    linear("kb", "KB", 1024.0),
    linear("mb", "MB", 1_048_576.0),
    linear("gb", "GB", 1_073_741_824.0),
    linear("tb", "TB", 1_099_511_627_776.0),
    linear("bit", "比特", 0.125),
];

const TIME: &[Unit] = &[
    linear("ms", "毫秒", 0.001),
    linear("s", "秒", 1.0),
    linear("min", "分钟", 60.0),
    linear("h", "小时", 3600.0),
    linear("d", "天", 86_400.0),
    linear("wk", "周", 604_800.0),
];

const SPEED: &[Unit] = &[
    linear("mps", "米/秒", 1.0),
    linear("kmh", "千米/时", 1000.0 / 3600.0),
    linear("mph", "英里/时", 0.447_04),
    linear("kn", "节", 1852.0 / 3600.0),
];

const CATEGORIES: &[(&str, &[Unit])] = &[
    ("length", LENGTH),
    ("mass", MASS),
    ("temperature", TEMPERATURE),
    ("area", AREA),
    ("volume", VOLUME),
    ("data", DATA),
    ("time", TIME),
    ("speed", SPEED),
];

#[derive(Debug, Deserialize)]
struct Input {
    category: Option<String>,
    value: Option<f64>,
    from: Option<String>,
    to: Option<String>,
}

#[derive(Debug, Serialize)]
struct Conversion {
    category: String,
    value: f64,
    from: &'static str,
    to: &'static str,
    result: f64,
    formula: String,
}

#[derive(Debug, Serialize)]
struct UnitListing {
    symbol: &'static str,
    name: &'static str,
}

/// Converts values between units of the same physical category.
pub struct UnitConverter {
    tables: HashMap<&'static str, HashMap<&'static str, Unit>>,
}

impl UnitConverter {
    /// Builds the lookup tables for every category.
    pub fn load() -> Self {
        let tables = CATEGORIES
            .iter()
            .map(|(category, units)| {
                let by_symbol = units.iter().map(|unit| (unit.symbol, *unit)).collect();
                (*category, by_symbol)
            })
            .collect();
        Self { tables }
    }

    fn convert(&self, category: &str, value: f64, from: &str, to: &str) -> Result<Conversion, ViewError> {
        let table = self
            .tables
            .get(category)
            .ok_or_else(|| ViewError::InvalidInput(format!("unknown category '{}'", category)))?;
        let lookup = |symbol: &str| {
            table.get(symbol.to_ascii_lowercase().as_str()).copied().ok_or_else(|| {
                ViewError::InvalidInput(format!("unknown {} unit '{}'", category, symbol))
            })
        };
        let from = lookup(from)?;
        let to = lookup(to)?;
        if !value.is_finite() {
            return Err(ViewError::InvalidInput("value must be finite".to_string()));
        }

        let base = value * from.factor + from.offset;
        let result = (base - to.offset) / to.factor;
        Ok(Conversion {
            category: category.to_string(),
            value,
            from: from.symbol,
            to: to.symbol,
            result: round_significant(result),
            formula: format!("1 {} = {} {}", from.symbol, round_significant(from.factor / to.factor), to.symbol),
        })
    }

    fn listing(&self) -> Value {
        let categories: serde_json::Map<String, Value> = CATEGORIES
            .iter()
            .map(|(category, units)| {
                let units: Vec<UnitListing> = units
                    .iter()
                    .map(|u| UnitListing {
                        symbol: u.symbol,
                        name: u.name,
                    })
                    .collect();
                (category.to_string(), serde_json::json!(units))
            })
            .collect();
        serde_json::json!({ "categories": categories })
    }
}

/// Rounds to 12 significant digits to hide binary floating point noise.
fn round_significant(value: f64) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let digits = 12 - value.abs().log10().ceil() as i32;
    let scale = 10f64.powi(digits);
    (value * scale).round() / scale
}

#[async_trait]
impl ToolView for UnitConverter {
    fn info(&self) -> ViewInfo {
        ViewInfo {
            component: "UnitConverter",
            summary: "Convert between units of length, mass, temperature and more",
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "category": { "enum": CATEGORIES.iter().map(|(c, _)| *c).collect::<Vec<_>>() },
                    "value": { "type": "number" },
                    "from": { "type": "string" },
                    "to": { "type": "string" }
                },
                "description": "Without a value, lists the known units"
            }),
        }
    }

    async fn run(&self, input: Value) -> ViewResult {
        let input: Input = parse_input(input)?;
        match (input.category, input.value, input.from, input.to) {
            (Some(category), Some(value), Some(from), Some(to)) => {
                to_output(&self.convert(&category, value, &from, &to)?)
            }
            (None, None, None, None) => Ok(self.listing()),
            _ => Err(ViewError::InvalidInput(
                "category, value, from and to are required".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn convert(category: &str, value: f64, from: &str, to: &str) -> f64 {
        UnitConverter::load()
            .convert(category, value, from, to)
            .unwrap()
            .result
    }

    #[test]
    fn linear_conversions() {
        assert_eq!(convert("length", 1.0, "km", "m"), 1000.0);
        assert_eq!(convert("length", 12.0, "in", "ft"), 1.0);
        assert_eq!(convert("mass", 1.0, "kg", "jin"), 2.0);
        assert_eq!(convert("data", 1.0, "gb", "mb"), 1024.0);
        assert_eq!(convert("time", 2.0, "h", "min"), 120.0);
        assert_eq!(convert("area", 1.0, "ha", "mu"), 15.0);
    }

    #[test]
    fn temperature_uses_offsets() {
        assert_eq!(convert("temperature", 100.0, "c", "f"), 212.0);
        assert_eq!(convert("temperature", 32.0, "F", "C"), 0.0);
        assert_eq!(convert("temperature", 0.0, "c", "k"), 273.15);
        assert_eq!(convert("temperature", -40.0, "f", "c"), -40.0);
    }

    #[test]
    fn unknown_units_are_rejected() {
        let converter = UnitConverter::load();
        assert!(converter.convert("length", 1.0, "kg", "m").is_err());
        assert!(converter.convert("volume", 1.0, "l", "parsec").is_err());
        assert!(converter.convert("luminosity", 1.0, "lm", "cd").is_err());
    }

    #[tokio::test]
    async fn lists_units_without_input() {
        let out = UnitConverter::load().run(Value::Null).await.unwrap();
        assert_eq!(out["categories"].as_object().unwrap().len(), 8);
        assert_eq!(out["categories"]["length"][2]["symbol"], "m");
    }

    #[tokio::test]
    async fn partial_input_is_rejected() {
        let err = UnitConverter::load()
            .run(json!({ "category": "length", "value": 1 }))
            .await
            .unwrap_err();
        assert!(matches!(err, ViewError::InvalidInput(_)));
    }
}
