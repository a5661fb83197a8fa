use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::views::{parse_input, to_output, ToolView, ViewError, ViewInfo, ViewResult};

/// Timestamps at or above this magnitude are taken as milliseconds.
const MILLIS_THRESHOLD: i64 = 1_000_000_000_000;

const MAX_OFFSET_MINUTES: i32 = 1440;

const LOCAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
enum Unit {
    Seconds,
    Milliseconds,
}

#[derive(Debug, Deserialize)]
struct Input {
    timestamp: Option<i64>,
    unit: Option<Unit>,
    datetime: Option<String>,
    #[serde(default)]
    utc_offset_minutes: i32,
}

#[derive(Debug, Serialize)]
struct Output {
    seconds: i64,
    milliseconds: i64,
    iso8601: String,
    local: String,
    utc_offset_minutes: i32,
}

/// Converts between Unix timestamps and calendar dates.
pub struct TimestampConverter;

#[async_trait]
impl ToolView for TimestampConverter {
    fn info(&self) -> ViewInfo {
        ViewInfo {
            component: "TimestampConverter",
            summary: "Convert Unix timestamps to dates and back",
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "timestamp": { "type": "integer" },
                    "unit": { "enum": ["seconds", "milliseconds"] },
                    "datetime": { "type": "string" },
                    "utc_offset_minutes": {
                        "type": "integer",
                        "minimum": -MAX_OFFSET_MINUTES,
                        "maximum": MAX_OFFSET_MINUTES
                    }
                }
            }),
        }
    }

    async fn run(&self, input: Value) -> ViewResult {
        let input: Input = parse_input(input)?;
        let offset = utc_offset(input.utc_offset_minutes).ok_or_else(|| {
            ViewError::InvalidInput(format!(
                "utc_offset_minutes out of range: {}",
                input.utc_offset_minutes
            ))
        })?;

        let instant = match (input.timestamp, input.datetime.as_deref()) {
            (Some(_), Some(_)) => {
                return Err(ViewError::InvalidInput(
                    "provide either timestamp or datetime, not both".to_string(),
                ))
            }
            (Some(timestamp), None) => from_timestamp(timestamp, input.unit)?,
            (None, Some(text)) => parse_datetime(text, offset)?,
            (None, None) => Utc::now(),
        };

        to_output(&Output {
            seconds: instant.timestamp(),
            milliseconds: instant.timestamp_millis(),
            iso8601: instant.to_rfc3339(),
            local: instant.with_timezone(&offset).format(LOCAL_FORMAT).to_string(),
            utc_offset_minutes: input.utc_offset_minutes,
        })
    }
}

/// Offsets are limited to a day either way.
fn utc_offset(minutes: i32) -> Option<FixedOffset> {
    if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&minutes) {
        return None;
    }
    minutes.checked_mul(60).and_then(FixedOffset::east_opt)
}

fn from_timestamp(timestamp: i64, unit: Option<Unit>) -> Result<DateTime<Utc>, ViewError> {
    let unit = unit.unwrap_or(if timestamp.abs() >= MILLIS_THRESHOLD {
        Unit::Milliseconds
    } else {
        Unit::Seconds
    });
    let instant = match unit {
        Unit::Seconds => DateTime::from_timestamp(timestamp, 0),
        Unit::Milliseconds => DateTime::from_timestamp_millis(timestamp),
    };
    instant.ok_or_else(|| ViewError::InvalidInput(format!("timestamp out of range: {}", timestamp)))
}

fn parse_datetime(text: &str, offset: FixedOffset) -> Result<DateTime<Utc>, ViewError> {
    let text = text.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Ok(instant.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(text, LOCAL_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| {
            chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .map(|date| date.and_hms_opt(0, 0, 0).unwrap_or_default())
        })
        .map_err(|_| ViewError::InvalidInput(format!("unrecognized date: '{}'", text)))?;

    offset
        .from_local_datetime(&naive)
        .single()
        .map(|instant| instant.with_timezone(&Utc))
        .ok_or_else(|| ViewError::InvalidInput(format!("ambiguous date: '{}'", text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn converts_seconds_to_date() {
        let out = TimestampConverter
            .run(json!({ "timestamp": 1_700_000_000 }))
            .await
            .unwrap();
        assert_eq!(out["iso8601"], "2023-11-14T22:13:20+00:00");
        assert_eq!(out["local"], "2023-11-14 22:13:20");
        assert_eq!(out["milliseconds"], 1_700_000_000_000i64);
    }

    #[tokio::test]
    async fn detects_milliseconds_by_magnitude() {
        let out = TimestampConverter
            .run(json!({ "timestamp": 1_700_000_000_123i64 }))
            .await
            .unwrap();
        assert_eq!(out["seconds"], 1_700_000_000);
        assert_eq!(out["milliseconds"], 1_700_000_000_123i64);
    }

    #[tokio::test]
    async fn applies_offset_to_local_rendering() {
        let out = TimestampConverter
            .run(json!({ "timestamp": 0, "utc_offset_minutes": 480 }))
            .await
            .unwrap();
        assert_eq!(out["local"], "1970-01-01 08:00:00");
    }

    #[tokio::test]
    async fn parses_local_datetime_at_offset() {
        let out = TimestampConverter
            .run(json!({ "datetime": "1970-01-01 08:00:00", "utc_offset_minutes": 480 }))
            .await
            .unwrap();
        assert_eq!(out["seconds"], 0);
    }

    #[tokio::test]
    async fn parses_rfc3339() {
        let out = TimestampConverter
            .run(json!({ "datetime": "2024-01-01T00:00:00Z" }))
            .await
            .unwrap();
        assert_eq!(out["seconds"], 1_704_067_200);
    }

    #[tokio::test]
    async fn rejects_garbage_and_conflicting_input() {
        assert!(TimestampConverter
            .run(json!({ "datetime": "yesterday-ish" }))
            .await
            .is_err());
        assert!(TimestampConverter
            .run(json!({ "datetime": "2024-01-01", "timestamp": 1 }))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn empty_input_returns_now() {
        let out = TimestampConverter.run(Value::Null).await.unwrap();
        assert!(out["seconds"].as_i64().unwrap() > 1_700_000_000);
    }

    #[tokio::test]
    async fn rejects_offsets_beyond_a_day() {
        for minutes in [100_000_000, -1441, i32::MIN] {
            let result = TimestampConverter
                .run(json!({ "timestamp": 0, "utc_offset_minutes": minutes }))
                .await;
            assert!(
                matches!(result, Err(ViewError::InvalidInput(_))),
                "offset {} accepted",
                minutes
            );
        }

        let out = TimestampConverter
            .run(json!({ "timestamp": 0, "utc_offset_minutes": -1440 }))
            .await
            .unwrap();
        assert_eq!(out["local"], "1969-12-31 00:00:00");
    }
}
