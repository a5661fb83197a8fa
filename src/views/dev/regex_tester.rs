use async_trait::async_trait;
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::views::{parse_input, to_output, ToolView, ViewError, ViewInfo, ViewResult};

/// Compiled programs above this size are rejected.
const SIZE_LIMIT: usize = 1 << 20;

#[derive(Debug, Deserialize)]
struct Input {
    pattern: String,
    text: String,
    #[serde(default = "default_flags")]
    flags: String,
}

fn default_flags() -> String {
    "g".to_string()
}

#[derive(Debug, Serialize)]
struct Output {
    match_count: usize,
    matches: Vec<Match>,
}

#[derive(Debug, Serialize)]
struct Match {
    text: String,
    start: usize,
    end: usize,
    groups: Vec<Group>,
}

#[derive(Debug, Serialize)]
struct Group {
    index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    text: Option<String>,
}

/// Runs a regular expression against sample text.
pub struct RegexTester;

#[async_trait]
impl ToolView for RegexTester {
    fn info(&self) -> ViewInfo {
        ViewInfo {
            component: "RegexTester",
            summary: "Test a regular expression against text",
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "pattern": { "type": "string" },
                    "text": { "type": "string" },
                    "flags": { "type": "string", "description": "any of g, i, m, s" }
                },
                "required": ["pattern", "text"]
            }),
        }
    }

    async fn run(&self, input: Value) -> ViewResult {
        let input: Input = parse_input(input)?;

        let mut builder = RegexBuilder::new(&input.pattern);
        builder.size_limit(SIZE_LIMIT);
        let mut global = false;
        for flag in input.flags.chars() {
            match flag {
                'g' => global = true,
                'i' => {
                    builder.case_insensitive(true);
                }
                'm' => {
                    builder.multi_line(true);
                }
                's' => {
                    builder.dot_matches_new_line(true);
                }
                other => {
                    return Err(ViewError::InvalidInput(format!("unknown flag '{}'", other)))
                }
            }
        }
        let regex = builder
            .build()
            .map_err(|e| ViewError::InvalidInput(e.to_string()))?;

        let names: Vec<Option<String>> = regex
            .capture_names()
            .map(|name| name.map(str::to_string))
            .collect();

        let mut matches = Vec::new();
        for captures in regex.captures_iter(&input.text) {
            let Some(whole) = captures.get(0) else {
                continue;
            };
            let groups = (1..captures.len())
                .map(|index| Group {
                    index,
                    name: names.get(index).cloned().flatten(),
                    text: captures.get(index).map(|m| m.as_str().to_string()),
                })
                .collect();
            matches.push(Match {
                text: whole.as_str().to_string(),
                start: whole.start(),
                end: whole.end(),
                groups,
            });
            if !global {
                break;
            }
        }

        to_output(&Output {
            match_count: matches.len(),
            matches,
        })
    }
}
