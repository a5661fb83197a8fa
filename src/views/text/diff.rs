use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use similar::{ChangeTag, TextDiff as LineDiff};

use crate::views::{parse_input, to_output, ToolView, ViewInfo, ViewResult};

#[derive(Debug, Deserialize)]
struct Input {
    #[serde(default)]
    old: String,
    #[serde(default)]
    new: String,
    #[serde(default = "default_context")]
    context: usize,
}

fn default_context() -> usize {
    3
}

#[derive(Debug, Serialize)]
struct Output {
    identical: bool,
    similarity: f32,
    insertions: usize,
    deletions: usize,
    lines: Vec<Line>,
    unified: String,
}

#[derive(Debug, Serialize)]
struct Line {
    tag: &'static str,
    /// 1-based line number in the old text.
    #[serde(skip_serializing_if = "Option::is_none")]
    old_line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_line: Option<usize>,
    text: String,
}

/// Line-by-line comparison of two texts.
pub struct TextDiff;

#[async_trait]
impl ToolView for TextDiff {
    fn info(&self) -> ViewInfo {
        ViewInfo {
            component: "TextDiff",
            summary: "Compare two texts line by line",
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "old": { "type": "string" },
                    "new": { "type": "string" },
                    "context": { "type": "integer", "minimum": 0 }
                }
            }),
        }
    }

    async fn run(&self, input: Value) -> ViewResult {
        let input: Input = parse_input(input)?;
        let diff = LineDiff::from_lines(&input.old, &input.new);

        let mut insertions = 0;
        let mut deletions = 0;
        let lines = diff
            .iter_all_changes()
            .map(|change| {
                let tag = match change.tag() {
                    ChangeTag::Equal => "equal",
                    ChangeTag::Insert => {
                        insertions += 1;
                        "insert"
                    }
                    ChangeTag::Delete => {
                        deletions += 1;
                        "delete"
                    }
                };
                Line {
                    tag,
                    old_line: change.old_index().map(|i| i + 1),
                    new_line: change.new_index().map(|i| i + 1),
                    text: change.value().trim_end_matches(['\r', '\n']).to_string(),
                }
            })
            .collect();

        let unified = diff
            .unified_diff()
            .context_radius(input.context)
            .header("old", "new")
            .to_string();

        to_output(&Output {
            identical: input.old == input.new,
            similarity: diff.ratio(),
            insertions,
            deletions,
            lines,
            unified,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn reports_changed_lines_with_numbers() {
        let out = TextDiff
            .run(json!({ "old": "a\nb\nc\n", "new": "a\nB\nc\nd\n" }))
            .await
            .unwrap();
        assert_eq!(out["identical"], false);
        assert_eq!(out["insertions"], 2);
        assert_eq!(out["deletions"], 1);

        let lines = out["lines"].as_array().unwrap();
        let deleted = lines.iter().find(|l| l["tag"] == "delete").unwrap();
        assert_eq!(deleted["text"], "b");
        assert_eq!(deleted["old_line"], 2);
        assert!(deleted.get("new_line").is_none());

        let last = lines.last().unwrap();
        assert_eq!(last["tag"], "insert");
        assert_eq!(last["new_line"], 4);
        assert!(out["unified"].as_str().unwrap().contains("+B"));
    }

    #[tokio::test]
    async fn identical_texts() {
        let out = TextDiff
            .run(json!({ "old": "same\n", "new": "same\n" }))
            .await
            .unwrap();
        assert_eq!(out["identical"], true);
        assert_eq!(out["similarity"], 1.0);
        assert_eq!(out["unified"], "");
    }
}
