use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::views::{parse_input, to_output, ToolView, ViewInfo, ViewResult};

#[derive(Debug, Deserialize)]
struct Input {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct Output {
    camel: String,
    pascal: String,
    snake: String,
    kebab: String,
    constant: String,
    dot: String,
    title: String,
    upper: String,
    lower: String,
}

/// Converts identifiers and phrases between naming conventions.
pub struct CaseConverter;

#[async_trait]
impl ToolView for CaseConverter {
    fn info(&self) -> ViewInfo {
        ViewInfo {
            component: "CaseConverter",
            summary: "Convert text between camelCase, snake_case and friends",
            input_schema: serde_json::json!({
                "type": "object",
                "properties": { "text": { "type": "string" } }
            }),
        }
    }

    async fn run(&self, input: Value) -> ViewResult {
        let input: Input = parse_input(input)?;
        to_output(&convert(&input.text))
    }
}

fn convert(text: &str) -> Output {
    let words = split_words(text);
    let lower: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
    let capitalized: Vec<String> = words.iter().map(|w| capitalize(w)).collect();

    let camel = lower
        .iter()
        .take(1)
        .cloned()
        .chain(capitalized.iter().skip(1).cloned())
        .collect::<String>();

    Output {
        camel,
        pascal: capitalized.concat(),
        snake: lower.join("_"),
        kebab: lower.join("-"),
        constant: lower.join("_").to_uppercase(),
        dot: lower.join("."),
        title: capitalized.join(" "),
        upper: text.to_uppercase(),
        lower: text.to_lowercase(),
    }
}

/// Splits on separators and on lower-to-upper and acronym boundaries, so
/// `parseHTTPResponse` gives `parse`, `HTTP`, `Response`.
fn split_words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = text.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if let Some(prev) = current.chars().last() {
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = (prev.is_lowercase() && c.is_uppercase())
                || (prev.is_uppercase() && c.is_uppercase() && next_is_lower);
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
