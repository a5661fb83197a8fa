use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use unicode_segmentation::UnicodeSegmentation;

use crate::views::{parse_input, to_output, ToolView, ViewInfo, ViewResult};

#[derive(Debug, Deserialize)]
struct Input {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize, PartialEq, Eq, Default)]
struct Counts {
    characters: usize,
    characters_no_whitespace: usize,
    cjk_characters: usize,
    words: usize,
    lines: usize,
    paragraphs: usize,
}

/// Character, word, line and paragraph statistics for a text.
pub struct WordCount;

#[async_trait]
impl ToolView for WordCount {
    fn info(&self) -> ViewInfo {
        ViewInfo {
            component: "WordCount",
            summary: "Count characters, words, lines and paragraphs",
            input_schema: serde_json::json!({
                "type": "object",
                "properties": { "text": { "type": "string" } }
            }),
        }
    }

    async fn run(&self, input: Value) -> ViewResult {
        let input: Input = parse_input(input)?;
        to_output(&count(&input.text))
    }
}

fn count(text: &str) -> Counts {
    if text.is_empty() {
        return Counts::default();
    }
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    Counts {
        characters: graphemes.len(),
        characters_no_whitespace: graphemes
            .iter()
            .filter(|g| !g.chars().all(char::is_whitespace))
            .count(),
        cjk_characters: text.chars().filter(|c| is_cjk(*c)).count(),
        // Han ideographs are word boundaries on both sides, so each one
        // counts as a word.
        words: text.unicode_words().count(),
        lines: text.lines().count(),
        paragraphs: text
            .split('\n')
            .map(str::trim)
            .fold((0, true), |(count, after_blank), line| {
                if line.is_empty() {
                    (count, true)
                } else if after_blank {
                    (count + 1, false)
                } else {
                    (count, false)
                }
            })
            .0,
    }
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{20000}'..='\u{2A6DF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{3040}'..='\u{30FF}'
        | '\u{AC00}'..='\u{D7AF}')
}
