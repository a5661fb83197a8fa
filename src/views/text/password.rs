use async_trait::async_trait;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::views::{parse_input, to_output, ToolView, ViewError, ViewInfo, ViewResult};

const MIN_LENGTH: usize = 4;
const MAX_LENGTH: usize = 128;

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()-_=+[]{};:,.<>?";
const AMBIGUOUS: &str = "Il1O0o";

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Input {
    length: usize,
    uppercase: bool,
    lowercase: bool,
    digits: bool,
    symbols: bool,
    exclude_ambiguous: bool,
    count: usize,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            length: 16,
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: false,
            exclude_ambiguous: false,
            count: 1,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    passwords: Vec<String>,
    entropy_bits: f64,
    strength: &'static str,
}

/// Random password generator.
pub struct PasswordGenerator {
    max_batch: usize,
}

impl PasswordGenerator {
    pub fn new(max_batch: usize) -> Self {
        Self { max_batch }
    }
}

#[async_trait]
impl ToolView for PasswordGenerator {
    fn info(&self) -> ViewInfo {
        ViewInfo {
            component: "PasswordGenerator",
            summary: "Generate strong random passwords",
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "length": { "type": "integer", "minimum": MIN_LENGTH, "maximum": MAX_LENGTH },
                    "uppercase": { "type": "boolean" },
                    "lowercase": { "type": "boolean" },
                    "digits": { "type": "boolean" },
                    "symbols": { "type": "boolean" },
                    "exclude_ambiguous": { "type": "boolean" },
                    "count": { "type": "integer", "minimum": 1, "maximum": self.max_batch }
                }
            }),
        }
    }

    async fn run(&self, input: Value) -> ViewResult {
        let input: Input = parse_input(input)?;
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&input.length) {
            return Err(ViewError::InvalidInput(format!(
                "length must be between {} and {}",
                MIN_LENGTH, MAX_LENGTH
            )));
        }
        if input.count == 0 || input.count > self.max_batch {
            return Err(ViewError::InvalidInput(format!(
                "count must be between 1 and {}",
                self.max_batch
            )));
        }

        let classes = character_classes(&input);
        if classes.is_empty() {
            return Err(ViewError::InvalidInput(
                "at least one character class must be enabled".to_string(),
            ));
        }

        let pool: Vec<char> = classes.iter().flatten().copied().collect();
        let mut rng = rand::rng();
        let passwords = (0..input.count)
            .map(|_| generate(&mut rng, &classes, &pool, input.length))
            .collect();

        let entropy_bits = input.length as f64 * (pool.len() as f64).log2();
        to_output(&Output {
            passwords,
            entropy_bits: (entropy_bits * 100.0).round() / 100.0,
            strength: strength(entropy_bits),
        })
    }
}

fn character_classes(input: &Input) -> Vec<Vec<char>> {
    [
        (input.uppercase, UPPERCASE),
        (input.lowercase, LOWERCASE),
        (input.digits, DIGITS),
        (input.symbols, SYMBOLS),
    ]
    .into_iter()
    .filter(|(enabled, _)| *enabled)
    .map(|(_, set)| {
        set.chars()
            .filter(|c| !(input.exclude_ambiguous && AMBIGUOUS.contains(*c)))
            .collect::<Vec<char>>()
    })
    .filter(|set| !set.is_empty())
    .collect()
}

/// Draws one character from every class, fills the rest from the full pool
/// and shuffles.
fn generate<R: Rng>(rng: &mut R, classes: &[Vec<char>], pool: &[char], length: usize) -> String {
    let mut chars = Vec::with_capacity(length);
    for set in classes {
        if let Some(c) = set.choose(rng) {
            chars.push(*c);
        }
    }
    while chars.len() < length {
        chars.push(pool[rng.random_range(0..pool.len())]);
    }
    chars.shuffle(rng);
    chars.into_iter().collect()
}

fn strength(entropy_bits: f64) -> &'static str {
    match entropy_bits {
        e if e < 40.0 => "weak",
        e if e < 60.0 => "fair",
        e if e < 80.0 => "strong",
        _ => "very_strong",
    }
}
