use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::views::{parse_input, to_output, ToolView, ViewError, ViewInfo, ViewResult};

#[derive(Debug, Deserialize)]
struct Input {
    #[serde(default = "default_version")]
    version: u8,
    #[serde(default = "default_count")]
    count: usize,
    #[serde(default)]
    uppercase: bool,
    #[serde(default = "default_hyphens")]
    hyphens: bool,
}

fn default_version() -> u8 {
    4
}

fn default_count() -> usize {
    1
}

fn default_hyphens() -> bool {
    true
}

#[derive(Debug, Serialize)]
struct Output {
    version: u8,
    uuids: Vec<String>,
}

/// Batch generator for version 1 and version 4 UUIDs.
pub struct UuidGenerator {
    max_batch: usize,
    node_id: [u8; 6],
}

impl UuidGenerator {
    pub fn new(max_batch: usize) -> Self {
        // Random node id with the multicast bit set, as for hosts without a
        // usable MAC address.
        let mut node_id: [u8; 6] = rand::random();
        node_id[0] |= 0x01;
        Self { max_batch, node_id }
    }

    fn generate(&self, version: u8) -> Uuid {
        match version {
            1 => Uuid::now_v1(&self.node_id),
            _ => Uuid::new_v4(),
        }
    }
}

#[async_trait]
impl ToolView for UuidGenerator {
    fn info(&self) -> ViewInfo {
        ViewInfo {
            component: "UuidGenerator",
            summary: "Generate version 1 or version 4 UUIDs in bulk",
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "version": { "enum": [1, 4] },
                    "count": { "type": "integer", "minimum": 1, "maximum": self.max_batch },
                    "uppercase": { "type": "boolean" },
                    "hyphens": { "type": "boolean" }
                }
            }),
        }
    }

    async fn run(&self, input: Value) -> ViewResult {
        let input: Input = parse_input(input)?;
        if input.version != 1 && input.version != 4 {
            return Err(ViewError::InvalidInput(format!(
                "unsupported UUID version {}",
                input.version
            )));
        }
        if input.count == 0 || input.count > self.max_batch {
            return Err(ViewError::InvalidInput(format!(
                "count must be between 1 and {}",
                self.max_batch
            )));
        }

        let uuids = (0..input.count)
            .map(|_| {
                let uuid = self.generate(input.version);
                let text = if input.hyphens {
                    uuid.hyphenated().to_string()
                } else {
                    uuid.simple().to_string()
                };
                if input.uppercase {
                    text.to_uppercase()
                } else {
                    text
                }
            })
            .collect();

        to_output(&Output {
            version: input.version,
            uuids,
        })
    }
}
