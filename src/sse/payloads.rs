//! Wire payload deserialization structs
//!
//! The service sends one JSON object per `data:` line with a set of optional
//! fields; which fields are present decides the record kind. These structs
//! capture the raw shape, and the normalization into [`EventRecord`] lives
//! here next to them.

use serde::Deserialize;
use serde_json::Number;

use super::events::{EventRecord, KnowledgeItem, TerminalUpdate};

/// Status value that marks a terminal payload on the stream.
pub(crate) const STATUS_COMPLETED: &str = "completed";

/// Raw streamed payload. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct WirePayload {
    #[serde(default)]
    pub iteration: Option<i64>,
    #[serde(default)]
    pub node: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub fixed_code: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub test_output: Option<String>,
    #[serde(default)]
    pub is_success: Option<bool>,
    #[serde(default)]
    pub knowledge: Option<Vec<KnowledgePayload>>,
    #[serde(default)]
    pub logs: Option<Vec<String>>,
}

/// Raw knowledge entry; the score may arrive as an integer or a float.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct KnowledgePayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub score: Option<Number>,
}

/// Non-streaming response body returned by the legacy endpoint variant.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LegacyResponse {
    /// `"success"`, `"failed"`, or `"completed"` together with `is_success`
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub is_success: Option<bool>,
    #[serde(default)]
    pub fixed_code: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub test_output: Option<String>,
    #[serde(default)]
    pub knowledge: Option<Vec<KnowledgePayload>>,
    #[serde(default)]
    pub logs: Option<Vec<String>>,
}

impl KnowledgePayload {
    fn into_item(self) -> KnowledgeItem {
        let score = self
            .score
            .and_then(|n| n.as_f64())
            .map(|s| s.round().clamp(0.0, 100.0) as u8)
            .unwrap_or(0);
        KnowledgeItem {
            title: self.title.unwrap_or_default(),
            summary: self.summary.unwrap_or_default(),
            score,
        }
    }
}

/// `null` and a missing list both mean no matches.
fn knowledge_items(raw: Option<Vec<KnowledgePayload>>) -> Vec<KnowledgeItem> {
    raw.unwrap_or_default()
        .into_iter()
        .map(KnowledgePayload::into_item)
        .collect()
}

impl WirePayload {
    /// Normalize into records in dispatch order: iteration, node, terminal.
    ///
    /// Returns an empty vector when no recognized field is present, and an
    /// error message when a recognized field violates its constraints.
    pub fn into_records(self) -> Result<Vec<EventRecord>, String> {
        let mut records = Vec::new();

        if let Some(iteration) = self.iteration {
            let iteration = u32::try_from(iteration)
                .ok()
                .filter(|n| *n >= 1)
                .ok_or_else(|| format!("iteration must be >= 1, got {}", iteration))?;
            records.push(EventRecord::Iteration(iteration));
        }

        if let Some(node) = self.node {
            if node.trim().is_empty() {
                return Err("node must be a non-empty string".to_string());
            }
            records.push(EventRecord::Node(node));
        }

        if self.status.as_deref() == Some(STATUS_COMPLETED) {
            records.push(EventRecord::Terminal(TerminalUpdate {
                fixed_code: self.fixed_code.unwrap_or_default(),
                summary: self.summary.unwrap_or_default(),
                test_output: self.test_output,
                is_success: self.is_success.unwrap_or(false),
                knowledge: knowledge_items(self.knowledge),
                logs: self.logs.unwrap_or_default(),
            }));
        }

        Ok(records)
    }
}

impl LegacyResponse {
    /// Convert the one-shot body into the terminal result it stands for.
    pub fn into_terminal(self) -> TerminalUpdate {
        let is_success = match self.status.as_deref() {
            Some("success") => true,
            Some("failed") => false,
            _ => self.is_success.unwrap_or(false),
        };
        TerminalUpdate {
            fixed_code: self.fixed_code.unwrap_or_default(),
            summary: self.summary.unwrap_or_default(),
            test_output: self.test_output,
            is_success,
            knowledge: knowledge_items(self.knowledge),
            logs: self.logs.unwrap_or_default(),
        }
    }
}
