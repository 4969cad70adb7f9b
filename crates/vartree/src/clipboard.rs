use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::types::VariableType;
use crate::core::serialize::VariableData;

/// String-keyed clipboard holding JSON payloads.
pub trait ClipboardStore {
    fn set(&mut self, kind: &str, payload: String);
    fn get(&self, kind: &str) -> Option<&str>;
    fn has(&self, kind: &str) -> bool {
        self.get(kind).is_some()
    }
}

/// Process-local clipboard.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    entries: HashMap<String, String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardStore for MemoryClipboard {
    fn set(&mut self, kind: &str, payload: String) {
        self.entries.insert(kind.to_string(), payload);
    }

    fn get(&self, kind: &str) -> Option<&str> {
        self.entries.get(kind).map(String::as_str)
    }
}

/// One copied variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipboardEntry {
    pub name: String,
    pub serialized_variable: VariableData,
    /// Type of the parent it was copied from; Structure for top-level variables.
    pub parent_type: VariableType,
}

/// Encode entries as the clipboard payload.
pub fn encode_entries(entries: &[ClipboardEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string(entries)
}

/// Decode a clipboard payload. A payload that is not a JSON array gives
/// `None`; array items that are not valid entries are skipped one by one.
pub fn decode_entries(payload: &str) -> Option<Vec<ClipboardEntry>> {
    let items: Vec<Value> = serde_json::from_str(payload).ok()?;
    Some(
        items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<ClipboardEntry>(item) {
                Ok(entry) if !entry.name.is_empty() => Some(entry),
                Ok(_) => None,
                Err(err) => {
                    log::warn!("skipping clipboard entry: {err}");
                    None
                }
            })
            .collect(),
    )
}
