use serde::{Deserialize, Serialize};

use crate::api::types::VariableType;

/// A callback emitted by the tree view, addressed by node-id.
/// The JSON form is tagged by `action`:
///
/// ```json
/// { "action": "rename", "node_id": "player$.$name", "new_name": "nickname" }
/// { "action": "change_type", "node_id": "score", "variable_type": "string" }
/// { "action": "paste" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EditorAction {
    Select { node_ids: Vec<String> },
    ToggleExpanded { node_ids: Vec<String> },
    BeginDrag { node_id: String },
    Drop { node_id: String },
    Rename { node_id: String, new_name: String },
    ChangeValue { node_id: String, value: String },
    ChangeType { node_id: String, variable_type: VariableType },
    Add,
    AddChild { node_id: String },
    Delete { node_id: String },
    DeleteSelection,
    EditInherited { node_id: String },
    Copy,
    Cut,
    Paste,
    Undo,
    Redo,
    Search { text: String },
}

impl EditorAction {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Whether the action can modify the container.
    pub fn is_mutation(&self) -> bool {
        !matches!(
            self,
            EditorAction::Select { .. }
                | EditorAction::ToggleExpanded { .. }
                | EditorAction::BeginDrag { .. }
                | EditorAction::Copy
                | EditorAction::Search { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tagged_actions() {
        assert_eq!(EditorAction::from_json(r#"{ "action": "paste" }"#).unwrap(), EditorAction::Paste);
        assert_eq!(
            EditorAction::from_json(r#"{ "action": "change_type", "node_id": "a", "variable_type": "array" }"#).unwrap(),
            EditorAction::ChangeType { node_id: "a".into(), variable_type: VariableType::Array }
        );
        assert_eq!(
            EditorAction::from_json(r#"{ "action": "select", "node_ids": ["a", "$!b"] }"#).unwrap(),
            EditorAction::Select { node_ids: vec!["a".into(), "$!b".into()] }
        );
    }

    #[test]
    fn unknown_action_is_an_error() {
        assert!(EditorAction::from_json(r#"{ "action": "explode" }"#).is_err());
        assert!(EditorAction::from_json(r#"{ "action": "rename", "node_id": "a" }"#).is_err());
        assert!(EditorAction::from_json(r#"{ "action": "change_type", "node_id": "a", "variable_type": "color" }"#).is_err());
    }

    #[test]
    fn serializes_with_tag() {
        let json = serde_json::to_string(&EditorAction::Delete { node_id: "x".into() }).unwrap();
        assert_eq!(json, r#"{"action":"delete","node_id":"x"}"#);
        assert!(EditorAction::Undo.is_mutation());
        assert!(!EditorAction::Copy.is_mutation());
    }
}
