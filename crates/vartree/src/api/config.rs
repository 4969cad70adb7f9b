use serde::{Deserialize, Serialize};

/// Configuration of a variables editor session, provided by the embedding application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of undo steps kept (default: 50).
    pub history_max_size: usize,
    /// Clipboard key under which copied variables are stored.
    pub clipboard_kind: String,
    /// Base name for variables created with "add" (default: "Variable").
    pub new_variable_name: String,
    /// Base name for structure children created with "add child" (default: "ChildVariable").
    pub new_child_name: String,
    /// Prefix used to make pasted or moved names unique (default: "CopyOf").
    pub copy_prefix: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_max_size: 50,
            clipboard_kind: "Variables".to_string(),
            new_variable_name: "Variable".to_string(),
            new_child_name: "ChildVariable".to_string(),
            copy_prefix: "CopyOf".to_string(),
        }
    }
}

impl EditorConfig {
    /// Parse a config from a JSON string. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
