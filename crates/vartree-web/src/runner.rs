use serde::Serialize;
use vartree::{EditorAction, EditorConfig, EditorError, VariableType, VariablesContainer, VariablesEditor};

/// What the tree view needs to render besides the container itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditorView {
    pub expanded_nodes: Vec<String>,
    pub selected_nodes: Vec<String>,
    pub search_text: String,
    pub search_matches: Vec<String>,
    pub can_undo: bool,
    pub can_redo: bool,
    pub revision: u32,
}

/// Editor session driven through JSON strings.
///
/// The web crate keeps one runner in a `thread_local!` and exports free
/// functions via `#[wasm_bindgen]`; everything here is plain Rust so it can
/// be tested natively.
pub struct EditorRunner {
    editor: VariablesEditor,
    /// Bumped on every container change so the host knows when to re-read it.
    revision: u32,
}

impl EditorRunner {
    pub fn new(editor: VariablesEditor) -> Self {
        Self { editor, revision: 0 }
    }

    /// Open a session from serialized containers. A missing config uses defaults.
    pub fn from_json(
        container_json: &str,
        inherited_json: Option<&str>,
        config_json: Option<&str>,
    ) -> Result<Self, EditorError> {
        let container = VariablesContainer::from_json(container_json)?;
        let inherited = inherited_json.map(VariablesContainer::from_json).transpose()?;
        let config = config_json.map(EditorConfig::from_json).transpose()?.unwrap_or_default();
        Ok(Self::new(VariablesEditor::new(container, inherited, config)))
    }

    pub fn editor(&self) -> &VariablesEditor {
        &self.editor
    }

    pub fn revision(&self) -> u32 {
        self.revision
    }

    fn bump(&mut self, changed: bool) -> bool {
        if changed {
            self.revision = self.revision.wrapping_add(1);
        }
        changed
    }

    /// Apply one JSON-encoded action. Returns whether the container changed.
    pub fn dispatch_json(&mut self, action_json: &str) -> Result<bool, EditorError> {
        let action = EditorAction::from_json(action_json)?;
        self.dispatch(action)
    }

    pub fn dispatch(&mut self, action: EditorAction) -> Result<bool, EditorError> {
        let changed = self.editor.dispatch(action)?;
        Ok(self.bump(changed))
    }

    /// Change a type given by name (`"string"`, `"number"`, ...).
    pub fn change_type(&mut self, node_id: &str, type_name: &str) -> Result<bool, EditorError> {
        let variable_type =
            VariableType::parse(type_name).ok_or_else(|| EditorError::UnknownType(type_name.to_string()))?;
        let changed = self.editor.change_type(node_id, variable_type);
        Ok(self.bump(changed))
    }

    pub fn can_drop(&self, node_id: &str) -> bool {
        self.editor.can_drop(node_id)
    }

    pub fn name_error(&self, node_id: &str) -> Option<String> {
        self.editor.name_error(node_id).map(ToString::to_string)
    }

    pub fn undefined_variable_names(&self, all_names: &[String]) -> Vec<String> {
        self.editor.undefined_variable_names(all_names)
    }

    // ---- Serialized accessors ----

    pub fn container_json(&self) -> Result<String, EditorError> {
        Ok(self.editor.container().to_json()?)
    }

    pub fn view(&self) -> EditorView {
        EditorView {
            expanded_nodes: self.editor.expanded_nodes().to_vec(),
            selected_nodes: self.editor.selected_nodes().to_vec(),
            search_text: self.editor.search_text().to_string(),
            search_matches: self.editor.search_matches(),
            can_undo: self.editor.can_undo(),
            can_redo: self.editor.can_redo(),
            revision: self.revision,
        }
    }

    pub fn view_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string(&self.view())?)
    }
}
