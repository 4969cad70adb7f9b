// editor/mod.rs
//
// Editing session over one variables container, with an optional read-only
// inherited container shown alongside it. Holds the UI bookkeeping keyed by
// node-id (selection, expansion, drag source, name errors, search text) and
// implements every callback the tree view emits. Each committed mutation is
// followed by a history save.

mod copy_paste;
mod drag;
mod edit;

use std::collections::HashMap;

use crate::api::config::EditorConfig;
use crate::api::error::{EditorError, NameError};
use crate::clipboard::{ClipboardStore, MemoryClipboard};
use crate::core::container::VariablesContainer;
use crate::history::{History, HistoryHandler};
use crate::input::action::EditorAction;
use crate::tree::expansion::{expanded_node_ids, fold_nodes, retain_resolvable};
use crate::tree::node_id::is_inherited_node_id;
use crate::tree::search::{is_visible_in_search, search};

pub struct VariablesEditor {
    config: EditorConfig,
    container: VariablesContainer,
    inherited: Option<VariablesContainer>,
    history: Box<dyn HistoryHandler>,
    clipboard: Box<dyn ClipboardStore>,
    expanded_nodes: Vec<String>,
    selected_nodes: Vec<String>,
    search_text: String,
    dragged_node_id: Option<String>,
    name_errors: HashMap<String, NameError>,
}

impl VariablesEditor {
    /// Open a session. Expansion starts from the persisted folded flags of both
    /// containers; history starts from the current content.
    pub fn new(container: VariablesContainer, inherited: Option<VariablesContainer>, config: EditorConfig) -> Self {
        let history = History::new(&container, config.history_max_size);
        let mut expanded_nodes = expanded_node_ids(&container, false);
        if let Some(inherited) = &inherited {
            expanded_nodes.extend(expanded_node_ids(inherited, true));
        }
        log::debug!(
            "variables editor opened: {} variables, {} inherited",
            container.len(),
            inherited.as_ref().map_or(0, VariablesContainer::len)
        );
        Self {
            config,
            container,
            inherited,
            history: Box::new(history),
            clipboard: Box::new(MemoryClipboard::new()),
            expanded_nodes,
            selected_nodes: Vec::new(),
            search_text: String::new(),
            dragged_node_id: None,
            name_errors: HashMap::new(),
        }
    }

    /// Use an externally owned history instead of the session's own.
    pub fn with_history(mut self, history: Box<dyn HistoryHandler>) -> Self {
        self.history = history;
        self
    }

    /// Use a shared clipboard instead of the session's own.
    pub fn with_clipboard(mut self, clipboard: Box<dyn ClipboardStore>) -> Self {
        self.clipboard = clipboard;
        self
    }

    // ---- Accessors ----

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn container(&self) -> &VariablesContainer {
        &self.container
    }

    pub fn inherited(&self) -> Option<&VariablesContainer> {
        self.inherited.as_ref()
    }

    /// Give the edited container back, ending the session.
    pub fn into_container(self) -> VariablesContainer {
        self.container
    }

    pub fn expanded_nodes(&self) -> &[String] {
        &self.expanded_nodes
    }

    pub fn selected_nodes(&self) -> &[String] {
        &self.selected_nodes
    }

    pub fn dragged_node_id(&self) -> Option<&str> {
        self.dragged_node_id.as_deref()
    }

    /// Validation message shown under the name field of a node.
    pub fn name_error(&self, node_id: &str) -> Option<&NameError> {
        self.name_errors.get(node_id)
    }

    /// Whether a top-level own variable hides an inherited one of the same name.
    pub fn overwrites_inherited(&self, name: &str) -> bool {
        self.container.has(name) && self.inherited.as_ref().is_some_and(|inherited| inherited.has(name))
    }

    /// Names from `all_names` that are not defined in the container yet,
    /// offered as completions for top-level names.
    pub fn undefined_variable_names(&self, all_names: &[String]) -> Vec<String> {
        all_names.iter().filter(|name| !self.container.has(name)).cloned().collect()
    }

    // ---- Selection & expansion ----

    pub fn select(&mut self, node_ids: Vec<String>) {
        self.selected_nodes = node_ids;
    }

    /// Apply the new set of expanded nodes from the tree view. The folded flag
    /// of own variables follows; inherited variables are never modified.
    pub fn toggle_expanded(&mut self, node_ids: Vec<String>) {
        let own = |ids: &[String]| -> Vec<String> {
            ids.iter().filter(|id| !is_inherited_node_id(id)).cloned().collect()
        };
        let before = own(&self.expanded_nodes);
        let after = own(&node_ids);
        let folded: Vec<&String> = before.iter().filter(|id| !after.contains(id)).collect();
        let unfolded: Vec<&String> = after.iter().filter(|id| !before.contains(id)).collect();
        fold_nodes(&mut self.container, &folded, true);
        fold_nodes(&mut self.container, &unfolded, false);
        self.expanded_nodes = node_ids;
    }

    fn expand(&mut self, node_id: &str) {
        if !self.expanded_nodes.iter().any(|id| id == node_id) {
            self.expanded_nodes.push(node_id.to_string());
        }
    }

    /// Recompute own expansion from folded flags, keeping inherited expansion.
    fn reset_expansion_from_tree(&mut self) {
        let mut expanded: Vec<String> =
            self.expanded_nodes.iter().filter(|id| is_inherited_node_id(id)).cloned().collect();
        expanded.extend(expanded_node_ids(&self.container, false));
        self.expanded_nodes = expanded;
    }

    // ---- History ----

    fn save_to_history(&mut self) {
        self.history.save(&self.container);
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo(&mut self.container);
        if undone {
            self.revalidate_after_replace();
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo(&mut self.container);
        if redone {
            self.revalidate_after_replace();
        }
        redone
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The whole tree was replaced: drop bookkeeping that no longer resolves.
    fn revalidate_after_replace(&mut self) {
        retain_resolvable(&mut self.selected_nodes, &self.container, self.inherited.as_ref());
        self.reset_expansion_from_tree();
        self.name_errors.clear();
        self.dragged_node_id = None;
    }

    // ---- Search ----

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// Node-ids matching the current search text, own variables first.
    pub fn search_matches(&self) -> Vec<String> {
        let mut matches = search(&self.container, &self.search_text, false);
        if let Some(inherited) = &self.inherited {
            matches.extend(search(inherited, &self.search_text, true));
        }
        matches
    }

    /// Whether the tree view should show a node under the current search.
    pub fn is_node_visible(&self, node_id: &str) -> bool {
        self.search_text.is_empty() || is_visible_in_search(node_id, &self.search_matches())
    }

    // ---- Actions ----

    /// Apply one tree-view callback. Returns whether the container changed.
    pub fn dispatch(&mut self, action: EditorAction) -> Result<bool, EditorError> {
        let changed = match action {
            EditorAction::Select { node_ids } => {
                self.select(node_ids);
                false
            }
            EditorAction::ToggleExpanded { node_ids } => {
                self.toggle_expanded(node_ids);
                false
            }
            EditorAction::BeginDrag { node_id } => {
                self.begin_drag(&node_id);
                false
            }
            EditorAction::Drop { node_id } => self.drop_node(&node_id),
            EditorAction::Rename { node_id, new_name } => self.change_name(&node_id, &new_name)?,
            EditorAction::ChangeValue { node_id, value } => self.change_value(&node_id, &value),
            EditorAction::ChangeType { node_id, variable_type } => self.change_type(&node_id, variable_type),
            EditorAction::Add => self.add().is_some(),
            EditorAction::AddChild { node_id } => self.add_child(&node_id),
            EditorAction::Delete { node_id } => self.delete_node(&node_id),
            EditorAction::DeleteSelection => self.delete_selection(),
            EditorAction::EditInherited { node_id } => self.edit_inherited_variable(&node_id),
            EditorAction::Copy => {
                self.copy_selection()?;
                false
            }
            EditorAction::Cut => self.cut_selection()?,
            EditorAction::Paste => self.paste_clipboard(),
            EditorAction::Undo => self.undo(),
            EditorAction::Redo => self.redo(),
            EditorAction::Search { text } => {
                self.set_search_text(text);
                false
            }
        };
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::variable::Variable;

    pub(super) fn editor() -> VariablesEditor {
        let mut own = VariablesContainer::new();
        own.insert("score", Variable::number(3.0), 0);
        own.insert(
            "player",
            Variable::structure([
                ("name", Variable::string("Ana")),
                ("tags", Variable::array(vec![Variable::string("a"), Variable::string("b")])),
            ]),
            1,
        );
        let mut inherited = VariablesContainer::new();
        inherited.insert("speed", Variable::number(100.0), 0);
        inherited.insert("stats", Variable::structure([("hp", Variable::number(10.0))]), 1);
        VariablesEditor::new(own, Some(inherited), EditorConfig::default())
    }

    #[test]
    fn initial_expansion_from_folded_flags() {
        let e = editor();
        assert_eq!(e.expanded_nodes(), ["player", "player$.$tags", "$!stats"]);
    }

    #[test]
    fn collapsing_sets_folded_flag() {
        let mut e = editor();
        e.toggle_expanded(vec!["player".into(), "$!stats".into()]);
        assert!(e.container().get("player").unwrap().child("tags").unwrap().folded);
        assert!(!e.container().get("player").unwrap().folded);

        e.toggle_expanded(vec!["player".into()]);
        // Inherited variables are never touched.
        assert!(!e.inherited().unwrap().get("stats").unwrap().folded);
    }

    #[test]
    fn undo_revalidates_selection() {
        let mut e = editor();
        let name = e.add().unwrap();
        e.select(vec![name.clone(), "score".into()]);
        assert!(e.undo());
        assert!(!e.container().has(&name));
        assert_eq!(e.selected_nodes(), ["score"]);
        assert!(e.redo());
        assert!(e.container().has(&name));
    }

    #[test]
    fn search_covers_both_containers() {
        let mut e = editor();
        e.set_search_text("sp");
        assert_eq!(e.search_matches(), vec!["$!speed"]);
        e.set_search_text("ana");
        assert_eq!(e.search_matches(), vec!["player$.$name"]);
        assert!(e.is_node_visible("player"));
        assert!(!e.is_node_visible("score"));
    }

    #[test]
    fn undefined_names_for_completion() {
        let e = editor();
        let all = vec!["score".to_string(), "lives".to_string()];
        assert_eq!(e.undefined_variable_names(&all), vec!["lives"]);
    }

    #[test]
    fn overwrite_detection() {
        let mut e = editor();
        assert!(!e.overwrites_inherited("speed"));
        assert!(e.change_value("$!speed", "120"));
        assert!(e.overwrites_inherited("speed"));
    }

    #[test]
    fn dispatch_json_actions() {
        let mut e = editor();
        let action = EditorAction::from_json(r#"{ "action": "rename", "node_id": "score", "new_name": "points" }"#).unwrap();
        assert!(e.dispatch(action).unwrap());
        assert!(e.container().has("points"));

        let action = EditorAction::from_json(r#"{ "action": "rename", "node_id": "points", "new_name": "9lives" }"#).unwrap();
        let err = e.dispatch(action).unwrap_err();
        assert!(matches!(err, EditorError::Name(NameError::InvalidIdentifier)));
    }

    #[test]
    fn external_history_handler() {
        let container = VariablesContainer::new();
        let shared = History::new(&container, 1);
        let mut e = VariablesEditor::new(container, None, EditorConfig::default()).with_history(Box::new(shared));
        e.add();
        e.add();
        assert!(e.undo());
        // Max size 1 keeps a single undo step.
        assert!(!e.undo());
        assert_eq!(e.container().len(), 1);
    }
}
