use crate::tree::movement::{self, move_variable};
use crate::tree::node_id::is_inherited_node_id;

use super::VariablesEditor;

impl VariablesEditor {
    /// Remember the node being dragged. Inherited variables cannot be dragged.
    pub fn begin_drag(&mut self, node_id: &str) -> bool {
        if is_inherited_node_id(node_id) {
            return false;
        }
        self.dragged_node_id = Some(node_id.to_string());
        true
    }

    pub fn end_drag(&mut self) {
        self.dragged_node_id = None;
    }

    /// Whether the dragged node may be dropped on `node_id`. Side-effect free.
    pub fn can_drop(&self, node_id: &str) -> bool {
        self.dragged_node_id
            .as_deref()
            .is_some_and(|dragged| movement::can_drop(&self.container, dragged, node_id))
    }

    /// Drop the dragged node on `node_id`. Selection is cleared and own
    /// expansion recomputed from the folded flags, since a move can renumber
    /// a whole array.
    pub fn drop_node(&mut self, node_id: &str) -> bool {
        let Some(dragged) = self.dragged_node_id.take() else {
            return false;
        };
        let Some(outcome) = move_variable(&mut self.container, &dragged, node_id, &self.config.copy_prefix) else {
            return false;
        };
        log::debug!("{:?}: {dragged} is now {}", outcome.movement, outcome.new_node_id);
        self.save_to_history();
        self.selected_nodes.clear();
        self.name_errors.clear();
        self.reset_expansion_from_tree();
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::editor::tests::editor;

    #[test]
    fn drag_and_drop_reorders() {
        let mut e = editor();
        e.select(vec!["score".into()]);
        assert!(e.begin_drag("player$.$name"));
        assert!(e.can_drop("score"));
        assert!(!e.can_drop("player$.$tags$.$0"));
        assert!(e.drop_node("score"));
        assert_eq!(e.container().names(), vec!["name", "score", "player"]);
        assert!(e.selected_nodes().is_empty());
        assert_eq!(e.dragged_node_id(), None);
        assert!(e.can_undo());
    }

    #[test]
    fn drop_on_itself_keeps_selection_and_history() {
        let mut e = editor();
        e.select(vec!["score".into()]);
        assert!(e.begin_drag("score"));
        assert!(!e.can_drop("score"));
        assert!(!e.drop_node("score"));
        assert_eq!(e.selected_nodes(), ["score"]);
        assert!(!e.can_undo());
    }

    #[test]
    fn illegal_drop_is_a_no_op() {
        let mut e = editor();
        assert!(e.begin_drag("player$.$tags$.$0"));
        assert!(!e.drop_node("score"));
        assert_eq!(e.container().get("player").unwrap().child("tags").unwrap().children_count(), 2);
        assert!(!e.can_undo());
    }

    #[test]
    fn inherited_nodes_do_not_drag_or_receive() {
        let mut e = editor();
        assert!(!e.begin_drag("$!speed"));
        assert!(!e.can_drop("score"));
        assert!(e.begin_drag("score"));
        assert!(!e.can_drop("$!speed"));
        e.end_drag();
        assert!(!e.drop_node("player"));
    }
}
