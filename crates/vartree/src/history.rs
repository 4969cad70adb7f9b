// history.rs
//
// Undo/redo over full snapshots of a container's data (not the UI state).
//
// Usage:
//   let mut history = History::new(&container, 50);
//   container.insert("score", Variable::number(0.0), 0);
//   history.save(&container);          // after every committed mutation
//   history.undo(&mut container);      // restores the previous snapshot

use std::collections::VecDeque;

use crate::core::container::VariablesContainer;
use crate::core::serialize::ContainerData;

/// Undo/redo storage used by the editor. An embedding application can supply
/// its own (e.g. one history for a whole project) instead of [`History`].
pub trait HistoryHandler {
    /// Record the container state after a committed mutation.
    fn save(&mut self, container: &VariablesContainer);
    /// Restore the previous state. Returns false when there is nothing to undo.
    fn undo(&mut self, container: &mut VariablesContainer) -> bool;
    /// Re-apply an undone state. Returns false when there is nothing to redo.
    fn redo(&mut self, container: &mut VariablesContainer) -> bool;
    fn can_undo(&self) -> bool;
    fn can_redo(&self) -> bool;
}

/// Bounded snapshot history.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: VecDeque<ContainerData>,
    current: ContainerData,
    redo_stack: Vec<ContainerData>,
    max_size: usize,
}

impl History {
    /// Start a history from the current state of `container`.
    pub fn new(container: &VariablesContainer, max_size: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            current: container.snapshot(),
            redo_stack: Vec::new(),
            max_size,
        }
    }

    /// Snapshot matching the live container after the last save/undo/redo.
    pub fn current(&self) -> &ContainerData {
        &self.current
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl HistoryHandler for History {
    fn save(&mut self, container: &VariablesContainer) {
        let previous = std::mem::replace(&mut self.current, container.snapshot());
        self.undo_stack.push_back(previous);
        while self.undo_stack.len() > self.max_size {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();
    }

    fn undo(&mut self, container: &mut VariablesContainer) -> bool {
        let Some(previous) = self.undo_stack.pop_back() else {
            return false;
        };
        container.restore(&previous);
        let undone = std::mem::replace(&mut self.current, previous);
        self.redo_stack.push(undone);
        true
    }

    fn redo(&mut self, container: &mut VariablesContainer) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        container.restore(&next);
        let previous = std::mem::replace(&mut self.current, next);
        self.undo_stack.push_back(previous);
        true
    }

    fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::variable::Variable;

    fn insert(container: &mut VariablesContainer, name: &str) {
        let position = container.len();
        container.insert(name, Variable::number(0.0), position);
    }

    #[test]
    fn undo_then_redo() {
        let mut c = VariablesContainer::new();
        let mut history = History::new(&c, 10);

        insert(&mut c, "a");
        history.save(&c);
        let after_first = c.clone();

        insert(&mut c, "b");
        history.save(&c);
        let after_second = c.clone();

        assert!(history.undo(&mut c));
        assert_eq!(c, after_first);
        assert_eq!(history.current(), &after_first.snapshot());

        assert!(history.redo(&mut c));
        assert_eq!(c, after_second);
    }

    #[test]
    fn save_after_undo_clears_redo() {
        let mut c = VariablesContainer::new();
        let mut history = History::new(&c, 10);
        insert(&mut c, "a");
        history.save(&c);
        history.undo(&mut c);
        assert!(history.can_redo());

        insert(&mut c, "z");
        history.save(&c);
        assert!(!history.can_redo());
        assert!(!history.redo(&mut c));
        assert_eq!(c.names(), vec!["z"]);
    }

    #[test]
    fn empty_stacks_are_no_ops() {
        let mut c = VariablesContainer::new();
        insert(&mut c, "a");
        let mut history = History::new(&c, 10);
        assert!(!history.can_undo());
        assert!(!history.undo(&mut c));
        assert!(!history.redo(&mut c));
        assert_eq!(c.names(), vec!["a"]);
    }

    #[test]
    fn oldest_entries_trimmed() {
        let mut c = VariablesContainer::new();
        let mut history = History::new(&c, 2);
        for name in ["a", "b", "c", "d"] {
            insert(&mut c, name);
            history.save(&c);
        }
        assert_eq!(history.undo_len(), 2);
        while history.undo(&mut c) {}
        assert_eq!(c.names(), vec!["a", "b"]);
    }

    #[test]
    fn undo_restores_folded_flags() {
        let mut c = VariablesContainer::new();
        c.insert("s", Variable::structure([("k", Variable::number(1.0))]), 0);
        let mut history = History::new(&c, 5);
        c.get_mut("s").unwrap().folded = true;
        history.save(&c);
        history.undo(&mut c);
        assert!(!c.get("s").unwrap().folded);
    }
}
