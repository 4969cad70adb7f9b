use serde::{Deserialize, Serialize};

use crate::core::serialize::ContainerData;
use crate::core::variable::Variable;
use crate::tree::path::PathSegment;

/// Ordered set of named root variables.
/// Backed by a flat Vec: editors hold tens of variables, not millions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ContainerData", into = "ContainerData")]
pub struct VariablesContainer {
    variables: Vec<(String, Variable)>,
}

impl VariablesContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a container from its serialized JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn has(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.variables.iter_mut().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Name and variable at a position.
    pub fn get_at(&self, position: usize) -> Option<(&str, &Variable)> {
        self.variables.get(position).map(|(n, v)| (n.as_str(), v))
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.variables.iter().position(|(n, _)| n == name)
    }

    /// Insert a variable at `position` (clamped to the end).
    /// An existing variable with the same name is replaced where it stands.
    pub fn insert(&mut self, name: impl Into<String>, variable: Variable, position: usize) -> &mut Variable {
        let name = name.into();
        let idx = match self.position(&name) {
            Some(existing) => {
                self.variables[existing].1 = variable;
                existing
            }
            None => {
                let idx = position.min(self.variables.len());
                self.variables.insert(idx, (name, variable));
                idx
            }
        };
        &mut self.variables[idx].1
    }

    /// Rename a variable in place. Fails if `old` is missing or `new` is taken.
    pub fn rename(&mut self, old: &str, new: &str) -> bool {
        if self.has(new) {
            return false;
        }
        match self.variables.iter_mut().find(|(n, _)| n == old) {
            Some(slot) => {
                slot.0 = new.to_string();
                true
            }
            None => false,
        }
    }

    /// Remove a variable by name. Returns the removed variable if found.
    pub fn remove(&mut self, name: &str) -> Option<Variable> {
        let idx = self.position(name)?;
        Some(self.variables.remove(idx).1)
    }

    /// Move the variable at `from` so that it ends up at `to`.
    pub fn move_variable(&mut self, from: usize, to: usize) -> bool {
        if from >= self.variables.len() || to >= self.variables.len() {
            return false;
        }
        let entry = self.variables.remove(from);
        self.variables.insert(to, entry);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.variables.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Variable)> {
        self.variables.iter_mut().map(|(n, v)| (n.as_str(), v))
    }

    pub fn names(&self) -> Vec<String> {
        self.variables.iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn clear(&mut self) {
        self.variables.clear();
    }

    /// Whether any root is a collection with at least one child.
    pub fn has_sub_children(&self) -> bool {
        self.variables.iter().any(|(_, v)| v.is_collection() && v.children_count() > 0)
    }

    // ---- Path access ----

    /// Variable addressed by an explicit path. The first segment names a root.
    pub fn get_path(&self, path: &[PathSegment]) -> Option<&Variable> {
        let (first, rest) = path.split_first()?;
        let PathSegment::Name(root) = first else { return None };
        let mut current = self.get(root)?;
        for segment in rest {
            current = current.child_at_path_segment(segment)?;
        }
        Some(current)
    }

    pub fn get_path_mut(&mut self, path: &[PathSegment]) -> Option<&mut Variable> {
        let (first, rest) = path.split_first()?;
        let PathSegment::Name(root) = first else { return None };
        let mut current = self.get_mut(root)?;
        for segment in rest {
            current = current.child_at_path_segment_mut(segment)?;
        }
        Some(current)
    }

    /// Detach the variable at `path` from its parent (or from the container).
    pub fn remove_path(&mut self, path: &[PathSegment]) -> Option<Variable> {
        match path {
            [] => None,
            [PathSegment::Name(root)] => self.remove(root),
            [PathSegment::Index(_)] => None,
            [parent @ .., last] => {
                let parent = self.get_path_mut(parent)?;
                match last {
                    PathSegment::Name(name) => parent.remove_child(name),
                    PathSegment::Index(index) => parent.remove_at_index(*index),
                }
            }
        }
    }

    /// Replace the whole content with a snapshot.
    pub fn restore(&mut self, snapshot: &ContainerData) {
        *self = VariablesContainer::from(snapshot.clone());
    }

    /// Serialized copy of the whole content.
    pub fn snapshot(&self) -> ContainerData {
        ContainerData::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VariablesContainer {
        let mut c = VariablesContainer::new();
        c.insert("a", Variable::number(1.0), 0);
        c.insert("b", Variable::string("x"), 1);
        c.insert(
            "s",
            Variable::structure([("child", Variable::array(vec![Variable::boolean(true)]))]),
            2,
        );
        c
    }

    #[test]
    fn insert_clamps_and_replaces() {
        let mut c = sample();
        c.insert("z", Variable::number(9.0), 100);
        assert_eq!(c.position("z"), Some(3));
        c.insert("a", Variable::number(5.0), 3);
        assert_eq!(c.position("a"), Some(0));
        assert_eq!(c.get("a").unwrap().as_number(), 5.0);
    }

    #[test]
    fn rename_keeps_position() {
        let mut c = sample();
        assert!(c.rename("b", "c"));
        assert_eq!(c.names(), vec!["a", "c", "s"]);
        assert!(!c.rename("a", "c"));
        assert!(!c.rename("missing", "d"));
    }

    #[test]
    fn move_variable_reorders() {
        let mut c = sample();
        assert!(c.move_variable(0, 2));
        assert_eq!(c.names(), vec!["b", "s", "a"]);
    }

    #[test]
    fn path_access_and_removal() {
        let mut c = sample();
        let path = vec![
            PathSegment::Name("s".into()),
            PathSegment::Name("child".into()),
            PathSegment::Index(0),
        ];
        assert!(c.get_path(&path).unwrap().as_bool());
        let removed = c.remove_path(&path).unwrap();
        assert!(removed.as_bool());
        assert_eq!(c.get("s").unwrap().child("child").unwrap().children_count(), 0);
    }

    #[test]
    fn snapshot_restore() {
        let mut c = sample();
        let snap = c.snapshot();
        c.clear();
        assert!(c.is_empty());
        c.restore(&snap);
        assert_eq!(c, sample());
    }

    #[test]
    fn json_round_trip_keeps_order() {
        let c = sample();
        let json = c.to_json().unwrap();
        let back = VariablesContainer::from_json(&json).unwrap();
        assert_eq!(back.names(), vec!["a", "b", "s"]);
    }
}
