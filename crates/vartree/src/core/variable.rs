use serde::{Deserialize, Serialize};

use crate::api::types::VariableType;
use crate::core::serialize::VariableData;
use crate::tree::path::PathSegment;

/// Value held by a variable. Collections own their children.
#[derive(Debug, Clone, PartialEq)]
pub enum VariableValue {
    String(String),
    Number(f64),
    Boolean(bool),
    /// Positional children.
    Array(Vec<Variable>),
    /// Named children, in insertion order. Names are unique.
    Structure(Vec<(String, Variable)>),
}

/// A typed variable node. Strict tree: every child is owned by exactly one parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "VariableData", into = "VariableData")]
pub struct Variable {
    pub value: VariableValue,
    /// Collapsed in the tree view. Persisted alongside the data.
    pub folded: bool,
}

impl Default for Variable {
    fn default() -> Self {
        Self::number(0.0)
    }
}

impl Variable {
    pub fn string(value: impl Into<String>) -> Self {
        Self::from_value(VariableValue::String(value.into()))
    }

    pub fn number(value: f64) -> Self {
        Self::from_value(VariableValue::Number(finite_or_zero(value)))
    }

    pub fn boolean(value: bool) -> Self {
        Self::from_value(VariableValue::Boolean(value))
    }

    pub fn array(children: Vec<Variable>) -> Self {
        Self::from_value(VariableValue::Array(children))
    }

    /// Build a structure. Later duplicates of a name replace earlier ones.
    pub fn structure<N: Into<String>>(children: impl IntoIterator<Item = (N, Variable)>) -> Self {
        let mut variable = Self::from_value(VariableValue::Structure(Vec::new()));
        for (name, child) in children {
            variable.insert_child(name.into(), child);
        }
        variable
    }

    /// A fresh variable of the given type holding that type's default value.
    pub fn of_type(variable_type: VariableType) -> Self {
        match variable_type {
            VariableType::String => Self::string(""),
            VariableType::Number => Self::number(0.0),
            VariableType::Boolean => Self::boolean(false),
            VariableType::Array => Self::array(Vec::new()),
            VariableType::Structure => Self::from_value(VariableValue::Structure(Vec::new())),
        }
    }

    fn from_value(value: VariableValue) -> Self {
        Self { value, folded: false }
    }

    pub fn variable_type(&self) -> VariableType {
        match self.value {
            VariableValue::String(_) => VariableType::String,
            VariableValue::Number(_) => VariableType::Number,
            VariableValue::Boolean(_) => VariableType::Boolean,
            VariableValue::Array(_) => VariableType::Array,
            VariableValue::Structure(_) => VariableType::Structure,
        }
    }

    pub fn is_collection(&self) -> bool {
        self.variable_type().is_collection()
    }

    // ---- Primitive access ----

    /// String view of the value. Collections read as an empty string.
    pub fn as_string(&self) -> String {
        match &self.value {
            VariableValue::String(s) => s.clone(),
            VariableValue::Number(n) => format_number(*n),
            VariableValue::Boolean(b) => b.to_string(),
            VariableValue::Array(_) | VariableValue::Structure(_) => String::new(),
        }
    }

    /// Numeric view of the value. Unparsable strings and collections read as 0.
    pub fn as_number(&self) -> f64 {
        match &self.value {
            VariableValue::String(s) => parse_number(s),
            VariableValue::Number(n) => *n,
            VariableValue::Boolean(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            VariableValue::Array(_) | VariableValue::Structure(_) => 0.0,
        }
    }

    pub fn as_bool(&self) -> bool {
        match &self.value {
            VariableValue::String(s) => s == "true",
            VariableValue::Number(n) => *n != 0.0,
            VariableValue::Boolean(b) => *b,
            VariableValue::Array(_) | VariableValue::Structure(_) => false,
        }
    }

    /// Set a string value. The variable becomes a String.
    pub fn set_string(&mut self, value: impl Into<String>) {
        self.value = VariableValue::String(value.into());
    }

    /// Set a number value. The variable becomes a Number.
    pub fn set_number(&mut self, value: f64) {
        self.value = VariableValue::Number(finite_or_zero(value));
    }

    /// Set a boolean value. The variable becomes a Boolean.
    pub fn set_bool(&mut self, value: bool) {
        self.value = VariableValue::Boolean(value);
    }

    /// Convert to another type, keeping as much of the value as makes sense.
    ///
    /// Primitives convert between each other through their string/number/bool views.
    /// Structure children become array elements in order; array elements become
    /// structure children named by their index. A primitive cast to a collection
    /// gives an empty collection, a collection cast to a primitive gives the default value.
    pub fn cast_to(&mut self, target: VariableType) {
        if self.variable_type() == target {
            return;
        }
        let old = std::mem::replace(&mut self.value, VariableValue::Number(0.0));
        self.value = match (old, target) {
            (VariableValue::Structure(children), VariableType::Array) => {
                VariableValue::Array(children.into_iter().map(|(_, child)| child).collect())
            }
            (VariableValue::Array(children), VariableType::Structure) => VariableValue::Structure(
                children
                    .into_iter()
                    .enumerate()
                    .map(|(index, child)| (index.to_string(), child))
                    .collect(),
            ),
            (old @ (VariableValue::String(_) | VariableValue::Number(_) | VariableValue::Boolean(_)), _) => {
                let previous = Variable::from_value(old);
                match target {
                    VariableType::String => VariableValue::String(previous.as_string()),
                    VariableType::Number => VariableValue::Number(previous.as_number()),
                    VariableType::Boolean => VariableValue::Boolean(previous.as_bool()),
                    VariableType::Array | VariableType::Structure => Variable::of_type(target).value,
                }
            }
            (_, _) => Variable::of_type(target).value,
        };
    }

    // ---- Children ----

    /// Number of children of a collection, 0 for primitives.
    pub fn children_count(&self) -> usize {
        match &self.value {
            VariableValue::Array(children) => children.len(),
            VariableValue::Structure(children) => children.len(),
            _ => 0,
        }
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.child(name).is_some()
    }

    /// Named child of a structure.
    pub fn child(&self, name: &str) -> Option<&Variable> {
        match &self.value {
            VariableValue::Structure(children) => {
                children.iter().find(|(n, _)| n == name).map(|(_, v)| v)
            }
            _ => None,
        }
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Variable> {
        match &mut self.value {
            VariableValue::Structure(children) => {
                children.iter_mut().find(|(n, _)| n == name).map(|(_, v)| v)
            }
            _ => None,
        }
    }

    /// Element of an array.
    pub fn at_index(&self, index: usize) -> Option<&Variable> {
        match &self.value {
            VariableValue::Array(children) => children.get(index),
            _ => None,
        }
    }

    pub fn at_index_mut(&mut self, index: usize) -> Option<&mut Variable> {
        match &mut self.value {
            VariableValue::Array(children) => children.get_mut(index),
            _ => None,
        }
    }

    /// Resolve one node-id segment: an index for arrays, a name for structures.
    pub fn child_at_segment(&self, segment: &str) -> Option<(PathSegment, &Variable)> {
        match &self.value {
            VariableValue::Array(children) => {
                let index: usize = segment.parse().ok()?;
                children.get(index).map(|child| (PathSegment::Index(index), child))
            }
            VariableValue::Structure(children) => children
                .iter()
                .find(|(n, _)| n == segment)
                .map(|(n, child)| (PathSegment::Name(n.clone()), child)),
            _ => None,
        }
    }

    pub fn child_at_path_segment(&self, segment: &PathSegment) -> Option<&Variable> {
        match segment {
            PathSegment::Name(name) => self.child(name),
            PathSegment::Index(index) => self.at_index(*index),
        }
    }

    pub fn child_at_path_segment_mut(&mut self, segment: &PathSegment) -> Option<&mut Variable> {
        match segment {
            PathSegment::Name(name) => self.child_mut(name),
            PathSegment::Index(index) => self.at_index_mut(*index),
        }
    }

    /// Children with the node-id segment addressing each of them
    /// (the name for structures, the decimal index for arrays).
    pub fn named_children(&self) -> Vec<(String, &Variable)> {
        match &self.value {
            VariableValue::Array(children) => children
                .iter()
                .enumerate()
                .map(|(index, child)| (index.to_string(), child))
                .collect(),
            VariableValue::Structure(children) => {
                children.iter().map(|(name, child)| (name.clone(), child)).collect()
            }
            _ => Vec::new(),
        }
    }

    pub fn child_names(&self) -> Vec<String> {
        match &self.value {
            VariableValue::Structure(children) => children.iter().map(|(n, _)| n.clone()).collect(),
            _ => Vec::new(),
        }
    }

    /// Insert or replace a named child. Returns false if this is not a structure.
    pub fn insert_child(&mut self, name: String, child: Variable) -> bool {
        match &mut self.value {
            VariableValue::Structure(children) => {
                if let Some(slot) = children.iter_mut().find(|(n, _)| *n == name) {
                    slot.1 = child;
                } else {
                    children.push((name, child));
                }
                true
            }
            _ => false,
        }
    }

    /// Remove a named child. Returns the removed child if found.
    pub fn remove_child(&mut self, name: &str) -> Option<Variable> {
        match &mut self.value {
            VariableValue::Structure(children) => {
                let idx = children.iter().position(|(n, _)| n == name)?;
                Some(children.remove(idx).1)
            }
            _ => None,
        }
    }

    /// Rename a structure child in place. Fails if `old` is missing or `new` is taken.
    pub fn rename_child(&mut self, old: &str, new: &str) -> bool {
        match &mut self.value {
            VariableValue::Structure(children) => {
                if children.iter().any(|(n, _)| n == new) {
                    return false;
                }
                match children.iter_mut().find(|(n, _)| n == old) {
                    Some(slot) => {
                        slot.0 = new.to_string();
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }

    /// Insert an array element. `index` past the end appends.
    pub fn insert_at_index(&mut self, child: Variable, index: usize) -> bool {
        match &mut self.value {
            VariableValue::Array(children) => {
                let index = index.min(children.len());
                children.insert(index, child);
                true
            }
            _ => false,
        }
    }

    pub fn remove_at_index(&mut self, index: usize) -> Option<Variable> {
        match &mut self.value {
            VariableValue::Array(children) if index < children.len() => Some(children.remove(index)),
            _ => None,
        }
    }

    /// Append a new element to an array, typed like the current last element.
    /// Returns the index of the new element.
    pub fn push_new(&mut self) -> Option<usize> {
        match &mut self.value {
            VariableValue::Array(children) => {
                let element = children
                    .last()
                    .map(|last| Variable::of_type(last.variable_type()))
                    .unwrap_or_default();
                children.push(element);
                Some(children.len() - 1)
            }
            _ => None,
        }
    }

    /// Move an array element from one position to another.
    pub fn move_child_in_array(&mut self, from: usize, to: usize) -> bool {
        match &mut self.value {
            VariableValue::Array(children) if from < children.len() && to < children.len() => {
                let child = children.remove(from);
                children.insert(to, child);
                true
            }
            _ => false,
        }
    }
}

/// Format a number the way the editor displays it (`35`, `3.5`, `-0.25`).
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value == value.trunc() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Lenient number parsing for user input. Invalid text reads as 0.
pub fn parse_number(text: &str) -> f64 {
    text.trim().parse::<f64>().map(finite_or_zero).unwrap_or(0.0)
}

/// JSON has no NaN or infinity, so only finite numbers are stored.
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
