// core/serialize.rs
//
// Serialized form of variables and containers. This is what history snapshots,
// the clipboard and the web bridge exchange:
//
//   { "variables": [
//       { "name": "score", "type": "number", "value": 12 },
//       { "name": "player", "type": "structure", "folded": true, "children": [
//           { "name": "tags", "type": "array", "children": [ { "type": "string", "value": "x" } ] }
//       ] }
//   ] }
//
// Decoding is lenient: a value that does not match its declared type reads
// as that type's default.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::types::VariableType;
use crate::core::container::VariablesContainer;
use crate::core::variable::{Variable, VariableValue};

/// Serialized variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableData {
    #[serde(rename = "type")]
    pub variable_type: VariableType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ChildData>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub folded: bool,
}

/// Serialized child. Structure children and container roots carry a name,
/// array elements do not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub data: VariableData,
}

/// Serialized container. Also the snapshot type kept by the history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerData {
    #[serde(default)]
    pub variables: Vec<ChildData>,
}

impl From<Variable> for VariableData {
    fn from(variable: Variable) -> Self {
        VariableData::from(&variable)
    }
}

impl From<&Variable> for VariableData {
    fn from(variable: &Variable) -> Self {
        let variable_type = variable.variable_type();
        let (value, children) = match &variable.value {
            VariableValue::String(s) => (Some(Value::from(s.clone())), Vec::new()),
            VariableValue::Number(n) => (Some(Value::from(*n)), Vec::new()),
            VariableValue::Boolean(b) => (Some(Value::from(*b)), Vec::new()),
            VariableValue::Array(children) => (
                None,
                children
                    .iter()
                    .map(|child| ChildData { name: None, data: child.into() })
                    .collect(),
            ),
            VariableValue::Structure(children) => (
                None,
                children
                    .iter()
                    .map(|(name, child)| ChildData { name: Some(name.clone()), data: child.into() })
                    .collect(),
            ),
        };
        Self { variable_type, value, children, folded: variable.folded }
    }
}

impl From<VariableData> for Variable {
    fn from(data: VariableData) -> Self {
        let value = match data.variable_type {
            VariableType::String => VariableValue::String(match data.value {
                Some(Value::String(s)) => s,
                Some(Value::Number(n)) => n.to_string(),
                Some(Value::Bool(b)) => b.to_string(),
                _ => String::new(),
            }),
            VariableType::Number => VariableValue::Number(match data.value {
                Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
                Some(Value::String(s)) => crate::core::variable::parse_number(&s),
                _ => 0.0,
            }),
            VariableType::Boolean => VariableValue::Boolean(match data.value {
                Some(Value::Bool(b)) => b,
                Some(Value::String(s)) => s == "true",
                _ => false,
            }),
            VariableType::Array => VariableValue::Array(
                data.children.into_iter().map(|child| Variable::from(child.data)).collect(),
            ),
            VariableType::Structure => {
                let mut children: Vec<(String, Variable)> = Vec::with_capacity(data.children.len());
                for (index, child) in data.children.into_iter().enumerate() {
                    let name = child.name.unwrap_or_else(|| index.to_string());
                    let variable = Variable::from(child.data);
                    if let Some(slot) = children.iter_mut().find(|(n, _)| *n == name) {
                        slot.1 = variable;
                    } else {
                        children.push((name, variable));
                    }
                }
                VariableValue::Structure(children)
            }
        };
        Variable { value, folded: data.folded }
    }
}

impl From<&VariablesContainer> for ContainerData {
    fn from(container: &VariablesContainer) -> Self {
        Self {
            variables: container
                .iter()
                .map(|(name, variable)| ChildData { name: Some(name.to_string()), data: variable.into() })
                .collect(),
        }
    }
}

impl From<VariablesContainer> for ContainerData {
    fn from(container: VariablesContainer) -> Self {
        ContainerData::from(&container)
    }
}

impl From<ContainerData> for VariablesContainer {
    fn from(data: ContainerData) -> Self {
        let mut container = VariablesContainer::new();
        for child in data.variables {
            // Roots without a name cannot be addressed; drop them.
            let Some(name) = child.name else { continue };
            let position = container.len();
            container.insert(name, Variable::from(child.data), position);
        }
        container
    }
}
