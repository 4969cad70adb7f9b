use serde::{Deserialize, Serialize};

/// Kind of a variable. Primitive kinds hold a value, collection kinds hold children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    String,
    Number,
    Boolean,
    Structure,
    Array,
}

impl VariableType {
    /// Array and Structure variables hold children.
    pub fn is_collection(self) -> bool {
        matches!(self, VariableType::Structure | VariableType::Array)
    }

    pub fn is_primitive(self) -> bool {
        !self.is_collection()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VariableType::String => "string",
            VariableType::Number => "number",
            VariableType::Boolean => "boolean",
            VariableType::Structure => "structure",
            VariableType::Array => "array",
        }
    }

    /// Parse the lowercase name used in serialized data and by the UI.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "string" => Some(VariableType::String),
            "number" => Some(VariableType::Number),
            "boolean" => Some(VariableType::Boolean),
            "structure" => Some(VariableType::Structure),
            "array" => Some(VariableType::Array),
            _ => None,
        }
    }
}

/// Type of the container a variable lives in, as seen by drag and drop.
/// `TopLevel` means the variable is a root of a `VariablesContainer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentKind {
    TopLevel,
    Structure,
    Array,
}

/// Relocation category of a drag-and-drop between two tree positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementType {
    InsideTopLevel,
    TopLevelToStructure,
    TopLevelToArray,
    StructureToTopLevel,
    ArrayToTopLevel,
    FromStructureToAnotherStructure,
    InsideSameStructure,
    FromArrayToAnotherArray,
    InsideSameArray,
    FromStructureToArray,
    FromArrayToStructure,
}

impl MovementType {
    /// Whether the editor accepts this movement on drop.
    pub fn is_legal(self) -> bool {
        match self {
            MovementType::InsideTopLevel
            | MovementType::TopLevelToStructure
            | MovementType::StructureToTopLevel
            | MovementType::FromStructureToAnotherStructure
            | MovementType::FromArrayToAnotherArray
            | MovementType::InsideSameArray => true,
            MovementType::TopLevelToArray
            | MovementType::ArrayToTopLevel
            | MovementType::InsideSameStructure
            | MovementType::FromStructureToArray
            | MovementType::FromArrayToStructure => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_names_round_trip() {
        for t in [
            VariableType::String,
            VariableType::Number,
            VariableType::Boolean,
            VariableType::Structure,
            VariableType::Array,
        ] {
            assert_eq!(VariableType::parse(t.as_str()), Some(t));
        }
        assert_eq!(VariableType::parse("color"), None);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&VariableType::Structure).unwrap();
        assert_eq!(json, "\"structure\"");
    }

    #[test]
    fn same_structure_reorder_is_illegal() {
        assert!(!MovementType::InsideSameStructure.is_legal());
        assert!(MovementType::InsideSameArray.is_legal());
    }
}
