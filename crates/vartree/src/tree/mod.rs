// tree/mod.rs
//
// Addressing and bookkeeping over a variable tree: node-id codec, context
// resolution, drag-and-drop movements, naming rules, fold state and search.
// Everything here works on a container borrowed for one operation.

pub mod context;
pub mod expansion;
pub mod movement;
pub mod naming;
pub mod node_id;
pub mod path;
pub mod search;

pub use context::{resolve, Ancestor, VariableContext};
pub use movement::{can_drop, classify, move_variable, MoveOutcome};
pub use naming::{new_name_generator, validate_name};
pub use node_id::{DecodedNodeId, INHERITED_PREFIX, SEPARATOR};
pub use path::PathSegment;
pub use search::{normalize_for_search, search};
