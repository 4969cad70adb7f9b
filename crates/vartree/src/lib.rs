pub mod api;
pub mod clipboard;
pub mod core;
pub mod editor;
pub mod history;
pub mod input;
pub mod tree;

// Re-export key types at crate root for convenience
pub use api::config::EditorConfig;
pub use api::error::{EditorError, NameError};
pub use api::types::{MovementType, ParentKind, VariableType};
pub use clipboard::{ClipboardEntry, ClipboardStore, MemoryClipboard};
pub use core::container::VariablesContainer;
pub use core::serialize::{ChildData, ContainerData, VariableData};
pub use core::variable::{Variable, VariableValue};
pub use editor::VariablesEditor;
pub use history::{History, HistoryHandler};
pub use input::action::EditorAction;
pub use tree::{PathSegment, VariableContext, INHERITED_PREFIX, SEPARATOR};
