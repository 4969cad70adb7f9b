use crate::api::types::{ParentKind, VariableType};
use crate::clipboard::{decode_entries, encode_entries, ClipboardEntry, ClipboardStore};
use crate::core::variable::Variable;
use crate::tree::context::resolve;
use crate::tree::naming::new_name_generator;
use crate::tree::node_id::{child_node_id, is_inherited_node_id};
use crate::tree::path::PathSegment;

use super::VariablesEditor;

/// Where pasted variables go, derived from the first selected node.
enum PasteTarget {
    TopLevel { position: Option<usize> },
    Structure { parent_path: Vec<PathSegment>, parent_id: String },
    Array { parent_path: Vec<PathSegment>, parent_id: String, index: usize },
}

impl VariablesEditor {
    /// Put the selected variables (own or inherited) on the clipboard.
    /// Returns how many were copied; an empty selection leaves the clipboard as is.
    pub fn copy_selection(&mut self) -> Result<usize, serde_json::Error> {
        let entries: Vec<ClipboardEntry> = self
            .selected_nodes
            .iter()
            .filter_map(|id| {
                let source = match &self.inherited {
                    Some(inherited) if is_inherited_node_id(id) => inherited,
                    _ => &self.container,
                };
                let context = resolve(id, source);
                let parent_type = match context.parent_kind()? {
                    ParentKind::Array => VariableType::Array,
                    ParentKind::TopLevel | ParentKind::Structure => VariableType::Structure,
                };
                Some(ClipboardEntry {
                    name: context.name.clone()?,
                    serialized_variable: context.variable?.into(),
                    parent_type,
                })
            })
            .collect();
        if entries.is_empty() {
            return Ok(0);
        }
        self.clipboard.set(&self.config.clipboard_kind, encode_entries(&entries)?);
        log::debug!("copied {} variables", entries.len());
        Ok(entries.len())
    }

    /// Copy the selection, then delete the own part of it.
    pub fn cut_selection(&mut self) -> Result<bool, serde_json::Error> {
        let copied = self.copy_selection()?;
        Ok(copied > 0 && self.delete_selection())
    }

    /// Insert the clipboard content next to the first selected node.
    ///
    /// With no selection, or an inherited one, variables are appended at the
    /// top level. Entries copied from an array only go into arrays and entries
    /// copied from a structure (or the top level) only go into structures or
    /// the top level; the others are skipped. Names are made unique with the
    /// copy prefix. Pasted nodes become the selection.
    pub fn paste_clipboard(&mut self) -> bool {
        let Some(payload) = self.clipboard.get(&self.config.clipboard_kind) else {
            return false;
        };
        let Some(entries) = decode_entries(payload) else {
            log::warn!("clipboard content is not a list of variables");
            return false;
        };
        let Some(target) = self.paste_target() else {
            return false;
        };

        let copy_prefix = self.config.copy_prefix.clone();
        let mut offset = 0;
        let mut pasted = Vec::new();
        for entry in entries {
            let variable = Variable::from(entry.serialized_variable);
            match &target {
                PasteTarget::TopLevel { position } => {
                    if entry.parent_type == VariableType::Array {
                        continue;
                    }
                    let name = new_name_generator(&entry.name, |n| self.container.has(n), &copy_prefix);
                    let position = position.map_or(self.container.len(), |p| p + offset);
                    self.container.insert(name.clone(), variable, position);
                    offset += 1;
                    pasted.push(name);
                }
                PasteTarget::Structure { parent_path, parent_id } => {
                    if entry.parent_type != VariableType::Structure {
                        continue;
                    }
                    let Some(parent) = self.container.get_path_mut(parent_path) else {
                        continue;
                    };
                    let name = new_name_generator(&entry.name, |n| parent.has_child(n), &copy_prefix);
                    parent.insert_child(name.clone(), variable);
                    pasted.push(child_node_id(parent_id, &name));
                }
                PasteTarget::Array { parent_path, parent_id, index } => {
                    if entry.parent_type != VariableType::Array {
                        continue;
                    }
                    let Some(parent) = self.container.get_path_mut(parent_path) else {
                        continue;
                    };
                    let at = index + 1 + offset;
                    parent.insert_at_index(variable, at);
                    offset += 1;
                    pasted.push(child_node_id(parent_id, &at.to_string()));
                }
            }
        }

        if pasted.is_empty() {
            return false;
        }
        log::debug!("pasted {} variables", pasted.len());
        self.save_to_history();
        self.selected_nodes = pasted;
        true
    }

    fn paste_target(&self) -> Option<PasteTarget> {
        let first = match self.selected_nodes.first() {
            Some(id) if !self.selected_nodes.iter().any(|id| is_inherited_node_id(id)) => id,
            _ => return Some(PasteTarget::TopLevel { position: None }),
        };
        let context = resolve(first, &self.container);
        let name = context.name.as_deref()?;
        let target = match context.parent_kind()? {
            ParentKind::TopLevel => PasteTarget::TopLevel { position: Some(self.container.position(name)? + 1) },
            ParentKind::Structure => PasteTarget::Structure {
                parent_path: context.parent_path().to_vec(),
                parent_id: context.direct_parent_node_id()?.to_string(),
            },
            ParentKind::Array => PasteTarget::Array {
                parent_path: context.parent_path().to_vec(),
                parent_id: context.direct_parent_node_id()?.to_string(),
                index: match context.path.last()? {
                    PathSegment::Index(index) => *index,
                    PathSegment::Name(_) => return None,
                },
            },
        };
        Some(target)
    }
}
