use crate::api::error::NameError;
use crate::api::types::{ParentKind, VariableType};
use crate::core::variable::{parse_number, Variable};
use crate::tree::context::resolve;
use crate::tree::expansion::{retain_resolvable, update_node_ids_following_rename};
use crate::tree::naming::{new_name_generator, validate_name};
use crate::tree::node_id::{self, is_inherited_node_id, is_same_or_descendant};

use super::VariablesEditor;

impl VariablesEditor {
    // ---- Rename ----

    /// Rename the variable at `node_id`. A refused name is recorded against
    /// the node (see [`VariablesEditor::name_error`]) and the tree is left as is.
    /// Array elements are positional and cannot be renamed.
    pub fn change_name(&mut self, node_id: &str, new_name: &str) -> Result<bool, NameError> {
        if is_inherited_node_id(node_id) {
            return Ok(false);
        }
        let context = resolve(node_id, &self.container);
        let Some(old_name) = context.name.clone() else {
            return Ok(false);
        };
        let Some(parent_kind) = context.parent_kind() else {
            return Ok(false);
        };
        let parent_path = context.parent_path().to_vec();
        if parent_kind == ParentKind::Array {
            return Ok(false);
        }

        if let Err(err) = validate_name(new_name, parent_kind == ParentKind::TopLevel) {
            self.name_errors.insert(node_id.to_string(), err.clone());
            return Err(err);
        }
        if new_name == old_name {
            self.name_errors.remove(node_id);
            return Ok(false);
        }

        let renamed = match parent_kind {
            ParentKind::TopLevel => self.container.rename(&old_name, new_name),
            _ => self
                .container
                .get_path_mut(&parent_path)
                .is_some_and(|parent| parent.rename_child(&old_name, new_name)),
        };
        if !renamed {
            let err = NameError::AlreadyTaken(new_name.to_string());
            self.name_errors.insert(node_id.to_string(), err.clone());
            return Err(err);
        }

        log::debug!("renamed {node_id} to {new_name}");
        self.name_errors.remove(node_id);
        self.rekey_name_errors(node_id, new_name);
        self.save_to_history();
        self.expanded_nodes = update_node_ids_following_rename(&self.expanded_nodes, node_id, new_name);
        self.selected_nodes = update_node_ids_following_rename(&self.selected_nodes, node_id, new_name);
        Ok(true)
    }

    /// Move errors recorded on descendants of a renamed node to their new node-ids.
    fn rekey_name_errors(&mut self, old_node_id: &str, new_name: &str) {
        let new_node_id = node_id::replace_last_segment(old_node_id, new_name);
        self.name_errors = std::mem::take(&mut self.name_errors)
            .into_iter()
            .map(|(id, err)| {
                if is_same_or_descendant(&id, old_node_id) {
                    (format!("{new_node_id}{}", &id[old_node_id.len()..]), err)
                } else {
                    (id, err)
                }
            })
            .collect();
    }

    // ---- Type & value ----

    /// Change the type of an own variable, converting its value.
    pub fn change_type(&mut self, node_id: &str, new_type: VariableType) -> bool {
        if is_inherited_node_id(node_id) {
            return false;
        }
        let path = resolve(node_id, &self.container).path;
        let Some(variable) = self.container.get_path_mut(&path) else {
            return false;
        };
        if variable.variable_type() == new_type {
            return false;
        }
        variable.cast_to(new_type);
        self.save_to_history();
        // Children of a former collection are gone or renumbered.
        retain_resolvable(&mut self.selected_nodes, &self.container, self.inherited.as_ref());
        self.reset_expansion_from_tree();
        true
    }

    /// Set the value of a primitive variable from its text form.
    ///
    /// Editing an inherited top-level variable copies it into the own
    /// container first (at position 0) and points the selection at the copy.
    pub fn change_value(&mut self, node_id: &str, value: &str) -> bool {
        if is_inherited_node_id(node_id) {
            return self.change_inherited_value(node_id, value);
        }
        let path = resolve(node_id, &self.container).path;
        let Some(variable) = self.container.get_path_mut(&path) else {
            return false;
        };
        if !apply_value(variable, value) {
            return false;
        }
        self.save_to_history();
        true
    }

    fn change_inherited_value(&mut self, node_id: &str, value: &str) -> bool {
        let Some(inherited) = &self.inherited else {
            return false;
        };
        let context = resolve(node_id, inherited);
        let (Some(variable), Some(name)) = (context.variable, context.name.clone()) else {
            return false;
        };
        if context.depth != 0 {
            return false;
        }

        match self.container.get_mut(&name) {
            // Already overridden: the own copy is what is being edited.
            Some(own) => {
                if !apply_value(own, value) {
                    return false;
                }
            }
            None => {
                let mut copy = variable.clone();
                if !apply_value(&mut copy, value) {
                    return false;
                }
                self.container.insert(name.clone(), copy, 0);
                log::info!("copied inherited variable {name} into the container");
            }
        }

        match self.selected_nodes.iter().position(|id| id == node_id) {
            Some(index) => self.selected_nodes[index] = name,
            None => self.selected_nodes.push(name),
        }
        self.save_to_history();
        true
    }

    // ---- Add ----

    /// Add a top-level variable after the first selected node (or its oldest
    /// ancestor), or at the end when nothing own is selected. Returns the new
    /// name, `None` if the selected node no longer resolves.
    pub fn add(&mut self) -> Option<String> {
        let add_at_end = self.selected_nodes.is_empty() || self.selected_nodes.iter().any(|id| is_inherited_node_id(id));
        let position = if add_at_end {
            self.container.len()
        } else {
            let context = resolve(&self.selected_nodes[0], &self.container);
            let target_name = context.name.clone()?;
            let top_level_name = context.oldest_ancestor().map_or(target_name, |ancestor| ancestor.name.clone());
            self.container.position(&top_level_name)? + 1
        };

        let name = new_name_generator(&self.config.new_variable_name, |n| self.container.has(n), "");
        self.container.insert(name.clone(), Variable::default(), position);
        self.save_to_history();
        self.selected_nodes = vec![name.clone()];
        Some(name)
    }

    /// Add a child to a collection: an empty string child in a structure, a
    /// new element typed like the last one in an array.
    pub fn add_child(&mut self, node_id: &str) -> bool {
        if is_inherited_node_id(node_id) {
            return false;
        }
        let path = resolve(node_id, &self.container).path;
        let Some(variable) = self.container.get_path_mut(&path) else {
            return false;
        };
        match variable.variable_type() {
            VariableType::Structure => {
                let name = new_name_generator(&self.config.new_child_name, |n| variable.has_child(n), "");
                variable.insert_child(name, Variable::string(""));
            }
            VariableType::Array => {
                variable.push_new();
            }
            _ => return false,
        }
        variable.folded = false;
        self.save_to_history();
        self.expand(node_id);
        true
    }

    // ---- Delete ----

    /// Remove one own variable (and its subtree).
    pub fn delete_node(&mut self, node_id: &str) -> bool {
        if !self.remove_node(node_id) {
            return false;
        }
        self.selected_nodes.retain(|id| !is_same_or_descendant(id, node_id));
        retain_resolvable(&mut self.selected_nodes, &self.container, self.inherited.as_ref());
        self.reset_expansion_from_tree();
        self.save_to_history();
        true
    }

    fn remove_node(&mut self, node_id: &str) -> bool {
        if is_inherited_node_id(node_id) {
            return false;
        }
        let path = resolve(node_id, &self.container).path;
        let removed = self.container.remove_path(&path).is_some();
        if removed {
            self.name_errors.retain(|id, _| !is_same_or_descendant(id, node_id));
        }
        removed
    }

    /// Remove every selected own variable. Deepest and last positions go
    /// first so array indices of the remaining targets stay valid.
    pub fn delete_selection(&mut self) -> bool {
        let mut paths: Vec<_> = self
            .selected_nodes
            .iter()
            .filter(|id| !is_inherited_node_id(id))
            .map(|id| resolve(id, &self.container).path)
            .filter(|path| !path.is_empty())
            .collect();
        paths.sort();
        paths.dedup();

        let mut removed = 0;
        for path in paths.iter().rev() {
            if self.container.remove_path(path).is_some() {
                removed += 1;
            }
        }
        if removed == 0 {
            return false;
        }
        log::debug!("deleted {removed} selected variables");
        self.selected_nodes.clear();
        self.name_errors.clear();
        self.reset_expansion_from_tree();
        self.save_to_history();
        true
    }

    // ---- Inherited ----

    /// Copy an inherited top-level variable into the own container (at the
    /// end) so it can be edited. No-op if the name is already defined.
    pub fn edit_inherited_variable(&mut self, node_id: &str) -> bool {
        let Some(inherited) = &self.inherited else {
            return false;
        };
        let Some(root_name) = node_id::decode(node_id).segments.into_iter().next() else {
            return false;
        };
        let context = resolve(&node_id::top_level_node_id(&root_name, true), inherited);
        let (Some(variable), Some(name)) = (context.variable, context.name.clone()) else {
            return false;
        };
        if self.container.has(&name) {
            return false;
        }
        let position = self.container.len();
        self.container.insert(name.clone(), variable.clone(), position);
        self.save_to_history();
        self.selected_nodes = vec![name.clone()];
        self.expand(&name);
        true
    }
}

/// Write a text value into a primitive variable. Returns whether it changed.
fn apply_value(variable: &mut Variable, text: &str) -> bool {
    match variable.variable_type() {
        VariableType::String => {
            if variable.as_string() == text {
                return false;
            }
            variable.set_string(text);
        }
        VariableType::Number => {
            let number = parse_number(text);
            if variable.as_number() == number {
                return false;
            }
            variable.set_number(number);
        }
        VariableType::Boolean => {
            let value = text == "true";
            if variable.as_bool() == value {
                return false;
            }
            variable.set_bool(value);
        }
        VariableType::Structure | VariableType::Array => {
            log::error!("cannot set a text value on a {} variable", variable.variable_type().as_str());
            return false;
        }
    }
    true
}
