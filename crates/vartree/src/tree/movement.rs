// tree/movement.rs
//
// Drag-and-drop relocation inside the editable container.
//
// `can_drop` is queried repeatedly while the pointer moves and must stay
// side-effect free. `move_variable` runs once on drop. Both resolve the two
// node-ids fresh, classify the pair by the kind of their direct parents and
// only act on legal movements.

use crate::api::types::{MovementType, ParentKind};
use crate::core::container::VariablesContainer;
use crate::tree::context::{resolve, VariableContext};
use crate::tree::naming::new_name_generator;
use crate::tree::node_id::{self, is_inherited_node_id};
use crate::tree::path::{adjust_after_array_removal, to_node_id, PathSegment};

/// Result of a performed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub movement: MovementType,
    /// Node-id of the moved variable at its new position.
    pub new_node_id: String,
    /// Name (or index) of the moved variable at its new position.
    pub new_name: String,
}

/// Classify a drag of `dragged` onto `target`. `None` if either is unresolved.
pub fn classify(dragged: &VariableContext<'_>, target: &VariableContext<'_>) -> Option<MovementType> {
    if !dragged.is_resolved() || !target.is_resolved() {
        return None;
    }
    let same_parent = match (dragged.direct_parent(), target.direct_parent()) {
        (Some(a), Some(b)) => std::ptr::eq(a, b),
        _ => false,
    };
    let movement = match (dragged.parent_kind()?, target.parent_kind()?) {
        (ParentKind::TopLevel, ParentKind::TopLevel) => MovementType::InsideTopLevel,
        (ParentKind::TopLevel, ParentKind::Structure) => MovementType::TopLevelToStructure,
        (ParentKind::TopLevel, ParentKind::Array) => MovementType::TopLevelToArray,
        (ParentKind::Structure, ParentKind::TopLevel) => MovementType::StructureToTopLevel,
        (ParentKind::Array, ParentKind::TopLevel) => MovementType::ArrayToTopLevel,
        (ParentKind::Structure, ParentKind::Structure) if same_parent => MovementType::InsideSameStructure,
        (ParentKind::Structure, ParentKind::Structure) => MovementType::FromStructureToAnotherStructure,
        (ParentKind::Array, ParentKind::Array) if same_parent => MovementType::InsideSameArray,
        (ParentKind::Array, ParentKind::Array) => MovementType::FromArrayToAnotherArray,
        (ParentKind::Structure, ParentKind::Array) => MovementType::FromStructureToArray,
        (ParentKind::Array, ParentKind::Structure) => MovementType::FromArrayToStructure,
    };
    Some(movement)
}

/// Whether dropping `dragged_id` onto `target_id` would perform a move.
pub fn can_drop(container: &VariablesContainer, dragged_id: &str, target_id: &str) -> bool {
    plan(container, dragged_id, target_id).is_some()
}

/// Everything a move needs, extracted so the borrow of the container ends before mutation.
struct MovePlan {
    movement: MovementType,
    dragged_path: Vec<PathSegment>,
    dragged_name: String,
    target_path: Vec<PathSegment>,
    target_name: String,
}

fn plan(container: &VariablesContainer, dragged_id: &str, target_id: &str) -> Option<MovePlan> {
    if is_inherited_node_id(dragged_id) || is_inherited_node_id(target_id) || dragged_id == target_id {
        return None;
    }
    let dragged = resolve(dragged_id, container);
    let target = resolve(target_id, container);
    let dragged_variable = dragged.variable?;
    // No moving a node into its own subtree.
    if target.lineage_contains(dragged_variable) {
        return None;
    }
    let movement = classify(&dragged, &target)?;
    if !movement.is_legal() {
        return None;
    }
    Some(MovePlan {
        movement,
        dragged_name: dragged.name?,
        dragged_path: dragged.path,
        target_name: target.name?,
        target_path: target.path,
    })
}

fn last_index(path: &[PathSegment]) -> Option<usize> {
    match path.last()? {
        PathSegment::Index(index) => Some(*index),
        PathSegment::Name(_) => None,
    }
}

fn parent_of(path: &[PathSegment]) -> &[PathSegment] {
    &path[..path.len().saturating_sub(1)]
}

/// Move `dragged_id` next to `target_id`. Returns `None` without touching the
/// tree when the move is not legal. Names moved into a structure or the top
/// level are made unique with `copy_prefix`.
pub fn move_variable(
    container: &mut VariablesContainer,
    dragged_id: &str,
    target_id: &str,
    copy_prefix: &str,
) -> Option<MoveOutcome> {
    let plan = plan(container, dragged_id, target_id)?;
    let outcome = match plan.movement {
        MovementType::InsideTopLevel => {
            let dragged_index = container.position(&plan.dragged_name)?;
            let target_index = container.position(&plan.target_name)?;
            let new_index = if target_index > dragged_index { target_index - 1 } else { target_index };
            container.move_variable(dragged_index, new_index);
            MoveOutcome {
                movement: plan.movement,
                new_node_id: plan.dragged_name.clone(),
                new_name: plan.dragged_name,
            }
        }
        MovementType::StructureToTopLevel => {
            let new_name = new_name_generator(&plan.dragged_name, |n| container.has(n), copy_prefix);
            let position = container.position(&plan.target_name)?;
            let variable = container.remove_path(&plan.dragged_path)?;
            container.insert(new_name.clone(), variable, position);
            MoveOutcome { movement: plan.movement, new_node_id: new_name.clone(), new_name }
        }
        MovementType::TopLevelToStructure | MovementType::FromStructureToAnotherStructure => {
            let target_parent_path = parent_of(&plan.target_path).to_vec();
            let new_name = {
                let target_parent = container.get_path(&target_parent_path)?;
                new_name_generator(&plan.dragged_name, |n| target_parent.has_child(n), copy_prefix)
            };
            let variable = container.remove_path(&plan.dragged_path)?;
            container.get_path_mut(&target_parent_path)?.insert_child(new_name.clone(), variable);
            MoveOutcome {
                movement: plan.movement,
                new_node_id: node_id::child_node_id(&to_node_id(&target_parent_path), &new_name),
                new_name,
            }
        }
        MovementType::FromArrayToAnotherArray => {
            let dragged_index = last_index(&plan.dragged_path)?;
            let target_index = last_index(&plan.target_path)?;
            let dragged_parent_path = parent_of(&plan.dragged_path).to_vec();
            let mut target_parent_path = parent_of(&plan.target_path).to_vec();
            let variable = container.remove_path(&plan.dragged_path)?;
            adjust_after_array_removal(&mut target_parent_path, &dragged_parent_path, dragged_index);
            container.get_path_mut(&target_parent_path)?.insert_at_index(variable, target_index);
            let new_name = target_index.to_string();
            MoveOutcome {
                movement: plan.movement,
                new_node_id: node_id::child_node_id(&to_node_id(&target_parent_path), &new_name),
                new_name,
            }
        }
        MovementType::InsideSameArray => {
            let dragged_index = last_index(&plan.dragged_path)?;
            let target_index = last_index(&plan.target_path)?;
            let new_index = if target_index > dragged_index { target_index - 1 } else { target_index };
            let parent_path = parent_of(&plan.target_path);
            container.get_path_mut(parent_path)?.move_child_in_array(dragged_index, new_index);
            let new_name = new_index.to_string();
            MoveOutcome {
                movement: plan.movement,
                new_node_id: node_id::child_node_id(&to_node_id(parent_path), &new_name),
                new_name,
            }
        }
        MovementType::TopLevelToArray
        | MovementType::ArrayToTopLevel
        | MovementType::InsideSameStructure
        | MovementType::FromStructureToArray
        | MovementType::FromArrayToStructure => return None,
    };
    log::debug!("moved {dragged_id} to {} ({:?})", outcome.new_node_id, outcome.movement);
    Some(outcome)
}
