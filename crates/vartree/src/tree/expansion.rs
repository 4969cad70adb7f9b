use crate::core::container::VariablesContainer;
use crate::core::variable::Variable;
use crate::tree::context::resolve;
use crate::tree::node_id::{self, is_same_or_descendant};

/// Node-ids of every unfolded collection variable, parents before children.
pub fn expanded_node_ids(container: &VariablesContainer, is_inherited: bool) -> Vec<String> {
    let mut expanded = Vec::new();
    for (name, variable) in container.iter() {
        collect_expanded(&node_id::top_level_node_id(name, is_inherited), variable, &mut expanded);
    }
    expanded
}

fn collect_expanded(id: &str, variable: &Variable, expanded: &mut Vec<String>) {
    if !variable.is_collection() || variable.folded {
        return;
    }
    expanded.push(id.to_string());
    for (segment, child) in variable.named_children() {
        collect_expanded(&node_id::child_node_id(id, &segment), child, expanded);
    }
}

/// Set the folded flag of every listed node that still resolves.
pub fn fold_nodes<S: AsRef<str>>(container: &mut VariablesContainer, node_ids: &[S], folded: bool) {
    for id in node_ids {
        let path = resolve(id.as_ref(), container).path;
        if let Some(variable) = container.get_path_mut(&path) {
            variable.folded = folded;
        }
    }
}

/// Rewrite a node-id list after the node `old_node_id` was renamed to `new_name`.
/// The node itself and all of its descendants keep their relative suffix.
pub fn update_node_ids_following_rename(list: &[String], old_node_id: &str, new_name: &str) -> Vec<String> {
    let new_node_id = node_id::replace_last_segment(old_node_id, new_name);
    list.iter()
        .map(|id| {
            if is_same_or_descendant(id, old_node_id) {
                format!("{new_node_id}{}", &id[old_node_id.len()..])
            } else {
                id.clone()
            }
        })
        .collect()
}

/// Keep only the node-ids of a list that still resolve in `container`
/// (or in `inherited` for inherited ids).
pub fn retain_resolvable(
    list: &mut Vec<String>,
    container: &VariablesContainer,
    inherited: Option<&VariablesContainer>,
) {
    list.retain(|id| {
        let target = if node_id::is_inherited_node_id(id) { inherited } else { Some(container) };
        target.is_some_and(|c| resolve(id, c).is_resolved())
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container() -> VariablesContainer {
        let mut c = VariablesContainer::new();
        let mut folded = Variable::structure([("k", Variable::number(1.0))]);
        folded.folded = true;
        c.insert(
            "s",
            Variable::structure([
                ("inner", Variable::array(vec![Variable::number(1.0)])),
                ("folded", folded),
            ]),
            0,
        );
        c.insert("n", Variable::number(1.0), 1);
        c
    }

    #[test]
    fn collects_unfolded_collections() {
        let c = container();
        assert_eq!(expanded_node_ids(&c, false), vec!["s", "s$.$inner"]);
        assert_eq!(expanded_node_ids(&c, true), vec!["$!s", "$!s$.$inner"]);
    }

    #[test]
    fn fold_and_unfold() {
        let mut c = container();
        fold_nodes(&mut c, &["s$.$inner", "missing"], true);
        assert_eq!(expanded_node_ids(&c, false), vec!["s"]);
        fold_nodes(&mut c, &["s$.$folded"], false);
        assert_eq!(expanded_node_ids(&c, false), vec!["s", "s$.$folded"]);
    }

    #[test]
    fn rename_rewrites_node_and_descendants() {
        let list = vec![
            "s".to_string(),
            "s$.$inner".to_string(),
            "s$.$inner$.$0".to_string(),
            "s$.$innerX".to_string(),
            "other".to_string(),
        ];
        let updated = update_node_ids_following_rename(&list, "s$.$inner", "renamed");
        assert_eq!(
            updated,
            vec!["s", "s$.$renamed", "s$.$renamed$.$0", "s$.$innerX", "other"]
        );
    }

    #[test]
    fn rename_of_top_level() {
        let list = vec!["s".to_string(), "s$.$a".to_string(), "so".to_string()];
        let updated = update_node_ids_following_rename(&list, "s", "t");
        assert_eq!(updated, vec!["t", "t$.$a", "so"]);
    }

    #[test]
    fn retain_drops_stale_ids() {
        let c = container();
        let mut list = vec!["s$.$inner$.$0".to_string(), "s$.$inner$.$5".to_string(), "$!s".to_string()];
        retain_resolvable(&mut list, &c, None);
        assert_eq!(list, vec!["s$.$inner$.$0"]);
    }
}
