use crate::api::types::{ParentKind, VariableType};
use crate::core::container::VariablesContainer;
use crate::core::variable::Variable;
use crate::tree::node_id::{self, SEPARATOR};
use crate::tree::path::PathSegment;

/// One ancestor of a resolved node.
#[derive(Debug, Clone)]
pub struct Ancestor<'a> {
    pub node_id: String,
    pub name: String,
    pub variable: &'a Variable,
}

/// Where a node-id points in a container, computed fresh for each operation.
///
/// Borrows the container, so it cannot outlive the next mutation: array
/// indices shift on insert/remove and a stale context would point elsewhere.
#[derive(Debug, Clone)]
pub struct VariableContext<'a> {
    /// The addressed variable, `None` if the node-id no longer matches the tree.
    pub variable: Option<&'a Variable>,
    /// Last segment of the node-id, `None` if unresolved.
    pub name: Option<String>,
    /// Zero-based index of the last segment.
    pub depth: usize,
    /// Ancestors from the root down to the direct parent.
    pub lineage: Vec<Ancestor<'a>>,
    /// Explicit path to the variable, for mutation. Empty if unresolved.
    pub path: Vec<PathSegment>,
}

impl<'a> VariableContext<'a> {
    fn unresolved(depth: usize) -> Self {
        Self { variable: None, name: None, depth, lineage: Vec::new(), path: Vec::new() }
    }

    pub fn is_resolved(&self) -> bool {
        self.variable.is_some()
    }

    /// Direct parent variable, `None` for a top-level variable.
    pub fn direct_parent(&self) -> Option<&'a Variable> {
        self.lineage.last().map(|ancestor| ancestor.variable)
    }

    /// Node-id of the direct parent, `None` for a top-level variable.
    pub fn direct_parent_node_id(&self) -> Option<&str> {
        self.lineage.last().map(|ancestor| ancestor.node_id.as_str())
    }

    /// Top-level ancestor, `None` for a top-level variable.
    pub fn oldest_ancestor(&self) -> Option<&Ancestor<'a>> {
        self.lineage.first()
    }

    /// Kind of container the variable lives in.
    pub fn parent_kind(&self) -> Option<ParentKind> {
        match self.direct_parent() {
            None => Some(ParentKind::TopLevel),
            Some(parent) => match parent.variable_type() {
                VariableType::Structure => Some(ParentKind::Structure),
                VariableType::Array => Some(ParentKind::Array),
                _ => None,
            },
        }
    }

    /// Path of the direct parent (empty for top-level variables).
    pub fn parent_path(&self) -> &[PathSegment] {
        match self.path.split_last() {
            Some((_, parent)) => parent,
            None => &[],
        }
    }

    /// Whether `variable` is this node or one of its ancestors (identity, not equality).
    pub fn lineage_contains(&self, variable: &Variable) -> bool {
        self.lineage.iter().any(|ancestor| std::ptr::eq(ancestor.variable, variable))
    }
}

/// Walk `node_id` down `container`. Never fails: an id that no longer matches
/// the tree gives a context with `variable: None`.
pub fn resolve<'a>(node_id: &str, container: &'a VariablesContainer) -> VariableContext<'a> {
    let decoded = node_id::decode(node_id);
    let depth = decoded.segments.len().saturating_sub(1);
    let mut segments = decoded.segments.into_iter();

    let Some(root_name) = segments.next() else {
        return VariableContext::unresolved(depth);
    };
    let Some(root) = container.get(&root_name) else {
        return VariableContext::unresolved(depth);
    };

    let mut current = root;
    let mut current_name = root_name.clone();
    let mut current_node_id = node_id::top_level_node_id(&root_name, decoded.is_inherited);
    let mut path = vec![PathSegment::Name(root_name)];
    let mut lineage = Vec::with_capacity(depth);

    for segment in segments {
        let Some((path_segment, child)) = current.child_at_segment(&segment) else {
            return VariableContext::unresolved(depth);
        };
        let child_node_id = format!("{current_node_id}{SEPARATOR}{segment}");
        lineage.push(Ancestor {
            node_id: std::mem::replace(&mut current_node_id, child_node_id),
            name: std::mem::replace(&mut current_name, segment),
            variable: current,
        });
        path.push(path_segment);
        current = child;
    }

    VariableContext { variable: Some(current), name: Some(current_name), depth, lineage, path }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container() -> VariablesContainer {
        let mut c = VariablesContainer::new();
        c.insert(
            "p",
            Variable::structure([
                ("a", Variable::number(1.0)),
                ("b", Variable::structure([("c", Variable::string("x"))])),
            ]),
            0,
        );
        c.insert("list", Variable::array(vec![Variable::number(35.0)]), 1);
        c
    }

    #[test]
    fn resolves_nested_structure() {
        let c = container();
        let ctx = resolve("p$.$b$.$c", &c);
        assert_eq!(ctx.variable.unwrap().as_string(), "x");
        assert_eq!(ctx.name.as_deref(), Some("c"));
        assert_eq!(ctx.depth, 2);
        let ids: Vec<&str> = ctx.lineage.iter().map(|a| a.node_id.as_str()).collect();
        assert_eq!(ids, vec!["p", "p$.$b"]);
        let names: Vec<&str> = ctx.lineage.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["p", "b"]);
        assert_eq!(ctx.direct_parent_node_id(), Some("p$.$b"));
    }

    #[test]
    fn top_level_has_empty_lineage() {
        let c = container();
        let ctx = resolve("list", &c);
        assert!(ctx.is_resolved());
        assert_eq!(ctx.depth, 0);
        assert!(ctx.lineage.is_empty());
        assert_eq!(ctx.parent_kind(), Some(ParentKind::TopLevel));
    }

    #[test]
    fn array_index_out_of_bounds_is_unresolved() {
        let c = container();
        assert!(resolve("list$.$0", &c).is_resolved());
        let ctx = resolve("list$.$1", &c);
        assert!(ctx.variable.is_none());
        assert!(ctx.name.is_none());
        assert!(!resolve("list$.$minus", &c).is_resolved());
    }

    #[test]
    fn missing_names_are_unresolved() {
        let c = container();
        assert!(!resolve("nope", &c).is_resolved());
        assert!(!resolve("p$.$zzz", &c).is_resolved());
        assert!(!resolve("p$.$a$.$deeper", &c).is_resolved());
    }

    #[test]
    fn inherited_prefix_is_stripped_for_lookup() {
        let c = container();
        let ctx = resolve("$!p$.$a", &c);
        assert_eq!(ctx.variable.unwrap().as_number(), 1.0);
        assert_eq!(ctx.lineage[0].node_id, "$!p");
    }

    #[test]
    fn path_addresses_the_same_variable() {
        let c = container();
        let ctx = resolve("list$.$0", &c);
        assert_eq!(ctx.path, vec![PathSegment::Name("list".into()), PathSegment::Index(0)]);
        assert!(std::ptr::eq(c.get_path(&ctx.path).unwrap(), ctx.variable.unwrap()));
        assert_eq!(ctx.parent_kind(), Some(ParentKind::Array));
    }
}
