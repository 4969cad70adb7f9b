// tree/node_id.rs
//
// Node-id codec. A node-id is the string key the tree view uses for selection,
// expansion and search bookkeeping:
//
//   root$.$child$.$0$.$leaf       variable of the editable container
//   $!root$.$child                variable of the read-only inherited container
//
// Segments are not escaped. Names containing SEPARATOR or INHERITED_PREFIX are
// refused at rename time, which keeps the encoding unambiguous.

/// Joins path segments.
pub const SEPARATOR: &str = "$.$";
/// Marks a root segment as belonging to the inherited container.
pub const INHERITED_PREFIX: &str = "$!";

/// A node-id split back into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedNodeId {
    pub is_inherited: bool,
    /// Root name first (without the inherited prefix), then child segments.
    pub segments: Vec<String>,
}

/// Encode a root name and child segments into a node-id.
pub fn encode<S: AsRef<str>>(root: &str, segments: &[S], is_inherited: bool) -> String {
    let mut node_id = top_level_node_id(root, is_inherited);
    for segment in segments {
        node_id.push_str(SEPARATOR);
        node_id.push_str(segment.as_ref());
    }
    node_id
}

pub fn decode(node_id: &str) -> DecodedNodeId {
    let (is_inherited, rest) = match node_id.strip_prefix(INHERITED_PREFIX) {
        Some(rest) => (true, rest),
        None => (false, node_id),
    };
    DecodedNodeId {
        is_inherited,
        segments: rest.split(SEPARATOR).map(str::to_string).collect(),
    }
}

pub fn top_level_node_id(name: &str, is_inherited: bool) -> String {
    if is_inherited {
        format!("{INHERITED_PREFIX}{name}")
    } else {
        name.to_string()
    }
}

pub fn child_node_id(parent: &str, segment: &str) -> String {
    format!("{parent}{SEPARATOR}{segment}")
}

pub fn is_inherited_node_id(node_id: &str) -> bool {
    node_id.starts_with(INHERITED_PREFIX)
}

/// Node-id of the direct parent, `None` for a top-level node.
pub fn parent_node_id(node_id: &str) -> Option<&str> {
    node_id.rfind(SEPARATOR).map(|idx| &node_id[..idx])
}

/// Last segment of a node-id (without the inherited prefix for roots).
pub fn last_segment(node_id: &str) -> &str {
    match node_id.rfind(SEPARATOR) {
        Some(idx) => &node_id[idx + SEPARATOR.len()..],
        None => node_id.strip_prefix(INHERITED_PREFIX).unwrap_or(node_id),
    }
}

/// Replace the last segment, keeping the parent part (and inherited prefix) as is.
pub fn replace_last_segment(node_id: &str, segment: &str) -> String {
    match parent_node_id(node_id) {
        Some(parent) => child_node_id(parent, segment),
        None => top_level_node_id(segment, is_inherited_node_id(node_id)),
    }
}

/// Whether `node_id` is `ancestor` itself or lies below it.
pub fn is_same_or_descendant(node_id: &str, ancestor: &str) -> bool {
    match node_id.strip_prefix(ancestor) {
        Some("") => true,
        Some(rest) => rest.starts_with(SEPARATOR),
        None => false,
    }
}
