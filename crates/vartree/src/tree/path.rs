use std::fmt;

use crate::tree::node_id;

/// One step of an explicit tree path: a structure child (or root) name, or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    Name(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Name(name) => f.write_str(name),
            PathSegment::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Node-id of a path in the editable container.
pub fn to_node_id(path: &[PathSegment]) -> String {
    let mut parts = path.iter().map(ToString::to_string);
    let root = parts.next().unwrap_or_default();
    let rest: Vec<String> = parts.collect();
    node_id::encode(&root, &rest, false)
}

/// Rewrite `path` after the element at `removed_index` was taken out of the
/// array at `array_path`: any later sibling (and everything below it) moves up by one.
pub fn adjust_after_array_removal(path: &mut [PathSegment], array_path: &[PathSegment], removed_index: usize) {
    if path.len() <= array_path.len() || !path.starts_with(array_path) {
        return;
    }
    if let PathSegment::Index(index) = &mut path[array_path.len()] {
        if *index > removed_index {
            *index -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(n: &str) -> PathSegment {
        PathSegment::Name(n.to_string())
    }

    #[test]
    fn later_siblings_shift_up() {
        let array = vec![name("list")];
        let mut path = vec![name("list"), PathSegment::Index(3), name("x")];
        adjust_after_array_removal(&mut path, &array, 1);
        assert_eq!(path, vec![name("list"), PathSegment::Index(2), name("x")]);
    }

    #[test]
    fn earlier_siblings_and_other_trees_untouched() {
        let array = vec![name("list")];
        let mut earlier = vec![name("list"), PathSegment::Index(0)];
        adjust_after_array_removal(&mut earlier, &array, 1);
        assert_eq!(earlier, vec![name("list"), PathSegment::Index(0)]);

        let mut other = vec![name("other"), PathSegment::Index(4)];
        adjust_after_array_removal(&mut other, &array, 1);
        assert_eq!(other, vec![name("other"), PathSegment::Index(4)]);
    }

    #[test]
    fn node_id_from_path() {
        let path = vec![name("a"), PathSegment::Index(2), name("b")];
        assert_eq!(to_node_id(&path), "a$.$2$.$b");
    }

    #[test]
    fn display() {
        assert_eq!(PathSegment::Index(7).to_string(), "7");
        assert_eq!(name("a").to_string(), "a");
    }
}
