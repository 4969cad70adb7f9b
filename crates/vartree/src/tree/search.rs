// tree/search.rs
//
// Substring search over the variable tree. Matching ignores case and
// diacritics: both sides are NFD-decomposed, stripped of combining marks and
// lowercased before comparison.
//
// The matcher only reports nodes whose own name or value matches. Showing the
// ancestors of a match is the renderer's job (see `is_visible_in_search`).

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::core::container::VariablesContainer;
use crate::core::variable::{format_number, Variable, VariableValue};
use crate::tree::node_id::{self, is_same_or_descendant};

/// Normalize text for comparison: "Café" and "cafe" both give "cafe".
pub fn normalize_for_search(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect::<String>().to_lowercase()
}

/// Node-ids of every variable whose name or value contains `query`, depth-first.
/// An empty query matches nothing.
pub fn search(container: &VariablesContainer, query: &str, is_inherited: bool) -> Vec<String> {
    let query = normalize_for_search(query);
    let mut matches = Vec::new();
    if query.is_empty() {
        return matches;
    }
    for (name, variable) in container.iter() {
        search_variable(&node_id::top_level_node_id(name, is_inherited), name, variable, &query, &mut matches);
    }
    matches
}

fn search_variable(id: &str, name: &str, variable: &Variable, query: &str, matches: &mut Vec<String>) {
    let name_matches = normalize_for_search(name).contains(query);
    match &variable.value {
        VariableValue::Boolean(_) => {
            if name_matches {
                matches.push(id.to_string());
            }
        }
        VariableValue::String(_) | VariableValue::Number(_) => {
            if name_matches || value_matches(variable, query) {
                matches.push(id.to_string());
            }
        }
        VariableValue::Array(_) | VariableValue::Structure(_) => {
            if name_matches {
                matches.push(id.to_string());
            }
            for (segment, child) in variable.named_children() {
                search_variable(&node_id::child_node_id(id, &segment), &segment, child, query, matches);
            }
        }
    }
}

fn value_matches(variable: &Variable, query: &str) -> bool {
    match &variable.value {
        VariableValue::String(s) => normalize_for_search(s).contains(query),
        VariableValue::Number(n) => format_number(*n).contains(query),
        _ => false,
    }
}

/// Whether some descendant of `variable` (at any depth) has a name or a
/// value containing the already normalized `query`.
pub fn has_child_containing(variable: &Variable, query: &str) -> bool {
    variable.named_children().into_iter().any(|(segment, child)| {
        normalize_for_search(&segment).contains(query)
            || value_matches(child, query)
            || has_child_containing(child, query)
    })
}

/// A node is shown while searching when it matches or contains a match.
pub fn is_visible_in_search(id: &str, matches: &[String]) -> bool {
    matches.iter().any(|m| is_same_or_descendant(m, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container() -> VariablesContainer {
        let mut c = VariablesContainer::new();
        c.insert(
            "scores",
            Variable::array(vec![Variable::number(12.0), Variable::number(35.0)]),
            0,
        );
        c.insert(
            "menu",
            Variable::structure([
                ("drink", Variable::string("cafe")),
                ("enabled", Variable::boolean(true)),
            ]),
            1,
        );
        c.insert("Crème", Variable::string("brûlée"), 2);
        c
    }

    #[test]
    fn number_value_in_array() {
        let c = container();
        assert_eq!(search(&c, "35", false), vec!["scores$.$1"]);
    }

    #[test]
    fn diacritics_and_case_ignored() {
        let c = container();
        assert_eq!(search(&c, "café", false), vec!["menu$.$drink"]);
        assert_eq!(search(&c, "CREME", false), vec!["Crème"]);
        assert_eq!(search(&c, "brulee", false), vec!["Crème"]);
    }

    #[test]
    fn booleans_match_on_name_only() {
        let c = container();
        assert_eq!(search(&c, "true", false), Vec::<String>::new());
        assert_eq!(search(&c, "enab", false), vec!["menu$.$enabled"]);
    }

    #[test]
    fn collections_match_on_name_and_recurse() {
        let c = container();
        assert_eq!(search(&c, "s", false), vec!["scores"]);
        assert_eq!(search(&c, "e", false), vec!["scores", "menu", "menu$.$drink", "menu$.$enabled", "Crème"]);
    }

    #[test]
    fn inherited_ids_are_prefixed() {
        let c = container();
        assert_eq!(search(&c, "35", true), vec!["$!scores$.$1"]);
    }

    #[test]
    fn empty_query_matches_nothing() {
        assert!(search(&container(), "", false).is_empty());
    }

    #[test]
    fn visibility_includes_ancestors() {
        let matches = vec!["menu$.$drink".to_string()];
        assert!(is_visible_in_search("menu", &matches));
        assert!(is_visible_in_search("menu$.$drink", &matches));
        assert!(!is_visible_in_search("menu$.$enabled", &matches));
        assert!(!is_visible_in_search("men", &matches));
    }

    #[test]
    fn descendant_predicate() {
        let c = container();
        assert!(has_child_containing(c.get("menu").unwrap(), "cafe"));
        assert!(!has_child_containing(c.get("menu").unwrap(), "tea"));
    }
}
