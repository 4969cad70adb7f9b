use crate::api::error::NameError;
use crate::tree::node_id::{INHERITED_PREFIX, SEPARATOR};

/// Find a name that `exists` does not report as taken.
///
/// Returns `base` when free, otherwise tries `{prefix}{base}`, then
/// `{prefix}{base}2`, `{prefix}{base}3`, ...
pub fn new_name_generator(base: &str, exists: impl Fn(&str) -> bool, prefix: &str) -> String {
    if !exists(base) {
        return base.to_string();
    }
    let stem = format!("{prefix}{base}");
    let mut candidate = stem.clone();
    let mut suffix = 2u32;
    while exists(&candidate) {
        candidate = format!("{stem}{suffix}");
        suffix += 1;
    }
    candidate
}

/// Check a new variable name before any mutation.
///
/// Top-level names must also be identifiers: letters (any alphabet), digits
/// and underscores, not starting with a digit.
pub fn validate_name(name: &str, is_top_level: bool) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if name.contains(SEPARATOR) || name.contains(INHERITED_PREFIX) {
        return Err(NameError::ReservedToken);
    }
    if is_top_level && !is_identifier(name) {
        return Err(NameError::InvalidIdentifier);
    }
    Ok(())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_name_is_kept() {
        assert_eq!(new_name_generator("Score", |_| false, "CopyOf"), "Score");
    }

    #[test]
    fn prefix_then_numbered() {
        let taken = ["Score", "CopyOfScore", "CopyOfScore2"];
        let name = new_name_generator("Score", |n| taken.contains(&n), "CopyOf");
        assert_eq!(name, "CopyOfScore3");
    }

    #[test]
    fn without_prefix_numbers_from_two() {
        let taken = ["Variable"];
        assert_eq!(new_name_generator("Variable", |n| taken.contains(&n), ""), "Variable2");
    }

    #[test]
    fn reserved_tokens_rejected_everywhere() {
        assert_eq!(validate_name("a$.$b", false), Err(NameError::ReservedToken));
        assert_eq!(validate_name("$!a", false), Err(NameError::ReservedToken));
        assert_eq!(validate_name("", false), Err(NameError::Empty));
    }

    #[test]
    fn top_level_identifier_rules() {
        assert!(validate_name("Élan_2", true).is_ok());
        assert!(validate_name("_hidden", true).is_ok());
        assert_eq!(validate_name("2fast", true), Err(NameError::InvalidIdentifier));
        assert_eq!(validate_name("a.b", true), Err(NameError::InvalidIdentifier));
        assert_eq!(validate_name("with space", true), Err(NameError::InvalidIdentifier));
        assert!(validate_name("with space", false).is_ok());
    }
}
