//! String utility functions for common text manipulation operations.

/// Check if a value is blank: empty or whitespace only
///
/// # Examples
/// ```ignore
/// assert!(is_blank(""));
/// assert!(is_blank(" \t"));
/// assert!(!is_blank("org.mule"));
/// ```
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Join displayable items with `", "`
pub fn join_display<T: std::fmt::Display>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("\n\t"));
        assert!(!is_blank("a"));
        assert!(!is_blank(" a "));
    }

    #[test]
    fn test_join_display() {
        assert_eq!(join_display(["a", "b"]), "a, b");
        assert_eq!(join_display(Vec::<String>::new()), "");
    }
}
