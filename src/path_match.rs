/// Whether `configured` occurs literally in `path`.
///
/// Case-sensitive, no glob or regex semantics. An empty `configured`
/// string matches every path.
pub fn matches(path: &str, configured: &str) -> bool {
    path.contains(configured)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_anywhere_in_path() {
        assert!(matches("Private/secret.md", "Private/"));
        assert!(matches("work/Private/secret.md", "Private/"));
        assert!(matches("notes/2024-private.md", "private"));
    }

    #[test]
    fn case_sensitive() {
        assert!(!matches("private/secret.md", "Private/"));
    }

    #[test]
    fn no_pattern_semantics() {
        assert!(!matches("Private/secret.md", "Priv*"));
        assert!(!matches("Private/secret.md", "P.ivate"));
        assert!(matches("a/P.ivate/b.md", "P.ivate"));
    }

    #[test]
    fn empty_substring_matches_everything() {
        assert!(matches("Public/note.md", ""));
        assert!(matches("", ""));
    }
}
