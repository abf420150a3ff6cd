//! SQL-LIKE name patterns.

use std::fmt;

/// A case-insensitive LIKE pattern in which `%` matches any run of
/// characters (including none). Other characters match themselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LikePattern(String);

impl LikePattern {
    /// Use a raw pattern as-is.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    /// `%text%`: values containing `text`.
    pub fn contains(text: &str) -> Self {
        Self(format!("%{text}%"))
    }

    /// `%w1%w2%`: values containing the words of `text` in order, with
    /// anything (or nothing) between them.
    pub fn contains_words(text: &str) -> Self {
        Self(format!("%{}%", text.replace(' ', "%")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Test a value against the pattern, ignoring case.
    pub fn matches(&self, value: &str) -> bool {
        let pattern = self.0.to_lowercase();
        let value = value.to_lowercase();

        let parts: Vec<&str> = pattern.split('%').collect();
        let Some((first, rest)) = parts.split_first() else {
            return value.is_empty();
        };
        let Some((last, middle)) = rest.split_last() else {
            return value == *first;
        };

        let Some(mut remaining) = value.strip_prefix(first) else {
            return false;
        };
        for part in middle {
            match remaining.find(part) {
                Some(pos) => remaining = &remaining[pos + part.len()..],
                None => return false,
            }
        }
        remaining.ends_with(last)
    }
}

impl fmt::Display for LikePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_case_insensitive() {
        let pattern = LikePattern::contains("mexico");
        assert_eq!(pattern.as_str(), "%mexico%");
        assert!(pattern.matches("Mexico Square"));
        assert!(pattern.matches("Old MEXICO"));
        assert!(!pattern.matches("Mexic"));
    }

    #[test]
    fn contains_words_tolerates_missing_spaces() {
        let pattern = LikePattern::contains_words("edna mall");
        assert_eq!(pattern.as_str(), "%edna%mall%");
        assert!(pattern.matches("EdnaMall"));
        assert!(pattern.matches("Edna Mall Cinema"));
        assert!(!pattern.matches("Mall of Edna"));
    }

    #[test]
    fn anchored_patterns() {
        let pattern = LikePattern::new("bole%");
        assert!(pattern.matches("Bole Airport"));
        assert!(!pattern.matches("Old Bole"));

        let pattern = LikePattern::new("%airport");
        assert!(pattern.matches("Bole Airport"));
        assert!(!pattern.matches("Airport Road"));

        let exact = LikePattern::new("Piazza");
        assert!(exact.matches("piazza"));
        assert!(!exact.matches("piazza 2"));
    }

    #[test]
    fn overlapping_segments_do_not_double_count() {
        // "aa" must appear twice without sharing characters.
        let pattern = LikePattern::new("%aa%aa%");
        assert!(!pattern.matches("aaa"));
        assert!(pattern.matches("aaaa"));

        // Prefix and suffix must not overlap either.
        assert!(!LikePattern::new("ab%ba").matches("aba"));
    }
}
