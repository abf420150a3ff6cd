//! Text canonicalisation for place-name lookups.

/// Canonicalise free text into a lookup key.
///
/// Lower-cases, drops everything that is not a letter, digit or whitespace,
/// then collapses whitespace runs to a single space and trims. Characters are
/// dropped before whitespace is collapsed, so `normalize` is idempotent.
///
/// # Examples
///
/// ```
/// use fermata_server::locations::normalize;
///
/// assert_eq!(normalize("  Bole   Airport! "), "bole airport");
/// assert_eq!(normalize("Addis - Ababa"), "addis ababa");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_cases_and_trims() {
        assert_eq!(normalize("  MEXICO "), "mexico");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize("edna\t\n  mall"), "edna mall");
    }

    #[test]
    fn strips_punctuation() {
        assert_eq!(normalize("St. George's (Piazza)"), "st georges piazza");
        assert_eq!(normalize("cmes_area"), "cmesarea");
    }

    #[test]
    fn keeps_digits_and_non_ascii_letters() {
        assert_eq!(normalize("Bole 22"), "bole 22");
        assert_eq!(normalize("ቦሌ"), "ቦሌ");
    }

    #[test]
    fn empty_and_blank_inputs() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("?!"), "");
    }
}
