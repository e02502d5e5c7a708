//! Slug normalisation.

/// Whether `c` may appear in a normalised slug.
fn is_slug_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '(' | ')')
}

/// Normalise free text into a slug.
///
/// Lowercases, turns spaces into underscores, drops everything outside
/// `[a-z0-9_()]` and collapses runs of underscores.
pub fn sluggify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    for c in input.to_lowercase().chars() {
        let c = if c == ' ' { '_' } else { c };
        if !is_slug_char(c) || (c == '_' && slug.ends_with('_')) {
            continue;
        }
        slug.push(c);
    }
    slug
}

/// Whether `slug` is non-empty and only contains `[a-zA-Z0-9_()]`.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '(' | ')'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sluggify() {
        assert_eq!(sluggify("test"), "test");
        assert_eq!(sluggify("test spaces"), "test_spaces");
        assert_eq!(
            sluggify("test spaces with_underscores"),
            "test_spaces_with_underscores"
        );
        assert_eq!(
            sluggify("test spaces with__double_underscores"),
            "test_spaces_with_double_underscores"
        );
    }

    #[test]
    fn test_sluggify_strips_punctuation_and_keeps_parentheses() {
        assert_eq!(sluggify("Hatsune Miku (Append)!"), "hatsune_miku_(append)");
        assert_eq!(sluggify("a - b"), "a_b");
        assert_eq!(sluggify("???"), "");
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("long_hair"));
        assert!(is_valid_slug("Name_(Series)"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("has space"));
        assert!(!is_valid_slug("semi;colon"));
    }
}
