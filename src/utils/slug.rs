// src/utils/slug.rs

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex is valid"));

/// Derives a subject id from its display name: lowercase, whitespace runs become `-`.
pub fn slugify(name: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&name.to_lowercase(), "-")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_simple() {
        assert_eq!(slugify("Maths"), "maths");
    }

    #[test]
    fn test_slugify_collapses_whitespace() {
        assert_eq!(slugify("Further  Pure\tMaths"), "further-pure-maths");
    }

    #[test]
    fn test_slugify_keeps_punctuation() {
        // Only whitespace is rewritten.
        assert_eq!(slugify("A-Level Art & Design"), "a-level-art-&-design");
    }
}
