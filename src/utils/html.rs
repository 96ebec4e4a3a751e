// src/utils/html.rs

use std::collections::HashSet;

/// Sanitizes admin-entered free text before it is stored and displayed.
///
/// Every tag is stripped by ammonia (`<script>` and `<style>` together with
/// their content), then the entities its serializer emits are decoded again,
/// so plain text such as `x < 5 & y > 2` comes back unchanged. The result is
/// plain text, not HTML. Surrounding whitespace is trimmed.
pub fn clean_text(input: &str) -> String {
    let stripped = ammonia::Builder::default()
        .tags(HashSet::new())
        .clean(input.trim())
        .to_string();
    decode_entities(&stripped).trim().to_string()
}

/// Reverses the escaping applied to text nodes by the HTML serializer.
/// `&amp;` goes last so an escaped `&lt;` is not decoded twice.
fn decode_entities(escaped: &str) -> String {
    escaped
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

/// True when the field is empty or whitespace only.
pub fn is_blank(input: &str) -> bool {
    input.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_strips_markup_and_scripts() {
        let cleaned = clean_text("  Solve <b>x</b><script>alert(1)</script> ");
        assert_eq!(cleaned, "Solve x");
    }

    #[test]
    fn test_clean_text_keeps_plain_text_symbols() {
        assert_eq!(clean_text("Solve x < 5 and y > 2"), "Solve x < 5 and y > 2");
        assert_eq!(clean_text("Art & Design"), "Art & Design");
        assert_eq!(clean_text("H2O + NaCl -> ?"), "H2O + NaCl -> ?");
    }

    #[test]
    fn test_clean_text_decodes_escaped_ampersand_once() {
        assert_eq!(clean_text("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank(" \n\t"));
        assert!(!is_blank(" a "));
    }
}
