//! Platform markup stripping.

use regex::Regex;
use std::sync::OnceLock;

static MARKUP_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Removes all well-formed `<...>` markup tags (user/role/channel mentions,
/// custom emoji) from the text. Other text is left unchanged.
pub fn strip_markup(input: &str) -> String {
    let pattern =
        MARKUP_PATTERN.get_or_init(|| Regex::new(r"<[^>]+>").expect("valid markup pattern"));
    pattern.replace_all(input, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_mention_tags() {
        assert_eq!(strip_markup("<@123> hello <#456>"), " hello ");
        assert_eq!(strip_markup("<@!99> hi"), " hi");
        assert_eq!(strip_markup("<@&55>ping"), "ping");
    }

    #[test]
    fn test_leaves_plain_text_unchanged() {
        assert_eq!(strip_markup("hello world"), "hello world");
        assert_eq!(strip_markup(""), "");
    }

    #[test]
    fn test_unclosed_bracket_is_kept() {
        assert_eq!(strip_markup("a < b"), "a < b");
        assert_eq!(strip_markup("1 < 2 > 0"), "1  0");
    }

    #[test]
    fn test_custom_emoji_removed() {
        assert_eq!(strip_markup("nice <:smile:12345>!"), "nice !");
    }
}
