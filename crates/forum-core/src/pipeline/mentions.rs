//! `@name` mention scanning

use regex::Regex;
use std::sync::LazyLock;

/// Characters of the source text kept in a mention message
pub const EXCERPT_CHARS: usize = 50;

static MENTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@([A-Za-z0-9_]+)").expect("mention pattern is valid")
});

/// Every `@name` token in `text`, in order, without the `@`
pub fn extract_mentions(text: &str) -> Vec<&str> {
    MENTION_RE
        .captures_iter(text)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect()
}

/// Number of tokens that name exactly `name` (case-sensitive)
pub fn mentions_of(text: &str, name: &str) -> usize {
    extract_mentions(text).into_iter().filter(|m| *m == name).count()
}

/// First `max_chars` characters of `text` followed by `...`
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str("...");
    out
}
