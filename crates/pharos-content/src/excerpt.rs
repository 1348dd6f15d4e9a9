//! Plain-text excerpts from arbitrary markup.

use regex::Regex;
use std::sync::LazyLock;

/// Maximum excerpt length, in characters.
pub const EXCERPT_MAX_CHARS: usize = 200;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));
static SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Remove every markup tag, keeping the text between them.
pub fn strip_markup(input: &str) -> String {
    TAG_RE.replace_all(input, "").into_owned()
}

/// Strip tags, collapse whitespace runs to one space, trim, then truncate.
pub fn normalize_excerpt(raw: &str) -> String {
    let stripped = strip_markup(raw);
    let collapsed = SPACE_RE.replace_all(&stripped, " ");
    collapsed.trim().chars().take(EXCERPT_MAX_CHARS).collect()
}
