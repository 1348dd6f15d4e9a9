//! Derived detail fields: reading time and table of contents.

use pharos_core::content::{Body, TocEntry};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::excerpt::strip_markup;

/// Average reading speed used for the estimate.
const WORDS_PER_MINUTE: usize = 200;

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<h([23])(?:\s[^>]*)?>(.*?)</h[23]\s*>").expect("valid regex")
});

/// Plain text of the whole body.
pub fn body_text(body: &Body) -> String {
    match body {
        Body::Portable(blocks) => blocks
            .iter()
            .map(|b| b.plain_text())
            .collect::<Vec<_>>()
            .join(" "),
        Body::Html(html) => strip_markup(html),
    }
}

/// Estimated reading time in whole minutes, at least 1.
pub fn reading_time(body: &Body) -> u32 {
    let words = body_text(body).split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1) as u32
}

/// Every `h2`/`h3` heading of the body, in document order, with unique anchors.
pub fn table_of_contents(body: &Body) -> Vec<TocEntry> {
    let headings: Vec<(u8, String)> = match body {
        Body::Portable(blocks) => blocks
            .iter()
            .filter_map(|b| {
                let level = match b.style.as_deref() {
                    Some("h2") => 2,
                    Some("h3") => 3,
                    _ => return None,
                };
                Some((level, b.plain_text()))
            })
            .collect(),
        Body::Html(html) => HEADING_RE
            .captures_iter(html)
            .map(|c| {
                let level = if &c[1] == "2" { 2 } else { 3 };
                (level, strip_markup(&c[2]))
            })
            .collect(),
    };

    let mut used: HashSet<String> = HashSet::new();
    headings
        .into_iter()
        .map(|(level, text)| (level, text.trim().to_string()))
        .filter(|(_, text)| !text.is_empty())
        .map(|(level, text)| {
            let id = unique_anchor(&anchor_slug(&text), &mut used);
            TocEntry { id, text, level }
        })
        .collect()
}

/// `base`, or the first `base-N` (N >= 2) not yet in `used`. Records the result.
fn unique_anchor(base: &str, used: &mut HashSet<String>) -> String {
    let mut id = base.to_string();
    let mut n = 2;
    while used.contains(&id) {
        id = format!("{base}-{n}");
        n += 1;
    }
    used.insert(id.clone());
    id
}

/// Lower-case ASCII alphanumerics joined by single hyphens.
pub fn anchor_slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if out.is_empty() {
        "section".to_string()
    } else {
        out
    }
}
