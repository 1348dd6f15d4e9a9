//! Dual-source merging and ordering.

use pharos_core::content::ContentItem;
use std::cmp::Reverse;
use std::collections::HashSet;
use std::hash::Hash;

/// Keep all of `primary`, then append the items of `secondary` whose key is
/// not already present.
///
/// Keys are taken from `primary` only, so duplicates inside `secondary`
/// itself survive; callers feed it deduplicated corpora.
pub fn merge_by_key<T, K, F>(primary: Vec<T>, secondary: Vec<T>, key_fn: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let seen: HashSet<K> = primary.iter().map(&key_fn).collect();
    let mut out = primary;
    out.extend(secondary.into_iter().filter(|item| !seen.contains(&key_fn(item))));
    out
}

/// Merge remote items with fallback items, keyed by slug. Remote wins.
pub fn merge_by_slug(remote: Vec<ContentItem>, fallback: Vec<ContentItem>) -> Vec<ContentItem> {
    merge_by_key(remote, fallback, |item| item.slug.clone())
}

/// Stable sort, newest publish date first. Undated items go last.
pub fn sort_newest_first(items: &mut [ContentItem]) {
    items.sort_by_key(|item| Reverse(item.published_at));
}
