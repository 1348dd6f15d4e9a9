//! Content resolver: remote-first reads with fallback substitution.
//!
//! Each operation makes its backend call(s) through a `Result`-returning
//! boundary, then hands the outcome to a pure `reconcile_*` function that
//! decides whether the fallback corpus stands in. No operation surfaces a
//! backend error to its caller.

mod related;

#[cfg(test)]
mod tests;

pub use related::{reconcile_related, RelatedQuery, RELATED_LIMIT};

use pharos_core::content::{ContentItem, ItemSource, ProbeReport, RelatedContent};
use pharos_core::error::FetchError;
use pharos_core::query::Query;
use pharos_core::traits::ContentBackend;
use tracing::{debug, warn};

use crate::fallback::FallbackCorpus;
use crate::merge::{merge_by_slug, sort_newest_first};
use crate::queries;
use crate::record::{decode_list, decode_one};

/// Largest `limit` accepted by [`ContentResolver::latest_by_language`].
pub const MAX_LATEST: usize = 6;

/// Resolves editorial content for page-rendering collaborators.
pub struct ContentResolver {
    backend: Box<dyn ContentBackend>,
    fallback: FallbackCorpus,
}

impl ContentResolver {
    pub fn new(backend: Box<dyn ContentBackend>, fallback: FallbackCorpus) -> Self {
        Self { backend, fallback }
    }

    /// Resolver over `backend` with the bundled corpus.
    pub fn with_bundled_fallback(backend: Box<dyn ContentBackend>) -> Self {
        Self::new(backend, FallbackCorpus::bundled())
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Newest items first, remote merged with fallback items not already
    /// present, truncated to `max_count`. On backend failure, the whole
    /// fallback corpus.
    pub async fn list(&self, max_count: usize) -> Vec<ContentItem> {
        let remote = self.fetch_list(queries::posts(max_count)).await;
        reconcile_list(remote, &self.fallback, max_count)
    }

    /// Up to `limit` (clamped to 1..=6) items visible under `language`,
    /// newest first.
    pub async fn latest_by_language(&self, language: &str, limit: usize) -> Vec<ContentItem> {
        let limit = limit.clamp(1, MAX_LATEST);
        let remote = self
            .fetch_list(queries::latest_by_language(language, limit))
            .await;
        reconcile_latest(remote, &self.fallback, language, limit)
    }

    /// Single item with detail. Remote wins whenever it returns a record;
    /// otherwise the fallback corpus is consulted. `None` means neither has it.
    pub async fn get_by_slug(&self, slug: &str) -> Option<ContentItem> {
        let remote = self.fetch_one(queries::post_by_slug(slug)).await;
        reconcile_by_slug(remote, &self.fallback, slug)
    }

    /// Up to five related items plus chronological neighbours.
    pub async fn related(&self, query: &RelatedQuery) -> RelatedContent {
        reconcile_related(related::fetch_related(self, query).await)
    }

    /// Trivial count query against the backend. Has no effect on fallback logic.
    pub async fn probe(&self) -> ProbeReport {
        match self.backend.query(&queries::post_count()).await {
            Ok(value) => ProbeReport {
                ok: true,
                error: None,
                count: value.as_u64(),
            },
            Err(e) => {
                warn!("content probe via {} failed: {e}", self.backend.name());
                ProbeReport {
                    ok: false,
                    error: Some(e.to_string()),
                    count: None,
                }
            }
        }
    }

    pub(crate) async fn fetch_list(&self, query: Query) -> Result<Vec<ContentItem>, FetchError> {
        debug!("content: {} via {}", query.name, self.backend.name());
        let value = self.backend.query(&query).await?;
        decode_list(value, ItemSource::Remote)
            .map_err(|e| FetchError::Decode(format!("{}: {e}", query.name)))
    }

    pub(crate) async fn fetch_one(&self, query: Query) -> Result<Option<ContentItem>, FetchError> {
        debug!("content: {} via {}", query.name, self.backend.name());
        let value = self.backend.query(&query).await?;
        decode_one(value, ItemSource::Remote)
            .map_err(|e| FetchError::Decode(format!("{}: {e}", query.name)))
    }
}

/// Decide the list result from the remote outcome.
pub fn reconcile_list(
    remote: Result<Vec<ContentItem>, FetchError>,
    fallback: &FallbackCorpus,
    max_count: usize,
) -> Vec<ContentItem> {
    match remote {
        Ok(items) => {
            let mut merged = merge_by_slug(items, fallback.summaries());
            sort_newest_first(&mut merged);
            merged.truncate(max_count);
            merged
        }
        Err(e) => {
            warn!("content list: backend failed, serving fallback corpus: {e}");
            fallback.summaries()
        }
    }
}

/// Decide the latest-by-language result from the remote outcome.
///
/// The combined set is re-sorted here; neither source's order is trusted.
pub fn reconcile_latest(
    remote: Result<Vec<ContentItem>, FetchError>,
    fallback: &FallbackCorpus,
    language: &str,
    limit: usize,
) -> Vec<ContentItem> {
    let visible = |items: Vec<ContentItem>| -> Vec<ContentItem> {
        items.into_iter().filter(|i| i.visible_in(language)).collect()
    };
    let mut items = match remote {
        Ok(items) => merge_by_slug(visible(items), visible(fallback.summaries())),
        Err(e) => {
            warn!("content latest({language}): backend failed, serving fallback corpus: {e}");
            visible(fallback.summaries())
        }
    };
    sort_newest_first(&mut items);
    items.truncate(limit);
    items
}

/// Decide the single-item result from the remote outcome.
pub fn reconcile_by_slug(
    remote: Result<Option<ContentItem>, FetchError>,
    fallback: &FallbackCorpus,
    slug: &str,
) -> Option<ContentItem> {
    match remote {
        Ok(Some(item)) => return Some(item),
        Ok(None) => debug!("content: '{slug}' not found remotely, checking fallback corpus"),
        Err(e) => warn!("content get '{slug}': backend failed, checking fallback corpus: {e}"),
    }
    fallback.find(slug)
}
