//! Bundled fallback corpus, served when the remote backend cannot be reached.

use pharos_core::content::{ContentItem, ItemSource};
use pharos_core::error::PharosError;
use std::sync::LazyLock;
use tracing::error;

use crate::record::PostRecord;

/// Corpus JSON, embedded at build time.
const BUNDLED_POSTS: &str = include_str!("../data/fallback_posts.json");

static BUNDLED: LazyLock<FallbackCorpus> =
    LazyLock::new(|| match FallbackCorpus::from_json(BUNDLED_POSTS) {
        Ok(corpus) => corpus,
        Err(e) => {
            error!("fallback corpus is not valid JSON: {e}");
            FallbackCorpus::default()
        }
    });

/// Static list of items, in authored order, with detail for a subset.
#[derive(Debug, Clone, Default)]
pub struct FallbackCorpus {
    items: Vec<ContentItem>,
}

impl FallbackCorpus {
    /// The corpus compiled into this crate.
    pub fn bundled() -> Self {
        BUNDLED.clone()
    }

    /// Parse a JSON array of raw records.
    pub fn from_json(json: &str) -> Result<Self, PharosError> {
        let records: Vec<PostRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }

    /// Build a corpus from raw records.
    pub fn from_records(records: Vec<PostRecord>) -> Self {
        Self {
            items: records
                .into_iter()
                .map(|r| r.into_item(ItemSource::Fallback))
                .collect(),
        }
    }

    /// Build a corpus from already-normalized items.
    pub fn from_items(items: Vec<ContentItem>) -> Self {
        Self {
            items: items
                .into_iter()
                .map(|item| ContentItem {
                    source: ItemSource::Fallback,
                    ..item
                })
                .collect(),
        }
    }

    /// Every item without its detail payload, in corpus order.
    pub fn summaries(&self) -> Vec<ContentItem> {
        self.items.iter().map(ContentItem::summary).collect()
    }

    /// Full item for `slug`, including detail when the corpus has it.
    pub fn find(&self, slug: &str) -> Option<ContentItem> {
        self.items.iter().find(|i| i.slug == slug).cloned()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
