//! Priority-tiered related content and prev/next neighbours.

use chrono::{DateTime, SecondsFormat, Utc};
use pharos_core::content::{ContentItem, RelatedContent};
use pharos_core::error::FetchError;
use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

use super::ContentResolver;
use crate::queries;

/// Maximum number of related items.
pub const RELATED_LIMIT: usize = 5;

/// Inputs describing the item related content is computed for.
#[derive(Debug, Clone)]
pub struct RelatedQuery {
    pub slug: String,
    pub category: Option<String>,
    /// Publish (or creation) time of the current item.
    pub date: DateTime<Utc>,
    pub country: Option<String>,
    pub tags: Vec<String>,
}

impl RelatedQuery {
    pub fn new(slug: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            slug: slug.into(),
            category: None,
            date,
            country: None,
            tags: Vec::new(),
        }
    }

    /// Query describing an already-resolved item.
    pub fn for_item(item: &ContentItem) -> Self {
        Self {
            slug: item.slug.clone(),
            category: Some(item.category.clone()),
            date: item
                .published_at
                .or(item.updated_at)
                .unwrap_or_else(Utc::now),
            country: item.country.clone(),
            tags: item
                .detail
                .as_ref()
                .map(|d| d.tags.clone())
                .unwrap_or_default(),
        }
    }
}

/// One candidate pool: a query plus its tier-specific filter parameter.
struct Tier {
    name: &'static str,
    text: &'static str,
    filter: Option<(&'static str, Value)>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Candidate pools in strict priority order. Empty criteria skip their tier.
fn tiers(query: &RelatedQuery) -> Vec<Tier> {
    let mut tiers = Vec::with_capacity(4);
    let tags: Vec<&str> = query
        .tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    if !tags.is_empty() {
        tiers.push(Tier {
            name: "related_by_tags",
            text: queries::RELATED_BY_TAGS,
            filter: Some(("tags", Value::from(tags))),
        });
    }
    if let Some(category) = non_empty(&query.category) {
        tiers.push(Tier {
            name: "related_by_category",
            text: queries::RELATED_BY_CATEGORY,
            filter: Some(("category", Value::from(category))),
        });
    }
    if let Some(country) = non_empty(&query.country) {
        tiers.push(Tier {
            name: "related_by_country",
            text: queries::RELATED_BY_COUNTRY,
            filter: Some(("country", Value::from(country))),
        });
    }
    tiers.push(Tier {
        name: "related_recent",
        text: queries::RELATED_RECENT,
        filter: None,
    });
    tiers
}

/// Append candidates not yet seen (by id) and not the current item, up to the cap.
fn accumulate(
    acc: &mut Vec<ContentItem>,
    seen: &mut HashSet<String>,
    candidates: Vec<ContentItem>,
    current_slug: &str,
) {
    for candidate in candidates {
        if acc.len() >= RELATED_LIMIT {
            break;
        }
        if candidate.slug == current_slug || !seen.insert(candidate.id.clone()) {
            continue;
        }
        acc.push(candidate);
    }
}

pub(super) async fn fetch_related(
    resolver: &ContentResolver,
    query: &RelatedQuery,
) -> Result<RelatedContent, FetchError> {
    let mut items = Vec::with_capacity(RELATED_LIMIT);
    let mut seen = HashSet::new();

    for tier in tiers(query) {
        if items.len() >= RELATED_LIMIT {
            break;
        }
        let mut exclude: Vec<String> = seen.iter().cloned().collect();
        exclude.sort();
        let q = queries::related_tier(
            tier.name,
            tier.text,
            &query.slug,
            &exclude,
            RELATED_LIMIT,
            tier.filter,
        );
        let candidates = resolver.fetch_list(q).await?;
        accumulate(&mut items, &mut seen, candidates, &query.slug);
    }

    let date = query.date.to_rfc3339_opts(SecondsFormat::Secs, true);
    let not_current = |item: &ContentItem| item.slug != query.slug;
    let prev = resolver
        .fetch_one(queries::prev_post(&query.slug, &date))
        .await?
        .filter(not_current);
    let next = resolver
        .fetch_one(queries::next_post(&query.slug, &date))
        .await?
        .filter(not_current);

    Ok(RelatedContent {
        items: items.into_iter().map(|i| i.summary()).collect(),
        prev,
        next,
    })
}

/// Any failure yields an empty set with no neighbours; the fallback corpus
/// is not consulted here.
pub fn reconcile_related(result: Result<RelatedContent, FetchError>) -> RelatedContent {
    result.unwrap_or_else(|e| {
        warn!("content related: backend failed, returning empty set: {e}");
        RelatedContent::default()
    })
}
