//! Raw post records, as returned by the backend and stored in the bundled corpus.

use chrono::{DateTime, Utc};
use pharos_core::content::{
    Body, CallToAction, ContentItem, DetailPayload, FaqEntry, ItemSource, PortableBlock,
    SeoOverrides, TocEntry,
};
use serde::Deserialize;
use serde_json::Value;

use crate::category::resolve_category;
use crate::detail::{reading_time, table_of_contents};
use crate::excerpt::normalize_excerpt;

/// A post exactly as the backend projects it. Every field is optional so
/// sparse records still deserialize.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    /// Pre-formatted display date, when the source already has one.
    pub published_date: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    #[serde(rename = "_updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
    pub category: Option<String>,
    pub category_ref: Option<CategoryRef>,
    pub country: Option<String>,
    pub cover_image: Option<String>,
    pub language: Option<String>,
    pub tags: Vec<String>,
    /// Portable block tree.
    pub body: Option<Vec<PortableBlock>>,
    /// Embedded markup body, used when there is no block tree.
    pub html: Option<String>,
    pub reading_time: Option<u32>,
    pub toc: Option<Vec<TocEntry>>,
    pub executive_summary: Option<String>,
    pub faq: Vec<FaqEntry>,
    pub cta: Option<CallToAction>,
    pub seo: Option<SeoOverrides>,
}

/// Linked taxonomy term.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CategoryRef {
    pub title: Option<String>,
}

impl PostRecord {
    /// Whether the record carries any body content.
    pub fn has_body(&self) -> bool {
        self.body.is_some() || self.html.as_deref().is_some_and(|h| !h.trim().is_empty())
    }

    /// Normalize into a [`ContentItem`].
    ///
    /// Excerpt normalization and category resolution apply regardless of
    /// source. The detail payload is attached only when the record has a body.
    pub fn into_item(self, source: ItemSource) -> ContentItem {
        let excerpt = normalize_excerpt(self.excerpt.as_deref().unwrap_or_default());
        let category = resolve_category(
            self.category.as_deref(),
            self.category_ref.as_ref().and_then(|c| c.title.as_deref()),
            &self.title,
            &excerpt,
        );
        let published_date = self
            .published_date
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| display_date(self.published_at));
        let detail = self.has_body().then(|| self.detail());

        ContentItem {
            id: self.id,
            slug: self.slug,
            title: self.title,
            excerpt,
            published_date,
            published_at: self.published_at,
            updated_at: self.updated_at,
            category,
            country: self.country.filter(|c| !c.trim().is_empty()),
            cover_image: self.cover_image.filter(|c| !c.trim().is_empty()),
            language: self.language.filter(|l| !l.trim().is_empty()),
            detail,
            source,
        }
    }

    fn detail(&self) -> DetailPayload {
        let body = match (&self.body, &self.html) {
            (Some(blocks), _) => Body::Portable(blocks.clone()),
            (None, Some(html)) => Body::Html(html.clone()),
            (None, None) => Body::default(),
        };
        let reading_time = self
            .reading_time
            .filter(|m| *m > 0)
            .unwrap_or_else(|| reading_time(&body));
        let table_of_contents = self
            .toc
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| table_of_contents(&body));

        DetailPayload {
            body,
            reading_time,
            tags: self.tags.clone(),
            table_of_contents,
            executive_summary: self.executive_summary.clone(),
            faq: self.faq.clone(),
            call_to_action: self.cta.clone(),
            seo: self.seo.clone().unwrap_or_default(),
        }
    }
}

/// Human display form of a publish timestamp, e.g. "March 5, 2025".
pub fn display_date(at: Option<DateTime<Utc>>) -> String {
    at.map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_default()
}

/// Decode a list result. `null` decodes as an empty list.
pub fn decode_list(value: Value, source: ItemSource) -> Result<Vec<ContentItem>, serde_json::Error> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    let records: Vec<PostRecord> = serde_json::from_value(value)?;
    Ok(records.into_iter().map(|r| r.into_item(source)).collect())
}

/// Decode a single-record result. `null` decodes as `None`.
pub fn decode_one(value: Value, source: ItemSource) -> Result<Option<ContentItem>, serde_json::Error> {
    if value.is_null() {
        return Ok(None);
    }
    let record: PostRecord = serde_json::from_value(value)?;
    Ok(Some(record.into_item(source)))
}
