//! Normalized editorial records handed to page-rendering collaborators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category used when neither an explicit nor an inferred one is available.
pub const DEFAULT_CATEGORY: &str = "Industry Insights";

/// Where a [`ContentItem`] came from.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ItemSource {
    /// The remote content backend.
    #[default]
    Remote,
    /// The corpus bundled into the binary.
    Fallback,
}

/// A normalized article-like record.
///
/// `slug` is the external identity: two items with the same slug are the
/// same logical item regardless of source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    pub slug: String,
    pub title: String,
    /// Plain text, markup stripped, at most 200 characters.
    pub excerpt: String,
    /// Display string, e.g. "March 5, 2025".
    pub published_date: String,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub category: String,
    pub country: Option<String>,
    pub cover_image: Option<String>,
    /// `None` means visible under every language.
    pub language: Option<String>,
    /// Populated only by single-item lookups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<DetailPayload>,
    #[serde(skip)]
    pub source: ItemSource,
}

impl ContentItem {
    /// Whether this item should be shown under `language`.
    pub fn visible_in(&self, language: &str) -> bool {
        match self.language.as_deref() {
            None | Some("") => true,
            Some(lang) => lang == language,
        }
    }

    /// The same item without its detail payload, as list views carry it.
    pub fn summary(&self) -> Self {
        Self {
            detail: None,
            ..self.clone()
        }
    }
}

/// Full body and page metadata for a single item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailPayload {
    pub body: Body,
    /// Minutes.
    pub reading_time: u32,
    pub tags: Vec<String>,
    pub table_of_contents: Vec<TocEntry>,
    pub executive_summary: Option<String>,
    pub faq: Vec<FaqEntry>,
    pub call_to_action: Option<CallToAction>,
    pub seo: SeoOverrides,
}

/// Article body, either a portable block tree or embedded markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", content = "content", rename_all = "lowercase")]
pub enum Body {
    Portable(Vec<PortableBlock>),
    Html(String),
}

impl Default for Body {
    fn default() -> Self {
        Body::Portable(Vec::new())
    }
}

/// One block of a portable rich-text tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortableBlock {
    #[serde(rename = "_type", default)]
    pub kind: String,
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// "normal", "h2", "h3", "blockquote", ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default)]
    pub children: Vec<PortableSpan>,
}

impl PortableBlock {
    /// Concatenated text of every span.
    pub fn plain_text(&self) -> String {
        self.children.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortableSpan {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Anchor id, without the leading `#`.
    pub id: String,
    pub text: String,
    /// Heading level (2 or 3).
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToAction {
    pub heading: String,
    #[serde(default)]
    pub text: Option<String>,
    pub button_label: String,
    pub button_url: String,
}

/// Per-page SEO and Open Graph overrides. Empty fields mean "use the page default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeoOverrides {
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub canonical_url: Option<String>,
    pub no_index: bool,
}

/// Related items plus chronological neighbours of the current item.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RelatedContent {
    pub items: Vec<ContentItem>,
    pub prev: Option<ContentItem>,
    pub next: Option<ContentItem>,
}

/// Outcome of a connectivity probe against the remote backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Number of posts the backend reported, when reachable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}
