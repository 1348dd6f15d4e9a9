//! Test doubles for the content backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pharos_core::content::{ContentItem, ItemSource};
use pharos_core::error::FetchError;
use pharos_core::query::Query;
use pharos_core::traits::ContentBackend;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Backend answering each query name with a canned result.
///
/// Unregistered names answer `null`. `failing()` makes every query fail.
#[derive(Default)]
pub struct MockBackend {
    responses: HashMap<&'static str, Result<Value, FetchError>>,
    fail_all: Option<FetchError>,
    calls: Arc<Mutex<Vec<Query>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(err: FetchError) -> Self {
        Self {
            fail_all: Some(err),
            ..Self::default()
        }
    }

    pub fn with(mut self, name: &'static str, value: Value) -> Self {
        self.responses.insert(name, Ok(value));
        self
    }

    pub fn with_error(mut self, name: &'static str, err: FetchError) -> Self {
        self.responses.insert(name, Err(err));
        self
    }

    /// Shared handle to the queries seen so far.
    pub fn calls(&self) -> Arc<Mutex<Vec<Query>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl ContentBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn query(&self, query: &Query) -> Result<Value, FetchError> {
        self.calls.lock().unwrap().push(query.clone());
        if let Some(ref err) = self.fail_all {
            return Err(err.clone());
        }
        self.responses
            .get(query.name)
            .cloned()
            .unwrap_or(Ok(Value::Null))
    }
}

fn parse_at(iso: &str) -> Option<DateTime<Utc>> {
    if iso.is_empty() {
        return None;
    }
    Some(
        DateTime::parse_from_rfc3339(iso)
            .unwrap()
            .with_timezone(&Utc),
    )
}

/// Minimal normalized item.
pub fn item(slug: &str, published_at: &str) -> ContentItem {
    ContentItem {
        id: format!("id-{slug}"),
        slug: slug.to_string(),
        title: format!("Title {slug}"),
        excerpt: String::new(),
        published_date: String::new(),
        published_at: parse_at(published_at),
        updated_at: None,
        category: "Industry Insights".to_string(),
        country: None,
        cover_image: None,
        language: None,
        detail: None,
        source: ItemSource::Remote,
    }
}

/// Raw backend record for `slug`.
pub fn record(slug: &str, published_at: &str) -> Value {
    json!({
        "_id": format!("id-{slug}"),
        "slug": slug,
        "title": format!("Title {slug}"),
        "publishedAt": published_at,
    })
}

/// Raw backend record with a language.
pub fn record_lang(slug: &str, published_at: &str, language: &str) -> Value {
    let mut r = record(slug, published_at);
    r["language"] = json!(language);
    r
}
