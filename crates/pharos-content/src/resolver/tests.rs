use super::*;
use crate::mock::{item, record, record_lang, MockBackend};
use chrono::{DateTime, Utc};
use pharos_core::error::FetchError;
use serde_json::json;
use std::collections::HashSet;

fn corpus(items: Vec<ContentItem>) -> FallbackCorpus {
    FallbackCorpus::from_items(items)
}

fn with_lang(mut it: ContentItem, lang: &str) -> ContentItem {
    it.language = Some(lang.to_string());
    it
}

fn resolver(backend: MockBackend, fallback: FallbackCorpus) -> ContentResolver {
    ContentResolver::new(Box::new(backend), fallback)
}

fn slugs(items: &[ContentItem]) -> Vec<&str> {
    items.iter().map(|i| i.slug.as_str()).collect()
}

fn at(iso: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(iso).unwrap().with_timezone(&Utc)
}

// --- list ---

#[tokio::test]
async fn test_list_remote_failure_returns_fallback_corpus() {
    let fallback = corpus(vec![
        item("f1", "2024-01-01T00:00:00Z"),
        item("f2", "2025-01-01T00:00:00Z"),
        item("f3", "2023-01-01T00:00:00Z"),
    ]);
    let r = resolver(MockBackend::failing(FetchError::Timeout), fallback.clone());
    let out = r.list(2).await;
    assert_eq!(out, fallback.summaries());
}

#[tokio::test]
async fn test_list_remote_wins_on_slug_collision() {
    let backend = MockBackend::new().with(
        "posts",
        json!([{"_id": "remote-a", "slug": "a", "title": "Remote A", "publishedAt": "2025-02-01T00:00:00Z"}]),
    );
    let fallback = corpus(vec![
        item("a", "2025-02-01T00:00:00Z"),
        item("b", "2024-02-01T00:00:00Z"),
    ]);
    let out = resolver(backend, fallback).list(10).await;
    assert_eq!(slugs(&out), vec!["a", "b"]);
    assert_eq!(out[0].id, "remote-a");
    assert_eq!(out[0].source, ItemSource::Remote);
    assert_eq!(out[1].source, ItemSource::Fallback);
}

#[tokio::test]
async fn test_list_sorted_and_truncated() {
    let backend = MockBackend::new().with(
        "posts",
        json!([record("r-old", "2023-05-01T00:00:00Z"), record("r-new", "2025-05-01T00:00:00Z")]),
    );
    let fallback = corpus(vec![item("f-mid", "2024-05-01T00:00:00Z")]);
    let out = resolver(backend, fallback).list(2).await;
    assert_eq!(slugs(&out), vec!["r-new", "f-mid"]);
}

#[tokio::test]
async fn test_list_passes_limit_to_backend() {
    let backend = MockBackend::new().with("posts", json!([]));
    let calls = backend.calls();
    resolver(backend, corpus(vec![])).list(7).await;
    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].get("limit"), Some(&json!(7)));
}

#[tokio::test]
async fn test_list_decode_failure_is_fallback() {
    let backend = MockBackend::new().with("posts", json!({"unexpected": true}));
    let fallback = corpus(vec![item("f1", "2024-01-01T00:00:00Z")]);
    let out = resolver(backend, fallback).list(5).await;
    assert_eq!(slugs(&out), vec!["f1"]);
}

// --- latest_by_language ---

#[tokio::test]
async fn test_latest_filters_language_and_limits() {
    let backend = MockBackend::new().with(
        "latest_by_language",
        json!([
            record_lang("r-de", "2025-03-01T00:00:00Z", "de"),
            record_lang("r-fr", "2025-04-01T00:00:00Z", "fr"),
            record("r-all", "2025-02-01T00:00:00Z"),
        ]),
    );
    let fallback = corpus(vec![
        with_lang(item("f-de", "2025-05-01T00:00:00Z"), "de"),
        with_lang(item("f-en", "2025-06-01T00:00:00Z"), "en"),
        item("f-all", "2024-01-01T00:00:00Z"),
    ]);
    let out = resolver(backend, fallback).latest_by_language("de", 3).await;
    assert_eq!(out.len(), 3);
    assert!(out.iter().all(|i| i.visible_in("de")));
    assert_eq!(slugs(&out), vec!["f-de", "r-de", "r-all"]);
}

#[tokio::test]
async fn test_latest_resorts_regardless_of_source_order() {
    let backend = MockBackend::new().with(
        "latest_by_language",
        json!([
            record("r1", "2024-01-01T00:00:00Z"),
            record("r2", "2025-01-01T00:00:00Z"),
            record("r3", "2024-06-01T00:00:00Z"),
        ]),
    );
    let fallback = corpus(vec![
        item("f1", "2023-01-01T00:00:00Z"),
        item("f2", "2025-06-01T00:00:00Z"),
    ]);
    let out = resolver(backend, fallback).latest_by_language("en", 6).await;
    assert_eq!(slugs(&out), vec!["f2", "r2", "r3", "r1", "f1"]);
    for pair in out.windows(2) {
        assert!(pair[0].published_at >= pair[1].published_at);
    }
}

#[tokio::test]
async fn test_latest_ties_keep_remote_first() {
    let backend = MockBackend::new().with(
        "latest_by_language",
        json!([record("r", "2025-01-01T00:00:00Z")]),
    );
    let fallback = corpus(vec![item("f", "2025-01-01T00:00:00Z")]);
    let out = resolver(backend, fallback).latest_by_language("en", 2).await;
    assert_eq!(slugs(&out), vec!["r", "f"]);
}

#[tokio::test]
async fn test_latest_failure_uses_filtered_sorted_fallback() {
    let fallback = corpus(vec![
        with_lang(item("f-fr", "2025-01-01T00:00:00Z"), "fr"),
        item("f-old", "2023-01-01T00:00:00Z"),
        with_lang(item("f-es", "2025-02-01T00:00:00Z"), "es"),
        item("f-new", "2024-12-01T00:00:00Z"),
    ]);
    let r = resolver(
        MockBackend::failing(FetchError::Transport("refused".into())),
        fallback,
    );
    let out = r.latest_by_language("es", 6).await;
    assert_eq!(slugs(&out), vec!["f-es", "f-new", "f-old"]);
}

#[tokio::test]
async fn test_latest_limit_clamped() {
    let fallback = corpus(
        (0..10)
            .map(|n| item(&format!("f{n}"), &format!("2024-01-{:02}T00:00:00Z", n + 1)))
            .collect(),
    );
    let backend = MockBackend::failing(FetchError::Timeout);
    let calls = backend.calls();
    let r = resolver(backend, fallback);
    assert_eq!(r.latest_by_language("en", 0).await.len(), 1);
    assert_eq!(r.latest_by_language("en", 50).await.len(), MAX_LATEST);
    let calls = calls.lock().unwrap();
    assert_eq!(calls[0].get("limit"), Some(&json!(1)));
    assert_eq!(calls[1].get("limit"), Some(&json!(6)));
}

// --- get_by_slug ---

#[tokio::test]
async fn test_get_by_slug_sparse_remote_wins() {
    let backend = MockBackend::new().with("post_by_slug", json!({"_id": "r", "slug": "eu5", "title": ""}));
    let mut full = item("eu5", "2025-01-01T00:00:00Z");
    full.title = "Fallback title".into();
    let out = resolver(backend, corpus(vec![full])).get_by_slug("eu5").await.unwrap();
    assert_eq!(out.id, "r");
    assert_eq!(out.title, "");
    assert_eq!(out.source, ItemSource::Remote);
}

#[tokio::test]
async fn test_get_by_slug_remote_null_falls_back() {
    let backend = MockBackend::new().with("post_by_slug", json!(null));
    let out = resolver(backend, corpus(vec![item("a", "2025-01-01T00:00:00Z")]))
        .get_by_slug("a")
        .await
        .unwrap();
    assert_eq!(out.source, ItemSource::Fallback);
}

#[tokio::test]
async fn test_get_by_slug_remote_error_falls_back() {
    let r = ContentResolver::with_bundled_fallback(Box::new(MockBackend::failing(
        FetchError::Status {
            status: 503,
            body: "down".into(),
        },
    )));
    let out = r.get_by_slug("eu5-market-access-pricing-outlook").await.unwrap();
    assert_eq!(out.source, ItemSource::Fallback);
    let detail = out.detail.expect("bundled detail");
    assert!(detail.reading_time >= 1);
    assert!(!detail.table_of_contents.is_empty());
    assert_eq!(detail.faq.len(), 2);
}

#[tokio::test]
async fn test_get_by_slug_not_found_anywhere() {
    let r = resolver(MockBackend::new(), corpus(vec![item("a", "2025-01-01T00:00:00Z")]));
    assert!(r.get_by_slug("missing").await.is_none());
}

#[tokio::test]
async fn test_get_by_slug_sends_slug_param() {
    let backend = MockBackend::new();
    let calls = backend.calls();
    resolver(backend, corpus(vec![])).get_by_slug("x").await;
    assert_eq!(calls.lock().unwrap()[0].get("slug"), Some(&json!("x")));
}

// --- related ---

fn related_query() -> RelatedQuery {
    RelatedQuery {
        slug: "current".into(),
        category: Some("Oncology".into()),
        date: at("2025-01-15T00:00:00Z"),
        country: Some("Germany".into()),
        tags: vec!["hta".into()],
    }
}

#[tokio::test]
async fn test_related_priority_order_and_cap() {
    let backend = MockBackend::new()
        .with("related_by_tags", json!([record("t1", "2025-01-01T00:00:00Z"), record("t2", "2024-01-01T00:00:00Z")]))
        .with("related_by_category", json!([record("t1", "2025-01-01T00:00:00Z"), record("c1", "2024-05-01T00:00:00Z")]))
        .with("related_by_country", json!([record("current", "2025-01-15T00:00:00Z"), record("k1", "2023-01-01T00:00:00Z"), record("k2", "2022-01-01T00:00:00Z")]))
        .with("related_recent", json!([record("z1", "2025-01-10T00:00:00Z")]));
    let calls = backend.calls();
    let out = resolver(backend, corpus(vec![])).related(&related_query()).await;

    assert_eq!(slugs(&out.items), vec!["t1", "t2", "c1", "k1", "k2"]);
    let names: Vec<&str> = calls.lock().unwrap().iter().map(|q| q.name).collect();
    // Recent tier is skipped once five items are accumulated.
    assert_eq!(
        names,
        vec!["related_by_tags", "related_by_category", "related_by_country", "prev_post", "next_post"]
    );
}

#[tokio::test]
async fn test_related_never_includes_current_and_dedups_by_id() {
    let backend = MockBackend::new()
        .with("related_recent", json!([
            record("current", "2025-01-15T00:00:00Z"),
            record("a", "2025-01-01T00:00:00Z"),
            record("a", "2025-01-01T00:00:00Z"),
            record("b", "2024-01-01T00:00:00Z"),
        ]));
    let query = RelatedQuery::new("current", at("2025-01-15T00:00:00Z"));
    let out = resolver(backend, corpus(vec![])).related(&query).await;
    assert_eq!(slugs(&out.items), vec!["a", "b"]);
    let ids: HashSet<_> = out.items.iter().map(|i| i.id.clone()).collect();
    assert_eq!(ids.len(), out.items.len());
}

#[tokio::test]
async fn test_related_skips_empty_criteria() {
    let backend = MockBackend::new();
    let calls = backend.calls();
    let query = RelatedQuery {
        category: Some("  ".into()),
        country: None,
        tags: vec![],
        ..related_query()
    };
    resolver(backend, corpus(vec![])).related(&query).await;
    let names: Vec<&str> = calls.lock().unwrap().iter().map(|q| q.name).collect();
    assert_eq!(names, vec!["related_recent", "prev_post", "next_post"]);
}

#[tokio::test]
async fn test_related_excludes_accumulated_ids_in_later_tiers() {
    let backend = MockBackend::new()
        .with("related_by_tags", json!([record("t1", "2025-01-01T00:00:00Z")]));
    let calls = backend.calls();
    resolver(backend, corpus(vec![])).related(&related_query()).await;
    let calls = calls.lock().unwrap();
    let category = calls.iter().find(|q| q.name == "related_by_category").unwrap();
    assert_eq!(category.get("exclude"), Some(&json!(["id-t1"])));
    assert_eq!(category.get("category"), Some(&json!("Oncology")));
    assert_eq!(calls[0].get("tags"), Some(&json!(["hta"])));
}

#[tokio::test]
async fn test_related_prev_next() {
    let backend = MockBackend::new()
        .with("prev_post", record("older", "2025-01-01T00:00:00Z"))
        .with("next_post", record("current", "2025-01-15T00:00:00Z"));
    let calls = backend.calls();
    let out = resolver(backend, corpus(vec![])).related(&related_query()).await;
    assert_eq!(out.prev.unwrap().slug, "older");
    // A neighbour equal to the current slug is discarded.
    assert!(out.next.is_none());
    let calls = calls.lock().unwrap();
    let prev = calls.iter().find(|q| q.name == "prev_post").unwrap();
    assert_eq!(prev.get("date"), Some(&json!("2025-01-15T00:00:00Z")));
}

#[tokio::test]
async fn test_related_failure_is_empty_without_fallback() {
    let backend = MockBackend::new()
        .with("related_by_tags", json!([record("t1", "2025-01-01T00:00:00Z")]))
        .with_error("related_by_country", FetchError::Timeout);
    let r = ContentResolver::with_bundled_fallback(Box::new(backend));
    let out = r.related(&related_query()).await;
    assert_eq!(out, RelatedContent::default());
}

#[tokio::test]
async fn test_related_items_carry_no_detail() {
    let backend = MockBackend::new().with(
        "related_recent",
        json!([{"_id": "x", "slug": "x", "title": "X", "html": "<p>body</p>"}]),
    );
    let out = resolver(backend, corpus(vec![]))
        .related(&RelatedQuery::new("current", at("2025-01-15T00:00:00Z")))
        .await;
    assert!(out.items[0].detail.is_none());
}

#[test]
fn test_related_query_for_item() {
    let mut it = item("a", "2025-01-01T00:00:00Z");
    it.country = Some("France".into());
    let q = RelatedQuery::for_item(&it);
    assert_eq!(q.slug, "a");
    assert_eq!(q.date, at("2025-01-01T00:00:00Z"));
    assert_eq!(q.country.as_deref(), Some("France"));
    assert!(q.tags.is_empty());
}

// --- probe ---

#[tokio::test]
async fn test_probe_success() {
    let backend = MockBackend::new().with("post_count", json!(42));
    let report = resolver(backend, corpus(vec![])).probe().await;
    assert!(report.ok);
    assert_eq!(report.count, Some(42));
    assert!(report.error.is_none());
}

#[tokio::test]
async fn test_probe_failure_reports_message() {
    let r = resolver(
        MockBackend::failing(FetchError::Transport("dns error".into())),
        corpus(vec![]),
    );
    let report = r.probe().await;
    assert!(!report.ok);
    assert_eq!(report.error.as_deref(), Some("transport failure: dns error"));
}

// --- reconcile (pure) ---

#[test]
fn test_reconcile_list_dedup_invariant() {
    let fallback = corpus(vec![
        item("a", "2024-01-01T00:00:00Z"),
        item("b", "2024-02-01T00:00:00Z"),
        item("c", "2024-03-01T00:00:00Z"),
    ]);
    let remote = vec![item("c", "2025-01-01T00:00:00Z"), item("a", "2025-01-02T00:00:00Z")];
    let out = reconcile_list(Ok(remote), &fallback, 10);
    let unique: HashSet<_> = out.iter().map(|i| i.slug.clone()).collect();
    assert_eq!(unique.len(), out.len());
    assert_eq!(out.len(), 3);
}

#[test]
fn test_reconcile_by_slug_prefers_remote() {
    let fallback = corpus(vec![item("a", "2024-01-01T00:00:00Z")]);
    let remote = item("a", "2025-01-01T00:00:00Z");
    let out = reconcile_by_slug(Ok(Some(remote.clone())), &fallback, "a").unwrap();
    assert_eq!(out, remote);
}
