//! Query texts understood by the content backend.

use pharos_core::query::Query;
use serde_json::Value;

/// Fields every list query projects.
macro_rules! card_fields {
    () => {
        r#"_id, "slug": slug.current, title, excerpt, publishedAt, _updatedAt, category, "categoryRef": category->{title}, country, "coverImage": coverImage.asset->url, language"#
    };
}

pub const POSTS: &str = concat!(
    r#"*[_type == "post" && defined(slug.current)] | order(publishedAt desc)[0...$limit]{"#,
    card_fields!(),
    "}"
);

pub const LATEST_BY_LANGUAGE: &str = concat!(
    r#"*[_type == "post" && defined(slug.current) && (!defined(language) || language == $lang)] | order(publishedAt desc)[0...$limit]{"#,
    card_fields!(),
    "}"
);

pub const POST_BY_SLUG: &str = concat!(
    r#"*[_type == "post" && slug.current == $slug][0]{"#,
    card_fields!(),
    r#", tags, body, html, readingTime, toc, executiveSummary, faq[]{question, answer}, cta{heading, text, buttonLabel, buttonUrl}, seo{metaTitle, metaDescription, ogTitle, ogDescription, "ogImage": ogImage.asset->url, canonicalUrl, noIndex}}"#
);

pub const RELATED_BY_TAGS: &str = concat!(
    r#"*[_type == "post" && slug.current != $slug && !(_id in $exclude) && count((tags[])[@ in $tags]) > 0] | order(publishedAt desc)[0...$limit]{"#,
    card_fields!(),
    "}"
);

pub const RELATED_BY_CATEGORY: &str = concat!(
    r#"*[_type == "post" && slug.current != $slug && !(_id in $exclude) && (category == $category || category->title == $category)] | order(publishedAt desc)[0...$limit]{"#,
    card_fields!(),
    "}"
);

pub const RELATED_BY_COUNTRY: &str = concat!(
    r#"*[_type == "post" && slug.current != $slug && !(_id in $exclude) && country == $country] | order(publishedAt desc)[0...$limit]{"#,
    card_fields!(),
    "}"
);

pub const RELATED_RECENT: &str = concat!(
    r#"*[_type == "post" && slug.current != $slug && !(_id in $exclude)] | order(publishedAt desc)[0...$limit]{"#,
    card_fields!(),
    "}"
);

pub const PREV_POST: &str = concat!(
    r#"*[_type == "post" && slug.current != $slug && coalesce(publishedAt, _createdAt) < $date] | order(coalesce(publishedAt, _createdAt) desc)[0]{"#,
    card_fields!(),
    "}"
);

pub const NEXT_POST: &str = concat!(
    r#"*[_type == "post" && slug.current != $slug && coalesce(publishedAt, _createdAt) > $date] | order(coalesce(publishedAt, _createdAt) asc)[0]{"#,
    card_fields!(),
    "}"
);

pub const POST_COUNT: &str = r#"count(*[_type == "post"])"#;

pub fn posts(limit: usize) -> Query {
    Query::new("posts", POSTS).param("limit", limit)
}

pub fn latest_by_language(lang: &str, limit: usize) -> Query {
    Query::new("latest_by_language", LATEST_BY_LANGUAGE)
        .param("lang", lang)
        .param("limit", limit)
}

pub fn post_by_slug(slug: &str) -> Query {
    Query::new("post_by_slug", POST_BY_SLUG).param("slug", slug)
}

pub fn prev_post(slug: &str, date: &str) -> Query {
    Query::new("prev_post", PREV_POST)
        .param("slug", slug)
        .param("date", date)
}

pub fn next_post(slug: &str, date: &str) -> Query {
    Query::new("next_post", NEXT_POST)
        .param("slug", slug)
        .param("date", date)
}

pub fn post_count() -> Query {
    Query::new("post_count", POST_COUNT)
}

/// A related-content tier query. `filter` is the tier-specific parameter.
pub fn related_tier(
    name: &'static str,
    text: &'static str,
    slug: &str,
    exclude: &[String],
    limit: usize,
    filter: Option<(&str, Value)>,
) -> Query {
    let mut query = Query::new(name, text)
        .param("slug", slug)
        .param("exclude", exclude.to_vec())
        .param("limit", limit);
    if let Some((key, value)) = filter {
        query = query.param(key, value);
    }
    query
}
