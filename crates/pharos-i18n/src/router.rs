//! Path normalization, canonical resolution, and hreflang alternates.

use serde::Serialize;
use tracing::debug;

use crate::language::Language;
use crate::routes::{default_route_table, RouteGroup};

/// hreflang value of the catch-all alternate.
pub const X_DEFAULT: &str = "x-default";

/// One `<link rel="alternate" hreflang>` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HreflangLink {
    pub hreflang: String,
    /// Absolute URL.
    pub href: String,
}

impl HreflangLink {
    fn new(hreflang: &str, href: String) -> Self {
        Self {
            hreflang: hreflang.to_string(),
            href,
        }
    }
}

/// Drop query string and fragment, then trailing slashes. An empty result is `/`.
///
/// Idempotent: `normalize(&normalize(p)) == normalize(p)`.
pub fn normalize(path: &str) -> String {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Resolves request paths against a static route table.
#[derive(Debug, Clone)]
pub struct Router {
    base_url: String,
    groups: Vec<RouteGroup>,
}

impl Router {
    /// Router over `groups`, producing absolute URLs under `base_url`.
    pub fn new(base_url: &str, groups: Vec<RouteGroup>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            groups,
        }
    }

    /// Router over the site's own route table.
    pub fn with_default_table(base_url: &str) -> Self {
        Self::new(base_url, default_route_table().to_vec())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn groups(&self) -> &[RouteGroup] {
        &self.groups
    }

    /// The group declaring the normalized `path` as one of its variants.
    pub fn find_route_group(&self, path: &str) -> Option<&RouteGroup> {
        let normalized = normalize(path);
        self.groups.iter().find(|g| g.paths.contains(&normalized))
    }

    /// The path search engines should index for `path`.
    ///
    /// Paths outside every group pass through normalized. A grouped path is
    /// its own canonical when declared; otherwise the group's `en` path.
    pub fn canonical_path(&self, path: &str) -> String {
        let normalized = normalize(path);
        match self.find_route_group(&normalized) {
            None => normalized,
            // Unreachable while lookup is exact-match; kept for looser matching.
            Some(group) if !group.paths.contains(&normalized) => group.paths.en().to_string(),
            Some(_) => normalized,
        }
    }

    /// Absolute canonical URL for `path`.
    pub fn canonical_url(&self, path: &str) -> String {
        self.absolute(&self.canonical_path(path))
    }

    /// The `lang` variant of the page `path` belongs to, or the normalized
    /// path itself when it is outside every group.
    pub fn localized_path(&self, path: &str, lang: Language) -> String {
        let normalized = normalize(path);
        match self.find_route_group(&normalized) {
            Some(group) => group.paths.resolve(lang).to_string(),
            None => normalized,
        }
    }

    /// Alternate-language links for `path`.
    ///
    /// Outside every group: `x-default` and `en`, both the page itself.
    /// Inside a group: `x-default` (the `en` path) then one link per
    /// language in [`Language::ALL`] order.
    pub fn hreflang_links(&self, path: &str) -> Vec<HreflangLink> {
        let normalized = normalize(path);
        let Some(group) = self.find_route_group(&normalized) else {
            debug!("i18n: {normalized} has no route group, single-locale alternates");
            let href = self.absolute(&normalized);
            return vec![
                HreflangLink::new(X_DEFAULT, href.clone()),
                HreflangLink::new(Language::En.code(), href),
            ];
        };

        let mut links = Vec::with_capacity(Language::ALL.len() + 1);
        links.push(HreflangLink::new(
            X_DEFAULT,
            self.absolute(group.paths.en()),
        ));
        for lang in Language::ALL {
            links.push(HreflangLink::new(
                lang.code(),
                self.absolute(group.paths.resolve(lang)),
            ));
        }
        links
    }

    fn absolute(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}
