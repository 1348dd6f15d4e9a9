//! The site's static route table.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::language::Language;
use crate::language::Language::{Ar, De, Es, Fr, ZhCn};

/// Per-language paths of one logical page. `en` is required and is the
/// target for every language without an override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedPaths {
    en: String,
    overrides: BTreeMap<Language, String>,
}

impl LocalizedPaths {
    pub fn new(en: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            overrides: BTreeMap::new(),
        }
    }

    /// Set the path for `lang`. Setting `En` replaces the required entry.
    pub fn with(mut self, lang: Language, path: impl Into<String>) -> Self {
        let path = path.into();
        if lang == Language::En {
            self.en = path;
        } else {
            self.overrides.insert(lang, path);
        }
        self
    }

    pub fn en(&self) -> &str {
        &self.en
    }

    /// The path for `lang`, or the `en` path when `lang` has no override.
    pub fn resolve(&self, lang: Language) -> &str {
        self.overrides.get(&lang).unwrap_or(&self.en)
    }

    /// Whether `path` is one of the declared variants.
    pub fn contains(&self, path: &str) -> bool {
        self.en == path || self.overrides.values().any(|p| p == path)
    }
}

/// A logical page identity shared across languages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGroup {
    /// Conventionally the `en` path.
    pub key: String,
    pub paths: LocalizedPaths,
}

impl RouteGroup {
    /// Group keyed by its `en` path.
    pub fn new(paths: LocalizedPaths) -> Self {
        Self {
            key: paths.en().to_string(),
            paths,
        }
    }
}

/// `(en path, overrides)` rows of the site table.
const SITE_ROUTES: &[(&str, &[(Language, &str)])] = &[
    (
        "/",
        &[(De, "/de"), (Fr, "/fr"), (Es, "/es"), (ZhCn, "/zh-CN"), (Ar, "/ar")],
    ),
    (
        "/about",
        &[
            (De, "/de/ueber-uns"),
            (Fr, "/fr/a-propos"),
            (Es, "/es/sobre-nosotros"),
            (ZhCn, "/zh-CN/about"),
            (Ar, "/ar/about"),
        ],
    ),
    (
        "/services",
        &[
            (De, "/de/leistungen"),
            (Fr, "/fr/services"),
            (Es, "/es/servicios"),
            (ZhCn, "/zh-CN/services"),
            (Ar, "/ar/services"),
        ],
    ),
    (
        "/healthcare-market-research",
        &[
            (De, "/de/gesundheitsmarktforschung"),
            (Fr, "/fr/etudes-de-marche-sante"),
            (Es, "/es/investigacion-de-mercado-sanitario"),
        ],
    ),
    (
        "/contact",
        &[(De, "/de/kontakt"), (Fr, "/fr/contact"), (Es, "/es/contacto")],
    ),
    ("/blog", &[(De, "/de/blog"), (Fr, "/fr/blog"), (Es, "/es/blog")]),
    (
        "/case-studies",
        &[(De, "/case-studies"), (Fr, "/case-studies")],
    ),
    ("/privacy-policy", &[(De, "/de/datenschutz")]),
];

static DEFAULT_TABLE: LazyLock<Vec<RouteGroup>> = LazyLock::new(|| {
    SITE_ROUTES
        .iter()
        .map(|(en, overrides)| {
            let paths = overrides
                .iter()
                .fold(LocalizedPaths::new(*en), |p, (lang, path)| p.with(*lang, *path));
            RouteGroup::new(paths)
        })
        .collect()
});

/// The site's route table, built once per process.
pub fn default_route_table() -> &'static [RouteGroup] {
    &DEFAULT_TABLE
}
