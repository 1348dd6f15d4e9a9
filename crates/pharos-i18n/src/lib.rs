//! Localization routing: maps a request path to its route group, canonical
//! path, and the full set of per-language alternates.
//!
//! Supported languages: English (fallback), German, French, Spanish,
//! Simplified Chinese, Arabic.

mod language;
mod router;
mod routes;


pub use language::Language;
pub use router::{normalize, HreflangLink, Router, X_DEFAULT};
pub use routes::{default_route_table, LocalizedPaths, RouteGroup};
