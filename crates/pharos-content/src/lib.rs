//! # pharos-content
//!
//! Resolves editorial content from the remote backend, substituting the
//! bundled fallback corpus whenever the backend cannot be reached.

pub mod category;
pub mod detail;
pub mod excerpt;
pub mod fallback;
pub mod http;
pub mod merge;
pub mod queries;
pub mod record;
pub mod resolver;

#[cfg(test)]
pub(crate) mod mock;

pub use fallback::FallbackCorpus;
pub use resolver::{ContentResolver, RelatedQuery};
