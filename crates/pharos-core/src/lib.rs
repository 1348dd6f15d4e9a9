//! # pharos-core
//!
//! Core types, traits, configuration, and error handling shared by the
//! content resolver and the localization router.

pub mod config;
pub mod content;
pub mod error;
pub mod query;
pub mod traits;
