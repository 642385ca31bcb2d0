//! jobhunt: a daily digest of job postings matching a keyword profile.
//!
//! Searches configured job sites, then deduplicates, scores and ranks the
//! hits with [`jobhunt_search`] and writes the digest as Markdown or HTML.
//!
//! # Architecture
//!
//! - **Config**: TOML file + environment credentials → typed engine inputs
//! - **Search**: per-site Google Custom Search queries (`jobhunt-search`)
//! - **Ranking**: normalise → dedup → score → rank (`jobhunt-search`)
//! - **Digest**: Markdown document or standalone HTML page

pub mod config;
pub mod digest;
pub mod error;
pub mod hunt;

pub use config::{DigestFormat, HunterConfig};
pub use digest::DigestMeta;
pub use error::{HunterError, Result};
