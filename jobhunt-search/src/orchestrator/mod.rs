//! Ranking engine and search fan-out.
//!
//! The pure pipeline (normalise, dedup, filter, score, rank) lives in
//! [`pipeline`]; [`search`] collects raw hits from a provider across sites.

pub mod dedup;
pub mod filter;
pub mod normalize;
pub mod pipeline;
pub mod rank;
pub mod scoring;
pub mod search;
pub mod url_normalize;
