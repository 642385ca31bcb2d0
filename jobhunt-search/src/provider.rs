//! Trait definition for pluggable search providers.
//!
//! The ranking engine never talks to the network. A [`SearchProvider`]
//! turns one [`SiteQuery`] into raw hits, and the orchestrator fans queries
//! out across sites.

use crate::error::SearchError;
use crate::query::SiteQuery;
use crate::types::RawResult;

/// A pluggable search backend.
///
/// Implementors handle request construction, authentication and response
/// decoding for one search API. Every returned [`RawResult`] should carry
/// the query's site as its `source`.
///
/// All implementations must be `Send + Sync` for concurrent site queries.
pub trait SearchProvider: Send + Sync {
    /// Run one query and return the provider's hits in rank order.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the request fails or the response cannot
    /// be decoded.
    fn search(
        &self,
        query: &SiteQuery,
    ) -> impl std::future::Future<Output = Result<Vec<RawResult>, SearchError>> + Send;

    /// Short provider name used in logs.
    fn name(&self) -> &'static str;
}
