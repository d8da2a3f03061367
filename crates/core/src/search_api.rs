//! Search client trait definition
//!
//! This trait defines the interface to the model search endpoint.
//! Implementations can be found in the client crate.

use crate::error::Result;
use async_trait::async_trait;

pub use super::query::SearchQuery;
pub use super::search_models::*;

/// Trait defining the model search operation
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Submit a flattened form query and return the matching models
    ///
    /// Transport failures, non-success statuses and undecodable bodies are
    /// all reported as errors; an empty result set is a success.
    async fn search(&self, query: &SearchQuery) -> Result<ResultSet>;
}
