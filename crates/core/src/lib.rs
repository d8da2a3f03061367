//! Core types and traits for the evalboard model evaluation dashboard
//!
//! This crate provides the foundational abstractions used throughout the
//! dashboard, including:
//!
//! - **Metrics**: The fixed registry of selectable evaluation metrics
//! - **Filters**: The dynamic list of (metric, threshold) form rows
//! - **Queries**: Serialization of form state into the search endpoint's fields
//! - **Search API**: Result models and the client trait
//! - **Configuration**: System configuration management
//! - **Error handling**: Unified error types
//!

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod config;
pub mod date_filter;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod query;
pub mod search_api;
pub mod search_models;

// Re-export main types for convenience
pub use config::{Config, FormConfig, SearchConfig, ViewConfig};
pub use date_filter::DateFilter;
pub use error::{Error, Result, ResultExt};
pub use filter::{MetricFilterList, MetricRow, RowId};
pub use metrics::MetricChoice;
pub use query::{IndexBase, MetricFilter, QueryBuilder, SearchQuery};
pub use search_api::SearchClient;
pub use search_models::{ModelId, ResultRow, ResultSet};

/// Version of the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Result, ResultExt};
    pub use crate::filter::{MetricFilterList, RowId};
    pub use crate::metrics::MetricChoice;
    pub use crate::query::{QueryBuilder, SearchQuery};
}
