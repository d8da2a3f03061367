//! Search clients for the model search endpoint
//!
//! This crate provides implementations of [`SearchClient`]: a live HTTP
//! client and a mock used by tests and offline runs.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use evalboard_core::config::SearchConfig;
use evalboard_core::error::{Error, Result};
use evalboard_core::SearchClient;
use std::sync::Arc;
use tracing::info;

pub mod error;
mod http;
mod mock;

pub use error::ClientError;
pub use http::HttpSearchClient;
pub use mock::{MockResponse, MockSearchClient};

/// Create a new search client based on configuration
///
/// # Arguments
/// * `config` - Search configuration including provider type
pub fn create_search_client(config: &SearchConfig) -> Result<Arc<dyn SearchClient>> {
    match config.provider.as_str() {
        "http" => Ok(Arc::new(HttpSearchClient::new(config)?)),
        "mock" => {
            info!("Creating mock search client");
            Ok(Arc::new(MockSearchClient::new()))
        }
        other => Err(Error::config(format!(
            "Unknown search provider: '{other}'. Valid providers: http, mock"
        ))),
    }
}
