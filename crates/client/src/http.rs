//! HTTP search client posting the form to the dashboard web application

use crate::error::ClientError;
use async_trait::async_trait;
use evalboard_core::config::SearchConfig;
use evalboard_core::error::{Error, Result};
use evalboard_core::search_api::{SearchClient, SearchErrorBody};
use evalboard_core::{ResultSet, SearchQuery};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Longest slice of an error body quoted back in an error message
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Search client talking to the search endpoint over HTTP
///
/// Sends the query as an `application/x-www-form-urlencoded` POST body and
/// expects a JSON object with a `results` array back.
pub struct HttpSearchClient {
    client: Client,
    search_url: String,
}

impl HttpSearchClient {
    /// Create a new HTTP search client
    ///
    /// # Arguments
    /// * `config` - Search endpoint configuration (base URL, path, timeout)
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let search_url = config.search_url();
        info!("Initializing HTTP search client");
        info!("  Endpoint: {search_url}");
        info!("  Timeout: {}s", config.timeout_secs);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::ConfigError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, search_url })
    }

    pub fn search_url(&self) -> &str {
        &self.search_url
    }
}

#[async_trait]
impl SearchClient for HttpSearchClient {
    async fn search(&self, query: &SearchQuery) -> Result<ResultSet> {
        debug!(fields = query.len(), url = %self.search_url, "Posting search form");

        let response = self
            .client
            .post(&self.search_url)
            .form(query.as_map())
            .send()
            .await
            .map_err(|e| {
                let err = ClientError::from_reqwest(&e);
                warn!("{err}");
                err
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::from_reqwest(&e))?;

        if !status.is_success() {
            let message = SearchErrorBody::message_from(&body)
                .unwrap_or_else(|| truncate(&body, MAX_ERROR_BODY_CHARS));
            warn!("Search endpoint returned {status}: {message}");
            return Err(Error::server(status.as_u16(), message));
        }

        let results = ResultSet::from_json_str(&body)?;
        info!("Search returned {} models", results.len());
        Ok(results)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    match trimmed.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("  ", 10), "empty response body");
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 4), "abcd...");
    }

    #[test]
    fn test_new_uses_configured_url() {
        let config = SearchConfig {
            base_url: "http://example.test:9000".to_string(),
            ..SearchConfig::default()
        };
        let client = HttpSearchClient::new(&config).unwrap();
        assert_eq!(
            client.search_url(),
            "http://example.test:9000/evaluations/search_models"
        );
    }
}
