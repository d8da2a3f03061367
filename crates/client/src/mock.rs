//! Mock search client for testing and offline use

use async_trait::async_trait;
use evalboard_core::error::{Error, Result};
use evalboard_core::{ResultSet, SearchClient, SearchQuery};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// Canned outcome of one mock search
#[derive(Debug, Clone)]
pub enum MockResponse {
    Results(ResultSet),
    ServerError { status: u16, message: String },
    TransportError(String),
}

impl MockResponse {
    fn into_result(self) -> Result<ResultSet> {
        match self {
            Self::Results(results) => Ok(results),
            Self::ServerError { status, message } => Err(Error::server(status, message)),
            Self::TransportError(message) => Err(Error::transport("connection", message)),
        }
    }
}

/// Mock search client that replays queued responses
///
/// Responses are consumed in order; once the queue is empty every search
/// returns an empty result set. Every received query is recorded.
#[derive(Debug, Default)]
pub struct MockSearchClient {
    responses: Mutex<VecDeque<MockResponse>>,
    received: Mutex<Vec<SearchQuery>>,
    latency: Option<Duration>,
}

impl MockSearchClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every response by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Queue a response for the next unanswered search
    pub fn push_response(&self, response: MockResponse) {
        lock(&self.responses).push_back(response);
    }

    /// Queries received so far, in arrival order
    pub fn received_queries(&self) -> Vec<SearchQuery> {
        lock(&self.received).clone()
    }
}

#[async_trait]
impl SearchClient for MockSearchClient {
    async fn search(&self, query: &SearchQuery) -> Result<ResultSet> {
        lock(&self.received).push(query.clone());
        let response = lock(&self.responses).pop_front();

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        response
            .map(MockResponse::into_result)
            .unwrap_or_else(|| Ok(ResultSet::default()))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
