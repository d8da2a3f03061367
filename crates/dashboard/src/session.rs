//! Drives one search form against a search client
//!
//! A session owns exactly one [`SearchForm`] and one [`ResultsView`]. At
//! most one search is in flight: submitting while another search is pending
//! supersedes it. The older task's handle is aborted and dropped, so its
//! result can never reach the view. Waiting for a completion is cancel-safe:
//! dropping the wait leaves the search pending.

use crate::form::SearchForm;
use crate::view::{ResultsView, ViewState};
use evalboard_core::config::Config;
use evalboard_core::error::{Error, Result};
use evalboard_core::{ResultSet, SearchClient};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Ticket identifying one submission; later submissions get larger tickets
pub type Generation = u64;

struct InFlight {
    generation: Generation,
    handle: JoinHandle<Result<ResultSet>>,
}

pub struct SearchSession {
    form: SearchForm,
    view: ResultsView,
    client: Arc<dyn SearchClient>,
    generation: Generation,
    in_flight: Option<InFlight>,
    closed: bool,
}

impl SearchSession {
    pub fn new(config: &Config, client: Arc<dyn SearchClient>) -> Result<Self> {
        Ok(Self {
            form: SearchForm::new(&config.form)?,
            view: ResultsView::new(config.view.clone()),
            client,
            generation: 0,
            in_flight: None,
            closed: false,
        })
    }

    pub fn form(&self) -> &SearchForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SearchForm {
        &mut self.form
    }

    pub fn view(&self) -> &ViewState {
        self.view.state()
    }

    pub fn results_view(&self) -> &ResultsView {
        &self.view
    }

    pub fn results_view_mut(&mut self) -> &mut ResultsView {
        &mut self.view
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Generation of the most recent submission (0 before the first)
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Post the current form state
    ///
    /// A search still pending from an earlier submission is aborted; the
    /// view stays in its loading state until this submission completes.
    pub fn submit(&mut self) -> Result<Generation> {
        if self.closed {
            return Err(Error::invalid_input("search session is closed"));
        }

        if let Some(previous) = self.in_flight.take() {
            warn!(
                superseded = previous.generation,
                "Search submitted while another was pending, superseding it"
            );
            previous.handle.abort();
        }

        self.generation += 1;
        let generation = self.generation;
        let query = self.form.to_query();
        info!(
            generation,
            filters = self.form.filters().len(),
            after = %self.form.date(),
            "Submitting model search"
        );

        let client = Arc::clone(&self.client);
        let handle = tokio::spawn(async move { client.search(&query).await });
        self.in_flight = Some(InFlight { generation, handle });
        self.view.start_loading();
        Ok(generation)
    }

    /// Wait for the pending search and show its outcome
    ///
    /// Returns `None` when nothing is pending or the session was closed.
    pub async fn next_completion(&mut self) -> Option<&ViewState> {
        if self.closed {
            return None;
        }
        let in_flight = self.in_flight.as_mut()?;
        let generation = in_flight.generation;
        // Awaiting through the borrow keeps the handle if this future is dropped
        let joined = (&mut in_flight.handle).await;
        self.in_flight = None;
        self.finish(generation, flatten(joined));
        Some(self.view.state())
    }

    /// Non-blocking variant of [`next_completion`](Self::next_completion)
    ///
    /// Applies the outcome only if the pending search has already finished.
    pub async fn poll_completion(&mut self) -> Option<&ViewState> {
        let finished = self
            .in_flight
            .as_ref()
            .is_some_and(|in_flight| in_flight.handle.is_finished());
        if !finished {
            return None;
        }
        self.next_completion().await
    }

    /// Submit and wait in one step
    pub async fn search_once(&mut self) -> Result<&ViewState> {
        self.submit()?;
        self.next_completion()
            .await
            .ok_or_else(|| Error::invalid_input("search session is closed"))
    }

    /// Tear down: abort any pending search and refuse further submissions
    ///
    /// The view keeps whatever it showed last; late results are dropped.
    pub fn close(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            debug!(generation = in_flight.generation, "Aborting pending search on close");
            in_flight.handle.abort();
        }
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn finish(&mut self, generation: Generation, outcome: Result<ResultSet>) {
        match &outcome {
            Ok(results) => info!(generation, models = results.len(), "Search completed"),
            Err(e) => warn!(generation, "Search failed: {e}"),
        }
        self.view.show(outcome);
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.handle.abort();
        }
    }
}

fn flatten(joined: std::result::Result<Result<ResultSet>, tokio::task::JoinError>) -> Result<ResultSet> {
    match joined {
        Ok(outcome) => outcome,
        Err(e) if e.is_cancelled() => Err(Error::with_context("search task was cancelled", e)),
        Err(e) => Err(Error::with_context("search task failed", e)),
    }
}
