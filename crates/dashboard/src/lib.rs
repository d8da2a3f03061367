//! Search form, results view and session driver for the evalboard dashboard
//!
//! The form and view are plain state containers; [`SearchSession`] ties them
//! to a [`SearchClient`](evalboard_core::SearchClient) and owns the policy for
//! overlapping submissions.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod form;
pub mod render;
pub mod session;
pub mod view;

pub use form::SearchForm;
pub use session::{Generation, SearchSession};
pub use view::{ResultsTable, ResultsView, SortDirection, SortOrder, ViewState};
