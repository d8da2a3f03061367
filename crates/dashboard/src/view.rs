//! Results view model: what the results pane shows and how the table pages

use evalboard_core::config::ViewConfig;
use evalboard_core::error::Error;
use evalboard_core::search_models::MODEL_ID_COLUMN;
use evalboard_core::{ResultRow, ResultSet};
use serde_json::Value;
use std::cmp::Ordering;
use std::ops::Range;
use tracing::{debug, warn};

/// What the results pane currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// Nothing searched yet
    Idle,
    /// A search is in flight
    Loading,
    /// The last search returned rows
    Loaded(ResultsTable),
    /// The last search returned zero rows
    Empty,
    /// The last search failed
    Error(String),
}

/// The results pane
#[derive(Debug, Clone)]
pub struct ResultsView {
    state: ViewState,
    options: ViewConfig,
}

impl ResultsView {
    pub fn new(options: ViewConfig) -> Self {
        Self {
            state: ViewState::Idle,
            options,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewState::Loading)
    }

    pub fn table(&self) -> Option<&ResultsTable> {
        match &self.state {
            ViewState::Loaded(table) => Some(table),
            _ => None,
        }
    }

    pub fn table_mut(&mut self) -> Option<&mut ResultsTable> {
        match &mut self.state {
            ViewState::Loaded(table) => Some(table),
            _ => None,
        }
    }

    pub fn start_loading(&mut self) {
        self.state = ViewState::Loading;
    }

    /// Show the outcome of a finished search
    pub fn show(&mut self, outcome: Result<ResultSet, Error>) {
        self.state = match outcome {
            Ok(results) if results.is_empty() => {
                debug!("Search returned no models");
                ViewState::Empty
            }
            Ok(results) => ViewState::Loaded(ResultsTable::new(results, &self.options)),
            Err(e) => {
                warn!("Search failed: {e}");
                ViewState::Error(e.to_string())
            }
        };
    }

    pub fn clear(&mut self) {
        self.state = ViewState::Idle;
    }

    pub fn options(&self) -> &ViewConfig {
        &self.options
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pub column: String,
    pub direction: SortDirection,
}

/// Sortable, paginated table over one result set
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsTable {
    columns: Vec<String>,
    rows: Vec<ResultRow>,
    sort: Option<SortOrder>,
    page: usize,
    items_per_page: usize,
    page_button_limit: usize,
    decimal_places: usize,
}

impl ResultsTable {
    pub fn new(results: ResultSet, options: &ViewConfig) -> Self {
        let rows = results.into_rows();
        Self {
            columns: column_order(&rows),
            rows,
            sort: None,
            page: 0,
            items_per_page: options.items_per_page.max(1),
            page_button_limit: options.page_button_limit.max(1),
            decimal_places: options.decimal_places,
        }
    }

    /// `model_id` first, then every other column in order of first appearance
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn total_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn sort(&self) -> Option<&SortOrder> {
        self.sort.as_ref()
    }

    /// Stable sort on `column`; missing values always go last
    ///
    /// Sorting jumps back to the first page. Unknown columns are ignored.
    pub fn sort_by(&mut self, column: &str, direction: SortDirection) {
        if !self.columns.iter().any(|c| c == column) {
            debug!(column, "Ignoring sort on unknown column");
            return;
        }
        self.rows.sort_by(|a, b| {
            let (a, b) = (sort_key(a, column), sort_key(b, column));
            match (a, b) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => match direction {
                    SortDirection::Ascending => a.cmp(&b),
                    SortDirection::Descending => b.cmp(&a),
                },
            }
        });
        self.sort = Some(SortOrder {
            column: column.to_string(),
            direction,
        });
        self.page = 0;
    }

    /// Header click: ascending first, then flip
    pub fn toggle_sort(&mut self, column: &str) {
        let direction = match &self.sort {
            Some(order) if order.column == column && order.direction == SortDirection::Ascending => {
                SortDirection::Descending
            }
            _ => SortDirection::Ascending,
        };
        self.sort_by(column, direction);
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(self.items_per_page).max(1)
    }

    /// Go to a zero-based page, clamped to the last page
    pub fn set_page(&mut self, page: usize) {
        self.page = page.min(self.page_count() - 1);
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    fn page_range(&self) -> Range<usize> {
        let start = (self.page * self.items_per_page).min(self.rows.len());
        let end = (start + self.items_per_page).min(self.rows.len());
        start..end
    }

    pub fn page_rows(&self) -> &[ResultRow] {
        &self.rows[self.page_range()]
    }

    /// Window of zero-based page numbers to offer as buttons
    pub fn page_buttons(&self) -> Range<usize> {
        let count = self.page_count();
        let limit = self.page_button_limit.min(count);
        let start = self
            .page
            .saturating_sub(limit / 2)
            .min(count - limit);
        start..start + limit
    }

    /// Pager summary, e.g. `16 to 30 (42)`
    pub fn pager_label(&self) -> String {
        let range = self.page_range();
        let first = if range.is_empty() { 0 } else { range.start + 1 };
        format!("{} to {} ({})", first, range.end, self.rows.len())
    }

    /// Display text of one cell
    pub fn cell_text(&self, row: &ResultRow, column: &str) -> String {
        if column == MODEL_ID_COLUMN {
            return row.model_id.to_string();
        }
        match row.get(column) {
            None | Some(Value::Null) => String::new(),
            Some(Value::Number(n)) => match n.as_f64() {
                Some(f) if n.is_f64() => format!("{:.*}", self.decimal_places, f),
                _ => n.to_string(),
            },
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

fn column_order(rows: &[ResultRow]) -> Vec<String> {
    let mut columns = vec![MODEL_ID_COLUMN.to_string()];
    for row in rows {
        for key in row.columns.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

/// Comparable projection of a cell
#[derive(Debug)]
enum SortKey {
    Number(f64),
    Text(String),
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
        }
    }
}

fn sort_key(row: &ResultRow, column: &str) -> Option<SortKey> {
    if column == MODEL_ID_COLUMN {
        let id = row.model_id.as_str();
        return Some(match id.parse::<f64>() {
            Ok(n) => SortKey::Number(n),
            Err(_) => SortKey::Text(id.to_string()),
        });
    }
    match row.get(column)? {
        Value::Null => None,
        Value::Number(n) => n.as_f64().map(SortKey::Number),
        Value::String(s) => Some(SortKey::Text(s.clone())),
        other => Some(SortKey::Text(other.to_string())),
    }
}
