//! State of one model search form
//!
//! The form owns its metric filter rows, the "after" date and the plain
//! fields (result limit and anything else the page adds). It is the only
//! place that state lives; nothing is shared between form instances.

use evalboard_core::config::FormConfig;
use evalboard_core::error::Result;
use evalboard_core::query::NUMBER_KEY;
use evalboard_core::{
    DateFilter, MetricChoice, MetricFilterList, MetricRow, QueryBuilder, RowId, SearchQuery,
};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SearchForm {
    filters: MetricFilterList,
    date: DateFilter,
    result_limit: String,
    fields: BTreeMap<String, String>,
    builder: QueryBuilder,
    initial_date: DateFilter,
    initial_limit: String,
}

impl SearchForm {
    /// Mount a form with the configured defaults and no filter rows
    pub fn new(config: &FormConfig) -> Result<Self> {
        let date = config.default_date()?;
        let limit = config.default_result_limit.to_string();
        Ok(Self {
            filters: MetricFilterList::new(),
            date,
            result_limit: limit.clone(),
            fields: BTreeMap::new(),
            builder: QueryBuilder::new(config.index_base()?),
            initial_date: date,
            initial_limit: limit,
        })
    }

    pub fn add_metric(&mut self) -> MetricRow {
        self.filters.add_row()
    }

    pub fn remove_metric(&mut self, id: RowId) {
        self.filters.remove_row(id);
    }

    pub fn update_metric(&mut self, id: RowId, metric: Option<MetricChoice>, threshold: Option<String>) {
        self.filters.update_row(id, metric, threshold);
    }

    /// Add a row already set to `metric` at `threshold`
    pub fn add_metric_filter(&mut self, metric: MetricChoice, threshold: impl Into<String>) -> RowId {
        let id = self.filters.add_row().id;
        self.filters.update_row(id, Some(metric), Some(threshold.into()));
        id
    }

    pub fn filters(&self) -> &MetricFilterList {
        &self.filters
    }

    pub fn date(&self) -> DateFilter {
        self.date
    }

    pub fn set_date(&mut self, date: DateFilter) {
        debug!(%date, "After date changed");
        self.date = date;
    }

    /// Raw text of the result limit field; blank lets the endpoint pick
    pub fn result_limit(&self) -> &str {
        &self.result_limit
    }

    pub fn set_result_limit(&mut self, limit: impl Into<String>) {
        self.result_limit = limit.into();
    }

    /// Set any other plain form field posted alongside the filters
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Everything the form would post right now
    pub fn to_query(&self) -> SearchQuery {
        let mut other = self.fields.clone();
        other.insert(NUMBER_KEY.to_string(), self.result_limit.clone());
        self.builder.build(&self.filters, &self.date, &other)
    }

    /// Back to the mounted state; row ids keep counting up
    pub fn reset(&mut self) {
        self.filters.clear();
        self.date = self.initial_date;
        self.result_limit = self.initial_limit.clone();
        self.fields.clear();
    }
}
