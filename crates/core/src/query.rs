//! Flattening of the search form into the indexed form-field query
//!
//! The search endpoint expects one `metric{i}` / `parameter{i}` pair per
//! filter row, a `timestamp` date and whatever other plain fields the form
//! carries (e.g. `number`). [`QueryBuilder`] produces that mapping and
//! [`SearchQuery::metric_filters`] reads it back.

use crate::date_filter::DateFilter;
use crate::error::{Error, Result};
use crate::filter::MetricFilterList;
use crate::metrics::MetricChoice;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

pub const METRIC_KEY_PREFIX: &str = "metric";
pub const PARAMETER_KEY_PREFIX: &str = "parameter";
pub const TIMESTAMP_KEY: &str = "timestamp";
pub const NUMBER_KEY: &str = "number";

/// First positional suffix used for `metric{i}` / `parameter{i}`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum IndexBase {
    #[default]
    Zero,
    One,
}

impl IndexBase {
    pub fn offset(self) -> usize {
        match self {
            Self::Zero => 0,
            Self::One => 1,
        }
    }
}

impl TryFrom<u8> for IndexBase {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Zero),
            1 => Ok(Self::One),
            other => Err(Error::config(format!(
                "index_base must be 0 or 1, got {other}"
            ))),
        }
    }
}

/// Flattened request payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchQuery(BTreeMap<String, String>);

/// One decoded (metric, threshold) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricFilter {
    pub metric: MetricChoice,
    pub threshold: String,
}

impl MetricFilter {
    /// Threshold as a number, `None` when left blank
    pub fn threshold_percent(&self) -> Result<Option<f64>> {
        let text = self.threshold.trim();
        if text.is_empty() {
            return Ok(None);
        }
        text.parse::<f64>().map(Some).map_err(|e| {
            Error::invalid_input(format!(
                "Threshold '{}' for {} is not a number: {e}",
                self.threshold, self.metric
            ))
        })
    }
}

impl SearchQuery {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    /// URL-encoded body, as posted to the search endpoint
    pub fn to_form_body(&self) -> Result<String> {
        serde_urlencoded::to_string(&self.0)
            .map_err(|e| Error::invalid_input(format!("Failed to encode search query: {e}")))
    }

    /// Decode the indexed metric fields back into filters
    ///
    /// Indices must be contiguous from `base`; a `parameter{i}` without its
    /// `metric{i}` or an unknown metric name is rejected. A missing
    /// `parameter{i}` reads as a blank threshold.
    pub fn metric_filters(&self, base: IndexBase) -> Result<Vec<MetricFilter>> {
        let mut filters = Vec::new();
        let mut index = base.offset();
        while let Some(name) = self.get(&metric_key(index)) {
            filters.push(MetricFilter {
                metric: MetricChoice::parse(name)?,
                threshold: self.get(&parameter_key(index)).unwrap_or_default().to_string(),
            });
            index += 1;
        }

        let consumed = base.offset()..index;
        for key in self.0.keys() {
            let stray = indexed_suffix(key, METRIC_KEY_PREFIX)
                .or_else(|| indexed_suffix(key, PARAMETER_KEY_PREFIX))
                .filter(|i| !consumed.contains(i));
            if stray.is_some() {
                return Err(Error::invalid_input(format!(
                    "Query field '{key}' has no matching metric row"
                )));
            }
        }

        Ok(filters)
    }
}

impl FromIterator<(String, String)> for SearchQuery {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

pub fn metric_key(index: usize) -> String {
    format!("{METRIC_KEY_PREFIX}{index}")
}

pub fn parameter_key(index: usize) -> String {
    format!("{PARAMETER_KEY_PREFIX}{index}")
}

fn indexed_suffix(key: &str, prefix: &str) -> Option<usize> {
    key.strip_prefix(prefix)
        .and_then(|rest| {
            let index: usize = rest.parse().ok()?;
            // `metric01` is not row 1
            (index.to_string() == rest).then_some(index)
        })
}

/// Serializes form state into a [`SearchQuery`]
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryBuilder {
    base: IndexBase,
}

impl QueryBuilder {
    pub fn new(base: IndexBase) -> Self {
        Self { base }
    }

    pub fn base(&self) -> IndexBase {
        self.base
    }

    /// Flatten the filter rows, date and extra fields
    ///
    /// Suffixes follow row position, not row id. Generated keys take
    /// precedence over `other_fields` on collision.
    pub fn build(
        &self,
        filters: &MetricFilterList,
        date: &DateFilter,
        other_fields: &BTreeMap<String, String>,
    ) -> SearchQuery {
        let mut fields = BTreeMap::new();

        for (position, row) in filters.rows().iter().enumerate() {
            let index = self.base.offset() + position;
            fields.insert(metric_key(index), row.metric.as_str().to_string());
            fields.insert(parameter_key(index), row.threshold.clone());
        }
        fields.insert(TIMESTAMP_KEY.to_string(), date.to_query_value());

        for (key, value) in other_fields {
            if fields.contains_key(key) {
                warn!(key = %key, "Form field collides with a generated query key, keeping generated value");
                continue;
            }
            fields.insert(key.clone(), value.clone());
        }

        SearchQuery(fields)
    }
}
