//! The "after" date filter of the search form

use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire format of the `timestamp` field
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reference date the form starts from
pub const DEFAULT_AFTER_DATE: &str = "2016-08-03";

/// Only models run on or after this date are returned
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DateFilter(NaiveDate);

impl DateFilter {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse a `YYYY-MM-DD` calendar date
    pub fn parse(input: &str) -> Result<Self> {
        NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
            .map(Self)
            .map_err(|e| Error::invalid_date(input, e.to_string()))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Date-picker interaction
    pub fn set(&mut self, date: NaiveDate) {
        self.0 = date;
    }

    /// `YYYY-MM-DD` form sent as the `timestamp` field
    pub fn to_query_value(&self) -> String {
        self.0.format(DATE_FORMAT).to_string()
    }
}

impl Default for DateFilter {
    fn default() -> Self {
        Self(NaiveDate::from_ymd_opt(2016, 8, 3).unwrap_or_default())
    }
}

impl fmt::Display for DateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_query_value())
    }
}
