//! Response models for the model search endpoint
//!
//! The endpoint answers `{"results": [...]}` where each row is a flat JSON
//! object carrying at least `model_id`; every other key is a metric name or
//! a derived statistic.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub const MODEL_ID_COLUMN: &str = "model_id";

/// Identifier of an evaluated model, kept in its textual form
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) if !s.is_empty() => Ok(Self(s.clone())),
            Value::Number(n) => Ok(Self(n.to_string())),
            other => Err(Error::decode(format!(
                "model_id must be a number or non-empty string, got {other}"
            ))),
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of the result set
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub model_id: ModelId,
    /// Remaining columns in the order the server sent them
    pub columns: Map<String, Value>,
}

impl ResultRow {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }
}

impl TryFrom<Map<String, Value>> for ResultRow {
    type Error = Error;

    fn try_from(mut object: Map<String, Value>) -> Result<Self> {
        let raw_id = object
            .shift_remove(MODEL_ID_COLUMN)
            .ok_or_else(|| Error::decode("result row is missing model_id"))?;
        Ok(Self {
            model_id: ModelId::from_json(&raw_id)?,
            columns: object,
        })
    }
}

/// Ordered rows returned by one search
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    rows: Vec<ResultRow>,
}

impl ResultSet {
    pub fn new(rows: Vec<ResultRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<ResultRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Decode the endpoint's JSON body
    pub fn from_json_str(body: &str) -> Result<Self> {
        let response: SearchResponse = serde_json::from_str(body)
            .map_err(|e| Error::decode(format!("Failed to parse search response: {e}")))?;
        response.try_into()
    }
}

/// Wire shape of a successful search response
#[derive(Debug, Deserialize, Serialize)]
pub struct SearchResponse {
    pub results: Vec<Map<String, Value>>,
}

impl TryFrom<SearchResponse> for ResultSet {
    type Error = Error;

    fn try_from(response: SearchResponse) -> Result<Self> {
        let rows = response
            .results
            .into_iter()
            .enumerate()
            .map(|(index, object)| {
                ResultRow::try_from(object).map_err(|e| Error::decode(format!("row {index}: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rows })
    }
}

/// Error payload the endpoint sends alongside a failure status
#[derive(Debug, Deserialize)]
pub struct SearchErrorBody {
    pub sorry: Option<String>,
    pub error: Option<String>,
}

impl SearchErrorBody {
    /// Human readable message from an error body, if it has one
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<SearchErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.sorry.or(parsed.error))
    }
}
