//! The fixed set of evaluation metrics a filter row can select

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumString, IntoStaticStr};

/// Supported evaluation metric
///
/// The declaration order is the display order of the selection control;
/// the first variant is the default for new filter rows.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
pub enum MetricChoice {
    #[default]
    #[serde(rename = "precision")]
    #[strum(serialize = "precision")]
    Precision,
    #[serde(rename = "recall")]
    #[strum(serialize = "recall")]
    Recall,
    #[serde(rename = "auc")]
    #[strum(serialize = "auc")]
    Auc,
    #[serde(rename = "f1")]
    #[strum(serialize = "f1")]
    F1,
    #[serde(rename = "true positives")]
    #[strum(serialize = "true positives")]
    TruePositives,
    #[serde(rename = "true negatives")]
    #[strum(serialize = "true negatives")]
    TrueNegatives,
    #[serde(rename = "false positives")]
    #[strum(serialize = "false positives")]
    FalsePositives,
    #[serde(rename = "false negatives")]
    #[strum(serialize = "false negatives")]
    FalseNegatives,
}

impl MetricChoice {
    /// Every supported metric, in display order
    pub const ALL: [MetricChoice; 8] = [
        MetricChoice::Precision,
        MetricChoice::Recall,
        MetricChoice::Auc,
        MetricChoice::F1,
        MetricChoice::TruePositives,
        MetricChoice::TrueNegatives,
        MetricChoice::FalsePositives,
        MetricChoice::FalseNegatives,
    ];

    pub fn all() -> &'static [MetricChoice] {
        &Self::ALL
    }

    /// Wire name, as posted in `metric{i}` fields
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Parse a wire name, rejecting anything outside the supported set
    pub fn parse(name: &str) -> Result<Self> {
        Self::from_str(name.trim()).map_err(|_| Error::UnknownMetric(name.to_string()))
    }

    /// Name the evaluation store records this metric under
    ///
    /// Thresholded metrics are stored as `<name>@` with the threshold in a
    /// separate parameter column; bare metrics keep their plain name.
    pub fn evaluation_metric_name(self, has_threshold: bool) -> String {
        if has_threshold {
            format!("{}@", self.as_str())
        } else {
            self.as_str().to_string()
        }
    }
}
