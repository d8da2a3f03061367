//! Library interface for the evalboard CLI
//!
//! This module exposes the flag parsing and form assembly used by main.rs so
//! they can be covered by integration tests.

use anyhow::{anyhow, Context, Result};
use evalboard_core::config::Config;
use evalboard_core::{DateFilter, MetricChoice};
use evalboard_dashboard::SearchForm;

// Re-export commonly needed types for tests
pub use evalboard_core::config::Config as AppConfig;

/// A `--metric` flag: `name` or `name=threshold`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricArg {
    pub metric: MetricChoice,
    pub threshold: String,
}

/// Parse `precision=50`, `auc` or `true positives=5`
pub fn parse_metric_arg(raw: &str) -> Result<MetricArg> {
    let (name, threshold) = match raw.split_once('=') {
        Some((name, threshold)) => (name, threshold.trim()),
        None => (raw, ""),
    };
    let metric = MetricChoice::parse(name).map_err(|e| {
        let valid: Vec<&str> = MetricChoice::all().iter().map(|m| m.as_str()).collect();
        anyhow!("{e}. Valid metrics: {}", valid.join(", "))
    })?;
    Ok(MetricArg {
        metric,
        threshold: threshold.trim_end_matches('%').trim().to_string(),
    })
}

/// Parse a `--field key=value` flag
pub fn parse_field_arg(raw: &str) -> Result<(String, String)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected key=value, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(anyhow!("Field name must not be empty in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Form inputs gathered from the command line
#[derive(Debug, Clone, Default)]
pub struct FormArgs {
    pub metrics: Vec<MetricArg>,
    pub after: Option<String>,
    pub number: Option<String>,
    pub fields: Vec<(String, String)>,
}

/// Fill a freshly mounted form from command line inputs
pub fn build_form(config: &Config, args: &FormArgs) -> Result<SearchForm> {
    let mut form = SearchForm::new(&config.form).context("Invalid form configuration")?;

    for arg in &args.metrics {
        form.add_metric_filter(arg.metric, arg.threshold.clone());
    }
    if let Some(after) = &args.after {
        form.set_date(DateFilter::parse(after)?);
    }
    if let Some(number) = &args.number {
        form.set_result_limit(number.clone());
    }
    for (key, value) in &args.fields {
        form.set_field(key.clone(), value.clone());
    }

    Ok(form)
}
