//! Configuration module for the evalboard dashboard
//!
//! This module provides configuration structures and loading mechanisms for the
//! dashboard. Configuration can be loaded from TOML files and/or environment
//! variables.

mod defaults;
mod loading;

#[cfg(test)]
mod tests;

use crate::date_filter::DateFilter;
use crate::error::{Error, Result};
use crate::query::IndexBase;
use crate::search_models::ModelId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use defaults::*;

/// Placeholder substituted with the model id in detail links
pub const MODEL_ID_PLACEHOLDER: &str = "{model_id}";

/// Returns the path to the global configuration file
///
/// The global config is stored at `~/.evalboard/config.toml`.
pub fn global_config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| Error::config("Unable to determine home directory".to_string()))?;
    Ok(home_dir.join(".evalboard").join("config.toml"))
}

/// Main configuration structure for the dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Search endpoint configuration
    #[serde(default)]
    pub search: SearchConfig,

    /// Search form configuration
    #[serde(default)]
    pub form: FormConfig,

    /// Results table configuration
    #[serde(default)]
    pub view: ViewConfig,
}

/// Configuration for the search endpoint
///
/// # Providers
/// - `http` (default): POST the form to a live search endpoint
/// - `mock`: canned empty results, for offline use and tests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Provider type: "http" (default), "mock"
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Scheme, host and port of the dashboard web application
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path the search form posts to
    #[serde(default = "default_search_path")]
    pub search_path: String,

    /// Path of a model's detail page; must contain `{model_id}`
    #[serde(default = "default_detail_path_template")]
    pub detail_path_template: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl SearchConfig {
    /// Full URL of the search endpoint
    pub fn search_url(&self) -> String {
        join_url(&self.base_url, &self.search_path)
    }

    /// Full URL of a model's detail page
    pub fn detail_url(&self, model_id: &ModelId) -> String {
        let path = self
            .detail_path_template
            .replace(MODEL_ID_PLACEHOLDER, model_id.as_str());
        join_url(&self.base_url, &path)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: default_base_url(),
            search_path: default_search_path(),
            detail_path_template: default_detail_path_template(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Configuration for the search form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    /// First suffix of the `metric{i}`/`parameter{i}` fields (0 or 1)
    #[serde(default = "default_index_base")]
    pub index_base: u8,

    /// Initial value of the "after" date filter (YYYY-MM-DD)
    #[serde(default = "default_after_date")]
    pub default_after_date: String,

    /// Initial value of the `number` (result limit) field
    #[serde(default = "default_result_limit")]
    pub default_result_limit: usize,
}

impl FormConfig {
    pub fn index_base(&self) -> Result<IndexBase> {
        IndexBase::try_from(self.index_base)
    }

    pub fn default_date(&self) -> Result<DateFilter> {
        DateFilter::parse(&self.default_after_date)
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            index_base: default_index_base(),
            default_after_date: default_after_date(),
            default_result_limit: default_result_limit(),
        }
    }
}

/// Configuration for the results table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Rows shown per page
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,

    /// Maximum number of page buttons shown around the current page
    #[serde(default = "default_page_button_limit")]
    pub page_button_limit: usize,

    /// Decimal places for numeric cells
    #[serde(default = "default_decimal_places")]
    pub decimal_places: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            items_per_page: default_items_per_page(),
            page_button_limit: default_page_button_limit(),
            decimal_places: default_decimal_places(),
        }
    }
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        let valid_providers = ["http", "mock"];
        if !valid_providers.contains(&self.search.provider.as_str()) {
            return Err(Error::config(format!(
                "Invalid search provider '{}'. Must be one of: {:?}",
                self.search.provider, valid_providers
            )));
        }

        if self.search.base_url.trim().is_empty() {
            return Err(Error::config("search.base_url must not be empty".to_string()));
        }
        if !self.search.base_url.starts_with("http://")
            && !self.search.base_url.starts_with("https://")
        {
            return Err(Error::config(format!(
                "search.base_url must start with http:// or https://, got '{}'",
                self.search.base_url
            )));
        }

        if !self
            .search
            .detail_path_template
            .contains(MODEL_ID_PLACEHOLDER)
        {
            return Err(Error::config(format!(
                "search.detail_path_template must contain {MODEL_ID_PLACEHOLDER}"
            )));
        }

        if self.search.timeout_secs == 0 {
            return Err(Error::config(
                "search.timeout_secs must be greater than 0".to_string(),
            ));
        }

        self.form.index_base()?;
        self.form
            .default_date()
            .map_err(|e| Error::config(format!("form.default_after_date: {e}")))?;

        if self.form.default_result_limit == 0 {
            return Err(Error::config(
                "form.default_result_limit must be greater than 0".to_string(),
            ));
        }

        if self.view.items_per_page == 0 {
            return Err(Error::config(
                "view.items_per_page must be greater than 0".to_string(),
            ));
        }
        if self.view.page_button_limit == 0 {
            return Err(Error::config(
                "view.page_button_limit must be greater than 0".to_string(),
            ));
        }
        if self.view.decimal_places > 12 {
            return Err(Error::config(format!(
                "view.decimal_places too large (max 12, got {})",
                self.view.decimal_places
            )));
        }

        Ok(())
    }

    /// Saves the configuration to a TOML file
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, toml_string)
            .map_err(|e| Error::config(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Create a new ConfigBuilder starting from defaults
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config with fluent API
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    search: SearchConfig,
    form: FormConfig,
    view: ViewConfig,
}

impl ConfigBuilder {
    /// Set the search endpoint configuration
    pub fn search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Set the form configuration
    pub fn form(mut self, form: FormConfig) -> Self {
        self.form = form;
        self
    }

    /// Set the results table configuration
    pub fn view(mut self, view: ViewConfig) -> Self {
        self.view = view;
        self
    }

    /// Build the Config
    pub fn build(self) -> Config {
        Config {
            search: self.search,
            form: self.form,
            view: self.view,
        }
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
