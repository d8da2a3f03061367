//! Configuration loading from files and environment variables

use crate::error::{Error, Result};
use config::{Config as ConfigLib, ConfigBuilder as LibConfigBuilder, Environment, File};
use std::path::Path;

use super::defaults::*;
use super::{global_config_path, Config};

/// Helper to set a config default with consistent error mapping
fn set_config_default<T: Into<config::Value>>(
    builder: LibConfigBuilder<config::builder::DefaultState>,
    key: &str,
    value: T,
) -> Result<LibConfigBuilder<config::builder::DefaultState>> {
    builder
        .set_default(key, value)
        .map_err(|e| Error::config(format!("Failed to set {key} default: {e}")))
}

impl Config {
    /// Loads configuration from a TOML file with environment variable overrides
    ///
    /// Environment variables are prefixed with `EVALBOARD_` and use double underscores
    /// for nested values. For example:
    /// - `EVALBOARD_SEARCH__BASE_URL=http://dashboard:5000`
    /// - `EVALBOARD_FORM__INDEX_BASE=1`
    pub fn from_file(path: &Path) -> Result<Self> {
        let builder = ConfigLib::builder();

        // Search defaults
        let builder = set_config_default(builder, "search.provider", default_provider())?;
        let builder = set_config_default(builder, "search.base_url", default_base_url())?;
        let builder = set_config_default(builder, "search.search_path", default_search_path())?;
        let builder = set_config_default(
            builder,
            "search.detail_path_template",
            default_detail_path_template(),
        )?;
        let builder = set_config_default(
            builder,
            "search.timeout_secs",
            default_timeout_secs() as i64,
        )?;

        // Form defaults
        let builder =
            set_config_default(builder, "form.index_base", default_index_base() as i64)?;
        let builder =
            set_config_default(builder, "form.default_after_date", default_after_date())?;
        let builder = set_config_default(
            builder,
            "form.default_result_limit",
            default_result_limit() as i64,
        )?;

        // View defaults
        let builder = set_config_default(
            builder,
            "view.items_per_page",
            default_items_per_page() as i64,
        )?;
        let builder = set_config_default(
            builder,
            "view.page_button_limit",
            default_page_button_limit() as i64,
        )?;
        let mut builder = set_config_default(
            builder,
            "view.decimal_places",
            default_decimal_places() as i64,
        )?;

        // Add the config file if it exists
        if path.exists() {
            builder = builder.add_source(File::from(path));
        }

        // Add environment variables with EVALBOARD_ prefix
        builder = builder.add_source(
            Environment::with_prefix("EVALBOARD")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // Shorthand for pointing at another dashboard host
        if let Ok(url) = std::env::var("EVALBOARD_URL") {
            builder = builder
                .set_override("search.base_url", url)
                .map_err(|e| Error::config(format!("Failed to set EVALBOARD_URL: {e}")))?;
        }

        let config = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| Error::config(format!("Failed to deserialize config: {e}")))
    }

    /// Creates a config from a TOML string (useful for testing)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from a single file
    ///
    /// Precedence (lowest to highest):
    /// 1. Hardcoded defaults
    /// 2. Config file (~/.evalboard/config.toml or custom --config path)
    /// 3. Environment variables (EVALBOARD_*)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => global_config_path()?,
        };
        Self::from_file(&path)
    }
}
