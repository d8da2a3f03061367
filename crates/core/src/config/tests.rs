//! Tests for configuration module

use super::*;
use crate::error::{Error, Result};
use std::io::Write;
use tempfile::NamedTempFile;

fn create_temp_config_file(content: &str) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .map_err(|e| Error::config(format!("Failed to create temp file: {e}")))?;
    file.write_all(content.as_bytes())
        .map_err(|e| Error::config(format!("Failed to write temp file: {e}")))?;
    file.flush()
        .map_err(|e| Error::config(format!("Failed to flush temp file: {e}")))?;
    Ok(file)
}

fn with_env_var<F, T>(key: &str, value: &str, f: F) -> T
where
    F: FnOnce() -> T,
{
    std::env::set_var(key, value);
    let result = f();
    std::env::remove_var(key);
    result
}

#[test]
fn test_from_toml_str_valid() {
    let toml = r#"
        [search]
        base_url = "http://dashboard.internal:8080"
        timeout_secs = 5

        [form]
        index_base = 1
    "#;

    let config = Config::from_toml_str(toml).expect("Failed to parse valid TOML");
    assert_eq!(config.search.base_url, "http://dashboard.internal:8080");
    assert_eq!(config.search.timeout_secs, 5);
    assert_eq!(config.form.index_base().ok(), Some(IndexBase::One));
}

#[test]
fn test_from_toml_str_empty_uses_defaults() {
    let config = Config::from_toml_str("").expect("Failed to parse empty TOML");
    assert_eq!(config.search.provider, "http");
    assert_eq!(config.search.search_path, "/evaluations/search_models");
    assert_eq!(config.form.default_after_date, "2016-08-03");
    assert_eq!(config.form.default_result_limit, 15);
    assert_eq!(config.view.items_per_page, 15);
    assert_eq!(config.view.page_button_limit, 5);
    assert!(config.validate().is_ok());
}

#[test]
fn test_from_toml_str_invalid_syntax() {
    let toml = r#"
        [search
        provider = "http"
    "#;

    let result = Config::from_toml_str(toml);
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Failed to parse TOML"));
}

#[test]
fn test_validate_invalid_provider() {
    let toml = r#"
        [search]
        provider = "graphql"
    "#;

    let config = Config::from_toml_str(toml).expect("Failed to parse TOML");
    let result = config.validate();
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Invalid search provider"));
}

#[test]
fn test_validate_rejects_bad_index_base() {
    let toml = r#"
        [form]
        index_base = 2
    "#;

    let config = Config::from_toml_str(toml).expect("Failed to parse TOML");
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_bad_default_date() {
    let toml = r#"
        [form]
        default_after_date = "08/03/2016"
    "#;

    let config = Config::from_toml_str(toml).expect("Failed to parse TOML");
    let err = config.validate().unwrap_err().to_string();
    assert!(err.contains("form.default_after_date"));
}

#[test]
fn test_validate_rejects_template_without_placeholder() {
    let toml = r#"
        [search]
        detail_path_template = "/evaluations/model"
    "#;

    let config = Config::from_toml_str(toml).expect("Failed to parse TOML");
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_zero_sizes() {
    let mut config = Config::default();
    config.view.items_per_page = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.search.timeout_secs = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.search.base_url = "localhost:5000".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_search_and_detail_urls() {
    let search = SearchConfig {
        base_url: "http://localhost:5000/".to_string(),
        ..SearchConfig::default()
    };
    assert_eq!(
        search.search_url(),
        "http://localhost:5000/evaluations/search_models"
    );
    assert_eq!(
        search.detail_url(&ModelId::new("42")),
        "http://localhost:5000/evaluations/42/model"
    );
}

#[test]
fn test_from_file_reads_values() {
    let file = create_temp_config_file(
        r#"
        [search]
        provider = "mock"

        [form]
        default_result_limit = 40
    "#,
    )
    .expect("Failed to create temp config");

    let config = Config::from_file(file.path()).expect("Failed to load config");
    assert_eq!(config.search.provider, "mock");
    assert_eq!(config.form.default_result_limit, 40);
    assert_eq!(config.search.detail_path_template, "/evaluations/{model_id}/model");
}

#[test]
fn test_from_file_missing_file_uses_defaults() {
    let config = Config::from_file(std::path::Path::new("/nonexistent/evalboard.toml"))
        .expect("Missing file should fall back to defaults");
    assert_eq!(config.form.index_base, 0);
}

#[test]
fn test_env_override() {
    let file = create_temp_config_file(
        r#"
        [view]
        items_per_page = 10
    "#,
    )
    .expect("Failed to create temp config");

    let config = with_env_var("EVALBOARD_VIEW__ITEMS_PER_PAGE", "25", || {
        Config::from_file(file.path())
    })
    .expect("Failed to load config");
    assert_eq!(config.view.items_per_page, 25);
}

#[test]
fn test_save_round_trip() {
    let file = create_temp_config_file("").expect("Failed to create temp config");
    let config = Config::builder()
        .form(FormConfig {
            index_base: 1,
            ..FormConfig::default()
        })
        .build();

    config.save(file.path()).expect("Failed to save config");
    let loaded = Config::from_toml_str(
        &std::fs::read_to_string(file.path()).expect("Failed to read saved config"),
    )
    .expect("Failed to parse saved config");
    assert_eq!(loaded.form.index_base, 1);
    assert_eq!(loaded.search.base_url, config.search.base_url);
}
