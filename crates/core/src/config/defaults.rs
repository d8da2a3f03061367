//! Default values and functions for configuration

use crate::date_filter::DEFAULT_AFTER_DATE;

// Default constants
pub(crate) const DEFAULT_PROVIDER: &str = "http";
pub(crate) const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub(crate) const DEFAULT_SEARCH_PATH: &str = "/evaluations/search_models";
pub(crate) const DEFAULT_DETAIL_PATH_TEMPLATE: &str = "/evaluations/{model_id}/model";

pub(crate) fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

pub(crate) fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

pub(crate) fn default_search_path() -> String {
    DEFAULT_SEARCH_PATH.to_string()
}

pub(crate) fn default_detail_path_template() -> String {
    DEFAULT_DETAIL_PATH_TEMPLATE.to_string()
}

pub(crate) fn default_timeout_secs() -> u64 {
    30
}

pub(crate) fn default_index_base() -> u8 {
    0
}

pub(crate) fn default_after_date() -> String {
    DEFAULT_AFTER_DATE.to_string()
}

pub(crate) fn default_result_limit() -> usize {
    15 // Same fallback the search endpoint applies to a blank `number`
}

pub(crate) fn default_items_per_page() -> usize {
    15
}

pub(crate) fn default_page_button_limit() -> usize {
    5
}

pub(crate) fn default_decimal_places() -> usize {
    4
}
