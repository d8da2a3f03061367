//! Terminal rendering of the search form and results pane

use crate::form::SearchForm;
use crate::view::{ResultsTable, SortDirection, ViewState};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use evalboard_core::config::SearchConfig;
use evalboard_core::MetricChoice;

pub const NO_RESULTS_MESSAGE: &str = "No results. Try different filters or an earlier date.";

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// The form as the user would see it
pub fn render_form(form: &SearchForm) -> String {
    let mut out = String::from("Show models with\n");
    if form.filters().is_empty() {
        out.push_str("  (no metric filters)\n");
    }
    for row in form.filters().rows() {
        let threshold = if row.threshold.is_empty() {
            "-"
        } else {
            row.threshold.as_str()
        };
        out.push_str(&format!("  [{}] {} @ {} %\n", row.id, row.metric, threshold));
    }
    out.push_str(&format!("After {}\n", form.date()));
    if !form.result_limit().is_empty() {
        out.push_str(&format!("Top {}\n", form.result_limit()));
    }
    out
}

/// The metric choices offered by each row's selector
pub fn render_metric_choices() -> String {
    let mut table = Table::new();
    table.set_header(vec!["#", "Metric"]);
    apply_table_style(&mut table);
    for (index, metric) in MetricChoice::all().iter().enumerate() {
        table.add_row(vec![index.to_string(), metric.to_string()]);
    }
    table.to_string()
}

/// The results pane in its current state
pub fn render_view(state: &ViewState, search: &SearchConfig) -> String {
    match state {
        ViewState::Idle => "Add metric filters and press Go.".to_string(),
        ViewState::Loading => "Loading...".to_string(),
        ViewState::Empty => NO_RESULTS_MESSAGE.to_string(),
        ViewState::Error(message) => format!("Search failed: {message}"),
        ViewState::Loaded(table) => render_table(table, search),
    }
}

fn render_table(results: &ResultsTable, search: &SearchConfig) -> String {
    let mut header: Vec<String> = results
        .columns()
        .iter()
        .map(|column| match results.sort() {
            Some(order) if &order.column == column => match order.direction {
                SortDirection::Ascending => format!("{column} ▲"),
                SortDirection::Descending => format!("{column} ▼"),
            },
            _ => column.clone(),
        })
        .collect();
    header.push("link".to_string());

    let mut table = Table::new();
    table.set_header(header);
    apply_table_style(&mut table);

    for row in results.page_rows() {
        let mut cells: Vec<String> = results
            .columns()
            .iter()
            .map(|column| results.cell_text(row, column))
            .collect();
        cells.push(search.detail_url(&row.model_id));
        table.add_row(cells);
    }

    let buttons: Vec<String> = results
        .page_buttons()
        .map(|page| {
            if page == results.page() {
                format!("[{}]", page + 1)
            } else {
                (page + 1).to_string()
            }
        })
        .collect();

    format!(
        "{table}\n{}   page {}\n",
        results.pager_label(),
        buttons.join(" ")
    )
}
