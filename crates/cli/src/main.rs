//! evalboard CLI - model evaluation search dashboard
//!
//! This binary drives the search form from the command line and renders the
//! results table in the terminal.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use evalboard::{build_form, parse_field_arg, parse_metric_arg, FormArgs};
use evalboard_client::create_search_client;
use evalboard_core::config::Config;
use evalboard_dashboard::render::{render_form, render_metric_choices, render_view};
use evalboard_dashboard::{SearchSession, SortDirection, ViewState};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "evalboard")]
#[command(about = "Search evaluated models by metric thresholds")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the metrics a filter row can select
    Metrics,
    /// Submit a model search and print the results table
    Search(SearchArgs),
    /// Print the effective configuration
    Config,
}

#[derive(clap::Args)]
struct SearchArgs {
    /// Metric filter as NAME=THRESHOLD, e.g. precision=50 (repeatable)
    #[arg(short, long = "metric", value_name = "NAME=THRESHOLD")]
    metrics: Vec<String>,

    /// Only include evaluations after this date (YYYY-MM-DD)
    #[arg(short, long, value_name = "DATE")]
    after: Option<String>,

    /// Maximum number of models to return
    #[arg(short, long, value_name = "N")]
    number: Option<String>,

    /// Extra form field as KEY=VALUE (repeatable)
    #[arg(long = "field", value_name = "KEY=VALUE")]
    fields: Vec<String>,

    /// Column to sort the results by
    #[arg(long, value_name = "COLUMN")]
    sort: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort")]
    desc: bool,

    /// Results page to show, starting at 1
    #[arg(long, value_name = "N", default_value_t = 1)]
    page: usize,

    /// Print the form and encoded request without sending it
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose)?;

    match cli.command {
        Some(Commands::Metrics) => {
            println!("{}", render_metric_choices());
            Ok(())
        }
        Some(Commands::Search(args)) => search(cli.config.as_deref(), args).await,
        Some(Commands::Config) => show_config(cli.config.as_deref()),
        None => {
            println!("Run 'evalboard search --metric precision=50' to find models, or --help for more options");
            Ok(())
        }
    }
}

/// Initialize logging system
fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "evalboard_core={level},evalboard_client={level},evalboard_dashboard={level},{}={level}",
            env!("CARGO_PKG_NAME")
        ))
        .init();

    Ok(())
}

fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load(config_path).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

async fn search(config_path: Option<&Path>, args: SearchArgs) -> Result<()> {
    let config = load_config(config_path)?;

    let form_args = FormArgs {
        metrics: args
            .metrics
            .iter()
            .map(String::as_str)
            .map(parse_metric_arg)
            .collect::<Result<_>>()?,
        after: args.after,
        number: args.number,
        fields: args
            .fields
            .iter()
            .map(String::as_str)
            .map(parse_field_arg)
            .collect::<Result<_>>()?,
    };
    let form = build_form(&config, &form_args)?;

    if args.dry_run {
        print!("{}", render_form(&form));
        println!("POST {}", config.search.search_url());
        println!("{}", form.to_query().to_form_body()?);
        return Ok(());
    }

    let client = create_search_client(&config.search)?;
    let mut session = SearchSession::new(&config, client)?;
    *session.form_mut() = form;
    debug!("{}", render_form(session.form()));

    session.search_once().await?;

    if let Some(table) = session.results_view_mut().table_mut() {
        if let Some(column) = &args.sort {
            if !table.columns().iter().any(|c| c == column) {
                return Err(anyhow!(
                    "Unknown column '{column}'. Available: {}",
                    table.columns().join(", ")
                ));
            }
            let direction = if args.desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            table.sort_by(column, direction);
        }
        table.set_page(args.page.saturating_sub(1));
        info!(models = table.total_rows(), page = table.page() + 1, "Showing results");
    }

    println!("{}", render_view(session.view(), &config.search));

    let outcome = match session.view() {
        ViewState::Error(message) => Err(anyhow!("Search failed: {message}")),
        _ => Ok(()),
    };
    session.close();
    outcome
}

fn show_config(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let rendered = toml::to_string_pretty(&config).context("Failed to serialize configuration")?;
    print!("{rendered}");
    Ok(())
}
