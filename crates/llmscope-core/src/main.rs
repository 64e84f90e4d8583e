//! llmscope CLI
//!
//! Command-line front end for browsing logged LLM requests.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing::info;

use llmscope::aggregate::{self, DashboardSummary, DailyPerformance, ModelShare};
use llmscope::config::LoggingConfig;
use llmscope::models::{FilterCriteria, LogEntry};
use llmscope::pager::PageWindow;
use llmscope::source::{DataSource, MockDataSource, StaticDataSource};
use llmscope::view::LogsView;
use llmscope::Config;

/// llmscope - Analytics for logged LLM requests
#[derive(Parser)]
#[command(name = "llmscope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "LLMSCOPE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Read entries from a JSON file instead of generating mock data
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    /// Seed for reproducible mock data
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Number of entries to fetch
    #[arg(long, global = true)]
    count: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Show dashboard metrics, model distribution and daily performance
    Summary,

    /// List log entries
    Logs {
        /// User id filter
        #[arg(long)]
        user: Option<u64>,

        /// Tenant id filter
        #[arg(long)]
        tenant: Option<u64>,

        /// Model name filter (exact)
        #[arg(long)]
        model: Option<String>,

        /// Status filter (success, error, timeout)
        #[arg(long)]
        status: Option<String>,

        /// Earliest timestamp (RFC 3339)
        #[arg(long)]
        from: Option<DateTime<Utc>>,

        /// Latest timestamp (RFC 3339)
        #[arg(long)]
        to: Option<DateTime<Utc>>,

        /// Only entries newer than this (e.g., "1h", "24h", "3days")
        #[arg(long, conflicts_with = "from")]
        last: Option<humantime::Duration>,

        /// Free-text search over question, response, request id and model
        #[arg(long)]
        search: Option<String>,

        /// Page to show (1-based)
        #[arg(long, default_value = "1")]
        page: usize,

        /// Entries per page
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// List the models seen in the fetched entries
    Models,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();
    let _ = dotenvy::dotenv();

    // Load configuration
    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(seed) = cli.seed {
        config.source.seed = Some(seed);
    }
    if let Some(count) = cli.count {
        config.source.count = count;
    }

    init_logging(&config.logging, cli.verbose);

    let result = run(&cli, &config).await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(logging: &LoggingConfig, verbose: bool) {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let source: Box<dyn DataSource> = match &cli.input {
        Some(path) => Box::new(StaticDataSource::from_path(path)?),
        None => Box::new(MockDataSource::new(&config.source)),
    };

    match &cli.command {
        Commands::Summary => run_summary(source.as_ref(), config, cli.format).await,
        Commands::Logs {
            user,
            tenant,
            model,
            status,
            from,
            to,
            last,
            search,
            page,
            page_size,
        } => {
            let date_from = last
                .as_ref()
                .map(|last| since(last, Utc::now()))
                .transpose()?
                .or(*from);
            let filters = FilterCriteria {
                user_id: *user,
                tenant_id: *tenant,
                model: model.clone(),
                status: status.clone(),
                date_from,
                date_to: *to,
                search_query: None,
            };
            let page_size = page_size.unwrap_or(config.dashboard.page_size);
            run_logs(
                source.as_ref(),
                config,
                filters,
                search.as_deref(),
                *page,
                page_size,
                cli.format,
            )
            .await
        }
        Commands::Models => run_models(source.as_ref(), config, cli.format).await,
    }
}

/// The instant `last` before `now`
fn since(last: &humantime::Duration, now: DateTime<Utc>) -> anyhow::Result<DateTime<Utc>> {
    chrono::Duration::from_std(**last)
        .ok()
        .and_then(|d| now.checked_sub_signed(d))
        .ok_or_else(|| {
            anyhow::anyhow!(
                "--last {} reaches beyond the supported date range",
                humantime::format_duration(**last)
            )
        })
}

async fn run_summary(
    source: &dyn DataSource,
    config: &Config,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut view = LogsView::new(config.dashboard.page_size, config.source.count)?;
    view.refresh(source).await?;

    let entries = view.visible();
    let summary = view.summary();
    let distribution = aggregate::model_distribution(entries);
    let daily = aggregate::daily_performance(entries, Utc::now(), config.dashboard.chart_days);
    let recent = aggregate::recent(entries, config.dashboard.recent_count);

    info!(entries = entries.len(), "Computed dashboard summary");

    if format == OutputFormat::Json {
        let report = serde_json::json!({
            "summary": summary,
            "model_distribution": distribution,
            "daily_performance": daily,
            "recent": recent,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_summary(&summary);
    print_distribution(&distribution);
    print_daily(&daily);
    println!();
    println!("Recent Logs");
    print_entries(recent);
    Ok(())
}

async fn run_logs(
    source: &dyn DataSource,
    config: &Config,
    filters: FilterCriteria,
    search: Option<&str>,
    page: usize,
    page_size: usize,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut view = LogsView::new(page_size, config.source.count)?;
    view.apply_filters(filters);
    view.refresh(source).await?;
    if let Some(query) = search {
        view.search(query);
    }
    view.go_to_page(page);

    let window = view.window();
    if format == OutputFormat::Json {
        let report = serde_json::json!({
            "page": view.page_state().page(),
            "window": window,
            "entries": view.current_page(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_entries(view.current_page());
    println!();
    print_window(&window, view.page_state().page());
    Ok(())
}

async fn run_models(
    source: &dyn DataSource,
    config: &Config,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let entries = source.fetch_entries(config.source.count).await?;
    let models = aggregate::unique_models(&entries);

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&models)?);
    } else {
        for model in models {
            println!("{model}");
        }
    }
    Ok(())
}

fn print_summary(summary: &DashboardSummary) {
    println!("LLM Observability");
    println!("─────────────────────────────");
    println!("Total Requests:   {}", summary.total_requests);
    println!("Unique Users:     {}", summary.unique_users);
    println!("Unique Tenants:   {}", summary.unique_tenants);
    println!("Models:           {}", summary.models.len());
    println!("Avg Response:     {} ms", summary.avg_duration_ms);
    println!("Total Tokens:     {}", summary.total_tokens);
    println!("Success Rate:     {}%", summary.success_rate);
}

fn print_distribution(shares: &[ModelShare]) {
    println!();
    println!("Model Usage Distribution");
    for share in shares {
        println!(
            "  {:<40} {:>5} requests {:>5.1}%",
            share.model, share.requests, share.percentage
        );
    }
}

fn print_daily(days: &[DailyPerformance]) {
    println!();
    println!("Performance");
    for day in days {
        println!(
            "  {} {}  {:>4} req  {:>6} ms avg  {:>9} tokens",
            day.label, day.date, day.requests, day.avg_duration_ms, day.total_tokens
        );
    }
}

fn print_entries(entries: &[LogEntry]) {
    if entries.is_empty() {
        println!("No log entries found");
        return;
    }
    println!(
        "{:<24} {:<40} {:>5} {:>6} {:<8} {:>8} {:>7}",
        "Timestamp", "Model", "User", "Tenant", "Status", "Duration", "Tokens"
    );
    for entry in entries {
        println!(
            "{:<24} {:<40} {:>5} {:>6} {:<8} {:>6}ms {:>7}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.model,
            entry.user_id,
            entry.tenant_id,
            entry.status,
            entry.duration_ms,
            entry.token_usage.total_tokens
        );
    }
}

fn print_window(window: &PageWindow, page: usize) {
    println!(
        "Showing {} to {} of {} entries (page {} of {})",
        window.first, window.last, window.total, page, window.total_pages
    );
}
