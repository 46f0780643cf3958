use acquisition::{MarketDataSource, ProviderClient};
use anyhow::{Context, bail};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use core_types::DateRange;
use export::{ExportMode, ReportOptions};
use ranges::RangeToken;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// The main entry point for the Navscope application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Serve => handle_serve().await,
        Commands::Compare(args) => handle_compare(args).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Compare a mutual fund's NAV history against a market index.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP surface around the comparison engine.
    Serve,
    /// Run one comparison and export the delimited report.
    Compare(CompareArgs),
}

#[derive(Parser)]
struct CompareArgs {
    /// The fund scheme identifier (e.g. "120503").
    #[arg(long)]
    scheme_id: String,

    /// The index identifier from the configured index table (e.g. "nifty50").
    #[arg(long)]
    index_id: String,

    /// Symbolic range token (1M, 3M, 6M, 1Y, 3Y, 5Y, 10Y, MAX).
    #[arg(long, conflicts_with_all = ["from", "to"])]
    range: Option<String>,

    /// Explicit window start (format: YYYY-MM-DD).
    #[arg(long, requires = "to")]
    from: Option<NaiveDate>,

    /// Explicit window end (format: YYYY-MM-DD).
    #[arg(long, requires = "from")]
    to: Option<NaiveDate>,

    /// Which value columns the report carries.
    #[arg(long, value_enum, default_value_t = Mode::Normalized)]
    mode: Mode,

    /// Where to write the report; stdout when omitted.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Normalized,
    Actual,
}

impl From<Mode> for ExportMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Normalized => ExportMode::Normalized,
            Mode::Actual => ExportMode::Actual,
        }
    }
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_serve() -> anyhow::Result<()> {
    let config = configuration::load_config()?;
    web_server::run_server(config).await
}

/// Handles the orchestration of a one-shot comparison: fetch both series,
/// run the engine, render the report.
async fn handle_compare(args: CompareArgs) -> anyhow::Result<()> {
    let config = configuration::load_config()?;

    let window = resolve_window(&args)?;
    let index_entry = config
        .index_by_id(&args.index_id)
        .with_context(|| format!("unknown index id: {}", args.index_id))?;

    tracing::info!(
        scheme_id = %args.scheme_id,
        index = %index_entry.name,
        start = %window.start(),
        end = %window.end(),
        "running comparison"
    );

    let client = ProviderClient::new(&config.providers);
    let (fund, index) = tokio::try_join!(
        client.fund_history(&args.scheme_id, &window),
        client.index_history(&index_entry.symbol, &window),
    )?;

    let result = engine::compare(&fund.series, &index)?;

    let options = ReportOptions {
        mode: args.mode.into(),
        fund_label: fund.name,
        index_label: index_entry.name.clone(),
    };
    let report = export::render_report_now(&result, &options)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &report)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            tracing::info!(path = %path.display(), rows = result.len(), "report written");
        }
        None => print!("{report}"),
    }

    Ok(())
}

fn resolve_window(args: &CompareArgs) -> anyhow::Result<DateRange> {
    if let Some(token) = &args.range {
        let token: RangeToken = token.parse()?;
        return Ok(ranges::resolve(token, Utc::now().date_naive())?);
    }
    match (args.from, args.to) {
        (Some(from), Some(to)) => Ok(DateRange::new(from, to)?),
        _ => bail!("provide either --range or both --from and --to"),
    }
}
