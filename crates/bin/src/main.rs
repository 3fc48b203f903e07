//! Fairval CLI binary.
//!
//! Values single tickers or whole watchlists against Yahoo Finance data.

mod config;
mod logging;

use clap::{Parser, Subcommand, ValueEnum};
use config::{RateOverrides, load_config};
use fairval::{Analyzer, CsvWatchlist, DEFAULT_CONCURRENCY, ValuationReport, Watchlist};
use fairval_data::YahooSource;
use fairval_output::{ExportFormat, Exporter, ReportBuilder, ValuationExport, record_table};
use fairval_valuation::{PriceHistoryWindow, WeightSet, available_methods};
use indicatif::{ProgressBar, ProgressStyle};
use logging::{LogFormat, init_logging};
use serde::Serialize;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "fairval")]
#[command(about = "Fairval: blended fair-value estimates for listed equities", long_about = None)]
#[command(version)]
struct Cli {
    /// Log level, or any `RUST_LOG`-style directive
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Value a single ticker
    Analyze {
        /// Ticker symbol, e.g. AAPL or INFY.NS
        ticker: String,

        /// Method weights as EV,DCF,Graham,PE; must total 100
        #[arg(long, default_value_t = WeightSet::default())]
        weights: WeightSet,

        #[command(flatten)]
        rates: RateArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,

        /// Also fetch the 3-year daily price history used for charting
        #[arg(long)]
        history: bool,
    },

    /// Value many tickers at once
    Batch {
        /// Ticker symbols
        tickers: Vec<String>,

        /// CSV file with a Symbol column
        #[arg(long)]
        watchlist: Option<PathBuf>,

        /// Method weights as EV,DCF,Graham,PE; must total 100
        #[arg(long, default_value_t = WeightSet::default())]
        weights: WeightSet,

        #[command(flatten)]
        rates: RateArgs,

        /// Tickers fetched at once
        #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,

        /// Write results to this file
        #[arg(long)]
        export: Option<PathBuf>,

        /// Export format; inferred from the export file extension when omitted
        #[arg(long, value_enum)]
        format: Option<FileFormat>,
    },

    /// List the valuation methods
    Methods,
}

#[derive(clap::Args)]
struct RateArgs {
    /// EV/EBITDA growth rate
    #[arg(long)]
    growth: Option<f64>,

    /// DCF growth rate
    #[arg(long)]
    dcf_growth: Option<f64>,

    /// DCF discount rate
    #[arg(long)]
    discount: Option<f64>,

    /// JSON valuation config; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Minimum delay between Yahoo Finance requests, in milliseconds
    #[arg(long, default_value_t = 1000)]
    rate_limit_ms: u64,
}

impl RateArgs {
    const fn overrides(&self) -> RateOverrides {
        RateOverrides {
            ev_growth: self.growth,
            dcf_growth: self.dcf_growth,
            discount: self.discount,
        }
    }

    const fn rate_limit(&self) -> Duration {
        Duration::from_millis(self.rate_limit_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Markdown,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FileFormat {
    Csv,
    Json,
}

impl From<FileFormat> for ExportFormat {
    fn from(format: FileFormat) -> Self {
        match format {
            FileFormat::Csv => Self::Csv,
            FileFormat::Json => Self::PrettyJson,
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_format);

    match cli.command {
        Commands::Analyze {
            ticker,
            weights,
            rates,
            format,
            history,
        } => analyze_ticker(&ticker, &weights, &rates, format, history).await?,
        Commands::Batch {
            tickers,
            watchlist,
            weights,
            rates,
            concurrency,
            export,
            format,
        } => {
            let tickers = collect_tickers(tickers, watchlist)?;
            let export = export
                .map(|path| {
                    let format = match format {
                        Some(f) => Ok(ExportFormat::from(f)),
                        None => ExportFormat::from_path(&path),
                    };
                    format.map(|f| (path, f))
                })
                .transpose()?;
            run_batch(&tickers, &weights, &rates, concurrency, export).await?;
        }
        Commands::Methods => list_methods(),
    }

    Ok(())
}

fn analyzer(rates: &RateArgs) -> Result<Analyzer<YahooSource>, Box<dyn std::error::Error>> {
    let config = load_config(rates.config.as_deref(), rates.overrides())?;
    let source = YahooSource::with_rate_limit(rates.rate_limit())?;
    Ok(Analyzer::new(source).with_config(config))
}

fn warn_on_weights(weights: &WeightSet) {
    if !weights.is_valid() {
        tracing::warn!(
            %weights,
            total = weights.total(),
            "weights do not total 100; no combined value will be produced"
        );
    }
}

/// JSON shape of `analyze --format json`; `history` appears only with `--history`.
#[derive(Serialize)]
struct AnalyzeOutput<'a> {
    #[serde(flatten)]
    report: &'a ValuationReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    history: Option<&'a PriceHistoryWindow>,
}

fn history_summary(history: &PriceHistoryWindow) -> String {
    match history.date_range() {
        Some((start, end)) => format!(
            "Price history: {} daily bars, {} to {}",
            history.len(),
            start,
            end
        ),
        None => "Price history: unavailable".to_string(),
    }
}

async fn analyze_ticker(
    ticker: &str,
    weights: &WeightSet,
    rates: &RateArgs,
    format: ReportFormat,
    with_history: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    warn_on_weights(weights);
    let analyzer = analyzer(rates)?;
    let report = analyzer.analyze(ticker, weights).await;

    if !report.has_data() {
        return Err(format!("no market data for {}", ticker).into());
    }

    let history = if with_history {
        Some(analyzer.overlay_history(ticker).await)
    } else {
        None
    };

    match format {
        ReportFormat::Json => {
            let output = AnalyzeOutput {
                report: &report,
                history: history.as_ref(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        ReportFormat::Text | ReportFormat::Markdown => {
            let rendered = ReportBuilder::new(ticker.to_uppercase())
                .record(report.record)
                .estimates(report.estimates)
                .combined(report.combined)
                .inputs(report.inputs)
                .build();

            if format == ReportFormat::Markdown {
                println!("{}", rendered.to_markdown());
            } else {
                println!("{}", rendered.to_ascii());
            }

            if let Some(history) = &history {
                println!("{}", history_summary(history));
            }
        }
    }

    Ok(())
}

fn collect_tickers(
    mut tickers: Vec<String>,
    watchlist: Option<PathBuf>,
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    if let Some(path) = watchlist {
        tickers.extend(CsvWatchlist::from_path(path)?.symbols());
    }

    let mut seen = std::collections::HashSet::new();
    tickers.retain(|t| seen.insert(t.to_uppercase()));

    if tickers.is_empty() {
        return Err("no tickers given; pass symbols or --watchlist".into());
    }
    Ok(tickers)
}

async fn run_batch(
    tickers: &[String],
    weights: &WeightSet,
    rates: &RateArgs,
    concurrency: usize,
    export: Option<(PathBuf, ExportFormat)>,
) -> Result<(), Box<dyn std::error::Error>> {
    warn_on_weights(weights);
    let analyzer = analyzer(rates)?;

    let pb = ProgressBar::new(tickers.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Valuing tickers...");

    let reports = analyzer
        .analyze_batch_with(tickers, weights, concurrency, |report| {
            pb.set_message(report.symbol.clone());
            pb.inc(1);
        })
        .await;
    pb.finish_with_message("Done");

    let (valued, skipped): (Vec<&ValuationReport>, Vec<&ValuationReport>) =
        reports.iter().partition(|r| r.record.is_some());

    let rows: Vec<_> = valued
        .iter()
        .filter_map(|r| r.record.clone().map(|record| (record, r.estimates)))
        .collect();
    if rows.is_empty() {
        println!("\nNo ticker could be valued.");
    } else {
        println!("{}", record_table(&rows).to_ascii_table());
    }

    if !skipped.is_empty() {
        let symbols: Vec<&str> = skipped.iter().map(|r| r.symbol.as_str()).collect();
        println!("Not valued ({}): {}", skipped.len(), symbols.join(", "));
    }

    if let Some((path, format)) = export {
        let exports: Vec<ValuationExport> = valued
            .iter()
            .filter_map(|r| {
                r.record
                    .as_ref()
                    .map(|record| ValuationExport::new(record, &r.estimates, r.combined))
            })
            .collect();
        exports.export_to_file(&path, format)?;
        tracing::info!(path = %path.display(), rows = exports.len(), "exported results");
    }

    Ok(())
}

fn list_methods() {
    println!("\nValuation Methods:");
    println!("==================\n");
    let weights = WeightSet::default();
    for info in available_methods() {
        println!(
            "  {:<10} {:<7} weight {:>3}  {:?}",
            info.name,
            info.method.label(),
            weights.get(info.method),
            info.kind
        );
        println!("             {}", info.description);
        println!("             inputs: {}", info.required_inputs.join(", "));
    }
    println!();
}
