//! QuoteLab CLI — analyze symbols and emit summary reports.
//!
//! Commands:
//! - `analyze` — acquire history for each symbol through the fallback chain,
//!   compute the indicator set, and print (or write) the summary records
//!
//! Chart rendering and HTML templating are downstream consumers of the JSON
//! this tool emits; the CLI itself only prints text and writes report JSON.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use quotelab_runner::{run_batch, BatchOutcome, RunnerConfig, SymbolAnalysis};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quotelab", about = "QuoteLab CLI — daily stock snapshot reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch history, compute indicators, and report per symbol.
    Analyze {
        /// Symbols to analyze (e.g., AAPL 600519 TSLA).
        #[arg(required = false)]
        symbols: Vec<String>,

        /// History period: 1d, 5d, 1mo, 3mo, 6mo, 1y, 2y.
        #[arg(long, default_value = "3mo")]
        period: String,

        /// Worker pool size.
        #[arg(long)]
        workers: Option<usize>,

        /// TOML config file; flags override its values.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print one JSON object per symbol instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Write one `{symbol}.json` report per symbol into this directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            symbols,
            period,
            workers,
            config,
            json,
            output_dir,
        } => run_analyze(symbols, period, workers, config, json, output_dir),
    }
}

fn run_analyze(
    symbols: Vec<String>,
    period: String,
    workers: Option<usize>,
    config_path: Option<PathBuf>,
    json: bool,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => RunnerConfig::from_toml_path(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RunnerConfig::default(),
    };

    // CLI flags override the file.
    if !symbols.is_empty() {
        config.symbols = symbols;
    }
    config.period = period;
    if let Some(workers) = workers {
        config.workers = workers;
    }

    if config.symbols.is_empty() {
        bail!("no symbols given (pass them as arguments or via --config)");
    }

    let outcome = run_batch(&config)?;

    for analysis in &outcome.analyses {
        if json {
            println!("{}", serde_json::to_string(&analysis.report)?);
        } else {
            print_summary(analysis);
        }
    }

    if let Some(dir) = &output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating output dir {}", dir.display()))?;
        for analysis in &outcome.analyses {
            let path = dir.join(format!("{}.json", analysis.symbol));
            let body = serde_json::to_string_pretty(&analysis.report)?;
            std::fs::write(&path, body)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        println!("Reports saved to: {}", dir.display());
    }

    print_failures(&outcome);

    if outcome.analyses.is_empty() && !outcome.failures.is_empty() {
        bail!("every symbol failed");
    }
    Ok(())
}

fn print_summary(analysis: &SymbolAnalysis) {
    let report = &analysis.report;
    println!("── {} ({}) ──", report.symbol, report.source);
    println!(
        "  close {:.2}  change {:+.2} ({:+.2}%)  volume {}",
        report.latest_close, report.change, report.change_pct, report.latest_volume
    );
    println!(
        "  bars {}  latest {}",
        report.bar_count, report.latest_date
    );
    match report.rsi14 {
        Some(rsi) => {
            let state = if rsi > 70.0 {
                "overbought"
            } else if rsi < 30.0 {
                "oversold"
            } else {
                "neutral"
            };
            println!("  RSI(14) {rsi:.1} ({state})");
        }
        None => println!("  RSI(14) n/a (needs more history)"),
    }
    if let (Some(ma5), Some(ma20)) = (report.ma5, report.ma20) {
        println!("  MA5 {ma5:.2}  MA20 {ma20:.2}");
    }
    if let Some(hist) = report.macd_hist {
        println!("  MACD hist {hist:+.4}");
    }
}

fn print_failures(outcome: &BatchOutcome) {
    for failure in &outcome.failures {
        eprintln!("SKIPPED {}: {}", failure.symbol, failure.reason);
    }
}
