//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

use crate::adapters::csv_adapter::CsvFundamentalAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::paper_order_adapter::PaperOrderAdapter;
use crate::domain::config_validation::validate_algorithm_config;
use crate::domain::error::CoarseFineError;
use crate::domain::replay::{ReplayReport, run_replay, select_universe};
use crate::domain::settings::{ALGORITHM_SECTION, AlgorithmSettings};
use crate::domain::strategy::CoarseFineStrategy;
use crate::domain::symbol::Symbol;

#[derive(Parser, Debug)]
#[command(
    name = "coarsefine",
    about = "Coarse/fine fundamental universe rotation strategy"
)]
pub struct Cli {
    /// Log filter, e.g. `info` or `coarsefine=debug`. RUST_LOG overrides it.
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay the strategy over recorded fundamentals
    Run {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        data: PathBuf,
        /// Write the order log as CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the coarse survivors and fine selection for one date
    Select {
        #[arg(short, long)]
        data: PathBuf,
        #[arg(long)]
        date: NaiveDate,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate an algorithm configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Run {
            config,
            data,
            output,
            dry_run,
        } => run_command(config.as_deref(), &data, output.as_deref(), dry_run),
        Command::Select { data, date, config } => select_command(&data, date, config.as_deref()),
        Command::Validate { config } => validate_command(&config),
    };

    match result {
        Ok(text) => {
            print!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, CoarseFineError> {
    FileConfigAdapter::from_file(path)
}

/// Validated settings from `path`, or the defaults when no file is given.
pub fn load_settings(path: Option<&Path>) -> Result<AlgorithmSettings, CoarseFineError> {
    match path {
        Some(path) => {
            info!("loading config from {}", path.display());
            let config = load_config(path)?;
            if !config.has_section(ALGORITHM_SECTION) {
                return Err(CoarseFineError::ConfigMissing {
                    section: ALGORITHM_SECTION.to_string(),
                });
            }
            validate_algorithm_config(&config)
        }
        None => Ok(AlgorithmSettings::default()),
    }
}

pub fn validate_command(config: &Path) -> Result<String, CoarseFineError> {
    let settings = load_settings(Some(config))?;
    Ok(format!("{}: OK\n{}", config.display(), describe_settings(&settings)))
}

pub fn run_command(
    config: Option<&Path>,
    data: &Path,
    output: Option<&Path>,
    dry_run: bool,
) -> Result<String, CoarseFineError> {
    let settings = load_settings(config)?;
    if dry_run {
        return Ok(format!("dry run, nothing replayed\n{}", describe_settings(&settings)));
    }

    let fundamentals = CsvFundamentalAdapter::open(data)?;
    let mut strategy = CoarseFineStrategy::initialize(settings);
    let mut ledger = PaperOrderAdapter::new();

    let report = run_replay(&fundamentals, &mut strategy, &mut ledger)?;

    if let Some(path) = output {
        ledger.write_csv_file(path)?;
        info!("order log written to {}", path.display());
    }

    Ok(summarize(&report, &ledger))
}

pub fn select_command(
    data: &Path,
    date: NaiveDate,
    config: Option<&Path>,
) -> Result<String, CoarseFineError> {
    let settings = load_settings(config)?;
    let fundamentals = CsvFundamentalAdapter::open(data)?;
    let strategy = CoarseFineStrategy::initialize(settings);

    let (coarse, fine) = select_universe(&fundamentals, &strategy, date)?;
    Ok(format!(
        "{date}\n  coarse: {}\n  fine:   {}\n",
        join(&coarse),
        join(&fine)
    ))
}

pub fn describe_settings(settings: &AlgorithmSettings) -> String {
    format!(
        "  window:     {} to {}\n  \
           cash:       {:.2}\n  \
           resolution: {}\n  \
           coarse:     top {} by dollar volume\n  \
           fine:       top {} by P/E ratio\n  \
           allocation: {:.1}% per added security\n  \
           changes:    {:?}\n",
        settings.start_date,
        settings.end_date,
        settings.cash,
        settings.resolution,
        settings.counts.coarse,
        settings.counts.fine,
        settings.target_allocation * 100.0,
        settings.change_policy,
    )
}

pub fn summarize(report: &ReplayReport, ledger: &PaperOrderAdapter) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Replay Summary ===");
    let _ = writeln!(out, "Dates processed:  {}", report.steps.len());
    let _ = writeln!(out, "Universe changes: {}", report.change_count());
    let _ = writeln!(out, "Orders issued:    {}", ledger.records().len());
    let _ = writeln!(out, "Final universe:   {}", join(report.final_universe()));
    let _ = writeln!(out, "Gross exposure:   {:.1}%", ledger.gross_exposure() * 100.0);
    if !ledger.weights().is_empty() {
        let _ = writeln!(out, "\n=== Target Weights ===");
        for (symbol, weight) in ledger.weights() {
            let _ = writeln!(out, "  {symbol}: {:.1}%", weight * 100.0);
        }
    }
    out
}

fn join(symbols: &[Symbol]) -> String {
    if symbols.is_empty() {
        return "-".to_string();
    }
    symbols
        .iter()
        .map(Symbol::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
