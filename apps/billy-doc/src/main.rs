//! # billy-doc CLI Entry Point
//!
//! Assembles one Thai business document per run.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         billy-doc run                                   │
//! │                                                                         │
//! │  1. Parse flags ───────► clap                                           │
//! │  2. Init logging ──────► stderr, RUST_LOG or --verbose                  │
//! │  3. Load config ───────► BILLY_* env, then --tax-rate / tax mode flags  │
//! │  4. Read request ──────► file argument or stdin                         │
//! │  5. Assemble ──────────► billy_core::assemble_document                  │
//! │  6. Print context ─────► stdout (JSON)                                  │
//! │                                                                         │
//! │  Exit codes: 0 ok • 1 bad input or config • 2 request rejected          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use billy_core::{assemble_document, AssemblyError};
use chrono::{Local, NaiveDate};
use clap::Parser;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::config::DocConfig;

/// Thai quotation, invoice and receipt builder.
///
/// Reads a document request as JSON and prints the localized template
/// context: totals, amount in Thai words, Buddhist-era dates.
#[derive(Parser, Debug)]
#[command(name = "billy-doc", version, about)]
struct Cli {
    /// Request file (reads stdin when omitted)
    input: Option<PathBuf>,

    /// VAT rate as a fraction, overrides BILLY_TAX_RATE
    #[arg(long, value_name = "RATE")]
    tax_rate: Option<Decimal>,

    /// Prices already include VAT, overrides BILLY_TAX_INCLUSIVE
    #[arg(long, conflicts_with = "exclusive")]
    inclusive: bool,

    /// VAT is added on top of prices, overrides BILLY_TAX_INCLUSIVE
    #[arg(long)]
    exclusive: bool,

    /// Issue date (YYYY-MM-DD) for requests without one [default: today]
    #[arg(long, value_name = "DATE")]
    issue_date: Option<NaiveDate>,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Applies `--tax-rate`, `--inclusive` and `--exclusive` on top of the
    /// environment.
    fn apply_overrides(&self, config: &mut DocConfig) {
        if let Some(rate) = self.tax_rate {
            config.tax_rate = rate;
        }
        if self.inclusive {
            config.tax_inclusive = true;
        } else if self.exclusive {
            config.tax_inclusive = false;
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<AssemblyError>() {
            Some(AssemblyError::Rejected(errors)) => {
                error!(errors = errors.len(), "request rejected");
                eprintln!("Request rejected:");
                for message in errors {
                    eprintln!("  - {message}");
                }
                ExitCode::from(2)
            }
            _ => {
                error!("{e:#}");
                eprintln!("error: {e:#}");
                ExitCode::FAILURE
            }
        },
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut config = DocConfig::load().context("failed to load configuration")?;
    cli.apply_overrides(&mut config);
    let policy = config.tax_policy()?;
    info!(
        tax_rate = %config.tax_rate,
        inclusive = config.tax_inclusive,
        company = %config.company.name,
        "configuration loaded"
    );

    let raw = read_request(cli.input.as_deref())?;
    let request: Value = serde_json::from_str(&raw).context("request is not valid JSON")?;
    debug!(bytes = raw.len(), "request read");

    let today = cli
        .issue_date
        .unwrap_or_else(|| Local::now().date_naive());
    let context = assemble_document(&request, policy, &config.company, today, Uuid::new_v4())?;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&context)?
    } else {
        serde_json::to_string(&context)?
    };
    println!("{output}");

    Ok(())
}

fn read_request(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read request from stdin")?;
            Ok(raw)
        }
    }
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so stdout carries only the JSON context.
/// - `RUST_LOG=billy_core=debug` - totals for every document
/// - `--verbose` - debug for both crates when `RUST_LOG` is unset
/// - Default: INFO level
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "billy_doc=debug,billy_core=debug"
    } else {
        "billy_doc=info,billy_core=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
