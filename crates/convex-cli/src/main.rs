//! Convex CLI - value a fixed-coupon bond from a JSON request.
//!
//! # Usage
//!
//! ```bash
//! # Price from a yield
//! echo '{"issue_date":[2020,1,1],"maturity_date":[2030,1,1],
//!        "settlement_date":[2023,1,1],"coupon_rate":0.05,"ytm":0.04}' | convex
//!
//! # Solve the yield from a clean price, render as a table
//! convex request.json --format table
//!
//! # Override defaults and solver limits
//! convex request.json --config convex.toml --log-level debug
//! ```

use std::io::Read;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use convex_cli::output::render_error;
use convex_cli::{handle_json, render, CliConfig, CliError};

mod cli;

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<CliError>() {
                Some(cli_err) if !matches!(cli_err, CliError::Io(_)) => {
                    eprintln!("{}", render_error(cli_err));
                }
                _ => eprintln!("{} {err:#}", "error:".red().bold()),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };

    init_tracing(cli.log_level.as_deref(), config.log_level.as_deref());
    info!("Convex v{}", env!("CARGO_PKG_VERSION"));

    let input = read_input(&cli.input)?;
    debug!(source = %cli.input, bytes = input.len(), "read request");

    let result = handle_json(&input, &config)?;
    print!("{}", render(&result, cli.format)?);
    Ok(())
}

/// Installs the stderr subscriber. `--log-level` wins over `RUST_LOG`, which
/// wins over the config file; the fallback is `warn`.
fn init_tracing(flag: Option<&str>, configured: Option<&str>) {
    let filter = flag
        .map(EnvFilter::new)
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .or_else(|| configured.map(EnvFilter::new))
        .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(CliError::from)
            .context("reading request from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(source)
            .map_err(CliError::from)
            .with_context(|| format!("reading request from {source}"))
    }
}
