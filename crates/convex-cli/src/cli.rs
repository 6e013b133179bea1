//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

use convex_cli::OutputFormat;

/// Convex - value a fixed-coupon bond from a JSON request
#[derive(Parser, Debug)]
#[command(name = "convex")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Request file, or `-` for stdin
    #[arg(default_value = "-")]
    pub input: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(short, long, env = "CONVEX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter (e.g. `debug`, `convex_bonds=trace`); overrides RUST_LOG
    #[arg(long, env = "CONVEX_LOG")]
    pub log_level: Option<String>,
}
