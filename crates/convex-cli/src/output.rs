//! Output formatting utilities.

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use convex_bonds::pricing::ValuationResult;

use crate::error::{CliError, CliResult};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON response document
    #[default]
    Json,
    /// Human-readable table format
    Table,
}

/// Renders a valuation in the requested format, newline terminated.
pub fn render(result: &ValuationResult, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => render_json(result),
        OutputFormat::Table => Ok(render_table(result)),
    }
}

/// Renders any value as 2-space indented JSON with a trailing newline.
pub fn render_json<T: Serialize>(data: &T) -> CliResult<String> {
    let mut out = serde_json::to_string_pretty(data)?;
    out.push('\n');
    Ok(out)
}

fn render_table(result: &ValuationResult) -> String {
    let rows = vec![
        KeyValue::from_f64("Clean Price", result.clean_price, 6),
        KeyValue::from_f64("Dirty Price", result.dirty_price, 6),
        KeyValue::from_f64("Accrued Interest", result.accrued_interest, 6),
        KeyValue::from_percent("Yield to Maturity", result.ytm),
        KeyValue::from_f64("Macaulay Duration", result.macaulay_duration, 6),
        KeyValue::from_f64("Modified Duration", result.modified_duration, 6),
        KeyValue::from_f64("Convexity", result.convexity, 6),
    ];

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    format!("{}\n{}\n", "Bond Valuation".bold().underline(), table)
}

/// Formats an error for stderr.
pub fn render_error(err: &CliError) -> String {
    format!("{} [{}] {}", "error:".red().bold(), err.kind(), err)
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    /// Metric name.
    #[tabled(rename = "Metric")]
    pub key: String,
    /// Formatted value.
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a key-value pair from a float with fixed precision.
    pub fn from_f64(key: impl Into<String>, value: f64, precision: usize) -> Self {
        Self::new(key, format!("{:.prec$}", value, prec = precision))
    }

    /// Creates a key-value pair formatted as percentage.
    pub fn from_percent(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, format!("{:.6}%", value * 100.0))
    }
}
