//! Command-line interface definitions using Clap

use clap::{Args, Parser, Subcommand};

/// dcalc - decimal-safe calculator and number formatter
#[derive(Parser)]
#[command(name = "dcalc")]
#[command(version, about = "Decimal-safe arithmetic, formatting and numeral conversion", long_about = None)]
pub struct Cli {
    /// Show error chains on failure
    #[arg(long = "verbose", short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate arithmetic expressions
    Eval(EvalArgs),
    /// Format a number for display
    Format(FormatArgs),
    /// Convert a number to Chinese numerals
    Convert(ConvertArgs),
}

#[derive(Args)]
pub struct EvalArgs {
    /// Expressions to evaluate; failures print as errors without stopping
    /// the batch
    #[arg(required = true)]
    pub expressions: Vec<String>,

    /// Memoize results across repeated expressions
    #[arg(long = "cached")]
    pub cached: bool,
}

#[derive(Args)]
pub struct FormatArgs {
    /// The number to format
    pub number: f64,

    /// Decimal places
    #[arg(long = "precision", short = 'p')]
    pub precision: Option<u32>,

    /// Format as currency with this symbol
    #[arg(long = "currency")]
    pub currency: Option<String>,

    /// Group the integer part in threes
    #[arg(long = "thousands")]
    pub thousands: bool,

    /// Format as a percentage
    #[arg(long = "percent")]
    pub percent: bool,

    /// Format with a readable-unit ladder for this locale (en or zh)
    #[arg(long = "readable")]
    pub readable: Option<dcalc_core::Locale>,

    /// Format as a fraction approximation
    #[arg(long = "fraction")]
    pub fraction: bool,

    /// Format in scientific notation
    #[arg(long = "scientific")]
    pub scientific: bool,

    /// Suffix this unit string
    #[arg(long = "unit")]
    pub unit: Option<String>,
}

#[derive(Args)]
pub struct ConvertArgs {
    /// The number to convert
    pub number: f64,

    /// Use the formal RMB capital form instead of spoken numerals
    #[arg(long = "capital")]
    pub capital: bool,
}
