//! Command dispatch
//!
//! Maps parsed CLI arguments onto the dcalc-core API. Exit code 0 means
//! every requested item succeeded; 1 means at least one eval item failed.

use anyhow::{Context, Result};
use colored::Colorize;

use dcalc_core::{
    cache_stats, calculate, calculate_cached, to_chinese_capital, to_chinese_number, OptionsPatch,
};

use crate::cli::{Cli, Commands, ConvertArgs, EvalArgs, FormatArgs};

/// Main command dispatcher
pub struct Dispatcher;

impl Dispatcher {
    /// Execute the command specified in the CLI arguments
    pub fn execute(cli: &Cli) -> Result<i32> {
        match &cli.command {
            Commands::Eval(args) => Self::execute_eval(args),
            Commands::Format(args) => Self::execute_format(args),
            Commands::Convert(args) => Self::execute_convert(args),
        }
    }

    /// Evaluate each expression with batch partial-failure semantics
    fn execute_eval(args: &EvalArgs) -> Result<i32> {
        let mut failures = 0;
        for expression in &args.expressions {
            let result = if args.cached {
                calculate_cached(expression)
            } else {
                calculate(expression)
            };
            match result {
                Ok(value) => println!("{} = {}", expression, value),
                Err(error) => {
                    failures += 1;
                    eprintln!("{} {}: {}", "error:".red().bold(), expression, error);
                }
            }
        }
        if args.cached {
            let stats = cache_stats();
            log::debug!(
                "cache: {} hits, {} misses ({:.0}%)",
                stats.hits,
                stats.misses,
                stats.hit_ratio() * 100.0
            );
        }
        Ok(if failures > 0 { 1 } else { 0 })
    }

    /// Format one number per the requested style flags
    fn execute_format(args: &FormatArgs) -> Result<i32> {
        let output = if let Some(symbol) = &args.currency {
            dcalc_core::to_currency(args.number, symbol, args.precision, Some(args.thousands))
                .context("currency formatting failed")?
        } else if args.percent {
            dcalc_core::to_percent(args.number, args.precision, true)
                .context("percent formatting failed")?
        } else if let Some(locale) = args.readable {
            dcalc_core::to_readable(args.number, args.precision, locale)
                .context("readable formatting failed")?
        } else if args.fraction {
            dcalc_core::to_fraction(args.number, None).context("fraction formatting failed")?
        } else if args.scientific {
            dcalc_core::to_scientific(args.number, args.precision)
                .context("scientific formatting failed")?
        } else {
            let patch = OptionsPatch {
                precision: args.precision,
                thousands_separator: if args.thousands { Some(true) } else { None },
                unit: args.unit.clone(),
                ..OptionsPatch::default()
            };
            dcalc_core::format(args.number, Some(&patch))
                .context("formatting failed")?
                .to_string()
        };
        println!("{}", output);
        Ok(0)
    }

    /// Convert one number to Chinese numerals
    fn execute_convert(args: &ConvertArgs) -> Result<i32> {
        let output = if args.capital {
            to_chinese_capital(args.number).context("capital conversion failed")?
        } else {
            to_chinese_number(args.number).context("numeral conversion failed")?
        };
        println!("{}", output);
        Ok(0)
    }
}
