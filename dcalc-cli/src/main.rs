//! Command-line interface for dcalc
//!
//! Thin wrapper over dcalc-core: argument parsing and dispatch only, no
//! algorithmic behavior.

use anyhow::Result;
use clap::Parser;
use std::error::Error;
use std::process;

mod cli;
mod dispatch;

use cli::Cli;
use dispatch::Dispatcher;

fn main() -> Result<()> {
    // Initialize logging; RUST_LOG drives library diagnostics
    env_logger::init();

    let cli = Cli::parse();

    match Dispatcher::execute(&cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);

            // Show error chain if in verbose mode
            if cli.verbose {
                let mut cause = e.source();
                while let Some(err) = cause {
                    eprintln!("Caused by: {}", err);
                    cause = err.source();
                }
            }

            process::exit(1);
        }
    }
}
