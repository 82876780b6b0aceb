//! Algconf CLI Binary
//!
//! Command-line interface for XML search-path resolution and registry inspection.

use algconf::error::ApiError;
use algconf::logging::init_logging;
use algconf::tooling::cli::{Cli, CliContext};
use anyhow::Context;
use clap::Parser;
use std::process;

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            // An unvalidated tune means the configuration is inconsistent; never
            // continue with a partial search path.
            if let Some(api @ ApiError::TuneNotValidated { .. }) = e.downcast_ref::<ApiError>() {
                tracing::error!(error = %api, "Fatal configuration inconsistency");
            }
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let settings = CliContext::load_settings(cli).context("loading settings")?;
    if let Err(e) = init_logging(Some(&settings.logging)) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let context = CliContext::new(cli, settings)?;
    Ok(context.execute(&cli.command)?)
}
