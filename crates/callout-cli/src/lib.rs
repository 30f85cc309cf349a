//! Callout CLI library
//!
//! This module contains the core CLI logic for the callout registry compiler.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::{
    io::{self, Write as _},
    path::Path,
};

use log::info;

use callout::{CalloutError, RegistryBuilder};

/// Run the callout CLI application
///
/// `generate` compiles the documents of the input directory into the output
/// module; `audit` prints the path data report of every document to stdout.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CalloutError` for:
/// - Configuration loading errors
/// - Unreadable input directories or documents
/// - Invalid baselines
/// - A missing default entry
/// - Output write errors
pub fn run(args: &Args) -> Result<(), CalloutError> {
    let app_config = config::load_config(args.config.as_ref())?;

    match &args.command {
        Command::Generate {
            input,
            output,
            policy,
            explain,
        } => {
            let app_config = match policy {
                Some(policy) => app_config.with_policy(*policy),
                None => app_config,
            };
            info!(
                input_dir = input,
                output_path = output,
                policy:% = app_config.registry().policy();
                "Generating callout registry"
            );

            let builder = RegistryBuilder::new(app_config);
            let report = builder.generate(Path::new(input), Path::new(output))?;

            if *explain {
                for reportable in error_adapter::failure_reportables(&report) {
                    eprintln!("{}", error_adapter::render(&reportable));
                }
            }

            info!(output_file = output; "Callout registry exported successfully");
        }
        Command::Audit { input } => {
            info!(input_dir = input; "Auditing source documents");

            let builder = RegistryBuilder::new(app_config);
            let records = builder.audit(Path::new(input))?;

            let mut stdout = io::stdout().lock();
            for record in &records {
                writeln!(stdout, "{record}")?;
            }
        }
    }

    Ok(())
}
