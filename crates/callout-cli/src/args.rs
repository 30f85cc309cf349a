//! Command-line argument definitions for the callout CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Global arguments select the configuration file and the
//! logging verbosity; the [`Command`] selects what to do.

use clap::{Parser, Subcommand};

use callout::FailurePolicy;

/// Command-line arguments for the callout registry compiler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile the documents of a directory into a callout registry module
    Generate {
        /// Directory holding the source documents
        input: String,

        /// Path to the generated module
        #[arg(short, long, default_value = "CalloutRegistry.ts")]
        output: String,

        /// Failure policy (strict, lenient), overriding the configuration
        #[arg(long)]
        policy: Option<FailurePolicy>,

        /// Print a source report for every document that failed extraction
        #[arg(long)]
        explain: bool,
    },

    /// Report the path data found in every document of a directory
    Audit {
        /// Directory holding the source documents
        input: String,
    },
}
