//! CLI type definitions: argument struct and output formats.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Deserialize;

#[derive(Parser)]
#[command(name = "mfdump", version)]
#[command(about = "Parse a Mifare Classic dump and show its blocks and access conditions", long_about = None)]
pub(crate) struct Cli {
    /// Dump file to parse ("-" reads standard input)
    pub file: String,

    /// Treat the input as a 1K dump regardless of its size
    #[arg(short = '1', long = "force-1k")]
    pub force_1k: bool,

    /// Do not colorize the output
    #[arg(short = 'n', long)]
    pub no_color: bool,

    /// Output format (overrides the settings file)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Only show warnings and errors (suppresses the report in every format)
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long)]
    pub logfile: Option<PathBuf>,
}

impl Cli {
    /// Whether the report itself is printed. Warnings are logged either way.
    pub fn shows_report(&self) -> bool {
        !self.quiet
    }
}

/// How the report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    /// Fixed-width table with hex and ASCII columns
    #[default]
    Table,
    /// Machine-readable JSON document
    Json,
}
