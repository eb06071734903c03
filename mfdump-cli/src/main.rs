//! mfdump CLI
//!
//! Command-line interface for inspecting Mifare Classic dumps.

mod cli_types;
mod error;
mod input;
mod json;
mod logger;
mod settings;
mod table;

use std::io::Write;

use clap::Parser;

use mfdump_core::{Report, ReportOptions};

use crate::cli_types::{Cli, OutputFormat};
pub(crate) use crate::error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(&cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let settings = settings::load_settings()?;

    let color = !cli.no_color && settings.color.unwrap_or(true);
    if !color {
        owo_colors::set_override(false);
    }
    let format = cli.format.or(settings.format).unwrap_or_default();

    let dump = input::read_dump(&cli.file)?;
    log::debug!("Read {} bytes from {}", dump.len(), cli.file);
    if cli.force_1k && dump.len() != 1024 {
        log::debug!("Forcing 1K layout on {} bytes of input", dump.len());
    }

    let options = ReportOptions::new().force_1k(cli.force_1k);
    let report = Report::build(&dump, &options)?;

    if cli.shows_report() {
        match format {
            OutputFormat::Table => {
                for line in table::render(&report) {
                    log::info!("{}", line);
                }
            }
            // Raw stdout keeps the document free of log prefixes.
            OutputFormat::Json => {
                let out = json::render(&report)?;
                writeln!(std::io::stdout().lock(), "{}", out)?;
            }
        }
    }

    let invalid = report.invalid_count();
    if invalid > 0 {
        log::warn!(
            "{} of {} blocks have access bits that fail their check",
            invalid,
            report.rows().len()
        );
    }
    let card = report.card();
    if !card.bcc_valid() {
        log::warn!(
            "BCC {:02x} does not match UID (expected {:02x})",
            card.bcc,
            card.expected_bcc()
        );
    }

    Ok(())
}
