//! Console logger.
//!
//! Normal output goes through `log::info!` to stdout; warnings and errors
//! go to stderr. With `--verbose`, debug messages are shown and every line
//! gets a timestamp. `--logfile` mirrors all output to a file with ANSI
//! codes removed.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use crate::CliError;

struct CliLogger {
    level: LevelFilter,
    verbose: bool,
    logfile: Option<Mutex<File>>,
}

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format_line(record.level(), &record.args().to_string(), self.verbose);
        match record.level() {
            Level::Error | Level::Warn => eprintln!("{}", line),
            _ => println!("{}", line),
        }

        if let Some(file) = &self.logfile
            && let Ok(mut file) = file.lock()
        {
            let _ = writeln!(file, "{}", strip_ansi_escapes::strip_str(&line));
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.logfile
            && let Ok(mut file) = file.lock()
        {
            let _ = file.flush();
        }
    }
}

/// Build the printed form of a log message.
fn format_line(level: Level, message: &str, verbose: bool) -> String {
    let prefix = match level {
        Level::Error => format!("{} ", "error:".if_supports_color(Stderr, |t| t.red())),
        Level::Warn => format!("{} ", "warning:".if_supports_color(Stderr, |t| t.yellow())),
        _ => String::new(),
    };

    if verbose {
        let stamp = chrono::Local::now().format("%H:%M:%S%.3f");
        format!("[{} {:<5}] {}{}", stamp, level, prefix, message)
    } else {
        format!("{}{}", prefix, message)
    }
}

/// Install the logger. Call once, before any output.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let logfile = logfile
        .map(|path| {
            File::create(path)
                .map(Mutex::new)
                .map_err(|e| CliError::logger(format!("{}: {}", path.display(), e)))
        })
        .transpose()?;

    log::set_boxed_logger(Box::new(CliLogger {
        level,
        verbose,
        logfile,
    }))
    .map_err(|e| CliError::logger(e.to_string()))?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_info_line() {
        assert_eq!(format_line(Level::Info, "hello", false), "hello");
    }

    #[test]
    fn test_warning_prefix() {
        let line = format_line(Level::Warn, "careful", false);
        assert_eq!(strip_ansi_escapes::strip_str(&line), "warning: careful");
    }

    #[test]
    fn test_verbose_adds_level() {
        let line = format_line(Level::Debug, "details", true);
        assert!(line.starts_with('['));
        assert!(line.contains("DEBUG"));
        assert!(line.ends_with("details"));
    }
}
