use anyhow::{Context, Result};
use chrono::SecondsFormat;
use fern::colors::{Color, ColoredLevelConfig};
use fern::Dispatch;
use log::LevelFilter;

/// Verbosity level for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Error messages only
    Error,
    /// Warning and error messages
    Warning,
    /// Generation progress, warnings and errors (default)
    Info,
    /// Template discovery and permission changes as well
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Convert verbosity level to log::LevelFilter
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warning => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }

    /// Get the verbosity level from the number of occurrences of a flag
    pub fn from_occurrences(occurrences: u8) -> Self {
        match occurrences {
            0 => LogLevel::Info,  // Default
            1 => LogLevel::Debug, // -v
            _ => LogLevel::Trace, // -vv or more
        }
    }

    /// Get the verbosity level from the -v and -q counts
    ///
    /// Quiet flags win, so `-q` gives warnings and `-qq` errors only.
    pub fn from_flags(verbose: u8, quiet: u8) -> Self {
        match quiet {
            0 => Self::from_occurrences(verbose),
            1 => LogLevel::Warning,
            _ => LogLevel::Error,
        }
    }
}

fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}

/// Initialise the logger with the specified verbosity level
///
/// Console lines are coloured by level when stdout is a terminal. A non-empty
/// `log_file` additionally receives every line with a timestamp and target.
///
/// # Errors
/// Returns an error if the log file cannot be opened or a logger is already set
pub fn init_logger(verbosity: LogLevel, log_file: &str) -> Result<()> {
    let level = verbosity.to_level_filter();

    let colors_line = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::White)
        .debug(Color::White)
        .trace(Color::BrightBlack);
    let colored = is_terminal();

    let console_logger = Dispatch::new()
        .format(move |out, message, record| {
            if colored {
                out.finish(format_args!(
                    "\x1B[{}m{}\x1B[0m",
                    colors_line.get_color(&record.level()).to_fg_str(),
                    message
                ))
            } else {
                out.finish(format_args!("{message}"))
            }
        })
        .level(level)
        .chain(std::io::stdout());

    let mut base_logger = Dispatch::new().level(level).chain(console_logger);

    if !log_file.is_empty() {
        let file = fern::log_file(log_file)
            .with_context(|| format!("Failed to open log file {log_file}"))?;
        let file_logger = Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{} {} {}] {}",
                    chrono::Local::now().to_rfc3339_opts(SecondsFormat::Secs, true),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(level)
            .chain(file);
        base_logger = base_logger.chain(file_logger);
    }

    base_logger
        .apply()
        .context("Failed to install the logger")?;

    log::debug!("Logger initialized with verbosity level: {verbosity:?}");

    Ok(())
}

/// Picks the coloured variant of a message only when stdout is a terminal
pub fn format_message(message: &str, colored_message: &str) -> String {
    if is_terminal() {
        colored_message.to_string()
    } else {
        message.to_string()
    }
}
