use std::path::{Path, PathBuf};

use clap::{
    command, crate_authors, crate_description, crate_name, crate_version, Arg, ArgMatches, Command,
};

use crate::constants::{
    CONFIG_HELP, DRY_RUN_HELP, LOG_FILE_DEFAULT, LOG_FILE_HELP, OUTPUT_HELP, QUIET_HELP,
    TEMPLATES_HELP, VERBOSE_HELP,
};
use crate::errors::{invalid_path_error, PathKind, Result};
use crate::logging::LogLevel;

/// Accepts a command-line argument only if it names an existing regular file
///
/// Meant to be used as a clap `value_parser`, so the check runs while the
/// arguments are parsed.
///
/// # Errors
/// Returns `Error::InvalidPath` with the message `"<path> is not a valid path to file"`
pub fn file_path(path: &str) -> Result<PathBuf> {
    if Path::new(path).is_file() {
        Ok(PathBuf::from(path))
    } else {
        Err(invalid_path_error(path, PathKind::File))
    }
}

/// Accepts a command-line argument only if it names an existing directory
///
/// # Errors
/// Returns `Error::InvalidPath` with the message `"<path> is not a valid path to dir"`
pub fn dir_path(path: &str) -> Result<PathBuf> {
    if Path::new(path).is_dir() {
        Ok(PathBuf::from(path))
    } else {
        Err(invalid_path_error(path, PathKind::Dir))
    }
}

/// Builds the command-line interface
///
/// Defines the following arguments:
/// - `config`: Path to the generation manifest
/// - `templates`: Directory containing the templates
/// - `output`: Directory the generated files are written to
/// - `dry`: Run without writing any files
/// - `verbose`: Increase verbosity level
/// - `quiet`: Decrease verbosity level
/// - `log_file`: Also log to a file
pub fn build_command() -> Command {
    // define arg for reading a specific manifest
    let arg_config = Arg::new("config")
        .short('c')
        .long("config")
        .value_name("FILE")
        .help(CONFIG_HELP)
        .value_parser(file_path);

    // define arg for the templates directory
    let arg_templates = Arg::new("templates")
        .short('t')
        .long("templates")
        .value_name("DIR")
        .help(TEMPLATES_HELP)
        .value_parser(dir_path);

    // the output directory is created on demand, so it is not validated
    let arg_output = Arg::new("output")
        .short('o')
        .long("output")
        .value_name("DIR")
        .help(OUTPUT_HELP)
        .value_parser(clap::value_parser!(PathBuf));

    // define arg for dry run
    let arg_dry = Arg::new("dry")
        .short('n')
        .long("dry")
        .help(DRY_RUN_HELP)
        .action(clap::ArgAction::SetTrue);

    // define arg for verbosity level
    let arg_verbose = Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help(VERBOSE_HELP)
        .action(clap::ArgAction::Count);

    // define arg for quieter output
    let arg_quiet = Arg::new("quiet")
        .short('q')
        .long("quiet")
        .help(QUIET_HELP)
        .action(clap::ArgAction::Count)
        .conflicts_with("verbose");

    // define arg for log file
    let log_file = Arg::new("log_file")
        .short('l')
        .long("log-file")
        .help(LOG_FILE_HELP)
        .default_value(LOG_FILE_DEFAULT);

    command!()
        .author(crate_authors!())
        .about(crate_description!())
        .name(crate_name!())
        .version(crate_version!())
        .arg(arg_config)
        .arg(arg_templates)
        .arg(arg_output)
        .arg(arg_dry)
        .arg(log_file)
        .arg(arg_verbose)
        .arg(arg_quiet)
}

/// Parses the process arguments
///
/// Invalid arguments, including paths rejected by [`file_path`] and
/// [`dir_path`], end the process with clap's usage error.
pub fn get_matches() -> ArgMatches {
    build_command().get_matches()
}

/// Gets the verbosity level from the number of -v/--verbose and -q/--quiet flags
pub fn get_verbosity(matches: &ArgMatches) -> LogLevel {
    let verbose_count = matches.get_count("verbose");
    let quiet_count = matches.get_count("quiet");
    LogLevel::from_flags(verbose_count, quiet_count)
}

pub fn get_log_file(matches: &ArgMatches) -> String {
    matches
        .get_one::<String>("log_file")
        .cloned()
        .unwrap_or_else(|| LOG_FILE_DEFAULT.to_string())
}

pub fn get_config_path(matches: &ArgMatches) -> Option<PathBuf> {
    matches.get_one::<PathBuf>("config").cloned()
}

pub fn get_templates_dir(matches: &ArgMatches) -> Option<PathBuf> {
    matches.get_one::<PathBuf>("templates").cloned()
}

pub fn get_output_dir(matches: &ArgMatches) -> Option<PathBuf> {
    matches.get_one::<PathBuf>("output").cloned()
}

pub fn is_dry_run(matches: &ArgMatches) -> bool {
    matches.get_flag("dry")
}
