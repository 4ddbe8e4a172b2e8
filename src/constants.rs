/// Constants used throughout the application
///
/// This module centralises all constants used in the application to make
/// them easier to manage and update.

/// File extensions recognised as template files
///
/// Only one of these is stripped when a destination name is derived from a
/// template name.
pub const TEMPLATE_EXTENSIONS: [&str; 3] = [".mako", ".j2", ".jinja"];

/// Context key injected into every render with the destination's file name
pub const FILE_NAME_KEY: &str = "file_name";

/// Permission bits applied to a generated file once it is written
pub const READ_ONLY_MODE: u32 = 0o444;

/// Permission bits applied to an existing file before it is overwritten
pub const WRITABLE_MODE: u32 = 0o666;

/// Help text for the config command-line option
pub const CONFIG_HELP: &str = "Read the generation manifest from a specific file";

/// Help text for the templates command-line option
pub const TEMPLATES_HELP: &str = "Directory containing the templates to render";

/// Help text for the output command-line option
pub const OUTPUT_HELP: &str = "Directory the generated files are written to";

/// Help text for the dry-run command-line option
pub const DRY_RUN_HELP: &str = "Run without writing any files";

/// Help text for the verbose command-line option
pub const VERBOSE_HELP: &str = "Increase verbosity level (can be used multiple times)";
pub const QUIET_HELP: &str = "Only show warnings, or only errors when given twice";

/// Help text for the log file command-line option
pub const LOG_FILE_HELP: &str = "Also write log messages to this file";

/// Default output directory when neither the manifest nor the command line names one
pub const DEFAULT_OUTPUT_PATH: &str = "generated";

/// Default log file (empty means no file logging)
pub const LOG_FILE_DEFAULT: &str = "";
