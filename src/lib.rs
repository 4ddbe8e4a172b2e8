//! Helpers for rendering code generation templates to disk
//!
//! Templates are rendered with [`minijinja`], normalized to have no trailing
//! blanks and `\r\n` line ends, and written as read-only files. A small
//! workflow engine drives whole directories of templates from a YAML manifest.

pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod file_ops;
pub mod logging;
pub mod normalize;
pub mod template;
pub mod utils;
pub mod workflow;

pub mod prelude {
    pub use crate::cli::{dir_path, file_path};
    pub use crate::errors::{
        duplicate_destination_error, file_operation_error, glob_pattern_error,
        invalid_destination_error, invalid_filename_error, invalid_path_error, render_error,
        reserved_context_key_error, template_not_found_error,
    };
    pub use crate::errors::{Error, PathKind, Result};
    pub use crate::file_ops::{GeneratedFile, write_to_file_using_template};
    pub use crate::logging::{LogLevel, format_message, init_logger};
    pub use crate::normalize::{
        normalize_generated_text, remove_all_whitespace_at_line_end, set_windows_line_ends,
    };
    pub use crate::template::{TemplateContext, TemplateSet};
    pub use crate::utils::from_template_name_to_destination_name;
    pub use crate::workflow::{ProcessingOptions, WorkflowContext, process_templates};
}
