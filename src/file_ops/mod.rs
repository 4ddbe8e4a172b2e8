//! File operations module
//!
//! This module contains the template writer and the permission handling
//! around generated files.

pub mod permissions;
mod writer;

pub use permissions::WritableFile;
pub use writer::{
    GeneratedFile, render_normalized, report_generation_failure, write_generated_file,
    write_to_file_using_template,
};
