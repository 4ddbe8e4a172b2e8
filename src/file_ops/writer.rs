//! Writing rendered templates to disk
//!
//! Rendering happens fully in memory before the destination is touched, so a
//! template error never clobbers a previously generated file.

use std::fs::{create_dir_all, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{error, info};
use minijinja::Template;

use crate::errors::{file_operation_error, render_error, Error, Result};
use crate::normalize::normalize_generated_text;
use crate::template::TemplateContext;
use crate::utils::{display_path, file_name_of};

use super::permissions::WritableFile;

/// A file produced by a successful write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Absolute path of the written file
    pub path: PathBuf,
    /// Number of bytes written
    pub bytes_written: usize,
}

/// Renders a template into a file
///
/// The template receives the caller's context plus `file_name`, the base
/// name of `file_path`. The output has trailing whitespace stripped and
/// `\r\n` line ends. Missing parent directories are created. An existing
/// file is made writable before the write, and the result is left read-only.
///
/// # Arguments
/// * `file_path` - Destination of the generated file
/// * `template` - Template handle to render
/// * `context` - Values substituted into the template
///
/// # Returns
/// * `Result<GeneratedFile>` - The written file, or the reason nothing was written
///
/// # Errors
/// * Returns `Error::Render` if the template fails to render
/// * Returns `Error::ReservedContextKey` if `context` already holds `file_name`
/// * Returns `Error::FileOperation` if any filesystem step fails
pub fn write_to_file_using_template(
    file_path: &Path,
    template: &Template<'_, '_>,
    context: &TemplateContext,
) -> Result<GeneratedFile> {
    let file_name = file_name_of(file_path)?;
    info!(" --- Generating {file_name}");

    let content = render_normalized(template, context, file_name)?;
    write_generated_file(file_path, &content)
}

/// Renders a template and applies both normalization passes
pub fn render_normalized(
    template: &Template<'_, '_>,
    context: &TemplateContext,
    file_name: &str,
) -> Result<String> {
    let values = context.render_values(file_name)?;
    let rendered = template
        .render(values)
        .map_err(|e| render_error(e, template.name()))?;
    Ok(normalize_generated_text(&rendered))
}

/// Writes already rendered content and leaves the file read-only
pub fn write_generated_file(file_path: &Path, content: &str) -> Result<GeneratedFile> {
    if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent)
            .map_err(|e| file_operation_error(e, parent.to_path_buf(), "create directory"))?;
    }

    let guard = WritableFile::acquire(file_path)?;
    {
        let mut file = File::create(file_path)
            .map_err(|e| file_operation_error(e, file_path.to_path_buf(), "create"))?;
        file.write_all(content.as_bytes())
            .map_err(|e| file_operation_error(e, file_path.to_path_buf(), "write"))?;
        file.flush()
            .map_err(|e| file_operation_error(e, file_path.to_path_buf(), "flush"))?;
    }
    guard.commit()?;

    let location = display_path(file_path);
    info!(
        " --- Successfully generated in the following location: \n    {}",
        location.display()
    );

    Ok(GeneratedFile {
        path: location,
        bytes_written: content.len(),
    })
}

/// Logs why a file could not be generated
pub fn report_generation_failure(file_path: &Path, err: &Error) {
    error!(
        " --- The file is not generated in the following location: \n    {}",
        display_path(file_path).display()
    );
    match err {
        Error::FileOperation { source, .. } => error!("I/O error: {source}"),
        _ => match err.render_trace() {
            Some(trace) => error!("{err}\n{trace}"),
            None => error!("{err}"),
        },
    }
}
