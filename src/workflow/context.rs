//! Workflow context
//!
//! This module defines the state collected while a generation run proceeds.

use std::path::PathBuf;

use crate::errors::Error;
use crate::file_ops::GeneratedFile;

/// Represents a planned file write for dry-run mode
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedOperation {
    /// The template that would be rendered
    pub template: String,
    /// The file that would be written
    pub destination: PathBuf,
}

/// Why a file could not be generated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The filesystem refused a step
    Io,
    /// The template engine failed to parse or render the template
    Render,
    /// No template is registered under the requested name
    MissingTemplate,
    /// The job itself is wrong, e.g. a reserved context key or a clashing destination
    InvalidJob,
}

impl FailureKind {
    /// Classifies an error reported for a single file
    pub fn of(err: &Error) -> Self {
        match err {
            Error::FileOperation { .. } => FailureKind::Io,
            Error::Render { .. } => FailureKind::Render,
            Error::TemplateNotFound { .. } => FailureKind::MissingTemplate,
            Error::ReservedContextKey { .. }
            | Error::GlobPattern { .. }
            | Error::InvalidPath { .. }
            | Error::InvalidFilename { .. }
            | Error::InvalidDestination { .. }
            | Error::DuplicateDestination { .. } => FailureKind::InvalidJob,
        }
    }
}

/// A file that was not generated
#[derive(Debug, Clone)]
pub struct FailedFile {
    pub template: String,
    pub destination: PathBuf,
    pub kind: FailureKind,
    pub reason: String,
}

/// Statistics about the workflow
#[derive(Debug, Clone, Default)]
pub struct WorkflowStats {
    /// Number of templates found in the templates directory
    pub templates_found: usize,
    /// Number of files written
    pub files_generated: usize,
    /// Number of files planned in dry-run mode
    pub files_planned: usize,
    /// Number of bytes written across all files
    pub bytes_written: usize,
    /// Number of errors
    pub errors: usize,
}

/// Context for the workflow
#[derive(Debug, Clone, Default)]
pub struct WorkflowContext {
    /// Whether files are only planned rather than written
    pub dry_run: bool,
    /// Statistics about the run
    pub stats: WorkflowStats,
    /// Planned operations for dry-run mode
    pub planned_operations: Vec<PlannedOperation>,
    /// Files written successfully
    pub generated: Vec<GeneratedFile>,
    /// Files that could not be generated
    pub failures: Vec<FailedFile>,
}

impl WorkflowContext {
    pub fn new(dry_run: bool) -> Self {
        WorkflowContext {
            dry_run,
            ..Default::default()
        }
    }

    /// Adds a planned operation to the context
    pub fn add_planned_operation(&mut self, operation: PlannedOperation) {
        self.stats.files_planned += 1;
        self.planned_operations.push(operation);
    }

    pub fn record_generated(&mut self, file: GeneratedFile) {
        self.stats.files_generated += 1;
        self.stats.bytes_written += file.bytes_written;
        self.generated.push(file);
    }

    pub fn record_failure(&mut self, template: &str, destination: PathBuf, err: &Error) {
        self.stats.errors += 1;
        self.failures.push(FailedFile {
            template: template.to_string(),
            destination,
            kind: FailureKind::of(err),
            reason: err.to_string(),
        });
    }

    pub fn has_failures(&self) -> bool {
        self.stats.errors > 0
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::errors::{
        duplicate_destination_error, file_operation_error, render_error,
        reserved_context_key_error, template_not_found_error,
    };

    #[test]
    fn test_counters() {
        let mut context = WorkflowContext::new(false);
        context.record_generated(GeneratedFile {
            path: PathBuf::from("/out/a.h"),
            bytes_written: 10,
        });
        context.record_generated(GeneratedFile {
            path: PathBuf::from("/out/b.h"),
            bytes_written: 5,
        });

        assert_eq!(context.stats.files_generated, 2);
        assert_eq!(context.stats.bytes_written, 15);
        assert!(!context.has_failures());
    }

    #[test]
    fn test_failure_kinds() {
        let mut context = WorkflowContext::new(false);
        let io_error = file_operation_error(
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            PathBuf::from("/out/a.h"),
            "write",
        );
        context.record_failure("a.h.mako", PathBuf::from("/out/a.h"), &io_error);
        context.record_failure(
            "b.h.mako",
            PathBuf::from("/out/b.h"),
            &template_not_found_error("b.h.mako"),
        );

        assert!(context.has_failures());
        assert_eq!(context.stats.errors, 2);
        assert_eq!(context.failures[0].kind, FailureKind::Io);
        assert_eq!(context.failures[1].kind, FailureKind::MissingTemplate);
    }

    #[test]
    fn test_failure_kind_follows_error_variant() {
        let engine_error =
            minijinja::Error::new(minijinja::ErrorKind::UndefinedError, "undefined value");
        assert_eq!(
            FailureKind::of(&render_error(engine_error, "a.h.mako")),
            FailureKind::Render
        );
        assert_eq!(
            FailureKind::of(&reserved_context_key_error("file_name")),
            FailureKind::InvalidJob
        );
        assert_eq!(
            FailureKind::of(&duplicate_destination_error(
                PathBuf::from("a.h"),
                "a.h.mako",
                "a.h.j2"
            )),
            FailureKind::InvalidJob
        );
    }

    #[test]
    fn test_planned_operations() {
        let mut context = WorkflowContext::new(true);
        context.add_planned_operation(PlannedOperation {
            template: "a.h.mako".to_string(),
            destination: PathBuf::from("out/a.h"),
        });

        assert!(context.dry_run);
        assert_eq!(context.stats.files_planned, 1);
        assert_eq!(context.planned_operations.len(), 1);
    }
}
