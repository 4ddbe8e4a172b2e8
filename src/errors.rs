use glob::PatternError;
use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Kind of filesystem entry a command-line path argument must point at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// An existing regular file
    File,
    /// An existing directory
    Dir,
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathKind::File => write!(f, "file"),
            PathKind::Dir => write!(f, "dir"),
        }
    }
}

/// Custom error type for the template generator
#[derive(Debug)]
pub enum Error {
    /// Error related to file operations
    FileOperation {
        source: io::Error,
        path: PathBuf,
        operation: String,
    },
    /// Error raised by the template engine while loading or rendering
    Render {
        source: minijinja::Error,
        template: String,
    },
    /// A template was requested that is not registered
    TemplateNotFound { name: String },
    /// The caller tried to set a context key the writer injects itself
    ReservedContextKey { key: String },
    /// Error related to glob pattern matching
    GlobPattern {
        source: PatternError,
        pattern: String,
    },
    /// A command-line path argument does not point at the expected entry
    InvalidPath { path: String, kind: PathKind },
    /// Error when a filename is missing or not valid Unicode
    InvalidFilename { path: PathBuf },
    /// A destination that is absolute or climbs out of the output directory
    InvalidDestination { path: PathBuf },
    /// Two templates of one run resolve to the same destination
    DuplicateDestination {
        path: PathBuf,
        template: String,
        previous: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::FileOperation {
                path, operation, ..
            } => {
                write!(f, "Failed to {} file: {}", operation, path.display())
            }
            Error::Render { template, .. } => {
                write!(f, "Failed to render template: {template}")
            }
            Error::TemplateNotFound { name } => {
                write!(f, "Template not found: {name}")
            }
            Error::ReservedContextKey { key } => {
                write!(f, "Context key '{key}' is reserved and set by the generator")
            }
            Error::GlobPattern { pattern, .. } => {
                write!(f, "Invalid glob pattern: {pattern}")
            }
            Error::InvalidPath { path, kind } => {
                write!(f, "{path} is not a valid path to {kind}")
            }
            Error::InvalidFilename { path } => {
                write!(f, "Filename is missing or not valid unicode: {}", path.display())
            }
            Error::InvalidDestination { path } => {
                write!(
                    f,
                    "Destination must be a relative path inside the output directory: {}",
                    path.display()
                )
            }
            Error::DuplicateDestination {
                path,
                template,
                previous,
            } => {
                write!(
                    f,
                    "Template {template} writes to {}, which {previous} already writes to",
                    path.display()
                )
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::FileOperation { source, .. } => Some(source),
            Error::Render { source, .. } => Some(source),
            Error::GlobPattern { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl Error {
    /// Returns the template engine's annotated trace for render failures
    pub fn render_trace(&self) -> Option<String> {
        match self {
            Error::Render { source, .. } => Some(format!("{}", source.display_debug_info())),
            _ => None,
        }
    }

    /// Returns true if the error came from the filesystem rather than a template
    pub fn is_io(&self) -> bool {
        matches!(self, Error::FileOperation { .. })
    }
}

/// Custom Result type for the template generator
///
/// # Examples
/// ```
/// use tmplgen::prelude::{Result, template_not_found_error};
///
/// fn find_template(name: &str) -> Result<String> {
///     if name.ends_with(".mako") {
///         Ok(name.to_string())
///     } else {
///         Err(template_not_found_error(name))
///     }
/// }
///
/// assert!(find_template("Intrinsics.h.mako").is_ok());
/// assert!(find_template("notes.txt").is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Helper function to create a file operation error
pub fn file_operation_error(err: io::Error, path: PathBuf, operation: &str) -> Error {
    Error::FileOperation {
        source: err,
        path,
        operation: operation.to_string(),
    }
}

/// Helper function to create a render error
pub fn render_error(err: minijinja::Error, template: &str) -> Error {
    Error::Render {
        source: err,
        template: template.to_string(),
    }
}

/// Helper function to create a template not found error
pub fn template_not_found_error(name: &str) -> Error {
    Error::TemplateNotFound {
        name: name.to_string(),
    }
}

/// Helper function to create a reserved context key error
pub fn reserved_context_key_error(key: &str) -> Error {
    Error::ReservedContextKey {
        key: key.to_string(),
    }
}

/// Helper function to create a glob pattern error
pub fn glob_pattern_error(err: PatternError, pattern: &str) -> Error {
    Error::GlobPattern {
        source: err,
        pattern: pattern.to_string(),
    }
}

/// Helper function to create an invalid command-line path error
pub fn invalid_path_error(path: &str, kind: PathKind) -> Error {
    Error::InvalidPath {
        path: path.to_string(),
        kind,
    }
}

/// Helper function to create an invalid filename error
pub fn invalid_filename_error(path: PathBuf) -> Error {
    Error::InvalidFilename { path }
}

/// Helper function to create an invalid destination error
pub fn invalid_destination_error(path: PathBuf) -> Error {
    Error::InvalidDestination { path }
}

/// Helper function to create a duplicate destination error
pub fn duplicate_destination_error(path: PathBuf, template: &str, previous: &str) -> Error {
    Error::DuplicateDestination {
        path,
        template: template.to_string(),
        previous: previous.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_operation_error() {
        let path = PathBuf::from("/test/path");
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied");
        let error = file_operation_error(io_error, path.clone(), "write");

        let error_string = format!("{error}");
        assert!(
            error_string.contains("write"),
            "Error message should contain the operation"
        );
        assert!(
            error_string.contains("/test/path"),
            "Error message should contain the path"
        );
        assert!(error.is_io());
        assert!(error.source().is_some());
    }

    #[test]
    fn test_render_error() {
        let engine_error =
            minijinja::Error::new(minijinja::ErrorKind::UndefinedError, "undefined value");
        let error = render_error(engine_error, "Intrinsics.h.mako");

        let error_string = format!("{error}");
        assert!(
            error_string.contains("Intrinsics.h.mako"),
            "Error message should contain the template name"
        );
        assert!(!error.is_io());
        assert!(error.render_trace().is_some());
    }

    #[test]
    fn test_invalid_path_error() {
        let error = invalid_path_error("missing.yaml", PathKind::File);
        assert_eq!(format!("{error}"), "missing.yaml is not a valid path to file");

        let error = invalid_path_error("missing_dir", PathKind::Dir);
        assert_eq!(format!("{error}"), "missing_dir is not a valid path to dir");
    }

    #[test]
    fn test_reserved_context_key_error() {
        let error = reserved_context_key_error("file_name");
        let error_string = format!("{error}");
        assert!(
            error_string.contains("file_name"),
            "Error message should contain the key"
        );
        assert!(error.render_trace().is_none());
    }

    #[test]
    fn test_template_not_found_error() {
        let error = template_not_found_error("missing.j2");
        assert_eq!(format!("{error}"), "Template not found: missing.j2");
    }

    #[test]
    fn test_glob_pattern_error() {
        let pattern_error = glob::Pattern::new("[").err().unwrap();
        let error = glob_pattern_error(pattern_error, "test-glob-pattern");

        let error_string = format!("{error}");
        assert!(
            error_string.contains("test-glob-pattern"),
            "Error message should contain the pattern"
        );
    }

    #[test]
    fn test_invalid_filename_error() {
        let path = PathBuf::from("/test/..");
        let error = invalid_filename_error(path);
        assert!(format!("{error}").contains("/test/.."));
    }

    #[test]
    fn test_destination_errors() {
        let error = invalid_destination_error(PathBuf::from("../escape.h"));
        assert!(format!("{error}").contains("../escape.h"));

        let error = duplicate_destination_error(PathBuf::from("a.h"), "a.h.j2", "a.h.mako");
        let error_string = format!("{error}");
        assert!(error_string.contains("a.h.j2"));
        assert!(error_string.contains("a.h.mako"));
        assert!(!error.is_io());
    }
}
