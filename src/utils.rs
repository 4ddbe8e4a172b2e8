use std::path::{Component, Path, PathBuf};

use shellexpand::tilde;

use crate::constants::TEMPLATE_EXTENSIONS;
use crate::errors::{invalid_destination_error, invalid_filename_error, Result};

/// Derives the generated file's base name from a template file name
///
/// Takes the final path component and strips a single trailing template
/// extension (`.mako`, `.j2` or `.jinja`). Names without a template extension
/// are returned unchanged.
///
/// # Examples
/// ```
/// use tmplgen::utils::from_template_name_to_destination_name;
///
/// assert_eq!(from_template_name_to_destination_name("foo/bar.h.mako"), "bar.h");
/// ```
pub fn from_template_name_to_destination_name(template_filename: &str) -> String {
    let name = Path::new(template_filename)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let stem = TEMPLATE_EXTENSIONS
        .iter()
        .find_map(|extension| name.strip_suffix(*extension))
        .filter(|stem| !stem.is_empty())
        .map(str::to_string);
    stem.unwrap_or(name)
}

/// Relative destination of a template, next to the template's own directory
///
/// `include/Intrinsics.h.mako` becomes `include/Intrinsics.h`.
pub fn destination_for_template(template_name: &str) -> PathBuf {
    let file_name = from_template_name_to_destination_name(template_name);
    match Path::new(template_name).parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Normalizes a destination relative to the output directory
///
/// `.` components are dropped, so `./a.h` and `a.h` compare equal.
///
/// # Errors
/// Returns `Error::InvalidDestination` for absolute paths, paths with `..`
/// and paths that name no file
pub fn normalize_destination(path: &Path) -> Result<PathBuf> {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(invalid_destination_error(path.to_path_buf()));
            }
        }
    }
    if normalized.as_os_str().is_empty() {
        return Err(invalid_destination_error(path.to_path_buf()));
    }
    Ok(normalized)
}

/// Returns true if the file name ends with a recognised template extension
pub fn is_template_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| {
            TEMPLATE_EXTENSIONS
                .iter()
                .any(|extension| name.len() > extension.len() && name.ends_with(extension))
        })
}

/// Gets the final component of a path as a string
pub fn file_name_of(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|os_str| os_str.to_str())
        .ok_or_else(|| invalid_filename_error(path.to_path_buf()))
}

/// Expands a leading `~` in a path taken from the manifest
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(tilde(path).to_string())
}

/// Turns a possibly relative path into an absolute one for status messages
///
/// Falls back to the path as given when the current directory is unknown.
pub fn display_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
