//! Permission handling around generated files
//!
//! Generated files are kept read-only between runs. `WritableFile` relaxes
//! an existing file before it is overwritten and sets it read-only again once
//! the write is committed. A guard dropped without a commit leaves the file
//! writable so the next run can overwrite it.

use std::fs;
use std::io;
use std::path::Path;

use log::{debug, warn};

use crate::constants::{READ_ONLY_MODE, WRITABLE_MODE};
use crate::errors::{file_operation_error, Result};

#[cfg(unix)]
pub fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
pub fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_readonly(mode & 0o222 == 0);
    fs::set_permissions(path, permissions)
}

/// Write access to a destination path, held for the duration of one write
#[derive(Debug)]
pub struct WritableFile<'a> {
    path: &'a Path,
    committed: bool,
}

impl<'a> WritableFile<'a> {
    /// Prepares `path` for writing
    ///
    /// # Errors
    /// Returns an error if an existing file cannot be made writable
    pub fn acquire(path: &'a Path) -> Result<Self> {
        if path.is_file() {
            debug!("Making existing file writable: {}", path.display());
            set_mode(path, WRITABLE_MODE)
                .map_err(|e| file_operation_error(e, path.to_path_buf(), "make writable"))?;
        }
        Ok(WritableFile {
            path,
            committed: false,
        })
    }

    pub fn path(&self) -> &Path {
        self.path
    }

    /// Marks the write as finished and makes the file read-only
    pub fn commit(mut self) -> Result<()> {
        set_mode(self.path, READ_ONLY_MODE)
            .map_err(|e| file_operation_error(e, self.path.to_path_buf(), "make read-only"))?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for WritableFile<'_> {
    fn drop(&mut self) {
        if self.committed || !self.path.is_file() {
            return;
        }
        if let Err(e) = set_mode(self.path, WRITABLE_MODE) {
            warn!(
                "Failed to leave {} writable after an aborted write: {e}",
                self.path.display()
            );
        }
    }
}
