//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Read file contents, mapping failures to `internal.io_error` with the
/// operation as context.
pub fn read_file(path: &Path, operation: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Write content to file atomically (write to a sibling temp file, then rename).
///
/// Readers see either the old content or the new content, never a partial
/// write. The temp file lives in the same directory so the rename stays on
/// one filesystem.
pub fn write_file_atomic(path: &Path, content: &str, operation: &str) -> Result<()> {
    let staged = stage_file(path, content, operation)?;
    commit_staged(&staged, path, operation)
}

/// Sibling temp path used while a write is in flight.
pub fn temp_path(path: &Path, operation: &str) -> Result<PathBuf> {
    let invalid = || {
        Error::internal_io(
            format!("Invalid path: {}", path.display()),
            Some(operation.to_string()),
        )
    };

    let parent = path.parent().ok_or_else(invalid)?;
    let filename = path.file_name().ok_or_else(invalid)?;

    Ok(parent.join(format!(".{}.namecheck.tmp", filename.to_string_lossy())))
}

/// Write content to the temp path for `path` without touching `path` itself.
pub fn stage_file(path: &Path, content: &str, operation: &str) -> Result<PathBuf> {
    let tmp_path = temp_path(path, operation)?;

    fs::write(&tmp_path, content)
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("{} (write temp)", operation))))?;

    Ok(tmp_path)
}

/// Move a staged temp file over its target. The temp file is removed on failure.
pub fn commit_staged(tmp_path: &Path, path: &Path, operation: &str) -> Result<()> {
    fs::rename(tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(tmp_path);
        Error::internal_io(e.to_string(), Some(format!("{} (rename)", operation)))
    })
}
