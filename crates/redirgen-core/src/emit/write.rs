//! Whole-file atomic replace of the output artifact.

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::WriteError;

/// Write `contents` to `path` in one step: a temp file in the same directory is
/// written, flushed and renamed over `path`. On error `path` is untouched.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), WriteError> {
    let wrap = |source: std::io::Error| WriteError {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(wrap)?;
    tmp.write_all(contents.as_bytes()).map_err(wrap)?;
    tmp.as_file().sync_all().map_err(wrap)?;
    tmp.persist(path).map_err(|e| wrap(e.error))?;
    Ok(())
}
