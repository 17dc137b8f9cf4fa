//! Whole-file I/O with write-to-temp-then-rename

use std::fs::{self, OpenOptions};
use std::io::Write;

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Write content to a file through a temp file in the same directory.
///
/// The temp file is locked while written, then renamed over the target.
/// No lock is taken on the target itself: a concurrent writer of the target
/// simply loses or wins the rename.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Same directory keeps the rename on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    let written = temp_file
        .write_all(content)
        .and_then(|()| temp_file.sync_all());
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&temp_path, e));
    }

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;
    drop(temp_file);

    if let Err(e) = fs::rename(&temp_path, &native_path) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&native_path, e));
    }

    tracing::trace!(path = %path, bytes = content.len(), "Wrote file");
    Ok(())
}

/// Read raw bytes from a file.
pub fn read_bytes(path: &NormalizedPath) -> Result<Vec<u8>> {
    let native_path = path.to_native();
    fs::read(&native_path).map_err(|e| Error::from_read(native_path, e))
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::from_read(native_path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Size of a file in bytes.
pub fn file_size(path: &NormalizedPath) -> Result<u64> {
    let native_path = path.to_native();
    fs::metadata(&native_path)
        .map(|m| m.len())
        .map_err(|e| Error::from_read(native_path, e))
}

/// Remove a single file.
pub fn remove_file(path: &NormalizedPath) -> Result<()> {
    let native_path = path.to_native();
    fs::remove_file(&native_path).map_err(|e| Error::from_read(native_path, e))
}

/// Create a directory and any missing parents.
pub fn ensure_dir(path: &NormalizedPath) -> Result<()> {
    let native_path = path.to_native();
    fs::create_dir_all(&native_path).map_err(|e| Error::io(native_path, e))
}

/// List the names of regular files directly inside `dir`.
///
/// A missing directory yields an empty list. Names that are not valid
/// UTF-8 are skipped.
pub fn list_file_names(dir: &NormalizedPath) -> Result<Vec<String>> {
    let native_dir = dir.to_native();
    let entries = match fs::read_dir(&native_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(Error::io(native_dir, e)),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(&native_dir, e))?;
        let is_file = entry
            .file_type()
            .map(|t| t.is_file())
            .map_err(|e| Error::io(entry.path(), e))?;
        if !is_file {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}
