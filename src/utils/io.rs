//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Read file contents with standardized error handling.
///
/// Wraps `fs::read_to_string` with consistent `Error::internal_io` formatting.
pub fn read_file(path: &Path, operation: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Write content to file with standardized error handling.
///
/// Wraps `fs::write` with consistent `Error::internal_io` formatting.
pub fn write_file(path: &Path, content: &str, operation: &str) -> Result<()> {
    fs::write(path, content)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// How [`read_text`] turned a file's bytes into a `String`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    /// One char per byte (ISO-8859-1). Used for anything that is not valid
    /// UTF-8 so the original bytes survive a read/write cycle.
    Latin1,
}

/// Read a file as text without losing bytes.
pub fn read_text(path: &Path, operation: &str) -> Result<(String, TextEncoding)> {
    let bytes = fs::read(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => (text, TextEncoding::Utf8),
        Err(e) => {
            let text = e.as_bytes().iter().map(|&b| char::from(b)).collect();
            (text, TextEncoding::Latin1)
        }
    })
}

/// Write text back in the encoding it was read with.
pub fn write_text(
    path: &Path,
    content: &str,
    encoding: TextEncoding,
    operation: &str,
) -> Result<()> {
    match encoding {
        TextEncoding::Utf8 => write_file(path, content, operation),
        TextEncoding::Latin1 => {
            let bytes = content
                .chars()
                .map(u8::try_from)
                .collect::<std::result::Result<Vec<u8>, _>>()
                .map_err(|e| Error::internal_unexpected(format!("{}: {}", operation, e)))?;
            fs::write(path, bytes)
                .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
        }
    }
}

/// Copy a file, creating the destination's parent directories first.
pub fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        create_dir_all(parent)?;
    }
    fs::copy(from, to).map_err(|e| {
        Error::internal_io(
            e.to_string(),
            Some(format!("copy {} → {}", from.display(), to.display())),
        )
    })?;
    Ok(())
}

pub fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("create {}", path.display()))))
}

/// Remove a directory tree. A missing directory is not an error.
pub fn remove_dir_all(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    fs::remove_dir_all(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("remove {}", path.display()))))
}
