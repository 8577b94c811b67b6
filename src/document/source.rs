//! Reading and validating input before anything is rendered.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Why an input was rejected at startup.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("{} is a directory, not a file", .0.display())]
    IsDirectory(PathBuf),
    #[error("{0} is empty")]
    Empty(String),
    #[error("{0} appears to be a binary file")]
    Binary(String),
    #[error("failed to read {name}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
}

/// Read a file and check it is non-empty text.
pub fn read_file(path: &Path) -> Result<String, SourceError> {
    let bytes = read_bytes(path)?;
    validate(bytes, &path.display().to_string())
}

/// Read a file and prepare it for compiling (see [`super::prepare_content`]).
pub fn load_file(path: &Path) -> Result<String, SourceError> {
    read_file(path).map(|content| super::prepare_content(path, content))
}

/// Re-read a file that is already being paged.
///
/// Unlike [`load_file`] the content is not validated: an emptied file
/// compiles to an empty document. Only a failed read is an error.
pub fn reload_file(path: &Path) -> Result<String, SourceError> {
    let bytes = read_bytes(path)?;
    let text = decode(bytes);
    if text.trim().is_empty() {
        return Ok(text);
    }
    Ok(super::prepare_content(path, text))
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, SourceError> {
    let name = path.display().to_string();
    let metadata = std::fs::metadata(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => SourceError::NotFound(path.to_path_buf()),
        _ => SourceError::Io {
            name: name.clone(),
            source: err,
        },
    })?;
    if metadata.is_dir() {
        return Err(SourceError::IsDirectory(path.to_path_buf()));
    }
    std::fs::read(path).map_err(|source| SourceError::Io { name, source })
}

/// Read all of standard input.
pub fn read_stdin() -> Result<String, SourceError> {
    let name = "standard input".to_string();
    let mut bytes = Vec::new();
    io::stdin()
        .lock()
        .read_to_end(&mut bytes)
        .map_err(|source| SourceError::Io {
            name: name.clone(),
            source,
        })?;
    validate(bytes, &name)
}

/// Reject binary-looking or blank content; decode the rest as UTF-8.
///
/// Any NUL byte marks the input as binary. Invalid UTF-8 sequences are
/// replaced rather than rejected.
pub fn validate(bytes: Vec<u8>, name: &str) -> Result<String, SourceError> {
    if bytes.contains(&0) {
        return Err(SourceError::Binary(name.to_string()));
    }
    let text = decode(bytes);
    if text.trim().is_empty() {
        return Err(SourceError::Empty(name.to_string()));
    }
    Ok(text)
}

fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}
