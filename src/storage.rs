//! Scoped JSON file access shared by the config and histogram stores.
//!
//! Reads treat a missing file as "nothing stored yet". Writes create the
//! parent directory and replace the target atomically through a temp file in
//! the same directory, so an interrupted write never leaves a truncated file.

use crate::error::{DeeplerError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::trace;

/// Expand a leading `~` component to the current user's home directory.
///
/// Works on whole path components, so `~user/x` and non-UTF-8 names pass
/// through untouched.
pub fn expand_home(path: &Path) -> Result<PathBuf> {
    let Ok(rest) = path.strip_prefix("~") else {
        return Ok(path.to_path_buf());
    };
    let home =
        dirs::home_dir().ok_or_else(|| DeeplerError::NoHomeDir(path.display().to_string()))?;
    Ok(if rest.as_os_str().is_empty() {
        home
    } else {
        home.join(rest)
    })
}

/// Read and deserialize `path`; `Ok(None)` when the file does not exist.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            trace!(path = %path.display(), "no file yet");
            return Ok(None);
        }
        Err(e) => return Err(DeeplerError::io(path, e)),
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| DeeplerError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Serialize `value` into `path`, replacing previous content.
pub fn write_json<T: Serialize>(path: &Path, value: &T, pretty: bool) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir).map_err(|e| DeeplerError::io(parent_dir, e))?;

    let bytes = if pretty {
        serde_json::to_vec_pretty(value)?
    } else {
        serde_json::to_vec(value)?
    };

    let temp_file =
        NamedTempFile::new_in(parent_dir).map_err(|e| DeeplerError::io(parent_dir, e))?;
    write_bytes(temp_file.as_file(), &bytes, path)?;

    temp_file.persist(path).map_err(|e| DeeplerError::io(path, e.error))?;
    trace!(path = %path.display(), bytes = bytes.len(), "written");
    Ok(())
}

/// Failures here are reported against `path`, the file being replaced.
fn write_bytes(mut writer: impl Write, bytes: &[u8], path: &Path) -> Result<()> {
    writer
        .write_all(bytes)
        .and_then(|()| writer.flush())
        .map_err(|e| DeeplerError::io(path, e))
}
