// # 📂 src/batch/io.rs

//! File-system edges of the pipeline: flat input listing, whole-file reads,
//! and output writes that never leave a partial artifact behind.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use crate::types::{ConfigError, TaskError};

/// List the regular files directly inside `dir`, sorted by path.
///
/// No recursion: subdirectories are skipped, symlinks are followed, broken
/// links are skipped. Hidden files are included, except staging files left
/// behind by an interrupted `write_output`.
pub fn list_input_files(dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let dir_err = |source| ConfigError::InputDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(dir_err)? {
        let path = entry.map_err(dir_err)?.path();
        if is_staging_name(&path) {
            tracing::debug!("[LIST] skipping staging file {}", path.display());
            continue;
        }
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => files.push(path),
            Ok(_) => tracing::debug!("[LIST] skipping non-file {}", path.display()),
            Err(e) => tracing::debug!("[LIST] skipping unreadable entry {}: {}", path.display(), e),
        }
    }
    files.sort();
    Ok(files)
}

/// Read a whole input file.
pub fn read_input(path: &Path) -> Result<Vec<u8>, TaskError> {
    fs::read(path).map_err(|source| TaskError::ReadInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `bytes` to `path`.
///
/// Data lands in a hidden sibling first and is renamed into place, so `path`
/// only ever holds a complete artifact. On failure the sibling is removed and
/// any pre-existing `path` is left untouched.
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<(), TaskError> {
    let write_err = |source| TaskError::WriteOutput {
        path: path.to_path_buf(),
        source,
    };

    let staging = staging_path(path);
    if let Err(e) = fs::write(&staging, bytes) {
        let _ = fs::remove_file(&staging);
        return Err(write_err(e));
    }
    if let Err(e) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(write_err(e));
    }
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = std::ffi::OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(format!(".{}.partial", process::id()));
    path.with_file_name(name)
}

/// Matches the `.<name>.<pid>.partial` shape produced by `staging_path`.
fn is_staging_name(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy();
    let Some(rest) = name.strip_prefix('.').and_then(|n| n.strip_suffix(".partial")) else {
        return false;
    };
    match rest.rsplit_once('.') {
        Some((base, pid)) => {
            !base.is_empty() && !pid.is_empty() && pid.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}
