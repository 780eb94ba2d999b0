// src/file.rs

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::config::options::ExportOptions;
use crate::error::{Error, Result};

/// Write rendered output where `export` says: a file (parents created) or
/// stdout. Returns the path written, `None` for stdout.
pub fn write_export(export: &ExportOptions, contents: &str) -> Result<Option<PathBuf>> {
    match export.out_path() {
        Some(path) => {
            write_file(&path, contents)?;
            logf!("wrote {}", path.display());
            Ok(Some(path))
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(contents.as_bytes())?;
            lock.flush()?;
            Ok(None)
        }
    }
}

/// Create/truncate `path` with `contents`, creating parent directories.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
