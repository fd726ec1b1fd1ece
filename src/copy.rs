//! Publishing the private data root as a public snapshot.
//!
//! Two operations, both byte-for-byte and both idempotent (re-running
//! overwrites destination files with the current source content):
//!
//! - [`copy_flat_files`]: the top-level documents (`profile.json`,
//!   `experience.json`, `skills.json`).
//! - [`copy_tree`]: a recursive mirror, used for the `blogs/` tree.
//!
//! Flat files are copied in order and the first failure stops the rest; a
//! half-published portfolio is worse than a failed build.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum CopyError {
    #[error("Source file missing: {0}")]
    MissingSource(PathBuf),
    #[error("Failed to copy {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
}

/// Counts of what a copy operation touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyReport {
    pub files: usize,
    pub dirs: usize,
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> CopyError + '_ {
    move |source| CopyError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Copy each named file from `src_root` to `dst_root`.
///
/// Sequential; stops at the first missing or unreadable file.
pub fn copy_flat_files<S: AsRef<str>>(
    src_root: &Path,
    dst_root: &Path,
    names: &[S],
) -> Result<CopyReport, CopyError> {
    fs::create_dir_all(dst_root).map_err(io_err(dst_root))?;
    let mut report = CopyReport::default();
    for name in names {
        let src = src_root.join(name.as_ref());
        if !src.is_file() {
            return Err(CopyError::MissingSource(src));
        }
        let dst = dst_root.join(name.as_ref());
        fs::copy(&src, &dst).map_err(io_err(&src))?;
        tracing::debug!(file = %name.as_ref(), "copied");
        report.files += 1;
    }
    Ok(report)
}

/// Mirror `src` into `dst`, creating directories as needed.
///
/// Symlinks are not followed; anything that isn't a directory is copied as a
/// file.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<CopyReport, CopyError> {
    if !src.is_dir() {
        return Err(CopyError::MissingSource(src.to_path_buf()));
    }
    let mut report = CopyReport::default();
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry.map_err(|source| CopyError::Walk {
            path: src.to_path_buf(),
            source,
        })?;
        // strip_prefix can't fail: walkdir yields paths under its root.
        let rel = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            if !target.is_dir() {
                fs::create_dir_all(&target).map_err(io_err(&target))?;
                report.dirs += 1;
            }
        } else {
            fs::copy(entry.path(), &target).map_err(io_err(entry.path()))?;
            report.files += 1;
        }
    }
    Ok(report)
}
