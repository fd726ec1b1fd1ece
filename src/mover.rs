//! Hiding the admin UI from the production bundler.
//!
//! The admin UI is development-only. During a static export its source
//! directory is renamed out of the bundler's tree and renamed back once the
//! bundler has finished, successfully or not.
//!
//! ```text
//! src/app/admin/   ──hide()──▶   admin-backup/
//! src/app/admin/   ◀──restore──  admin-backup/
//! ```
//!
//! [`AdminDir::hide`] hands back an [`AdminGuard`]. The guard puts the
//! directory back exactly once: through [`AdminGuard::restore`] when the
//! caller wants the outcome, or from `Drop` on any other exit path (early
//! return, panic). A failed restore is logged and never replaces the outcome
//! of the work done while the directory was hidden.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MoverError {
    #[error("Failed to move {from} to {to}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
    #[error("Both {admin} and {backup} exist; restore or remove the backup first")]
    BackupInTheWay { admin: PathBuf, backup: PathBuf },
}

/// The admin source directory and where it waits during an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminDir {
    pub original: PathBuf,
    pub backup: PathBuf,
}

/// What a hide or restore call actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// Nothing to move (already hidden, already restored, or never existed).
    NotPresent,
}

impl AdminDir {
    pub fn new(original: impl Into<PathBuf>, backup: impl Into<PathBuf>) -> Self {
        Self {
            original: original.into(),
            backup: backup.into(),
        }
    }

    /// Move the admin directory to the backup path.
    ///
    /// A missing admin directory is not an error; the returned guard then
    /// has nothing of its own to undo but still restores a backup left by an
    /// earlier run.
    pub fn hide(&self) -> Result<AdminGuard, MoverError> {
        let outcome = if self.original.exists() {
            if self.backup.exists() {
                return Err(MoverError::BackupInTheWay {
                    admin: self.original.clone(),
                    backup: self.backup.clone(),
                });
            }
            rename(&self.original, &self.backup)?;
            tracing::info!(
                from = %self.original.display(),
                to = %self.backup.display(),
                "admin directory hidden"
            );
            MoveOutcome::Moved
        } else {
            tracing::debug!(path = %self.original.display(), "no admin directory to hide");
            MoveOutcome::NotPresent
        };
        Ok(AdminGuard {
            dir: Some(self.clone()),
            hidden: outcome,
        })
    }

    /// Move the backup back to the admin path, if there is one.
    pub fn restore(&self) -> Result<MoveOutcome, MoverError> {
        if !self.backup.exists() {
            return Ok(MoveOutcome::NotPresent);
        }
        rename(&self.backup, &self.original)?;
        tracing::info!(path = %self.original.display(), "admin directory restored");
        Ok(MoveOutcome::Moved)
    }
}

fn rename(from: &Path, to: &Path) -> Result<(), MoverError> {
    std::fs::rename(from, to).map_err(|source| MoverError::Rename {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}

/// Scoped ownership of a hidden admin directory.
///
/// Restores on [`restore`](Self::restore) or on drop, whichever comes first.
#[must_use = "dropping the guard immediately restores the admin directory"]
#[derive(Debug)]
pub struct AdminGuard {
    dir: Option<AdminDir>,
    hidden: MoveOutcome,
}

impl AdminGuard {
    /// What `hide()` did when this guard was created.
    pub fn hide_outcome(&self) -> MoveOutcome {
        self.hidden
    }

    /// Restore now and report the outcome. Consumes the guard so the
    /// directory can't be restored twice.
    pub fn restore(mut self) -> Result<MoveOutcome, MoverError> {
        match self.dir.take() {
            Some(dir) => dir.restore(),
            None => Ok(MoveOutcome::NotPresent),
        }
    }
}

impl Drop for AdminGuard {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take()
            && let Err(e) = dir.restore()
        {
            tracing::error!(error = %e, "failed to restore admin directory");
        }
    }
}
