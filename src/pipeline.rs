//! The static-export pipeline.
//!
//! ```text
//! Idle → HidingAdmin → CopyingContent → BuildingIndex → Compiling → RestoringAdmin → Done
//!            \___________________________________________________________/
//!                      any failure → RestoringAdmin → Failed
//! ```
//!
//! 1. **Hide admin** (static exports only): move the admin UI out of the
//!    bundler's tree. Failure aborts before anything is copied.
//! 2. **Copy content**: flat documents, then the `blogs/` tree, into the
//!    public data root.
//! 3. **Build index**: write `blogs-index.json`; a bad post degrades to an
//!    empty index rather than failing the build.
//! 4. **Compile**: run the external bundler.
//! 5. **Restore admin**: always, through the [`AdminGuard`]; a restore
//!    failure is reported but the build's outcome stands.
//!
//! Steps run strictly in order on the calling thread. Progress is streamed as
//! [`BuildEvent`]s over an optional channel so the CLI can print while the
//! pipeline runs.

use crate::bundler::{BundleError, Bundler};
use crate::config::{BuildOptions, ProjectConfig, ProjectPaths};
use crate::copy::{self, CopyError, CopyReport};
use crate::index::{self, IndexError, IndexOutcome};
use crate::mover::{AdminDir, AdminGuard, MoveOutcome, MoverError};
use crate::store::{BLOGS_DIR, ContentStore};
use std::fmt;
use std::path::Path;
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Hiding admin directory failed: {0}")]
    Hide(#[from] MoverError),
    #[error("Copying content failed: {0}")]
    Copy(#[from] CopyError),
    #[error("Writing blog index failed: {0}")]
    Index(#[from] IndexError),
    #[error("Bundler failed: {0}")]
    Bundle(#[from] BundleError),
}

/// Pipeline states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    HidingAdmin,
    CopyingContent,
    BuildingIndex,
    Compiling,
    RestoringAdmin,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Idle => "idle",
            Stage::HidingAdmin => "hiding admin",
            Stage::CopyingContent => "copying content",
            Stage::BuildingIndex => "building index",
            Stage::Compiling => "compiling",
            Stage::RestoringAdmin => "restoring admin",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Progress reported while the pipeline runs.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildEvent {
    Entered(Stage),
    AdminHidden(MoveOutcome),
    ContentCopied { flat: CopyReport, tree: CopyReport },
    IndexWritten(IndexOutcome),
    AdminRestored(MoveOutcome),
    /// Restoration failed; the admin directory is still at the backup path.
    RestoreFailed(String),
    Finished { stage: Stage, error: Option<String> },
}

/// What a data-only run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct DataReport {
    pub flat: CopyReport,
    pub tree: CopyReport,
    pub index: IndexOutcome,
}

/// What a successful build did.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub data: DataReport,
    /// `None` when the build wasn't a static export.
    pub admin_hidden: Option<MoveOutcome>,
    /// `None` when nothing was restored or restoring failed.
    pub admin_restored: Option<MoveOutcome>,
}

/// Everything the pipeline needs, resolved up front.
#[derive(Debug, Clone)]
pub struct BuildPlan {
    pub paths: ProjectPaths,
    pub flat_files: Vec<String>,
    pub options: BuildOptions,
}

impl BuildPlan {
    pub fn new(root: &Path, config: &ProjectConfig, options: BuildOptions) -> Self {
        Self {
            paths: ProjectPaths::resolve(root, &config.paths),
            flat_files: config.paths.flat_files.clone(),
            options,
        }
    }

    pub fn admin_dir(&self) -> AdminDir {
        AdminDir::new(&self.paths.admin_dir, &self.paths.admin_backup_dir)
    }

    pub fn store(&self) -> ContentStore {
        ContentStore::new(&self.paths.data_dir)
    }
}

struct Events(Option<Sender<BuildEvent>>);

impl Events {
    fn send(&self, event: BuildEvent) {
        if let Some(tx) = &self.0 {
            // The receiver going away only means nobody is printing.
            let _ = tx.send(event);
        }
    }
}

/// Steps 2 and 3: publish the data root and write the index.
pub fn stage_data(
    plan: &BuildPlan,
    events: Option<Sender<BuildEvent>>,
) -> Result<DataReport, BuildError> {
    stage_data_with(plan, &Events(events))
}

fn stage_data_with(plan: &BuildPlan, events: &Events) -> Result<DataReport, BuildError> {
    let paths = &plan.paths;

    events.send(BuildEvent::Entered(Stage::CopyingContent));
    let flat = copy::copy_flat_files(&paths.data_dir, &paths.public_data_dir, &plan.flat_files)?;
    let tree = copy::copy_tree(
        &paths.data_dir.join(BLOGS_DIR),
        &paths.public_data_dir.join(BLOGS_DIR),
    )?;
    events.send(BuildEvent::ContentCopied { flat, tree });

    events.send(BuildEvent::Entered(Stage::BuildingIndex));
    let index = index::write_index(&plan.store(), &paths.index_file)?;
    events.send(BuildEvent::IndexWritten(index.clone()));

    Ok(DataReport { flat, tree, index })
}

/// Run the full pipeline.
///
/// The admin directory is restored before this returns, whatever happened in
/// between. Errors from steps 1–4 are returned after that restoration.
pub fn build(
    plan: &BuildPlan,
    bundler: &dyn Bundler,
    events: Option<Sender<BuildEvent>>,
) -> Result<BuildReport, BuildError> {
    let events = Events(events);
    events.send(BuildEvent::Entered(Stage::Idle));

    let guard = if plan.options.is_static_export {
        events.send(BuildEvent::Entered(Stage::HidingAdmin));
        match plan.admin_dir().hide() {
            Ok(guard) => {
                events.send(BuildEvent::AdminHidden(guard.hide_outcome()));
                Some(guard)
            }
            Err(e) => {
                // Nothing was moved, so there is nothing to restore.
                events.send(BuildEvent::Finished {
                    stage: Stage::Failed,
                    error: Some(e.to_string()),
                });
                return Err(e.into());
            }
        }
    } else {
        None
    };
    let admin_hidden = guard.as_ref().map(AdminGuard::hide_outcome);

    let result = stage_and_compile(plan, bundler, &events);

    let admin_restored = guard.and_then(|guard| {
        events.send(BuildEvent::Entered(Stage::RestoringAdmin));
        match guard.restore() {
            Ok(outcome) => {
                events.send(BuildEvent::AdminRestored(outcome));
                Some(outcome)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to restore admin directory");
                events.send(BuildEvent::RestoreFailed(e.to_string()));
                None
            }
        }
    });

    match result {
        Ok(data) => {
            events.send(BuildEvent::Finished {
                stage: Stage::Done,
                error: None,
            });
            Ok(BuildReport {
                data,
                admin_hidden,
                admin_restored,
            })
        }
        Err(e) => {
            events.send(BuildEvent::Finished {
                stage: Stage::Failed,
                error: Some(e.to_string()),
            });
            Err(e)
        }
    }
}

fn stage_and_compile(
    plan: &BuildPlan,
    bundler: &dyn Bundler,
    events: &Events,
) -> Result<DataReport, BuildError> {
    let data = stage_data_with(plan, events)?;
    events.send(BuildEvent::Entered(Stage::Compiling));
    bundler.bundle(&plan.options)?;
    Ok(data)
}
