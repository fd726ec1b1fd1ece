//! The external site bundler.
//!
//! folio stages content; something else (by default `next build`) turns the
//! site source plus that content into deployable files. The [`Bundler`] trait
//! is the seam between the two so the pipeline can be exercised without a
//! JavaScript toolchain.
//!
//! [`CommandBundler`] runs the configured command from the project root with
//! its output inherited, and exports the deployment switches the site's own
//! config reads:
//!
//! | Variable | Value |
//! |----------|-------|
//! | `NODE_ENV` | `production` for a static export |
//! | `GITHUB_PAGES` | `true` when a base path is set |
//! | `FOLIO_BASE_PATH` | the base path (possibly empty) |

use crate::config::BuildOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BundleError {
    #[error("Failed to start {program}: {source}")]
    Spawn { program: String, source: io::Error },
    #[error("{program} exited with {status}")]
    Failed { program: String, status: String },
    #[error("Bundler command is empty")]
    EmptyCommand,
}

/// Compiles the site once content is staged.
pub trait Bundler {
    fn bundle(&self, options: &BuildOptions) -> Result<(), BundleError>;
}

/// Runs an external program as the bundler.
#[derive(Debug, Clone)]
pub struct CommandBundler {
    command: Vec<String>,
    working_dir: PathBuf,
}

impl CommandBundler {
    pub fn new(command: Vec<String>, working_dir: &Path) -> Self {
        Self {
            command,
            working_dir: working_dir.to_path_buf(),
        }
    }

    /// Environment handed to the bundler for these options.
    pub fn env_vars(options: &BuildOptions) -> Vec<(&'static str, String)> {
        let mut vars = Vec::new();
        if options.is_static_export {
            vars.push(("NODE_ENV", "production".to_string()));
        }
        if options.is_pages_deploy() {
            vars.push(("GITHUB_PAGES", "true".to_string()));
        }
        vars.push(("FOLIO_BASE_PATH", options.base_path.clone()));
        vars
    }
}

impl Bundler for CommandBundler {
    fn bundle(&self, options: &BuildOptions) -> Result<(), BundleError> {
        let (program, args) = self.command.split_first().ok_or(BundleError::EmptyCommand)?;
        tracing::info!(command = %self.command.join(" "), "running bundler");
        let status = Command::new(program)
            .args(args)
            .current_dir(&self.working_dir)
            .envs(Self::env_vars(options))
            .status()
            .map_err(|source| BundleError::Spawn {
                program: program.clone(),
                source,
            })?;
        if !status.success() {
            return Err(BundleError::Failed {
                program: program.clone(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}
