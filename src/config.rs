//! Project configuration.
//!
//! Handles loading, validating, and merging `folio.toml`. The file is optional
//! and sparse: stock defaults describe the usual portfolio layout, and a
//! project's `folio.toml` overrides only what differs.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [paths]
//! data_dir = "src/data"              # Private data root (edited by the admin)
//! public_data_dir = "public/data"    # Public data root (served as-is)
//! admin_dir = "src/app/admin"        # Admin UI source, hidden during export
//! admin_backup_dir = "admin-backup"  # Where the admin UI waits during export
//! index_file = "blogs-index.json"    # Generated index, inside public_data_dir
//! flat_files = ["profile.json", "experience.json", "skills.json"]
//!
//! [bundler]
//! command = ["npx", "next", "build"]
//!
//! [deploy]
//! pages_base_path = "/personal-portfolio-v1"
//! ```
//!
//! Relative paths resolve against the project root. Unknown keys are
//! rejected to catch typos early.
//!
//! ## Environment
//!
//! The two deployment switches live in the environment, not the file, and are
//! read exactly once by the binary. [`BuildOptions::from_env_values`] folds
//! them into a plain struct that the pipeline receives explicitly.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file in the project root.
pub const CONFIG_FILE: &str = "folio.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Project configuration loaded from `folio.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Content and output locations.
    pub paths: PathsConfig,
    /// The external site bundler.
    pub bundler: BundlerConfig,
    /// Deployment target settings.
    pub deploy: DeployConfig,
}

impl ProjectConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bundler.command.is_empty() || self.bundler.command[0].trim().is_empty() {
            return Err(ConfigError::Validation(
                "bundler.command must name a program".into(),
            ));
        }
        if self.paths.admin_dir == self.paths.admin_backup_dir {
            return Err(ConfigError::Validation(
                "paths.admin_dir and paths.admin_backup_dir must differ".into(),
            ));
        }
        if self.paths.data_dir == self.paths.public_data_dir {
            return Err(ConfigError::Validation(
                "paths.data_dir and paths.public_data_dir must differ".into(),
            ));
        }
        if self.paths.index_file.is_empty() || self.paths.index_file.contains('/') {
            return Err(ConfigError::Validation(
                "paths.index_file must be a plain file name".into(),
            ));
        }
        if !self.deploy.pages_base_path.is_empty() && !self.deploy.pages_base_path.starts_with('/')
        {
            return Err(ConfigError::Validation(
                "deploy.pages_base_path must start with '/'".into(),
            ));
        }
        Ok(())
    }
}

/// Content and output locations, relative to the project root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Private data root: profile, experience, skills and the blog tree.
    pub data_dir: String,
    /// Public data root: the snapshot the static site fetches.
    pub public_data_dir: String,
    /// Admin UI source directory, moved aside during a static export.
    pub admin_dir: String,
    /// Temporary location of the admin UI during a static export.
    pub admin_backup_dir: String,
    /// File name of the generated blog index inside `public_data_dir`.
    pub index_file: String,
    /// Top-level documents copied verbatim into the public data root.
    pub flat_files: Vec<String>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: "src/data".to_string(),
            public_data_dir: "public/data".to_string(),
            admin_dir: "src/app/admin".to_string(),
            admin_backup_dir: "admin-backup".to_string(),
            index_file: "blogs-index.json".to_string(),
            flat_files: vec![
                "profile.json".to_string(),
                "experience.json".to_string(),
                "skills.json".to_string(),
            ],
        }
    }
}

/// External bundler invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BundlerConfig {
    /// Program followed by its arguments, run from the project root.
    pub command: Vec<String>,
}

impl Default for BundlerConfig {
    fn default() -> Self {
        Self {
            command: vec!["npx".to_string(), "next".to_string(), "build".to_string()],
        }
    }
}

/// Deployment target settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeployConfig {
    /// Base path used when deploying to a GitHub Pages project site.
    pub pages_base_path: String,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            pages_base_path: "/personal-portfolio-v1".to_string(),
        }
    }
}

/// Absolute locations resolved from [`PathsConfig`] against a project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub data_dir: PathBuf,
    pub public_data_dir: PathBuf,
    pub admin_dir: PathBuf,
    pub admin_backup_dir: PathBuf,
    pub index_file: PathBuf,
}

impl ProjectPaths {
    pub fn resolve(root: &Path, paths: &PathsConfig) -> Self {
        let public_data_dir = root.join(&paths.public_data_dir);
        Self {
            root: root.to_path_buf(),
            data_dir: root.join(&paths.data_dir),
            index_file: public_data_dir.join(&paths.index_file),
            public_data_dir,
            admin_dir: root.join(&paths.admin_dir),
            admin_backup_dir: root.join(&paths.admin_backup_dir),
        }
    }
}

/// Per-run switches for the export pipeline.
///
/// Built once at start-up; components never consult the environment
/// themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Production/static export: the admin UI must not ship.
    pub is_static_export: bool,
    /// Prefix for every site-relative URL ("" at a domain root).
    pub base_path: String,
}

impl BuildOptions {
    /// Derive options from the raw values of `NODE_ENV` and `GITHUB_PAGES`.
    ///
    /// - `NODE_ENV=production` or `GITHUB_PAGES=true` → static export
    /// - `GITHUB_PAGES=true` → base path from `deploy.pages_base_path`
    pub fn from_env_values(
        node_env: Option<&str>,
        github_pages: Option<&str>,
        deploy: &DeployConfig,
    ) -> Self {
        let pages = github_pages.is_some_and(|v| v == "true");
        let production = node_env.is_some_and(|v| v == "production");
        Self {
            is_static_export: production || pages,
            base_path: if pages {
                deploy.pages_base_path.clone()
            } else {
                String::new()
            },
        }
    }

    /// Whether the base path targets a GitHub Pages project site.
    pub fn is_pages_deploy(&self) -> bool {
        !self.base_path.is_empty()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(ProjectConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `folio.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file doesn't exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ProjectConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ProjectConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the project config from `folio.toml` in `root`, falling back to
/// stock defaults when the file is absent.
pub fn load_config(root: &Path) -> Result<ProjectConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `folio.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# folio configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.
#
# Deployment switches come from the environment, not this file:
#   NODE_ENV=production  -> static export (admin UI is moved aside)
#   GITHUB_PAGES=true    -> static export + base path from [deploy]

# ---------------------------------------------------------------------------
# Locations, relative to the project root
# ---------------------------------------------------------------------------
[paths]
# Private data root edited by the admin UI.
data_dir = "src/data"

# Public data root the static site fetches from.
public_data_dir = "public/data"

# Admin UI source directory; hidden from the bundler during a static export.
admin_dir = "src/app/admin"

# Where the admin UI is parked while the bundler runs.
admin_backup_dir = "admin-backup"

# Generated blog index, written inside public_data_dir.
index_file = "blogs-index.json"

# Documents copied verbatim from data_dir to public_data_dir.
flat_files = ["profile.json", "experience.json", "skills.json"]

# ---------------------------------------------------------------------------
# Site bundler
# ---------------------------------------------------------------------------
[bundler]
# Program and arguments, run from the project root after the data is staged.
command = ["npx", "next", "build"]

# ---------------------------------------------------------------------------
# Deployment
# ---------------------------------------------------------------------------
[deploy]
# Base path for a GitHub Pages project site (used when GITHUB_PAGES=true).
pages_base_path = "/personal-portfolio-v1"
"##
}
