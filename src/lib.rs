//! # Folio
//!
//! The content side of a portfolio and blog site. All content lives as JSON
//! documents under a private data root; folio manages those documents and
//! publishes them for a static export.
//!
//! # Architecture: Export Pipeline
//!
//! A static export runs five steps, strictly in order:
//!
//! ```text
//! 1. Hide admin     src/app/admin/   →  admin-backup/       (keep the admin UI out of the bundle)
//! 2. Copy content   src/data/        →  public/data/        (flat documents + blogs/ tree)
//! 3. Build index    public/data/blogs-index.json            (every post, no bodies, newest first)
//! 4. Compile        external bundler (default `npx next build`)
//! 5. Restore admin  admin-backup/    →  src/app/admin/      (always, even on failure)
//! ```
//!
//! Steps 2 and 3 alone are the `data` build, used when only the published
//! content needs refreshing.
//!
//! # Content Layout
//!
//! ```text
//! src/data/
//! ├── profile.json
//! ├── experience.json
//! ├── skills.json
//! └── blogs/
//!     ├── categories.json                 # category → subcategory taxonomy
//!     └── <category>/<subcategory>/<id>.json
//! ```
//!
//! Only pairs listed in `categories.json` are visible: a post file under an
//! unlisted pair is an orphan and never reaches the index.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`pipeline`] | Orchestrates the export and reports progress as events |
//! | [`mover`] | Hides and restores the admin directory; [`mover::AdminGuard`] restores on drop |
//! | [`copy`] | Copies flat documents and the blog tree into the public data root |
//! | [`index`] | Builds the sorted blog index, falling back to `[]` |
//! | [`bundler`] | The [`bundler::Bundler`] seam and the external-command implementation |
//! | [`store`] | File-backed CRUD over posts, categories and portfolio documents |
//! | [`config`] | `folio.toml` loading, validation and merging; per-run [`config::BuildOptions`] |
//! | [`types`] | Serialized content documents (`Post`, `Category`, `Profile`, ...) |
//! | [`naming`] | Slugs, post URLs and reading time |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Restoration Is Scoped
//!
//! Hiding the admin directory hands back an [`mover::AdminGuard`]. The
//! pipeline restores through it explicitly so it can report the outcome, and
//! the guard's `Drop` covers early returns and panics. A backup left behind by
//! a crashed run blocks the next hide instead of being overwritten, and
//! `folio restore-admin` puts it back.
//!
//! ## The Index Never Breaks the Site
//!
//! Any problem collecting posts writes `[]` rather than a partial or missing
//! index: the blog shows no posts instead of failing to load. The failure is
//! logged and surfaced in the build output.
//!
//! ## Explicit Build Options
//!
//! `NODE_ENV` and `GITHUB_PAGES` are read once at start-up and folded into
//! [`config::BuildOptions`]. Nothing below `main` looks at the environment,
//! which keeps every pipeline step testable with plain values.
//!
//! ## Unknown Fields Survive
//!
//! Content documents keep fields folio doesn't model, so a round trip through
//! [`store::ContentStore`] never drops data the site itself may use.

pub mod bundler;
pub mod config;
pub mod copy;
pub mod index;
pub mod mover;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
