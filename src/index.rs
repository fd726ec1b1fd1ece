//! The blog index: every post, minus its body, in one sorted JSON array.
//!
//! The static site lists, searches and filters posts from this single file
//! instead of fetching each post. It is derived from the blog tree and
//! rebuilt on every export; nobody edits it by hand.
//!
//! ## Collection
//!
//! ```text
//! categories.json order
//!   └─ subcategory order
//!        └─ *.json files in the pair directory, by file name
//! ```
//!
//! Each post is indexed as written, minus `content`: fields the typed model
//! doesn't know, or values outside its enums, pass through untouched.
//!
//! A pair without a directory contributes nothing. Any other failure (missing
//! or malformed `categories.json`, an unreadable post, invalid JSON, a post
//! that isn't an object or has no `publishDate`) aborts collection: a partial
//! index would silently drop posts.
//!
//! ## Ordering
//!
//! Newest publish date first. The sort is stable, so equal dates keep
//! collection order. RFC 3339, offset-less ISO date-times and `YYYY-MM-DD`
//! are understood (the last two as UTC); anything else goes last.
//!
//! ## Writing
//!
//! [`write_index`] always leaves a valid file behind: on a collection failure
//! it writes `[]` instead. Writes go through a temp file and a rename, so a
//! reader never sees a half-written index.

use crate::store::{ContentStore, StoreError, read_json};
use crate::types::BlogListItem;
use serde_json::{Map, Value};
use std::cmp::Reverse;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

#[derive(Error, Debug)]
pub enum IndexError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Post {path} is not a JSON object")]
    NotAnObject { path: PathBuf },
    #[error("Post {path} has no string publishDate")]
    MissingPublishDate { path: PathBuf },
    #[error("Failed to write index {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One index entry: the post document as written, minus `content`.
pub type IndexEntry = Map<String, Value>;

/// What [`write_index`] ended up writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexOutcome {
    /// The full index with `count` entries.
    Built { count: usize },
    /// Collection failed; an empty array was written instead.
    Fallback { reason: String },
}

/// Parse a publish date for ordering.
///
/// Accepts an RFC 3339 date-time, an ISO date-time without an offset, or an
/// ISO calendar date. Values without an offset are taken as UTC. Returns
/// `None` for anything else.
pub fn publish_instant(date: &str) -> Option<OffsetDateTime> {
    let date = date.trim();
    if let Ok(dt) = OffsetDateTime::parse(date, &Rfc3339) {
        return Some(dt);
    }
    let local = [
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]"),
    ];
    if let Some(dt) = local
        .iter()
        .find_map(|format| PrimitiveDateTime::parse(date, *format).ok())
    {
        return Some(dt.assume_utc());
    }
    Date::parse(date, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|d| d.midnight().assume_utc())
}

/// Stable sort by the date `date_of` returns, newest first; unparseable
/// dates last.
pub fn sort_by_publish_date<T>(items: &mut [T], date_of: impl Fn(&T) -> &str) {
    // (has_date, instant) sorts undated below every dated entry once reversed.
    items.sort_by_key(|item| {
        let instant = publish_instant(date_of(item));
        Reverse((instant.is_some(), instant))
    });
}

pub fn sort_newest_first(posts: &mut [BlogListItem]) {
    sort_by_publish_date(posts, |p| p.publish_date.as_str());
}

fn entry_date(entry: &IndexEntry) -> &str {
    entry
        .get("publishDate")
        .and_then(Value::as_str)
        .unwrap_or_default()
}

/// Turn a raw post document into an index entry.
///
/// Fields are passed through untouched; only `content` is removed. The post
/// must be an object with a string `publishDate`.
pub fn index_entry(path: &Path, post: Value) -> Result<IndexEntry, IndexError> {
    let Value::Object(mut entry) = post else {
        return Err(IndexError::NotAnObject {
            path: path.to_path_buf(),
        });
    };
    if !entry.get("publishDate").is_some_and(Value::is_string) {
        return Err(IndexError::MissingPublishDate {
            path: path.to_path_buf(),
        });
    }
    entry.remove("content");
    Ok(entry)
}

/// Walk the blog tree and produce the sorted index entries.
pub fn collect_index(store: &ContentStore) -> Result<Vec<IndexEntry>, IndexError> {
    let mut entries = Vec::new();
    for category in store.categories()? {
        for sub in &category.subcategories {
            let Some(files) = store.list_pair(&category.id, &sub.id)? else {
                tracing::debug!(
                    category = %category.id,
                    subcategory = %sub.id,
                    "no directory for pair"
                );
                continue;
            };
            for file in files {
                let post: Value = read_json(&file)?;
                entries.push(index_entry(&file, post)?);
            }
        }
    }
    sort_by_publish_date(&mut entries, entry_date);
    Ok(entries)
}

/// Replace `path` with `json` via a sibling temp file.
fn write_atomic(path: &Path, json: &str) -> Result<(), IndexError> {
    let write_err = |source| IndexError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);
    fs::write(&tmp, json).map_err(write_err)?;
    fs::rename(&tmp, path).map_err(write_err)
}

/// Build the index and write it to `out`, falling back to `[]`.
///
/// Only a failure to write the file itself is returned as an error.
pub fn write_index(store: &ContentStore, out: &Path) -> Result<IndexOutcome, IndexError> {
    match collect_index(store) {
        Ok(entries) => {
            write_atomic(out, &serde_json::to_string_pretty(&entries)?)?;
            tracing::info!(count = entries.len(), path = %out.display(), "blog index built");
            Ok(IndexOutcome::Built {
                count: entries.len(),
            })
        }
        Err(e) => {
            tracing::error!(error = %e, "blog index failed; writing empty index");
            write_atomic(out, "[]")?;
            Ok(IndexOutcome::Fallback {
                reason: e.to_string(),
            })
        }
    }
}
