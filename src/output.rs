//! CLI output formatting.
//!
//! Every listing leads with what the thing *is* (positional index, title or
//! name) and puts file locations on indented context lines, so output reads
//! as a content inventory first.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! ==> hiding admin
//!     Admin: moved to backup
//! ==> copying content
//!     Copied 3 documents, 4 blog files (5 new directories)
//! ==> building index
//!     Index: 3 posts
//! ==> compiling
//! ==> restoring admin
//!     Admin: restored
//! ==> done
//! ```
//!
//! ## Posts
//!
//! ```text
//! 001 Docker Basics [published]
//!     2024-09-01 · devops/docker · 3 min read
//!     /blog/devops/docker/docker-basics
//! 002 CSS Grid [draft, featured]
//!     2024-01-01 · web-development/frontend · 5 min read
//!     /blog/web-development/frontend/css-grid
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure.

use crate::index::IndexOutcome;
use crate::mover::MoveOutcome;
use crate::naming;
use crate::pipeline::{BuildEvent, DataReport};
use crate::store::ContentStats;
use crate::types::{BlogListItem, Category, Post};
use std::path::{Path, PathBuf};

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate to `max` characters, appending `...` if anything was cut.
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    format!("{} {}", n, if n == 1 { one } else { many })
}

/// `[published]`, `[draft, featured]`, ...
fn post_flags(published: bool, featured: bool) -> String {
    let mut flags = vec![if published { "published" } else { "draft" }];
    if featured {
        flags.push("featured");
    }
    format!("[{}]", flags.join(", "))
}

fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// Pipeline
// ============================================================================

fn move_outcome_line(label: &str, outcome: MoveOutcome, moved: &str) -> String {
    match outcome {
        MoveOutcome::Moved => format!("    {}: {}", label, moved),
        MoveOutcome::NotPresent => format!("    {}: nothing to move", label),
    }
}

/// Summarize an index outcome.
pub fn format_index_outcome(outcome: &IndexOutcome) -> Vec<String> {
    match outcome {
        IndexOutcome::Built { count } => {
            vec![format!("    Index: {}", plural(*count, "post", "posts"))]
        }
        IndexOutcome::Fallback { reason } => vec![
            "    Index: empty (fallback)".to_string(),
            format!("        Reason: {}", reason),
        ],
    }
}

/// Format a single build progress event as display lines.
pub fn format_build_event(event: &BuildEvent) -> Vec<String> {
    match event {
        BuildEvent::Entered(stage) => vec![format!("==> {}", stage)],
        BuildEvent::AdminHidden(outcome) => {
            vec![move_outcome_line("Admin", *outcome, "moved to backup")]
        }
        BuildEvent::ContentCopied { flat, tree } => vec![format!(
            "    Copied {}, {} ({})",
            plural(flat.files, "document", "documents"),
            plural(tree.files, "blog file", "blog files"),
            plural(tree.dirs, "new directory", "new directories"),
        )],
        BuildEvent::IndexWritten(outcome) => format_index_outcome(outcome),
        BuildEvent::AdminRestored(outcome) => {
            vec![move_outcome_line("Admin", *outcome, "restored")]
        }
        BuildEvent::RestoreFailed(error) => vec![
            "    Admin: NOT restored".to_string(),
            format!("        Error: {}", error),
            "        Run `folio restore-admin` once the cause is fixed".to_string(),
        ],
        BuildEvent::Finished { stage, error } => {
            let mut lines = vec![format!("==> {}", stage)];
            if let Some(error) = error {
                lines.push(format!("    Error: {}", error));
            }
            lines
        }
    }
}

/// Summary printed after `folio data` or `folio index`.
pub fn format_data_report(report: &DataReport, index_file: &Path, root: &Path) -> Vec<String> {
    let mut lines = format_build_event(&BuildEvent::ContentCopied {
        flat: report.flat,
        tree: report.tree,
    });
    lines.extend(format_index_outcome(&report.index));
    lines.push(format!("        Output: {}", display_path(index_file, root)));
    lines
}

pub fn print_data_report(report: &DataReport, index_file: &Path, root: &Path) {
    print_lines(format_data_report(report, index_file, root));
}

/// One line for `folio restore-admin`.
pub fn format_restore_outcome(outcome: MoveOutcome, admin_dir: &Path, root: &Path) -> String {
    match outcome {
        MoveOutcome::Moved => format!("Restored {}", display_path(admin_dir, root)),
        MoveOutcome::NotPresent => "No admin backup found; nothing to restore".to_string(),
    }
}

// ============================================================================
// Content
// ============================================================================

/// Format a post listing, newest first as given.
pub fn format_post_list(posts: &[BlogListItem]) -> Vec<String> {
    if posts.is_empty() {
        return vec!["No posts".to_string()];
    }
    let mut lines = Vec::new();
    for (i, post) in posts.iter().enumerate() {
        lines.push(format!(
            "{} {} {}",
            format_index(i + 1),
            post.title,
            post_flags(post.is_published(), post.featured)
        ));
        lines.push(format!(
            "{}{} \u{b7} {}/{} \u{b7} {}",
            indent(1),
            post.publish_date,
            post.category,
            post.subcategory,
            post.read_time
        ));
        lines.push(format!(
            "{}{}",
            indent(1),
            naming::post_path(&post.category, &post.subcategory, &post.id)
        ));
    }
    lines
}

pub fn print_post_list(posts: &[BlogListItem]) {
    print_lines(format_post_list(posts));
}

/// Full post header plus an excerpt preview.
pub fn format_post_detail(post: &Post) -> Vec<String> {
    let mut lines = vec![
        format!(
            "{} {}",
            post.title,
            post_flags(post.is_published(), post.featured)
        ),
        format!("{}Id: {}", indent(1), post.id),
        format!(
            "{}Path: {}",
            indent(1),
            naming::post_path(&post.category, &post.subcategory, &post.id)
        ),
        format!("{}Published: {}", indent(1), post.publish_date),
    ];
    if !post.last_modified.is_empty() {
        lines.push(format!("{}Modified: {}", indent(1), post.last_modified));
    }
    if !post.author.is_empty() {
        lines.push(format!("{}Author: {}", indent(1), post.author));
    }
    if !post.tags.is_empty() {
        lines.push(format!("{}Tags: {}", indent(1), post.tags.join(", ")));
    }
    lines.push(format!(
        "{}Reading time: {}",
        indent(1),
        if post.read_time.is_empty() {
            naming::reading_time(&post.content)
        } else {
            post.read_time.clone()
        }
    ));
    let excerpt = truncate_chars(post.excerpt.trim(), 80);
    if !excerpt.is_empty() {
        lines.push(format!("{}{}", indent(1), excerpt));
    }
    lines
}

pub fn print_post_detail(post: &Post) {
    print_lines(format_post_detail(post));
}

/// Categories with their subcategories and how many posts each pair holds.
pub fn format_categories(categories: &[Category], posts: &[BlogListItem]) -> Vec<String> {
    let count = |c: &str, s: Option<&str>| {
        posts
            .iter()
            .filter(|p| p.category == c && s.is_none_or(|s| p.subcategory == s))
            .count()
    };
    let mut lines = Vec::new();
    for (i, category) in categories.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            category.name,
            plural(count(&category.id, None), "post", "posts")
        ));
        lines.push(format!("{}Id: {}", indent(1), category.id));
        for (j, sub) in category.subcategories.iter().enumerate() {
            lines.push(format!(
                "{}{} {} ({})",
                indent(1),
                format_index(j + 1),
                sub.name,
                count(&category.id, Some(&sub.id))
            ));
        }
    }
    lines
}

pub fn print_categories(categories: &[Category], posts: &[BlogListItem]) {
    print_lines(format_categories(categories, posts));
}

/// Dashboard numbers.
pub fn format_stats(stats: &ContentStats) -> Vec<String> {
    let mut lines = vec![
        "Posts".to_string(),
        format!("{}Total: {}", indent(1), stats.posts.total),
        format!("{}Published: {}", indent(1), stats.posts.published),
        format!("{}Drafts: {}", indent(1), stats.posts.drafts),
        format!("{}Featured: {}", indent(1), stats.posts.featured),
    ];
    if !stats.categories.is_empty() {
        lines.push(String::new());
        lines.push("Categories".to_string());
        for (i, (id, n)) in stats.categories.iter().enumerate() {
            lines.push(format!("{}{} {} ({})", indent(1), format_index(i + 1), id, n));
        }
    }
    let exp = &stats.experience;
    lines.push(String::new());
    lines.push(format!("Experience ({})", exp.total));
    lines.push(format!(
        "{}work {} \u{b7} education {} \u{b7} certification {} \u{b7} volunteer {}",
        indent(1),
        exp.work,
        exp.education,
        exp.certifications,
        exp.volunteer
    ));
    lines.push(String::new());
    lines.push(format!(
        "Skills ({} in {})",
        stats.skills.total,
        plural(stats.skills.categories, "category", "categories")
    ));
    lines.push(format!(
        "{}Average level: {:.1}",
        indent(1),
        stats.skills.average_level
    ));
    lines
}

pub fn print_stats(stats: &ContentStats) {
    print_lines(format_stats(stats));
}

/// Post files the index will never pick up.
pub fn format_orphans(orphans: &[PathBuf], root: &Path) -> Vec<String> {
    if orphans.is_empty() {
        return vec!["No orphaned posts".to_string()];
    }
    let mut lines = vec![format!(
        "Orphaned ({} not in categories.json)",
        plural(orphans.len(), "file", "files")
    )];
    for path in orphans {
        lines.push(format!("{}{}", indent(1), display_path(path, root)));
    }
    lines
}

pub fn print_orphans(orphans: &[PathBuf], root: &Path) {
    print_lines(format_orphans(orphans, root));
}

// ============================================================================
// Tests
// ============================================================================
