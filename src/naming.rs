//! Naming conventions shared by the store, the admin commands and the site.
//!
//! A post's identity is its slug. Slugs double as file stems on disk
//! (`blogs/<category>/<subcategory>/<slug>.json`) and as the last segment of
//! the public URL (`/blog/<category>/<subcategory>/<slug>`), so every place
//! that builds one of those goes through here.
//!
//! ## Slugs
//!
//! - `"Hooks in Depth"` → `"hooks-in-depth"`
//! - `"C++ & Rust: FFI"` → `"c-rust-ffi"`
//! - `"  --Trailing--  "` → `"trailing"`

use pulldown_cmark::{Event, Parser};

/// Words per minute used for the read-time label.
const WORDS_PER_MINUTE: usize = 200;

/// Derive a post id from its title.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single `-`, and trims dashes from both ends.
pub fn slug_from_title(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// File name of a post document.
pub fn post_file_name(id: &str) -> String {
    format!("{id}.json")
}

/// Public URL path of a post page.
pub fn post_path(category: &str, subcategory: &str, id: &str) -> String {
    format!("/blog/{category}/{subcategory}/{id}")
}

/// Estimated reading time label for a Markdown body.
///
/// Only text the reader sees is counted: link targets, image URLs and
/// markup characters don't add words. Always at least one minute.
pub fn reading_time(markdown: &str) -> String {
    let words: usize = Parser::new(markdown)
        .map(|event| match event {
            Event::Text(text) | Event::Code(text) => text.split_whitespace().count(),
            _ => 0,
        })
        .sum();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{minutes} min read")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_simple_title() {
        assert_eq!(slug_from_title("Hooks in Depth"), "hooks-in-depth");
    }

    #[test]
    fn slug_collapses_punctuation_runs() {
        assert_eq!(slug_from_title("C++ & Rust: FFI"), "c-rust-ffi");
    }

    #[test]
    fn slug_trims_edges() {
        assert_eq!(slug_from_title("  --Trailing--  "), "trailing");
    }

    #[test]
    fn slug_keeps_digits() {
        assert_eq!(slug_from_title("Top 10 Tips for 2024"), "top-10-tips-for-2024");
    }

    #[test]
    fn slug_drops_non_ascii() {
        assert_eq!(slug_from_title("Café Notes"), "caf-notes");
    }

    #[test]
    fn slug_of_only_symbols_is_empty() {
        assert_eq!(slug_from_title("!!!"), "");
    }

    #[test]
    fn post_file_name_appends_json() {
        assert_eq!(post_file_name("hooks"), "hooks.json");
    }

    #[test]
    fn post_path_layout() {
        assert_eq!(
            post_path("web-development", "frontend", "hooks"),
            "/blog/web-development/frontend/hooks"
        );
    }

    #[test]
    fn reading_time_rounds_up() {
        let body = "word ".repeat(201);
        assert_eq!(reading_time(&body), "2 min read");
    }

    #[test]
    fn reading_time_minimum_one_minute() {
        assert_eq!(reading_time(""), "1 min read");
        assert_eq!(reading_time("short"), "1 min read");
    }

    #[test]
    fn reading_time_ignores_link_targets() {
        let body = "[one two](https://example.com/a/very/long/url)";
        // Two visible words either way; the URL must not be split into words.
        assert_eq!(reading_time(body), "1 min read");
        let many = "[w](https://example.com) ".repeat(200);
        assert_eq!(reading_time(&many), "1 min read");
    }
}
