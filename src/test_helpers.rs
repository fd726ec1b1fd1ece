//! Shared test utilities for the folio test suite.
//!
//! Builds a small but complete private data root in a temp directory and
//! provides helpers for writing extra documents and inspecting listings.
//!
//! # Fixture layout
//!
//! ```text
//! profile.json / experience.json / skills.json
//! blogs/categories.json
//!   web-development → frontend, backend
//!   devops          → docker, kubernetes
//! blogs/web-development/frontend/react-hooks.json   2024-06-01 published featured
//! blogs/web-development/frontend/css-grid.json      2024-01-01 draft     featured
//! blogs/devops/docker/docker-basics.json            2024-09-01 published
//! ```
//!
//! `backend` and `kubernetes` are listed but have no directory.

use std::path::Path;
use tempfile::TempDir;

use crate::index::IndexEntry;
use crate::types::{BlogListItem, Difficulty, Post, Status};
use serde_json::{Value, json};

// =========================================================================
// Fixture setup
// =========================================================================

/// Create the fixture data root in a fresh temp directory.
pub fn setup_content() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_content(tmp.path());
    tmp
}

/// Write the fixture data root into `root`.
pub fn write_content(root: &Path) {
    std::fs::create_dir_all(root).unwrap();
    write_doc(
        &root.join("profile.json"),
        &json!({
            "personal": {
                "name": "Ada Lovelace",
                "title": "Engineer",
                "email": "ada@example.com",
                "location": "London",
                "bio": "Writes programs.",
                "avatar": "/images/avatar.jpg",
                "resume": "/documents/resume.pdf"
            },
            "social": {"github": "ada", "linkedin": "ada", "twitter": "", "website": ""},
            "hero": {"tagline": "Hello", "description": "Welcome", "cta": "Let's Connect"}
        }),
    );
    write_doc(
        &root.join("experience.json"),
        &json!([
            {"id": "1", "company": "Acme", "position": "Engineer",
             "startDate": "2021-01-01", "endDate": null, "duration": "3 years",
             "description": "Built things", "technologies": ["rust"],
             "type": "work", "featured": true, "location": "Remote"},
            {"id": "2", "company": "University", "position": "Student",
             "startDate": "2016-09-01", "endDate": "2020-06-30", "duration": "4 years",
             "description": "Studied", "technologies": [],
             "type": "education", "featured": false, "location": "London"}
        ]),
    );
    write_doc(
        &root.join("skills.json"),
        &json!([
            {"id": "languages", "name": "Languages", "skills": [
                {"name": "Rust", "level": 5, "years": 4, "description": "", "category": "languages"},
                {"name": "TypeScript", "level": 3, "years": 2, "description": "", "category": "languages"}
            ]}
        ]),
    );
    write_categories(
        root,
        json!([
            {"id": "web-development", "name": "Web Development", "description": "Web",
             "subcategories": [
                {"id": "frontend", "name": "Frontend", "description": ""},
                {"id": "backend", "name": "Backend", "description": ""}
             ]},
            {"id": "devops", "name": "DevOps", "description": "Ops",
             "subcategories": [
                {"id": "docker", "name": "Docker", "description": ""},
                {"id": "kubernetes", "name": "Kubernetes", "description": ""}
             ]}
        ]),
    );

    let mut hooks = sample_post("react-hooks", "web-development", "frontend", "2024-06-01");
    hooks.title = "React Hooks".into();
    hooks.content = "# Hooks\n\nUse `useState` for local state.".into();
    hooks.featured = true;
    write_post(root, &hooks);

    let mut grid = sample_post("css-grid", "web-development", "frontend", "2024-01-01");
    grid.featured = true;
    grid.status = Status::Draft;
    write_post(root, &grid);

    let docker = sample_post("docker-basics", "devops", "docker", "2024-09-01");
    write_post(root, &docker);
}

/// A complete, published post.
pub fn sample_post(id: &str, category: &str, subcategory: &str, date: &str) -> Post {
    Post {
        id: id.to_string(),
        title: format!("Post {id}"),
        category: category.to_string(),
        subcategory: subcategory.to_string(),
        tags: vec!["notes".to_string()],
        publish_date: date.to_string(),
        last_modified: format!("{date}T00:00:00Z"),
        read_time: "3 min read".to_string(),
        excerpt: format!("About {id}"),
        content: format!("Body of {id}."),
        featured: false,
        difficulty: Difficulty::Beginner,
        status: Status::Published,
        author: "Ada".to_string(),
        seo_title: Some(format!("Post {id}")),
        seo_description: None,
        extra: Default::default(),
    }
}

pub fn write_doc(path: &Path, value: &Value) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

pub fn write_categories(root: &Path, categories: Value) {
    write_doc(&root.join("blogs/categories.json"), &categories);
}

pub fn write_post(root: &Path, post: &Post) {
    let value = serde_json::to_value(post).unwrap();
    write_post_json(root, &post.category, &post.subcategory, &post.id, value);
}

/// Write a raw post document, bypassing the typed model.
pub fn write_post_json(root: &Path, category: &str, subcategory: &str, id: &str, value: Value) {
    write_doc(
        &root
            .join("blogs")
            .join(category)
            .join(subcategory)
            .join(format!("{id}.json")),
        &value,
    );
}

// =========================================================================
// Extractors
// =========================================================================

/// Post ids in listing order.
pub fn post_ids(posts: &[BlogListItem]) -> Vec<&str> {
    posts.iter().map(|p| p.id.as_str()).collect()
}

/// Ids of raw index entries, in index order.
pub fn entry_ids(entries: &[IndexEntry]) -> Vec<&str> {
    entries
        .iter()
        .map(|e| e.get("id").and_then(Value::as_str).unwrap_or_default())
        .collect()
}
