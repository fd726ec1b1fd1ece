//! File-backed content store over the private data root.
//!
//! Everything the admin UI edits lives here as plain JSON:
//!
//! ```text
//! src/data/                          # Private data root
//! ├── profile.json
//! ├── experience.json
//! ├── skills.json
//! └── blogs/
//!     ├── categories.json            # Category → subcategory taxonomy
//!     └── web-development/
//!         └── frontend/
//!             ├── react-hooks.json   # One document per post
//!             └── css-grid.json
//! ```
//!
//! A post is addressed by its (category, subcategory, id) triple, which is
//! also its path. Pairs that are listed in `categories.json` but have no
//! directory simply hold no posts; [`ContentStore::list_pair`] reports that
//! as `None` rather than an error. Post files under pairs that are *not*
//! listed are never read by the listings or the index; [`ContentStore::orphans`]
//! finds them.

use crate::index::sort_newest_first;
use crate::naming;
use crate::types::{
    BlogListItem, Category, Experience, ExperienceKind, Post, Profile, SkillCategory,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use walkdir::WalkDir;

pub const BLOGS_DIR: &str = "blogs";
pub const CATEGORIES_FILE: &str = "categories.json";
pub const PROFILE_FILE: &str = "profile.json";
pub const EXPERIENCE_FILE: &str = "experience.json";
pub const SKILLS_FILE: &str = "skills.json";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("Failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("Invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid content: {0}")]
    Invalid(String),
}

/// Read and parse a JSON document.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let content = fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize a document as pretty JSON (two-space indent), creating parent
/// directories as needed.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(value)?;
    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, json).map_err(write_err)
}

/// Reject path components that would escape the blog tree.
fn check_segment(kind: &str, value: &str) -> Result<(), StoreError> {
    if value.is_empty()
        || value == "."
        || value == ".."
        || value.contains(['/', '\\'])
    {
        return Err(StoreError::Invalid(format!("{kind} {value:?} is not a valid name")));
    }
    Ok(())
}

fn require(field: &str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::Invalid(format!("{field} is required")));
    }
    Ok(())
}

/// Handle on a private data root.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn blogs_dir(&self) -> PathBuf {
        self.root.join(BLOGS_DIR)
    }

    pub fn categories_path(&self) -> PathBuf {
        self.blogs_dir().join(CATEGORIES_FILE)
    }

    pub fn pair_dir(&self, category: &str, subcategory: &str) -> PathBuf {
        self.blogs_dir().join(category).join(subcategory)
    }

    pub fn post_file(&self, category: &str, subcategory: &str, id: &str) -> PathBuf {
        self.pair_dir(category, subcategory)
            .join(naming::post_file_name(id))
    }

    // ------------------------------------------------------------------------
    // Taxonomy
    // ------------------------------------------------------------------------

    pub fn categories(&self) -> Result<Vec<Category>, StoreError> {
        read_json(&self.categories_path())
    }

    pub fn save_categories(&self, categories: &[Category]) -> Result<(), StoreError> {
        let mut seen = HashSet::new();
        for category in categories {
            check_segment("category", &category.id)?;
            if !seen.insert(category.id.as_str()) {
                return Err(StoreError::Invalid(format!(
                    "duplicate category id {:?}",
                    category.id
                )));
            }
            let mut sub_seen = HashSet::new();
            for sub in &category.subcategories {
                check_segment("subcategory", &sub.id)?;
                if !sub_seen.insert(sub.id.as_str()) {
                    return Err(StoreError::Invalid(format!(
                        "duplicate subcategory id {:?} in {:?}",
                        sub.id, category.id
                    )));
                }
            }
        }
        write_json(&self.categories_path(), categories)
    }

    /// Post files (`*.json`) in a pair directory, sorted by file name.
    ///
    /// `None` when the directory doesn't exist: the pair holds no posts.
    pub fn list_pair(
        &self,
        category: &str,
        subcategory: &str,
    ) -> Result<Option<Vec<PathBuf>>, StoreError> {
        let dir = self.pair_dir(category, subcategory);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Read { path: dir, source }),
        };
        let mut files = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|source| StoreError::Read {
                    path: dir.clone(),
                    source,
                })?
                .path();
            let is_json = path
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case("json"));
            if is_json && path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(Some(files))
    }

    // ------------------------------------------------------------------------
    // Posts
    // ------------------------------------------------------------------------

    pub fn read_post(&self, path: &Path) -> Result<Post, StoreError> {
        read_json(path)
    }

    /// Load one post by its full address. `None` if the file doesn't exist.
    pub fn post(
        &self,
        category: &str,
        subcategory: &str,
        id: &str,
    ) -> Result<Option<Post>, StoreError> {
        check_segment("category", category)?;
        check_segment("subcategory", subcategory)?;
        check_segment("id", id)?;
        let path = self.post_file(category, subcategory, id);
        if !path.is_file() {
            return Ok(None);
        }
        self.read_post(&path).map(Some)
    }

    /// Find a post by id alone, searching pairs in taxonomy order.
    pub fn post_by_id(&self, id: &str) -> Result<Option<Post>, StoreError> {
        check_segment("id", id)?;
        for category in self.categories()? {
            for sub in &category.subcategories {
                let path = self.post_file(&category.id, &sub.id, id);
                if path.is_file() {
                    return self.read_post(&path).map(Some);
                }
            }
        }
        Ok(None)
    }

    /// Every listed post, newest first, without bodies.
    ///
    /// Lenient: unreadable pair directories and malformed post files are
    /// logged and skipped so one bad document doesn't hide the rest. The
    /// static index is stricter, see [`crate::index`].
    pub fn all_posts(&self) -> Result<Vec<BlogListItem>, StoreError> {
        let mut posts = Vec::new();
        for category in self.categories()? {
            for sub in &category.subcategories {
                let files = match self.list_pair(&category.id, &sub.id) {
                    Ok(Some(files)) => files,
                    Ok(None) => continue,
                    Err(e) => {
                        tracing::warn!(error = %e, "skipping unreadable subcategory");
                        continue;
                    }
                };
                for file in files {
                    match self.read_post(&file) {
                        Ok(post) => posts.push(BlogListItem::from(post)),
                        Err(e) => tracing::warn!(error = %e, "skipping post"),
                    }
                }
            }
        }
        sort_newest_first(&mut posts);
        Ok(posts)
    }

    pub fn posts_by_category(
        &self,
        category: &str,
        subcategory: Option<&str>,
    ) -> Result<Vec<BlogListItem>, StoreError> {
        Ok(filter_by_category(self.all_posts()?, category, subcategory))
    }

    /// Featured, published posts, newest first.
    pub fn featured_posts(&self, limit: usize) -> Result<Vec<BlogListItem>, StoreError> {
        Ok(featured(self.all_posts()?, limit))
    }

    /// Published posts, newest first.
    pub fn recent_posts(&self, limit: usize) -> Result<Vec<BlogListItem>, StoreError> {
        Ok(recent(self.all_posts()?, limit))
    }

    /// Validate, complete and write a post. Returns what was written.
    ///
    /// - title, excerpt, content, category and subcategory are required
    /// - an empty id is derived from the title
    /// - `lastModified` is stamped with the current time
    /// - SEO title/description fall back to title/excerpt
    /// - `readTime` is derived from the content
    pub fn save_post(&self, mut post: Post) -> Result<Post, StoreError> {
        require("title", &post.title)?;
        require("excerpt", &post.excerpt)?;
        require("content", &post.content)?;
        require("category", &post.category)?;
        require("subcategory", &post.subcategory)?;
        if post.id.trim().is_empty() {
            post.id = naming::slug_from_title(&post.title);
        }
        check_segment("category", &post.category)?;
        check_segment("subcategory", &post.subcategory)?;
        check_segment("id", &post.id)?;

        match self.categories() {
            Ok(categories) => {
                let listed = categories
                    .iter()
                    .find(|c| c.id == post.category)
                    .and_then(|c| c.subcategory(&post.subcategory))
                    .is_some();
                if !listed {
                    tracing::warn!(
                        category = %post.category,
                        subcategory = %post.subcategory,
                        "saving post under a pair missing from categories.json; it won't be listed"
                    );
                }
            }
            Err(e) => tracing::warn!(error = %e, "could not check post taxonomy"),
        }

        post.last_modified = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|e| StoreError::Invalid(format!("cannot format timestamp: {e}")))?;
        if post.seo_title.as_deref().is_none_or(str::is_empty) {
            post.seo_title = Some(post.title.clone());
        }
        if post.seo_description.as_deref().is_none_or(str::is_empty) {
            post.seo_description = Some(post.excerpt.clone());
        }
        post.read_time = naming::reading_time(&post.content);

        let path = self.post_file(&post.category, &post.subcategory, &post.id);
        write_json(&path, &post)?;
        tracing::info!(path = %path.display(), "post saved");
        Ok(post)
    }

    pub fn delete_post(
        &self,
        category: &str,
        subcategory: &str,
        id: &str,
    ) -> Result<(), StoreError> {
        check_segment("category", category)?;
        check_segment("subcategory", subcategory)?;
        check_segment("id", id)?;
        let path = self.post_file(category, subcategory, id);
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "post deleted");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StoreError::NotFound(format!(
                "{category}/{subcategory}/{id}"
            ))),
            Err(source) => Err(StoreError::Write { path, source }),
        }
    }

    /// Post files under the blog tree whose pair isn't in `categories.json`.
    pub fn orphans(&self) -> Result<Vec<PathBuf>, StoreError> {
        let listed: HashSet<(String, String)> = self
            .categories()?
            .into_iter()
            .flat_map(|c| {
                let id = c.id;
                c.subcategories
                    .into_iter()
                    .map(move |s| (id.clone(), s.id))
            })
            .collect();

        let blogs = self.blogs_dir();
        let mut orphans = Vec::new();
        for entry in WalkDir::new(&blogs)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            let is_json = entry.file_type().is_file()
                && path.extension().is_some_and(|e| e.eq_ignore_ascii_case("json"));
            if !is_json || path == self.categories_path() {
                continue;
            }
            let rel = path.strip_prefix(&blogs).unwrap_or(path);
            let parts: Vec<String> = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            let in_listed_pair =
                parts.len() == 3 && listed.contains(&(parts[0].clone(), parts[1].clone()));
            if !in_listed_pair {
                orphans.push(path.to_path_buf());
            }
        }
        Ok(orphans)
    }

    // ------------------------------------------------------------------------
    // Portfolio documents
    // ------------------------------------------------------------------------

    pub fn profile(&self) -> Result<Profile, StoreError> {
        read_json(&self.root.join(PROFILE_FILE))
    }

    /// Name and title are required.
    pub fn save_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        require("personal.name", &profile.personal.name)?;
        require("personal.title", &profile.personal.title)?;
        write_json(&self.root.join(PROFILE_FILE), profile)
    }

    pub fn experience(&self) -> Result<Vec<Experience>, StoreError> {
        read_json(&self.root.join(EXPERIENCE_FILE))
    }

    pub fn save_experience(&self, experience: &[Experience]) -> Result<(), StoreError> {
        write_json(&self.root.join(EXPERIENCE_FILE), experience)
    }

    pub fn skills(&self) -> Result<Vec<SkillCategory>, StoreError> {
        read_json(&self.root.join(SKILLS_FILE))
    }

    pub fn save_skills(&self, skills: &[SkillCategory]) -> Result<(), StoreError> {
        for category in skills {
            for skill in &category.skills {
                if !(1..=5).contains(&skill.level) {
                    return Err(StoreError::Invalid(format!(
                        "skill {:?} has level {}, expected 1-5",
                        skill.name, skill.level
                    )));
                }
            }
        }
        write_json(&self.root.join(SKILLS_FILE), skills)
    }

    // ------------------------------------------------------------------------
    // Dashboard
    // ------------------------------------------------------------------------

    /// Content counts for the dashboard. Missing portfolio documents count
    /// as empty.
    pub fn stats(&self) -> Result<ContentStats, StoreError> {
        let posts = self.all_posts()?;
        let experience = or_empty(self.experience())?;
        let skills = or_empty(self.skills())?;
        Ok(ContentStats::compute(&posts, &experience, &skills))
    }
}

/// Treat a missing document as an empty list; propagate anything else.
fn or_empty<T>(result: Result<Vec<T>, StoreError>) -> Result<Vec<T>, StoreError> {
    match result {
        Err(StoreError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            Ok(Vec::new())
        }
        other => other,
    }
}

// ============================================================================
// Listing filters
// ============================================================================

pub fn filter_by_category(
    posts: Vec<BlogListItem>,
    category: &str,
    subcategory: Option<&str>,
) -> Vec<BlogListItem> {
    posts
        .into_iter()
        .filter(|p| p.category == category)
        .filter(|p| subcategory.is_none_or(|s| p.subcategory == s))
        .collect()
}

pub fn featured(posts: Vec<BlogListItem>, limit: usize) -> Vec<BlogListItem> {
    posts
        .into_iter()
        .filter(|p| p.featured && p.is_published())
        .take(limit)
        .collect()
}

pub fn recent(posts: Vec<BlogListItem>, limit: usize) -> Vec<BlogListItem> {
    posts
        .into_iter()
        .filter(|p| p.is_published())
        .take(limit)
        .collect()
}

// ============================================================================
// Stats
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContentStats {
    pub posts: PostStats,
    /// Post count per category id, largest first (ties by id).
    pub categories: Vec<(String, usize)>,
    pub experience: ExperienceStats,
    pub skills: SkillStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PostStats {
    pub total: usize,
    pub published: usize,
    pub drafts: usize,
    pub featured: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExperienceStats {
    pub total: usize,
    pub work: usize,
    pub education: usize,
    pub certifications: usize,
    pub volunteer: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SkillStats {
    pub total: usize,
    pub categories: usize,
    pub average_level: f32,
}

impl ContentStats {
    pub fn compute(
        posts: &[BlogListItem],
        experience: &[Experience],
        skills: &[SkillCategory],
    ) -> Self {
        let published = posts.iter().filter(|p| p.is_published()).count();
        let post_stats = PostStats {
            total: posts.len(),
            published,
            drafts: posts.len() - published,
            featured: posts.iter().filter(|p| p.featured).count(),
        };

        let mut per_category: BTreeMap<&str, usize> = BTreeMap::new();
        for post in posts {
            *per_category.entry(post.category.as_str()).or_default() += 1;
        }
        let mut categories: Vec<(String, usize)> = per_category
            .into_iter()
            .map(|(c, n)| (c.to_string(), n))
            .collect();
        // Stable sort keeps the BTreeMap's id order among equal counts.
        categories.sort_by(|a, b| b.1.cmp(&a.1));

        let count_kind = |kind| experience.iter().filter(|e| e.kind == kind).count();
        let experience_stats = ExperienceStats {
            total: experience.len(),
            work: count_kind(ExperienceKind::Work),
            education: count_kind(ExperienceKind::Education),
            certifications: count_kind(ExperienceKind::Certification),
            volunteer: count_kind(ExperienceKind::Volunteer),
        };

        let levels: Vec<f32> = skills
            .iter()
            .flat_map(|c| c.skills.iter().map(|s| f32::from(s.level)))
            .collect();
        let average_level = if levels.is_empty() {
            0.0
        } else {
            levels.iter().sum::<f32>() / levels.len() as f32
        };
        let skill_stats = SkillStats {
            total: levels.len(),
            categories: skills.len(),
            average_level,
        };

        Self {
            posts: post_stats,
            categories,
            experience: experience_stats,
            skills: skill_stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use crate::types::Status;
    use serde_json::json;

    #[test]
    fn categories_read_in_file_order() {
        let tmp = setup_content();
        let store = ContentStore::new(tmp.path());
        let ids: Vec<String> = store.categories().unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["web-development", "devops"]);
    }

    #[test]
    fn list_pair_missing_directory_is_none() {
        let tmp = setup_content();
        let store = ContentStore::new(tmp.path());
        assert_eq!(store.list_pair("devops", "kubernetes").unwrap(), None);
    }

    #[test]
    fn list_pair_only_json_sorted() {
        let tmp = setup_content();
        let store = ContentStore::new(tmp.path());
        fs::write(
            store.pair_dir("web-development", "frontend").join("notes.txt"),
            "scratch",
        )
        .unwrap();
        let files = store
            .list_pair("web-development", "frontend")
            .unwrap()
            .unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["css-grid.json", "react-hooks.json"]);
    }

    #[test]
    fn list_pair_unreadable_directory_is_an_error() {
        let tmp = setup_content();
        let store = ContentStore::new(tmp.path());
        let pair = store.pair_dir("devops", "kubernetes");
        fs::create_dir_all(pair.parent().unwrap()).unwrap();
        fs::write(&pair, "not a directory").unwrap();
        assert!(matches!(
            store.list_pair("devops", "kubernetes"),
            Err(StoreError::Read { .. })
        ));
    }

    #[test]
    fn post_by_address() {
        let tmp = setup_content();
        let store = ContentStore::new(tmp.path());
        let post = store
            .post("web-development", "frontend", "react-hooks")
            .unwrap()
            .unwrap();
        assert_eq!(post.title, "React Hooks");
        assert!(post.content.contains("useState"));
        assert!(store.post("web-development", "frontend", "nope").unwrap().is_none());
    }

    #[test]
    fn post_rejects_path_traversal() {
        let tmp = setup_content();
        let store = ContentStore::new(tmp.path());
        let result = store.post("..", "frontend", "react-hooks");
        assert!(matches!(result, Err(StoreError::Invalid(_))));
    }

    #[test]
    fn post_by_id_searches_all_pairs() {
        let tmp = setup_content();
        let store = ContentStore::new(tmp.path());
        let post = store.post_by_id("docker-basics").unwrap().unwrap();
        assert_eq!(post.category, "devops");
        assert!(store.post_by_id("missing").unwrap().is_none());
    }

    #[test]
    fn all_posts_newest_first_without_bodies() {
        let tmp = setup_content();
        let store = ContentStore::new(tmp.path());
        let posts = store.all_posts().unwrap();
        assert_eq!(
            post_ids(&posts),
            vec!["docker-basics", "react-hooks", "css-grid"]
        );
        let value = serde_json::to_value(&posts).unwrap();
        assert!(value[0].get("content").is_none());
    }

    #[test]
    fn all_posts_skips_malformed_files() {
        let tmp = setup_content();
        let store = ContentStore::new(tmp.path());
        fs::write(
            store.pair_dir("devops", "docker").join("broken.json"),
            "{ not json",
        )
        .unwrap();
        assert_eq!(store.all_posts().unwrap().len(), 3);
    }

    #[test]
    fn category_filter() {
        let tmp = setup_content();
        let store = ContentStore::new(tmp.path());
        let web = store.posts_by_category("web-development", None).unwrap();
        assert_eq!(web.len(), 2);
        let frontend = store
            .posts_by_category("web-development", Some("frontend"))
            .unwrap();
        assert_eq!(frontend.len(), 2);
        let backend = store
            .posts_by_category("web-development", Some("backend"))
            .unwrap();
        assert!(backend.is_empty());
    }

    #[test]
    fn featured_requires_published() {
        let tmp = setup_content();
        let store = ContentStore::new(tmp.path());
        // css-grid is featured but still a draft.
        let featured = store.featured_posts(3).unwrap();
        assert_eq!(post_ids(&featured), vec!["react-hooks"]);
    }

    #[test]
    fn recent_excludes_drafts_and_limits() {
        let tmp = setup_content();
        let store = ContentStore::new(tmp.path());
        let recent = store.recent_posts(1).unwrap();
        assert_eq!(post_ids(&recent), vec!["docker-basics"]);
        let all = store.recent_posts(5).unwrap();
        assert_eq!(post_ids(&all), vec!["docker-basics", "react-hooks"]);
    }

    #[test]
    fn save_post_derives_id_and_fills_defaults() {
        let tmp = setup_content();
        let store = ContentStore::new(tmp.path());
        let mut post = sample_post("", "web-development", "frontend", "2024-08-01");
        post.title = "Grid & Flexbox, Compared".into();
        post.seo_title = None;
        post.read_time = String::new();

        let saved = store.save_post(post).unwrap();
        assert_eq!(saved.id, "grid-flexbox-compared");
        assert_eq!(saved.seo_title.as_deref(), Some("Grid & Flexbox, Compared"));
        assert_eq!(saved.seo_description.as_deref(), Some(saved.excerpt.as_str()));
        assert_eq!(saved.read_time, "1 min read");
        assert!(OffsetDateTime::parse(&saved.last_modified, &Rfc3339).is_ok());

        let on_disk = store
            .post("web-development", "frontend", "grid-flexbox-compared")
            .unwrap()
            .unwrap();
        assert_eq!(on_disk, saved);
    }

    #[test]
    fn save_post_recomputes_read_time_from_content() {
        let tmp = setup_content();
        let store = ContentStore::new(tmp.path());
        let mut post = store
            .post("web-development", "frontend", "react-hooks")
            .unwrap()
            .unwrap();
        post.read_time = "1 min read".into();
        post.content = "word ".repeat(450);

        let saved = store.save_post(post).unwrap();
        assert_eq!(saved.read_time, "3 min read");
        let on_disk = store
            .post("web-development", "frontend", "react-hooks")
            .unwrap()
            .unwrap();
        assert_eq!(on_disk.read_time, "3 min read");
    }

    #[test]
    fn save_post_creates_pair_directory() {
        let tmp = setup_content();
        let store = ContentStore::new(tmp.path());
        let post = sample_post("k8s-intro", "devops", "kubernetes", "2024-02-02");
        store.save_post(post).unwrap();
        assert!(store.post_file("devops", "kubernetes", "k8s-intro").is_file());
    }

    #[test]
    fn save_post_requires_fields() {
        let tmp = setup_content();
        let store = ContentStore::new(tmp.path());

        let mut post = sample_post("x", "devops", "docker", "2024-01-01");
        post.content = "   ".into();
        let err = store.save_post(post).unwrap_err();
        assert!(err.to_string().contains("content"));

        let mut post = sample_post("x", "devops", "docker", "2024-01-01");
        post.excerpt = String::new();
        assert!(matches!(store.save_post(post), Err(StoreError::Invalid(_))));
    }

    #[test]
    fn delete_post_removes_file() {
        let tmp = setup_content();
        let store = ContentStore::new(tmp.path());
        store.delete_post("devops", "docker", "docker-basics").unwrap();
        assert!(store.post_by_id("docker-basics").unwrap().is_none());
    }

    #[test]
    fn delete_missing_post_is_not_found() {
        let tmp = setup_content();
        let store = ContentStore::new(tmp.path());
        let result = store.delete_post("devops", "docker", "ghost");
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn save_categories_rejects_duplicates() {
        let tmp = setup_content();
        let store = ContentStore::new(tmp.path());
        let mut categories = store.categories().unwrap();
        categories.push(categories[0].clone());
        assert!(matches!(
            store.save_categories(&categories),
            Err(StoreError::Invalid(_))
        ));
    }

    #[test]
    fn save_categories_roundtrip() {
        let tmp = setup_content();
        let store = ContentStore::new(tmp.path());
        let mut categories = store.categories().unwrap();
        categories.remove(1);
        store.save_categories(&categories).unwrap();
        assert_eq!(store.categories().unwrap(), categories);
    }

    #[test]
    fn orphans_lists_unlisted_pairs() {
        let tmp = setup_content();
        let store = ContentStore::new(tmp.path());
        write_post_json(
            tmp.path(),
            "career",
            "growth",
            "promo",
            json!({"id": "promo", "title": "Promo", "category": "career",
                   "subcategory": "growth", "publishDate": "2024-01-01"}),
        );
        let orphans = store.orphans().unwrap();
        assert_eq!(orphans.len(), 1);
        assert!(orphans[0].ends_with("career/growth/promo.json"));
    }

    #[test]
    fn profile_requires_name_and_title() {
        let tmp = setup_content();
        let store = ContentStore::new(tmp.path());
        let mut profile = store.profile().unwrap();
        assert_eq!(profile.personal.name, "Ada Lovelace");
        profile.personal.title = String::new();
        assert!(store.save_profile(&profile).is_err());
        profile.personal.title = "Analyst".into();
        store.save_profile(&profile).unwrap();
        assert_eq!(store.profile().unwrap().personal.title, "Analyst");
    }

    #[test]
    fn save_experience_round_trips_with_unmodeled_fields() {
        let tmp = setup_content();
        let store = ContentStore::new(tmp.path());
        let mut experience = store.experience().unwrap();
        assert_eq!(experience.len(), 2);
        experience[0].position = "Staff Engineer".into();
        experience[0]
            .extra
            .insert("team".into(), json!({"size": 6}));
        experience.remove(1);

        store.save_experience(&experience).unwrap();

        let reloaded = store.experience().unwrap();
        assert_eq!(reloaded, experience);
        assert_eq!(reloaded[0].extra["team"], json!({"size": 6}));
        let raw: serde_json::Value =
            read_json(&tmp.path().join(EXPERIENCE_FILE)).unwrap();
        assert_eq!(raw[0]["endDate"], serde_json::Value::Null);
        assert_eq!(raw[0]["type"], "work");
    }

    #[test]
    fn skills_level_validated() {
        let tmp = setup_content();
        let store = ContentStore::new(tmp.path());
        let mut skills = store.skills().unwrap();
        skills[0].skills[0].level = 9;
        assert!(store.save_skills(&skills).is_err());
    }

    #[test]
    fn stats_counts_everything() {
        let tmp = setup_content();
        let store = ContentStore::new(tmp.path());
        let stats = store.stats().unwrap();
        assert_eq!(
            stats.posts,
            PostStats {
                total: 3,
                published: 2,
                drafts: 1,
                featured: 2
            }
        );
        assert_eq!(
            stats.categories,
            vec![("web-development".to_string(), 2), ("devops".to_string(), 1)]
        );
        assert_eq!(stats.experience.total, 2);
        assert_eq!(stats.experience.work, 1);
        assert_eq!(stats.experience.education, 1);
        assert_eq!(stats.skills.total, 2);
        assert_eq!(stats.skills.categories, 1);
        assert!((stats.skills.average_level - 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn stats_tolerates_missing_portfolio_files() {
        let tmp = setup_content();
        let store = ContentStore::new(tmp.path());
        fs::remove_file(tmp.path().join(EXPERIENCE_FILE)).unwrap();
        fs::remove_file(tmp.path().join(SKILLS_FILE)).unwrap();
        let stats = store.stats().unwrap();
        assert_eq!(stats.experience.total, 0);
        assert_eq!(stats.skills.average_level, 0.0);
    }

    #[test]
    fn draft_status_survives_listing() {
        let tmp = setup_content();
        let store = ContentStore::new(tmp.path());
        let posts = store.all_posts().unwrap();
        let css = posts.iter().find(|p| p.id == "css-grid").unwrap();
        assert_eq!(css.status, Status::Draft);
    }
}
