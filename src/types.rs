//! Content documents stored under the private data root.
//!
//! Every type here round-trips through the JSON files the admin edits, so
//! field names follow the on-disk `camelCase` convention. Every document keeps
//! the fields it doesn't model in `extra`, which makes a parse → write cycle
//! lossless.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// How hard a post is to follow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// Publication state. Only `Published` posts appear in public listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Draft,
    Published,
}

/// One blog post, stored at `blogs/<category>/<subcategory>/<id>.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Slug, unique within its category + subcategory pair.
    pub id: String,
    pub title: String,
    pub category: String,
    pub subcategory: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// ISO date (`2024-06-01`) or RFC 3339 date-time.
    pub publish_date: String,
    #[serde(default)]
    pub last_modified: String,
    #[serde(default)]
    pub read_time: String,
    #[serde(default)]
    pub excerpt: String,
    /// Markdown body.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Post {
    pub fn is_published(&self) -> bool {
        self.status == Status::Published
    }
}

/// A [`Post`] without its body, as listed in `blogs-index.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogListItem {
    pub id: String,
    pub title: String,
    pub category: String,
    pub subcategory: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub publish_date: String,
    #[serde(default)]
    pub last_modified: String,
    #[serde(default)]
    pub read_time: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BlogListItem {
    pub fn is_published(&self) -> bool {
        self.status == Status::Published
    }
}

impl From<Post> for BlogListItem {
    fn from(post: Post) -> Self {
        let Post {
            id,
            title,
            category,
            subcategory,
            tags,
            publish_date,
            last_modified,
            read_time,
            excerpt,
            content: _,
            featured,
            difficulty,
            status,
            author,
            seo_title,
            seo_description,
            mut extra,
        } = post;
        // List items never carry a body.
        extra.remove("content");
        Self {
            id,
            title,
            category,
            subcategory,
            tags,
            publish_date,
            last_modified,
            read_time,
            excerpt,
            featured,
            difficulty,
            status,
            author,
            seo_title,
            seo_description,
            extra,
        }
    }
}

/// Top level of the two-level blog taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Category {
    pub fn subcategory(&self, id: &str) -> Option<&Subcategory> {
        self.subcategories.iter().find(|s| s.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// Portfolio documents
// ============================================================================

/// `profile.json`: the owner's identity, social links and hero copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub personal: Personal,
    pub social: Social,
    pub hero: Hero,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Personal {
    pub name: String,
    pub title: String,
    pub email: String,
    pub location: String,
    pub bio: String,
    /// Path to the avatar image, relative to the site root.
    pub avatar: String,
    /// Path to the PDF resume, relative to the site root.
    pub resume: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Social {
    pub github: String,
    pub linkedin: String,
    pub twitter: String,
    pub website: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hero {
    pub tagline: String,
    pub description: String,
    /// Call-to-action button label.
    pub cta: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceKind {
    #[default]
    Work,
    Education,
    Certification,
    Volunteer,
}

/// One entry of `experience.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub company: String,
    pub position: String,
    pub start_date: String,
    /// `None` for the current position.
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(rename = "type", default)]
    pub kind: ExperienceKind,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievements: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn zero_years() -> Number {
    Number::from(0)
}

/// A named group of skills in `skills.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    /// Proficiency on a 1–5 scale.
    pub level: u8,
    /// Kept as written (`3` stays `3`, `1.5` stays `1.5`).
    #[serde(default = "zero_years")]
    pub years: Number,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certification_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_post() -> serde_json::Value {
        json!({
            "id": "hooks",
            "title": "Hooks in Depth",
            "category": "web-development",
            "subcategory": "frontend",
            "tags": ["react"],
            "publishDate": "2024-06-01",
            "lastModified": "2024-06-02T10:00:00Z",
            "readTime": "7 min read",
            "excerpt": "All about hooks",
            "content": "# Hooks\n\nBody text.",
            "featured": true,
            "difficulty": "intermediate",
            "status": "published",
            "author": "Dev",
            "seoTitle": "Hooks"
        })
    }

    #[test]
    fn post_parses_camel_case_fields() {
        let post: Post = serde_json::from_value(sample_post()).unwrap();
        assert_eq!(post.publish_date, "2024-06-01");
        assert_eq!(post.read_time, "7 min read");
        assert_eq!(post.difficulty, Difficulty::Intermediate);
        assert!(post.is_published());
        assert_eq!(post.seo_title.as_deref(), Some("Hooks"));
        assert!(post.seo_description.is_none());
    }

    #[test]
    fn post_missing_optional_fields_uses_defaults() {
        let post: Post = serde_json::from_value(json!({
            "id": "a",
            "title": "A",
            "category": "c",
            "subcategory": "s",
            "publishDate": "2024-01-01"
        }))
        .unwrap();
        assert!(post.tags.is_empty());
        assert!(!post.featured);
        assert_eq!(post.status, Status::Draft);
        assert_eq!(post.difficulty, Difficulty::Beginner);
    }

    #[test]
    fn post_missing_required_field_is_error() {
        let result: Result<Post, _> = serde_json::from_value(json!({
            "id": "a",
            "title": "A",
            "category": "c"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn unknown_difficulty_is_error() {
        let mut value = sample_post();
        value["difficulty"] = json!("expert");
        assert!(serde_json::from_value::<Post>(value).is_err());
    }

    #[test]
    fn list_item_drops_content_only() {
        let post: Post = serde_json::from_value(sample_post()).unwrap();
        let item = BlogListItem::from(post);
        let value = serde_json::to_value(&item).unwrap();
        assert!(value.get("content").is_none());
        assert_eq!(value["title"], "Hooks in Depth");
        assert_eq!(value["seoTitle"], "Hooks");
        assert!(value.get("seoDescription").is_none());
    }

    #[test]
    fn extra_fields_survive_projection() {
        let mut value = sample_post();
        value["coverImage"] = json!("/images/hooks.png");
        let post: Post = serde_json::from_value(value).unwrap();
        let item = BlogListItem::from(post);
        let out = serde_json::to_value(&item).unwrap();
        assert_eq!(out["coverImage"], "/images/hooks.png");
    }

    #[test]
    fn category_finds_subcategory() {
        let cat: Category = serde_json::from_value(json!({
            "id": "devops",
            "name": "DevOps",
            "description": "",
            "subcategories": [
                {"id": "docker", "name": "Docker", "description": ""}
            ]
        }))
        .unwrap();
        assert!(cat.subcategory("docker").is_some());
        assert!(cat.subcategory("k8s").is_none());
    }

    #[test]
    fn experience_type_field_maps_to_kind() {
        let exp: Experience = serde_json::from_value(json!({
            "id": "1",
            "company": "Acme",
            "position": "Engineer",
            "startDate": "2020-01-01",
            "endDate": null,
            "type": "education"
        }))
        .unwrap();
        assert_eq!(exp.kind, ExperienceKind::Education);
        assert!(exp.end_date.is_none());
        let out = serde_json::to_value(&exp).unwrap();
        assert_eq!(out["type"], "education");
    }

    #[test]
    fn profile_nested_shape() {
        let profile: Profile = serde_json::from_value(json!({
            "personal": {"name": "Ada", "title": "Engineer"},
            "social": {"github": "ada"},
            "hero": {"cta": "Let's Connect"}
        }))
        .unwrap();
        assert_eq!(profile.personal.name, "Ada");
        assert_eq!(profile.social.github, "ada");
        assert_eq!(profile.hero.cta, "Let's Connect");
        assert_eq!(profile.social.twitter, "");
    }

    #[test]
    fn profile_round_trip_keeps_unmodeled_fields() {
        let input = json!({
            "personal": {"name": "Ada", "title": "Engineer", "phone": "+44 20 0000"},
            "social": {"github": "ada", "mastodon": "@ada"},
            "hero": {"cta": "Hi", "badge": "new"},
            "seo": {"keywords": ["rust"]}
        });
        let profile: Profile = serde_json::from_value(input).unwrap();
        let out = serde_json::to_value(&profile).unwrap();
        assert_eq!(out["personal"]["phone"], "+44 20 0000");
        assert_eq!(out["social"]["mastodon"], "@ada");
        assert_eq!(out["hero"]["badge"], "new");
        assert_eq!(out["seo"], json!({"keywords": ["rust"]}));
    }

    #[test]
    fn skill_years_keep_their_written_form() {
        let skills: Vec<SkillCategory> = serde_json::from_value(json!([
            {"id": "lang", "name": "Languages", "color": "orange", "skills": [
                {"name": "Rust", "level": 5, "years": 3, "icon": "rust"},
                {"name": "Go", "level": 2, "years": 1.5}
            ]}
        ]))
        .unwrap();
        let text = serde_json::to_string(&skills).unwrap();
        assert!(text.contains(r#""years":3,"#) || text.contains(r#""years":3}"#));
        assert!(text.contains(r#""years":1.5"#));
        let out: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(out[0]["color"], "orange");
        assert_eq!(out[0]["skills"][0]["icon"], "rust");
    }

    #[test]
    fn category_round_trip_keeps_unmodeled_fields() {
        let input = json!({
            "id": "devops",
            "name": "DevOps",
            "description": "",
            "color": "blue",
            "subcategories": [{"id": "docker", "name": "Docker", "description": "", "order": 2}]
        });
        let cat: Category = serde_json::from_value(input).unwrap();
        let out = serde_json::to_value(&cat).unwrap();
        assert_eq!(out["color"], "blue");
        assert_eq!(out["subcategories"][0]["order"], 2);
    }
}
