//! Shared types used across the registry, renderers and the catalog export.
//!
//! The field names on disk follow the authoring schema of `data/codex.toml`
//! (`why`, `when_not`, `benediction`); the Rust names describe what the
//! field holds.

use serde::{Deserialize, Serialize};

/// A single Codex article.
///
/// Records are constructed once when the registry loads and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArticleRecord {
    /// Unique, URL-safe identifier (`react-memo`)
    pub slug: String,
    /// Display name (`React.memo`)
    pub title: String,
    /// One or two sentences shown on cards and under the title
    pub summary: String,
    /// Long-form "why use it" text (markdown)
    #[serde(rename = "why")]
    pub rationale: String,
    /// Good/bad example block, rendered verbatim
    pub example: String,
    /// "When not to use it" guidance (markdown)
    #[serde(rename = "when_not")]
    pub anti_pattern: String,
    /// Authored benediction. When absent, one is synthesized from the slug.
    #[serde(
        rename = "benediction",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub flavor_text: Option<String>,
}

impl ArticleRecord {
    /// Site-relative URL of the article page.
    pub fn path(&self) -> String {
        article_path(&self.slug)
    }
}

/// Site-relative URL of an article page, with trailing slash.
pub fn article_path(slug: &str) -> String {
    format!("/codex/{slug}/")
}

/// Site-relative URL of a category listing page, with trailing slash.
pub fn category_path(key: &str) -> String {
    format!("/category/{key}/")
}
