//! Shared test utilities for the mechanicus-codex test suite.
//!
//! Provides record builders, small fixture registries, and extractors that
//! keep assertions readable.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let registry = registry_of(&["react-memo", "stray"]);
//! let groups = registry.group_by_category(&Taxonomy::standard());
//! assert_eq!(group_keys(&groups), vec!["react", "misc"]);
//! ```

use crate::config::SiteConfig;
use crate::lore::Lore;
use crate::registry::{CategoryGroup, Registry};
use crate::site::Site;
use crate::taxonomy::Taxonomy;
use crate::types::ArticleRecord;

// =========================================================================
// Record builders
// =========================================================================

/// A minimal article with no authored benediction.
pub fn article(slug: &str, title: &str) -> ArticleRecord {
    ArticleRecord {
        slug: slug.to_string(),
        title: title.to_string(),
        summary: format!("Summary of {title}."),
        rationale: format!("Why {title} matters.\n\n- first reason\n- second reason"),
        example: "// ✅ Good\nok();\n\n// 🛑 Bad\nnot_ok();".to_string(),
        anti_pattern: format!("Avoid {title} when it is **not** needed."),
        flavor_text: None,
    }
}

/// An article carrying an authored benediction.
pub fn blessed_article(slug: &str, title: &str, benediction: &str) -> ArticleRecord {
    ArticleRecord {
        flavor_text: Some(benediction.to_string()),
        ..article(slug, title)
    }
}

/// Registry of minimal articles whose titles are the slugs.
pub fn registry_of(slugs: &[&str]) -> Registry {
    Registry::from_records(slugs.iter().map(|s| article(s, s)).collect())
        .unwrap_or_else(|e| panic!("fixture registry {slugs:?} rejected: {e}"))
}

/// A site over the built-in registry and lore with stock config.
pub fn builtin_site() -> Site {
    Site::new(
        Registry::builtin().unwrap(),
        Lore::builtin().unwrap(),
        Taxonomy::standard(),
        SiteConfig::default(),
    )
}

/// A site over a small registry with stock config.
pub fn site_of(records: Vec<ArticleRecord>) -> Site {
    Site::new(
        Registry::from_records(records).unwrap(),
        Lore::builtin().unwrap(),
        Taxonomy::standard(),
        SiteConfig::default(),
    )
}

// =========================================================================
// Extractors
// =========================================================================

/// Slugs of a sequence of articles, in order.
pub fn slugs<'a>(articles: impl Iterator<Item = &'a ArticleRecord>) -> Vec<&'a str> {
    articles.map(|a| a.slug.as_str()).collect()
}

/// Category keys of a grouping, in order.
pub fn group_keys(groups: &[CategoryGroup<'_>]) -> Vec<&'static str> {
    groups.iter().map(|g| g.category.key).collect()
}
