//! The content registry: the canonical, immutable set of Codex articles.
//!
//! The registry is built once from a TOML table (the embedded
//! `data/codex.toml` or a user-supplied file) and only read afterwards.
//! Authoring order is preserved and is the default display order.
//!
//! Lookups never fail loudly: an unknown slug is `None`, a taxonomy slug with
//! no article is skipped, and an article no table claims is grouped under
//! `misc`. [`Registry::audit`] reports those conditions so `check` can show
//! them without aborting a build.

use crate::taxonomy::{Category, MISC_KEY, Taxonomy};
use crate::types::ArticleRecord;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BUILTIN_CODEX: &str = include_str!("../data/codex.toml");

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("duplicate slug '{0}'")]
    DuplicateSlug(String),
    #[error("invalid slug '{0}': use lowercase letters, digits, '-', '.' or '_'")]
    InvalidSlug(String),
    #[error("article '{slug}' has an empty {field}")]
    EmptyField { slug: String, field: &'static str },
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CodexFile {
    #[serde(default, rename = "article")]
    articles: Vec<ArticleRecord>,
}

/// Immutable article store with O(1) slug lookup.
#[derive(Debug, Clone)]
pub struct Registry {
    articles: Vec<ArticleRecord>,
    index: HashMap<String, usize>,
}

/// One category's slice of the registry, in encounter order.
#[derive(Debug, Clone)]
pub struct CategoryGroup<'a> {
    pub category: &'a Category,
    pub articles: Vec<&'a ArticleRecord>,
}

/// A data-quality observation. None of these stop a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// A category lists a slug that has no article yet.
    PendingEntry {
        category: &'static str,
        slug: &'static str,
    },
    /// An article no category claims; it is listed under `misc`.
    Unclassified { slug: String },
    /// A slug listed by two categories; the earlier one wins.
    Shadowed {
        slug: &'static str,
        winner: &'static str,
        shadowed: &'static str,
    },
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Finding::PendingEntry { category, slug } => {
                write!(f, "{category}: '{slug}' has no article yet")
            }
            Finding::Unclassified { slug } => {
                write!(f, "'{slug}' is not in any category (listed under {MISC_KEY})")
            }
            Finding::Shadowed {
                slug,
                winner,
                shadowed,
            } => write!(f, "'{slug}' is listed by {winner} and {shadowed}; {winner} wins"),
        }
    }
}

impl Registry {
    /// Build a registry from already-parsed records.
    ///
    /// Rejects duplicate or malformed slugs and empty titles.
    pub fn from_records(articles: Vec<ArticleRecord>) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(articles.len());
        for (pos, article) in articles.iter().enumerate() {
            validate_slug(&article.slug)?;
            if article.title.trim().is_empty() {
                return Err(RegistryError::EmptyField {
                    slug: article.slug.clone(),
                    field: "title",
                });
            }
            if index.insert(article.slug.clone(), pos).is_some() {
                return Err(RegistryError::DuplicateSlug(article.slug.clone()));
            }
        }
        Ok(Self { articles, index })
    }

    /// Parse a codex table (`[[article]]` entries).
    pub fn from_toml_str(content: &str) -> Result<Self, RegistryError> {
        let file: CodexFile = toml::from_str(content)?;
        Self::from_records(file.articles)
    }

    /// Read and parse a codex file from disk.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let content = fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// The registry compiled into the binary.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_toml_str(BUILTIN_CODEX)
    }

    /// Exact-match lookup. No fuzzy or prefix matching.
    pub fn get(&self, slug: &str) -> Option<&ArticleRecord> {
        self.index.get(slug).map(|&pos| &self.articles[pos])
    }

    /// All articles in authoring order.
    pub fn list(&self) -> &[ArticleRecord] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Partition the registry by category.
    ///
    /// Groups follow the taxonomy's check order with `misc` last, and each
    /// group keeps the order articles were encountered in [`list`](Self::list).
    /// Empty groups are omitted, so the sum of group sizes equals `len()`.
    pub fn group_by_category<'a>(&'a self, taxonomy: &'a Taxonomy) -> Vec<CategoryGroup<'a>> {
        let mut buckets: HashMap<&'static str, Vec<&'a ArticleRecord>> = HashMap::new();
        for article in &self.articles {
            buckets
                .entry(taxonomy.classify(&article.slug))
                .or_default()
                .push(article);
        }

        taxonomy
            .categories()
            .iter()
            .chain(std::iter::once(&Category::MISC))
            .filter_map(|category| {
                buckets.remove(category.key).map(|articles| CategoryGroup {
                    category,
                    articles,
                })
            })
            .collect()
    }

    /// A category's articles in its member-list order.
    ///
    /// Listed slugs with no article are skipped. For `misc`, every article no
    /// table claims is returned in authoring order.
    pub fn category_entries<'a>(
        &'a self,
        taxonomy: &Taxonomy,
        category: &Category,
    ) -> Vec<&'a ArticleRecord> {
        if category.is_misc() {
            return self
                .articles
                .iter()
                .filter(|a| taxonomy.classify(&a.slug) == MISC_KEY)
                .collect();
        }
        category
            .slugs
            .iter()
            .filter(|slug| taxonomy.classify(slug) == category.key)
            .filter_map(|slug| self.get(slug))
            .collect()
    }

    /// Report pending, unclassified and shadowed slugs.
    pub fn audit(&self, taxonomy: &Taxonomy) -> Vec<Finding> {
        let mut findings = Vec::new();

        for category in taxonomy.categories() {
            for &slug in category.slugs.iter().filter(|s| self.get(s).is_none()) {
                findings.push(Finding::PendingEntry {
                    category: category.key,
                    slug,
                });
            }
        }

        for article in &self.articles {
            if taxonomy.classify(&article.slug) == MISC_KEY {
                findings.push(Finding::Unclassified {
                    slug: article.slug.clone(),
                });
            }
        }

        for (slug, winner, shadowed) in taxonomy.overlaps() {
            findings.push(Finding::Shadowed {
                slug,
                winner,
                shadowed,
            });
        }

        findings
    }
}

fn validate_slug(slug: &str) -> Result<(), RegistryError> {
    let valid = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '_'));
    if valid {
        Ok(())
    } else {
        Err(RegistryError::InvalidSlug(slug.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    #[test]
    fn builtin_registry_loads() {
        let registry = Registry::builtin().unwrap();
        assert_eq!(registry.len(), 21);
        assert_eq!(registry.list()[0].slug, "react-memo");
    }

    #[test]
    fn get_react_memo() {
        let registry = Registry::builtin().unwrap();
        let article = registry.get("react-memo").unwrap();
        assert_eq!(article.title, "React.memo");
    }

    #[test]
    fn get_unknown_is_none() {
        let registry = Registry::builtin().unwrap();
        assert!(registry.get("does-not-exist").is_none());
        assert!(registry.get("react").is_none());
        assert!(registry.get("").is_none());
    }

    #[test]
    fn builtin_slugs_are_unique_and_resolve() {
        let registry = Registry::builtin().unwrap();
        let mut seen = HashSet::new();
        for article in registry.list() {
            assert!(seen.insert(article.slug.as_str()), "dup {}", article.slug);
            assert_eq!(registry.get(&article.slug), Some(article));
        }
    }

    #[test]
    fn list_preserves_authoring_order() {
        let registry = registry_of(&["zeta", "alpha", "mid"]);
        assert_eq!(slugs(registry.list().iter()), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn duplicate_slug_rejected() {
        let result = Registry::from_records(vec![article("dup", "A"), article("dup", "B")]);
        assert!(matches!(result, Err(RegistryError::DuplicateSlug(s)) if s == "dup"));
    }

    #[test]
    fn invalid_slug_rejected() {
        for bad in ["", "Has-Caps", "with space", "slash/ed"] {
            let result = Registry::from_records(vec![article(bad, "T")]);
            assert!(
                matches!(result, Err(RegistryError::InvalidSlug(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn empty_title_rejected() {
        let result = Registry::from_records(vec![article("ok", "  ")]);
        assert!(matches!(
            result,
            Err(RegistryError::EmptyField { field: "title", .. })
        ));
    }

    #[test]
    fn from_toml_str_without_articles_is_empty() {
        let registry = Registry::from_toml_str("").unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn load_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("codex.toml");
        std::fs::write(
            &path,
            r#"
[[article]]
slug = "react-memo"
title = "React.memo"
summary = "s"
why = "w"
example = "e"
when_not = "n"
"#,
        )
        .unwrap();
        let registry = Registry::load(&path).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.get("react-memo").unwrap().flavor_text.is_none());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = Registry::load(&tmp.path().join("nope.toml"));
        assert!(matches!(result, Err(RegistryError::Io { .. })));
    }

    #[test]
    fn load_invalid_toml_is_error() {
        let result = Registry::from_toml_str("[[article]\nslug = ");
        assert!(matches!(result, Err(RegistryError::Toml(_))));
    }

    // =========================================================================
    // Grouping
    // =========================================================================

    #[test]
    fn group_by_category_partitions_builtin() {
        let registry = Registry::builtin().unwrap();
        let taxonomy = Taxonomy::standard();
        let groups = registry.group_by_category(&taxonomy);

        let total: usize = groups.iter().map(|g| g.articles.len()).sum();
        assert_eq!(total, registry.len());

        let mut seen = HashSet::new();
        for group in &groups {
            assert!(!group.articles.is_empty());
            for article in &group.articles {
                assert!(seen.insert(article.slug.as_str()));
                assert_eq!(taxonomy.classify(&article.slug), group.category.key);
            }
        }
    }

    #[test]
    fn group_by_category_orders_by_taxonomy_then_misc() {
        let registry = registry_of(&["stray", "use-swr", "react-memo", "lazy-loading"]);
        let taxonomy = Taxonomy::standard();
        let groups = registry.group_by_category(&taxonomy);

        assert_eq!(group_keys(&groups), vec!["react", "performance", "misc"]);
        // Encounter order inside the group, not member-list order
        assert_eq!(
            slugs(groups[0].articles.iter().copied()),
            vec!["react-memo", "lazy-loading"]
        );
        assert_eq!(slugs(groups[2].articles.iter().copied()), vec!["stray"]);
    }

    #[test]
    fn group_by_category_encounter_order_differs_from_table_order() {
        let registry = registry_of(&["lazy-loading", "react-memo"]);
        let taxonomy = Taxonomy::standard();
        let groups = registry.group_by_category(&taxonomy);
        assert_eq!(
            slugs(groups[0].articles.iter().copied()),
            vec!["lazy-loading", "react-memo"]
        );
    }

    #[test]
    fn group_by_category_empty_registry() {
        let registry = registry_of(&[]);
        assert!(registry.group_by_category(&Taxonomy::standard()).is_empty());
    }

    #[test]
    fn category_entries_skips_missing_slugs() {
        let registry = Registry::builtin().unwrap();
        let taxonomy = Taxonomy::standard();
        let react = taxonomy.category("react").unwrap();
        let entries = registry.category_entries(&taxonomy, react);
        // react-concurrent-features and react-server-components have no article
        assert_eq!(
            slugs(entries.into_iter()),
            vec![
                "react-memo",
                "usememo-usecallback",
                "lazy-loading",
                "virtualization",
                "lazy-hydration",
                "error-boundaries",
            ]
        );
    }

    #[test]
    fn category_entries_for_empty_category() {
        let registry = Registry::builtin().unwrap();
        let taxonomy = Taxonomy::standard();
        let python = taxonomy.category("python").unwrap();
        assert!(registry.category_entries(&taxonomy, python).is_empty());
    }

    #[test]
    fn category_entries_for_misc() {
        let registry = registry_of(&["react-memo", "stray-a", "stray-b"]);
        let taxonomy = Taxonomy::standard();
        let entries = registry.category_entries(&taxonomy, &Category::MISC);
        assert_eq!(slugs(entries.into_iter()), vec!["stray-a", "stray-b"]);
    }

    // =========================================================================
    // Audit
    // =========================================================================

    #[test]
    fn audit_builtin_has_only_pending_entries() {
        let registry = Registry::builtin().unwrap();
        let findings = registry.audit(&Taxonomy::standard());
        assert!(!findings.is_empty());
        assert!(
            findings
                .iter()
                .all(|f| matches!(f, Finding::PendingEntry { .. }))
        );
        assert!(findings.contains(&Finding::PendingEntry {
            category: "python",
            slug: "python-async-optimization",
        }));
    }

    #[test]
    fn audit_reports_unclassified() {
        let registry = registry_of(&["stray"]);
        let findings = registry.audit(&Taxonomy::standard());
        assert!(findings.contains(&Finding::Unclassified {
            slug: "stray".to_string()
        }));
    }

    #[test]
    fn finding_display() {
        let f = Finding::Unclassified {
            slug: "stray".to_string(),
        };
        assert_eq!(
            f.to_string(),
            "'stray' is not in any category (listed under misc)"
        );
    }
}
