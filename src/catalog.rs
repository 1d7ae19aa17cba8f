//! Machine-readable catalog of the Codex.
//!
//! Written as `codex.json` by `build`, served at `/codex.json`, and printed
//! by `export`. Entries are grouped exactly as the home page groups them and
//! carry the resolved benediction, so consumers never re-run the synthesizer.

use crate::site::Site;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Catalog {
    pub title: String,
    pub total: usize,
    pub categories: Vec<CatalogCategory>,
}

#[derive(Debug, Serialize)]
pub struct CatalogCategory {
    pub key: &'static str,
    pub name: &'static str,
    pub path: String,
    pub entries: Vec<CatalogEntry>,
}

#[derive(Debug, Serialize)]
pub struct CatalogEntry {
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub category: &'static str,
    pub path: String,
    pub flavor_text: String,
    /// `true` when `flavor_text` was synthesized rather than authored
    pub synthesized: bool,
}

impl Catalog {
    pub fn build(site: &Site) -> Self {
        let registry = site.registry();
        let categories = registry
            .group_by_category(site.taxonomy())
            .into_iter()
            .map(|group| CatalogCategory {
                key: group.category.key,
                name: group.category.name,
                path: crate::types::category_path(group.category.key),
                entries: group
                    .articles
                    .into_iter()
                    .map(|article| CatalogEntry {
                        slug: article.slug.clone(),
                        title: article.title.clone(),
                        summary: article.summary.clone(),
                        category: group.category.key,
                        path: article.path(),
                        flavor_text: site.flavor_text(article).into_owned(),
                        synthesized: article.flavor_text.is_none(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            title: site.config().title.clone(),
            total: registry.len(),
            categories,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
