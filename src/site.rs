//! The loaded site: registry, lore, taxonomy and config bundled together.
//!
//! A [`Site`] is built once at startup and never mutated. The static build
//! borrows it from rayon workers and the HTTP server shares it behind an
//! `Arc`, so everything reachable from here is read-only.

use crate::config::{self, ConfigError, SiteConfig};
use crate::lore::{Lore, LoreError};
use crate::quotes;
use crate::registry::{Registry, RegistryError};
use crate::taxonomy::{Category, MISC_KEY, Taxonomy};
use crate::types::ArticleRecord;
use sha2::{Digest, Sha256};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/nav.js");

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("registry: {0}")]
    Registry(#[from] RegistryError),
    #[error("lore: {0}")]
    Lore(#[from] LoreError),
    #[error("config: {0}")]
    Config(#[from] ConfigError),
}

/// Where pages should point their `<link>` and `<script>` tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLinks {
    pub stylesheet: String,
    pub script: String,
}

impl AssetLinks {
    /// Stable, unhashed URLs. Used by the HTTP server.
    pub fn plain() -> Self {
        Self {
            stylesheet: "/assets/style.css".to_string(),
            script: "/assets/nav.js".to_string(),
        }
    }
}

pub struct Site {
    registry: Registry,
    lore: Lore,
    taxonomy: Taxonomy,
    config: SiteConfig,
    css: String,
    user_assets: Option<PathBuf>,
}

impl Site {
    pub fn new(registry: Registry, lore: Lore, taxonomy: Taxonomy, config: SiteConfig) -> Self {
        let css = format!(
            "{}\n\n{}",
            config::generate_color_css(&config.colors),
            CSS_STATIC
        );
        Self {
            registry,
            lore,
            taxonomy,
            config,
            css,
            user_assets: None,
        }
    }

    /// Load everything the CLI needs.
    ///
    /// `source` overrides the embedded registry. `content_dir` holds
    /// `config.toml` and an optional `assets/` directory copied by the build.
    pub fn load(source: Option<&Path>, content_dir: &Path) -> Result<Self, SiteError> {
        let registry = match source {
            Some(path) => Registry::load(path)?,
            None => Registry::builtin()?,
        };
        let lore = Lore::builtin()?;
        let config = config::load_config(content_dir)?;
        let assets = content_dir.join("assets");
        let site = Self::new(registry, lore, Taxonomy::standard(), config);
        Ok(if assets.is_dir() {
            site.with_user_assets(assets)
        } else {
            site
        })
    }

    /// Directory whose contents are copied verbatim into `dist/assets/`.
    pub fn with_user_assets(mut self, dir: PathBuf) -> Self {
        self.user_assets = Some(dir);
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn lore(&self) -> &Lore {
        &self.lore
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn user_assets(&self) -> Option<&Path> {
        self.user_assets.as_deref()
    }

    /// Full stylesheet: color variables followed by the static rules.
    pub fn css(&self) -> &str {
        &self.css
    }

    pub fn js(&self) -> &'static str {
        JS
    }

    /// Categories that get a listing page: every taxonomy category, plus
    /// `misc` when at least one article is unclassified.
    pub fn listing_categories(&self) -> Vec<&Category> {
        let mut listed: Vec<&Category> = self.taxonomy.categories().iter().collect();
        let has_misc = self
            .registry
            .list()
            .iter()
            .any(|a| self.taxonomy.classify(&a.slug) == MISC_KEY);
        if has_misc {
            listed.push(&Category::MISC);
        }
        listed
    }

    pub fn listing_category(&self, key: &str) -> Option<&Category> {
        self.listing_categories().into_iter().find(|c| c.key == key)
    }

    /// Benediction shown on an article page.
    pub fn flavor_text<'a>(&self, article: &'a ArticleRecord) -> Cow<'a, str> {
        quotes::authored_or_synthesized(&self.taxonomy, article)
    }

    /// Fingerprinted asset file names (`style.<hash>.css`, `nav.<hash>.js`),
    /// or the plain names when fingerprinting is disabled.
    pub fn asset_names(&self) -> (String, String) {
        if self.config.build.fingerprint_assets {
            (
                format!("style.{}.css", fingerprint(self.css.as_bytes())),
                format!("nav.{}.js", fingerprint(JS.as_bytes())),
            )
        } else {
            ("style.css".to_string(), "nav.js".to_string())
        }
    }

    /// Links matching [`Site::asset_names`], for the static build.
    pub fn built_asset_links(&self) -> AssetLinks {
        let (style, script) = self.asset_names();
        AssetLinks {
            stylesheet: format!("/assets/{style}"),
            script: format!("/assets/{script}"),
        }
    }
}

/// First 10 hex digits of the SHA-256 of `bytes`.
pub fn fingerprint(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest
        .iter()
        .take(5)
        .map(|b| format!("{b:02x}"))
        .collect()
}
