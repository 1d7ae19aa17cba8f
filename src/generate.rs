//! Static site generation.
//!
//! Renders every page of a loaded [`Site`] to disk so the output directory
//! can be served by any static file host.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                  # Home page
//! ├── 404.html                    # Not-found page
//! ├── codex.json                  # Machine-readable catalog
//! ├── assets/
//! │   ├── style.<hash>.css        # Color variables + static/style.css
//! │   ├── nav.<hash>.js           # static/nav.js
//! │   └── ...                     # User assets, copied verbatim
//! ├── codex/
//! │   └── react-memo/index.html   # One directory per article
//! └── category/
//!     └── react/index.html        # One directory per category
//! ```
//!
//! Pages live in `<slug>/index.html` directories so the URLs match the ones
//! the HTTP server answers (`/codex/react-memo/`).
//!
//! ## Fingerprinting
//!
//! With `build.fingerprint_assets` (the default), asset names carry the
//! first 10 hex digits of their SHA-256, and every page links to the hashed
//! names. Changing a color in `config.toml` changes the stylesheet hash.
//!
//! ## Parallelism
//!
//! Article pages are independent, so they are rendered with rayon's
//! `par_iter` on the global pool. The CLI sizes that pool from
//! `build.max_processes`.

use crate::catalog::Catalog;
use crate::render;
use crate::site::Site;
use maud::Markup;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("asset walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// What a build wrote, for CLI output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub output_dir: PathBuf,
    /// Article slugs in authoring order
    pub articles: Vec<String>,
    /// Category keys with a listing page
    pub categories: Vec<&'static str>,
    /// Stylesheet and script file names under `assets/`
    pub assets: Vec<String>,
    /// Number of user asset files copied
    pub copied_assets: usize,
}

impl GenerateReport {
    /// index + 404 + articles + categories
    pub fn page_count(&self) -> usize {
        2 + self.articles.len() + self.categories.len()
    }
}

pub fn generate(site: &Site, output_dir: &Path) -> Result<GenerateReport, GenerateError> {
    let links = site.built_asset_links();
    let assets_dir = output_dir.join("assets");
    fs::create_dir_all(&assets_dir)?;

    // User assets first so the generated stylesheet and script win on a
    // name clash.
    let copied_assets = match site.user_assets() {
        Some(src) => copy_assets(src, &assets_dir)?,
        None => 0,
    };

    let (style_name, script_name) = site.asset_names();
    fs::write(assets_dir.join(&style_name), site.css())?;
    fs::write(assets_dir.join(&script_name), site.js())?;

    write_page(output_dir, &render::render_home(site, &links))?;
    fs::write(
        output_dir.join("404.html"),
        render::render_not_found(site, &links).into_string(),
    )?;
    fs::write(output_dir.join("codex.json"), Catalog::build(site).to_json()?)?;

    let codex_dir = output_dir.join("codex");
    site.registry()
        .list()
        .par_iter()
        .try_for_each(|article| {
            write_page(
                &codex_dir.join(&article.slug),
                &render::render_article(site, &links, article),
            )
        })?;

    let category_dir = output_dir.join("category");
    let categories: Vec<&'static str> = site
        .listing_categories()
        .into_iter()
        .map(|category| {
            write_page(
                &category_dir.join(category.key),
                &render::render_category(site, &links, category),
            )
            .map(|()| category.key)
        })
        .collect::<Result<_, _>>()?;

    Ok(GenerateReport {
        output_dir: output_dir.to_path_buf(),
        articles: site
            .registry()
            .list()
            .iter()
            .map(|a| a.slug.clone())
            .collect(),
        categories,
        assets: vec![style_name, script_name],
        copied_assets,
    })
}

/// Write `markup` to `dir/index.html`, creating `dir`.
fn write_page(dir: &Path, markup: &Markup) -> std::io::Result<()> {
    fs::create_dir_all(dir)?;
    fs::write(dir.join("index.html"), &markup.0)
}

/// Recursively copy `src` into `dst`. Returns the number of files copied.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

// ============================================================================
// Tests
// ============================================================================
