//! # Mechanicus Codex
//!
//! A themed catalog of web-performance techniques, written in the voice of
//! the Adeptus Mechanicus. Each article ("scroll") explains one technique:
//! why to use it, a good/bad example, when not to use it, and closes with a
//! benediction.
//!
//! # Architecture: Load Once, Render Many
//!
//! ```text
//! data/codex.toml ─┐
//! data/lore.toml  ─┼─▶ Site (immutable) ─┬─▶ generate  →  dist/ (static HTML)
//! config.toml     ─┘                     └─▶ serve     →  HTTP, rendered per request
//! ```
//!
//! Everything is loaded and validated up front into a [`site::Site`]. After
//! that nothing mutates: the static build shares it across rayon workers and
//! the HTTP server shares it behind an `Arc`, both without locks.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`registry`] | The article store: lookup, listing, grouping by category, data audit |
//! | [`taxonomy`] | Fixed, ordered category tables and the first-match slug classifier |
//! | [`quotes`] | Deterministic benediction synthesis from a slug hash and themed word banks |
//! | [`lore`] | Curated Tech-Priest sayings, picked deterministically per page |
//! | [`site`] | The loaded site: registry + lore + taxonomy + config, plus assets |
//! | [`render`] | Maud page templates (home, article, category, 404) and the header |
//! | [`catalog`] | Serializable catalog view, written as `codex.json` |
//! | [`generate`] | Static build into an output directory |
//! | [`serve`] | Axum router and server loop |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`types`] | `ArticleRecord` and URL helpers |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Categories Are Code, Not Data
//!
//! The category tables are `'static` arrays compiled into the binary. An
//! article joins a category by being listed there, not by a field on the
//! article. This keeps classification total and independent of the content
//! file: any slug, even one that does not exist, maps to exactly one
//! category, and a slug listed nowhere falls into `misc`. Listed slugs
//! without an article are tolerated and reported by `check`.
//!
//! ## No Randomness
//!
//! Benedictions and sayings are picked with a character-sum hash of the slug
//! (or page key). The same input always renders the same page, which keeps
//! builds reproducible and asset fingerprints stable.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time HTML
//! macro system. Malformed markup is a build error, interpolation is escaped
//! by default, and there is no template directory to ship. Article bodies are
//! markdown, converted with `pulldown-cmark`.
//!
//! ## One Renderer, Two Outputs
//!
//! `generate` and `serve` call the same [`render`] functions. The only
//! difference is the asset links: the static build points at fingerprinted
//! files (`style.<hash>.css`) that can be cached forever, the server at the
//! plain names.

pub mod catalog;
pub mod config;
pub mod generate;
pub mod lore;
pub mod output;
pub mod quotes;
pub mod registry;
pub mod render;
pub mod serve;
pub mod site;
pub mod taxonomy;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
