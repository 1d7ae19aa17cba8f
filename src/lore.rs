//! Sayings of the Tech-Priests.
//!
//! A curated list of attributed quotes shown on the home and category pages.
//! Selection is deterministic: the page's seed string (`"home"`, a category
//! key) is hashed with the same [`slug_hash`] the quote synthesizer uses, so
//! a page always shows the same saying for a given data set. Category pages
//! pick only among sayings tagged with the category's theme
//! ([`category_tag`]).

use crate::quotes::slug_hash;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

const BUILTIN_LORE: &str = include_str!("../data/lore.toml");

#[derive(Error, Debug)]
pub enum LoreError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("duplicate saying id '{0}'")]
    DuplicateId(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Ritual,
    Performance,
    Syntax,
    Stability,
    Data,
    General,
    Security,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Saying {
    pub id: String,
    pub text: String,
    pub author: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LoreFile {
    #[serde(default, rename = "saying")]
    sayings: Vec<Saying>,
}

#[derive(Debug, Clone, Default)]
pub struct Lore {
    sayings: Vec<Saying>,
}

impl Lore {
    pub fn from_sayings(sayings: Vec<Saying>) -> Result<Self, LoreError> {
        let mut ids = HashSet::new();
        for saying in &sayings {
            if !ids.insert(saying.id.as_str()) {
                return Err(LoreError::DuplicateId(saying.id.clone()));
            }
        }
        Ok(Self { sayings })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, LoreError> {
        let file: LoreFile = toml::from_str(content)?;
        Self::from_sayings(file.sayings)
    }

    pub fn builtin() -> Result<Self, LoreError> {
        Self::from_toml_str(BUILTIN_LORE)
    }

    pub fn sayings(&self) -> &[Saying] {
        &self.sayings
    }

    /// The saying for a seed string. `None` only when the lore is empty.
    pub fn pick(&self, seed: &str) -> Option<&Saying> {
        if self.sayings.is_empty() {
            return None;
        }
        let idx = slug_hash(seed) % self.sayings.len() as u64;
        self.sayings.get(idx as usize)
    }

    /// Sayings carrying `tag`, in authoring order.
    pub fn tagged(&self, tag: Tag) -> impl Iterator<Item = &Saying> {
        self.sayings.iter().filter(move |s| s.tags.contains(&tag))
    }

    /// Like [`pick`](Self::pick), but only among sayings carrying `tag`.
    /// Falls back to the whole list when no saying has the tag.
    pub fn pick_tagged(&self, tag: Tag, seed: &str) -> Option<&Saying> {
        let pool: Vec<&Saying> = self.tagged(tag).collect();
        if pool.is_empty() {
            return self.pick(seed);
        }
        let idx = slug_hash(seed) % pool.len() as u64;
        pool.get(idx as usize).copied()
    }
}

/// The theme a category's listing page draws its saying from.
pub fn category_tag(key: &str) -> Tag {
    match key {
        "react" | "next.js" | "performance" => Tag::Performance,
        "node.js" => Tag::Stability,
        "typescript" => Tag::Syntax,
        "python" => Tag::Data,
        "web-development-basics" => Tag::General,
        _ => Tag::Ritual,
    }
}
