//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. User config is
//! sparse: stock defaults form the base layer and the user's file overrides
//! only the keys it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "Mechanicus Codex"
//! tagline = "Sacred rites of web performance, preserved for the faithful."
//!
//! [colors]
//! background = "#000000"
//! surface = "#111827"
//! text = "#fecaca"        # Body text
//! text_muted = "#9ca3af"  # Summaries, breadcrumbs, chips
//! accent = "#ef4444"      # Headings, active links
//! accent_muted = "#991b1b"
//! border = "#7f1d1d"
//! code_bg = "#1f2937"
//!
//! [build]
//! fingerprint_assets = true  # style.<hash>.css instead of style.css
//! max_processes = 4          # Page render workers (omit for auto = CPU cores)
//!
//! [serve]
//! addr = "127.0.0.1:3000"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site title shown in the header and `<title>`.
    pub title: String,
    /// One-line subtitle on the home page.
    pub tagline: String,
    /// Palette injected as CSS custom properties.
    pub colors: ColorConfig,
    /// Static build settings.
    pub build: BuildConfig,
    /// HTTP server settings.
    pub serve: ServeConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Mechanicus Codex".to_string(),
            tagline: "Sacred rites of web performance, preserved for the faithful.".to_string(),
            colors: ColorConfig::default(),
            build: BuildConfig::default(),
            serve: ServeConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation("title must not be empty".into()));
        }
        if let Some(name) = self.colors.first_empty() {
            return Err(ConfigError::Validation(format!(
                "colors.{name} must not be empty"
            )));
        }
        if self.build.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "build.max_processes must be at least 1".into(),
            ));
        }
        self.serve.socket_addr()?;
        Ok(())
    }
}

/// Static build settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Append a content hash to asset filenames for long-lived caching.
    pub fingerprint_assets: bool,
    /// Maximum number of parallel page render workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            fingerprint_assets: true,
            max_processes: None,
        }
    }
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &BuildConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServeConfig {
    /// Listen address, `host:port`.
    pub addr: String,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".to_string(),
        }
    }
}

impl ServeConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.addr.parse().map_err(|_| {
            ConfigError::Validation(format!(
                "serve.addr '{}' is not a valid host:port address",
                self.addr
            ))
        })
    }
}

/// Site palette. Every value is a CSS color.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub background: String,
    /// Card and dropdown background.
    pub surface: String,
    pub text: String,
    /// Secondary text (summaries, breadcrumbs, chips).
    pub text_muted: String,
    /// Headings, active links, the loading bar.
    pub accent: String,
    /// Hover backgrounds and active menu items.
    pub accent_muted: String,
    pub border: String,
    /// Example block background.
    pub code_bg: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#000000".to_string(),
            surface: "#111827".to_string(),
            text: "#fecaca".to_string(),
            text_muted: "#9ca3af".to_string(),
            accent: "#ef4444".to_string(),
            accent_muted: "#991b1b".to_string(),
            border: "#7f1d1d".to_string(),
            code_bg: "#1f2937".to_string(),
        }
    }
}

impl ColorConfig {
    fn entries(&self) -> [(&'static str, &str); 8] {
        [
            ("background", &self.background),
            ("surface", &self.surface),
            ("text", &self.text),
            ("text_muted", &self.text_muted),
            ("accent", &self.accent),
            ("accent_muted", &self.accent_muted),
            ("border", &self.border),
            ("code_bg", &self.code_bg),
        ]
    }

    fn first_empty(&self) -> Option<&'static str> {
        self.entries()
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
    }
}

// =============================================================================
// Layering: stock defaults, then config.toml
// =============================================================================

/// Every default as a TOML table, the bottom layer under a user's file.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Lay `overlay` over `base`. Tables merge per key, recursively; any other
/// overlay value replaces what was below it.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    let above = match overlay {
        toml::Value::Table(above) => above,
        other => return other,
    };
    let mut below = match base {
        toml::Value::Table(below) => below,
        _ => return toml::Value::Table(above),
    };
    for (key, value) in above {
        let layered = match below.remove(&key) {
            Some(existing) => merge_toml(existing, value),
            None => value,
        };
        below.insert(key, layered);
    }
    toml::Value::Table(below)
}

/// The parsed `config.toml` in `dir`, or `None` when the directory has none.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let file = dir.join("config.toml");
    if !file.is_file() {
        return Ok(None);
    }
    let text = fs::read_to_string(&file)?;
    Ok(Some(toml::from_str(&text)?))
}

/// Apply `overlay` (if any) to `base` and turn the result into a checked
/// [`SiteConfig`].
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let layered = if let Some(user) = overlay {
        merge_toml(base, user)
    } else {
        base
    };
    let config: SiteConfig = layered.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Site config for the content directory `dir`: stock defaults overridden by
/// its `config.toml`, then validated.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(dir)?)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Mechanicus Codex Configuration
# ==============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Unknown keys will cause an error.

# Site title, shown in the header and the browser tab.
title = "Mechanicus Codex"

# One-line subtitle on the home page.
tagline = "Sacred rites of web performance, preserved for the faithful."

# ---------------------------------------------------------------------------
# Colors (CSS values, injected as custom properties)
# ---------------------------------------------------------------------------
[colors]
background = "#000000"
surface = "#111827"       # Cards, dropdown menus
text = "#fecaca"
text_muted = "#9ca3af"    # Summaries, breadcrumbs, chips
accent = "#ef4444"        # Headings, active links, loading bar
accent_muted = "#991b1b"  # Hover and active menu backgrounds
border = "#7f1d1d"
code_bg = "#1f2937"       # Example blocks

# ---------------------------------------------------------------------------
# Static build
# ---------------------------------------------------------------------------
[build]
# Write assets as style.<hash>.css / nav.<hash>.js so they can be cached forever.
fingerprint_assets = true

# Maximum parallel page-render workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4

# ---------------------------------------------------------------------------
# HTTP server (`serve` command)
# ---------------------------------------------------------------------------
[serve]
addr = "127.0.0.1:3000"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    let mut css = String::from(":root {\n");
    for (name, value) in colors.entries() {
        css.push_str(&format!(
            "    --color-{}: {};\n",
            name.replace('_', "-"),
            value
        ));
    }
    css.push('}');
    css
}
