//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is a content inventory: each entity (category, article) is shown by
//! its positional index and display title, with slugs and file paths as
//! secondary context. The same helpers format `check` and `build` so the two
//! read alike for the same data.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Categories
//! 001 React (6 articles)
//!     001 React.memo
//!         Slug: react-memo
//!     002 useMemo and useCallback
//!         Slug: usememo-usecallback
//!
//! Findings
//!     react: 'react-server-components' has no article yet
//!
//! 21 articles in 5 categories, 24 pending, 0 unclassified
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! Not found → 404.html
//! Catalog → codex.json
//! Assets
//!     style.1a2b3c4d5e.css
//!     nav.5e4d3c2b1a.js
//! Articles
//! 001 React.memo → codex/react-memo/index.html
//! Categories
//! 001 React → category/react/index.html
//!
//! Generated 21 articles, 7 category pages, 2 assets
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::generate::GenerateReport;
use crate::registry::Finding;
use crate::site::Site;
use std::net::SocketAddr;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + title, with optional count.
///
/// ```text
/// 001 React (6 articles)
/// 001 React.memo
/// ```
fn entity_header(index: usize, title: &str, count: Option<usize>) -> String {
    match count {
        Some(1) => format!("{} {} (1 article)", format_index(index), title),
        Some(n) => format!("{} {} ({} articles)", format_index(index), title, n),
        None => format!("{} {}", format_index(index), title),
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// `1 article`, `2 articles`. Irregular plurals pass their own form.
fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(site: &Site, findings: &[Finding]) -> Vec<String> {
    let registry = site.registry();
    let taxonomy = site.taxonomy();
    let groups = registry.group_by_category(taxonomy);
    let mut lines = vec!["Categories".to_string()];

    for (gi, group) in groups.iter().enumerate() {
        lines.push(entity_header(
            gi + 1,
            group.category.name,
            Some(group.articles.len()),
        ));
        let entries = registry.category_entries(taxonomy, group.category);
        for (ai, article) in entries.iter().enumerate() {
            lines.push(format!(
                "{}{}",
                indent(1),
                entity_header(ai + 1, &article.title, None)
            ));
            lines.push(format!("{}Slug: {}", indent(2), article.slug));
            if !article.summary.is_empty() {
                lines.push(format!(
                    "{}Summary: {}",
                    indent(2),
                    truncate_desc(&article.summary, 60)
                ));
            }
        }
    }

    if !findings.is_empty() {
        lines.push(String::new());
        lines.push("Findings".to_string());
        for finding in findings {
            lines.push(format!("{}{}", indent(1), finding));
        }
    }

    let pending = findings
        .iter()
        .filter(|f| matches!(f, Finding::PendingEntry { .. }))
        .count();
    let unclassified = findings
        .iter()
        .filter(|f| matches!(f, Finding::Unclassified { .. }))
        .count();
    lines.push(String::new());
    lines.push(format!(
        "{} in {}, {} pending, {} unclassified",
        plural(registry.len(), "article", "articles"),
        plural(groups.len(), "category", "categories"),
        pending,
        unclassified
    ));
    lines
}

pub fn print_check_output(site: &Site, findings: &[Finding]) {
    for line in format_check_output(site, findings) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_generate_output(site: &Site, report: &GenerateReport) -> Vec<String> {
    let mut lines = vec![
        "Home → index.html".to_string(),
        "Not found → 404.html".to_string(),
        "Catalog → codex.json".to_string(),
        "Assets".to_string(),
    ];
    for asset in &report.assets {
        lines.push(format!("{}{}", indent(1), asset));
    }
    if report.copied_assets > 0 {
        lines.push(format!(
            "{}{} copied",
            indent(1),
            plural(report.copied_assets, "user asset", "user assets")
        ));
    }

    lines.push("Articles".to_string());
    for (i, slug) in report.articles.iter().enumerate() {
        let title = site
            .registry()
            .get(slug)
            .map(|a| a.title.as_str())
            .unwrap_or(slug.as_str());
        lines.push(format!(
            "{} → codex/{}/index.html",
            entity_header(i + 1, title, None),
            slug
        ));
    }

    lines.push("Categories".to_string());
    for (i, key) in report.categories.iter().enumerate() {
        let name = site
            .listing_category(key)
            .map(|c| c.name)
            .unwrap_or(*key);
        lines.push(format!(
            "{} → category/{}/index.html",
            entity_header(i + 1, name, None),
            key
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}, {}",
        plural(report.articles.len(), "article", "articles"),
        plural(report.categories.len(), "category page", "category pages"),
        plural(report.assets.len(), "asset", "assets")
    ));
    lines
}

pub fn print_generate_output(site: &Site, report: &GenerateReport) {
    for line in format_generate_output(site, report) {
        println!("{}", line);
    }
}

// ============================================================================
// Serve
// ============================================================================

pub fn format_serve_banner(site: &Site, addr: SocketAddr) -> Vec<String> {
    vec![
        format!(
            "Serving {} ({}) at http://{}/",
            site.config().title,
            plural(site.registry().len(), "article", "articles"),
            addr
        ),
        "Press Ctrl-C to stop".to_string(),
    ]
}

pub fn print_serve_banner(site: &Site, addr: SocketAddr) {
    for line in format_serve_banner(site, addr) {
        println!("{}", line);
    }
}
