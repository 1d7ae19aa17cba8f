//! HTML page rendering.
//!
//! Every page is a pure function from the loaded [`Site`] to maud
//! [`Markup`]. The static build writes the result to disk; the HTTP server
//! returns it directly. Neither path touches the filesystem from here.
//!
//! ## Pages
//!
//! - **Home** (`/`): lore saying, then one card grid per non-empty category
//! - **Article** (`/codex/{slug}/`): rationale, example, anti-pattern,
//!   benediction, previous/next links within the article's category
//! - **Category** (`/category/{key}/`): ritual, description, technology
//!   chips, entry cards in member-list order
//! - **Not found**: the "sacred scroll not found" page
//!
//! ## Header
//!
//! Desktop gets one dropdown per non-empty category. Mobile gets the
//! hamburger panel (a checkbox toggle, so it works without JavaScript).
//! Article pages add a breadcrumb whose category crumb opens on hover or
//! focus. Dropdown state, click-outside, Escape, focus trapping, prefetching
//! and the loading bar live in `static/nav.js`.

use crate::lore::{self, Saying};
use crate::registry::CategoryGroup;
use crate::site::{AssetLinks, Site};
use crate::taxonomy::Category;
use crate::types::{ArticleRecord, category_path};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Event, Parser, html as md_html};

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, links: &AssetLinks, body_class: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href=(links.stylesheet);
                script src=(links.script) defer {}
            }
            body class=[body_class] {
                div.loading-bar id="loading-bar" aria-hidden="true" {}
                (content)
            }
        }
    }
}

fn page_title(site: &Site, page: &str) -> String {
    format!("{} · {}", page, site.config().title)
}

/// Renders the site header: optional breadcrumb, title link, navigation
fn site_header(site: &Site, breadcrumb: Option<Markup>, current_slug: Option<&str>) -> Markup {
    html! {
        header.site-header {
            @if let Some(crumbs) = breadcrumb {
                nav.breadcrumb aria-label="Breadcrumb" {
                    (crumbs)
                }
            }
            div.header-bar {
                a.site-title href="/" {
                    span.cog aria-hidden="true" { "⚙️" }
                    span { (site.config().title) }
                }
                (render_nav(site, current_slug))
            }
        }
    }
}

/// One header menu: a category and its entries in member-list order.
struct NavMenu<'a> {
    category: &'a Category,
    entries: Vec<&'a ArticleRecord>,
}

fn nav_menus<'a>(site: &'a Site, groups: &[CategoryGroup<'a>]) -> Vec<NavMenu<'a>> {
    groups
        .iter()
        .map(|group| NavMenu {
            category: group.category,
            entries: site
                .registry()
                .category_entries(site.taxonomy(), group.category),
        })
        .collect()
}

/// Renders the desktop dropdowns and the mobile hamburger panel
pub fn render_nav(site: &Site, current_slug: Option<&str>) -> Markup {
    let groups = site.registry().group_by_category(site.taxonomy());
    let menus = nav_menus(site, &groups);
    let is_current = |slug: &str| current_slug == Some(slug);

    html! {
        nav.site-nav aria-label="Categories" {
            @for (index, menu) in menus.iter().enumerate() {
                @let menu_id = format!("menu-{index}");
                @let align = if index >= 3 { "dropdown-menu align-right" } else { "dropdown-menu" };
                div.dropdown data-dropdown=(menu.category.key) {
                    button.dropdown-toggle type="button" aria-expanded="false" aria-controls=(menu_id) {
                        (menu.category.name)
                        span.chevron aria-hidden="true" { "▾" }
                    }
                    div class=(align) id=(menu_id) hidden {
                        a.dropdown-all href=(category_path(menu.category.key)) {
                            "All " (menu.category.name) " scrolls"
                        }
                        @for entry in &menu.entries {
                            a href=(entry.path())
                                class=[is_current(&entry.slug).then_some("current")]
                                aria-current=[is_current(&entry.slug).then_some("page")] {
                                span.item-title { (entry.title) }
                                span.item-flavor { (site.flavor_text(entry).as_ref()) }
                            }
                        }
                    }
                }
            }
        }
        input.nav-toggle type="checkbox" id="nav-toggle";
        label.nav-hamburger for="nav-toggle" role="button" tabindex="0" aria-label="Open menu" aria-controls="nav-panel" {
            span.hamburger-line {}
            span.hamburger-line {}
            span.hamburger-line {}
        }
        div.nav-panel id="nav-panel" {
            label.nav-close for="nav-toggle" role="button" tabindex="0" aria-label="Close menu" { "×" }
            ul {
                li { a href="/" { "Home" } }
                @for menu in &menus {
                    li {
                        a.nav-group href=(category_path(menu.category.key)) { (menu.category.name) }
                        ul {
                            @for entry in &menu.entries {
                                li class=[is_current(&entry.slug).then_some("current")] {
                                    a href=(entry.path()) { (entry.title) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Home › Category (hover menu) › Title
fn article_breadcrumb(site: &Site, article: &ArticleRecord, category: &Category) -> Markup {
    let siblings = site
        .registry()
        .category_entries(site.taxonomy(), category);
    html! {
        a href="/" { "Home" }
        span.sep aria-hidden="true" { "›" }
        div.crumb-menu {
            a.crumb-category href=(category_path(category.key)) { (category.name) }
            div.crumb-dropdown {
                @for sibling in &siblings {
                    @let current = sibling.slug == article.slug;
                    a href=(sibling.path())
                        class=[current.then_some("current")]
                        aria-current=[current.then_some("page")] {
                        (sibling.title)
                    }
                }
            }
        }
        span.sep aria-hidden="true" { "›" }
        span.crumb-current aria-current="page" { (article.title) }
    }
}

fn category_breadcrumb(category: &Category) -> Markup {
    html! {
        a href="/" { "Home" }
        span.sep aria-hidden="true" { "›" }
        span.crumb-current aria-current="page" { (category.name) }
    }
}

fn article_card(article: &ArticleRecord) -> Markup {
    html! {
        a.card href=(article.path()) data-prefetch {
            h3.card-title { (article.title) }
            p.card-summary { (article.summary) }
        }
    }
}

fn saying_block(saying: Option<&Saying>) -> Markup {
    html! {
        @if let Some(saying) = saying {
            blockquote.saying {
                p { (saying.text) }
                cite { (saying.author) }
            }
        }
    }
}

/// Convert markdown to HTML. Raw HTML in the source is shown as text, so
/// `<Image>` in prose stays visible and no tag from a registry file reaches
/// the page.
fn markdown(text: &str) -> Markup {
    let parser = Parser::new(text).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    PreEscaped(out)
}

/// Previous and next articles within a category's member-list order.
pub fn neighbors<'a>(
    entries: &[&'a ArticleRecord],
    slug: &str,
) -> (Option<&'a ArticleRecord>, Option<&'a ArticleRecord>) {
    match entries.iter().position(|a| a.slug == slug) {
        Some(idx) => {
            let prev = idx.checked_sub(1).and_then(|i| entries.get(i)).copied();
            let next = entries.get(idx + 1).copied();
            (prev, next)
        }
        None => (None, None),
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the home page: saying, then a card grid per category
pub fn render_home(site: &Site, links: &AssetLinks) -> Markup {
    let groups = site.registry().group_by_category(site.taxonomy());
    let config = site.config();

    let content = html! {
        (site_header(site, None, None))
        main.home data-view-transition {
            h1.codex-title { "⚙️ " (config.title) " ⚙️" }
            p.tagline { (config.tagline) }
            (saying_block(site.lore().pick("home")))
            @for group in &groups {
                section.category-section id=(format!("category-{}", group.category.key)) {
                    h2 {
                        a href=(category_path(group.category.key)) { (group.category.name) }
                    }
                    div.card-grid {
                        @for article in &group.articles {
                            (article_card(article))
                        }
                    }
                }
            }
            @if groups.is_empty() {
                p.empty { "The archives are empty. No scrolls have been inscribed." }
            }
        }
    };

    base_document(&config.title, links, Some("home-page"), content)
}

/// Renders a single article page
pub fn render_article(site: &Site, links: &AssetLinks, article: &ArticleRecord) -> Markup {
    let category = site.taxonomy().category_of(&article.slug);
    let entries = site.registry().category_entries(site.taxonomy(), category);
    let (prev, next) = neighbors(&entries, &article.slug);
    let breadcrumb = article_breadcrumb(site, article, category);

    let content = html! {
        (site_header(site, Some(breadcrumb), Some(&article.slug)))
        main.article-page data-view-transition {
            article.scroll {
                h1 { (article.title) }
                p.summary { (article.summary) }

                section.why {
                    h2 { "🧠 Why Use It" }
                    (markdown(&article.rationale))
                }

                section.example {
                    h2 { "✅ Good / Bad Example" }
                    pre { code { (article.example) } }
                }

                section.when-not {
                    h2 { "⚠️ When Not to Use" }
                    (markdown(&article.anti_pattern))
                }

                p.benediction { (site.flavor_text(article).as_ref()) }

                nav.pager aria-label="Scrolls in this category" {
                    @if let Some(prev) = prev {
                        a.prev href=(prev.path()) rel="prev" data-prefetch { "‹ " (prev.title) }
                    }
                    @if let Some(next) = next {
                        a.next href=(next.path()) rel="next" data-prefetch { (next.title) " ›" }
                    }
                }

                div.return {
                    a href="/" data-transition="back" aria-label="Return to Codex" { "⬅ Return to Codex" }
                }
            }
        }
    };

    base_document(&page_title(site, &article.title), links, Some("article-view"), content)
}

/// Renders a category listing page
pub fn render_category(site: &Site, links: &AssetLinks, category: &Category) -> Markup {
    let entries = site.registry().category_entries(site.taxonomy(), category);
    let count = entries.len();
    let saying = site
        .lore()
        .pick_tagged(lore::category_tag(category.key), category.key);

    let content = html! {
        (site_header(site, Some(category_breadcrumb(category)), None))
        main.category-page data-view-transition {
            header.category-header {
                p.ritual { (category.ritual) }
                h1 { (category.name) }
                p.description { (category.description) }
                @if !category.technologies.is_empty() {
                    ul.chips {
                        @for tech in category.technologies {
                            li.chip { (tech) }
                        }
                    }
                }
                p.count {
                    (count) " sacred " (if count == 1 { "scroll" } else { "scrolls" })
                }
            }
            @if entries.is_empty() {
                p.empty { "No scrolls have been inscribed in this domain yet." }
            } @else {
                div.card-grid {
                    @for article in &entries {
                        (article_card(article))
                    }
                }
            }
            (saying_block(saying))
            div.return {
                a href="/" data-transition="back" { "⬅ Return to Codex" }
            }
        }
    };

    base_document(&page_title(site, category.name), links, Some("category-view"), content)
}

/// Renders the 404 page
pub fn render_not_found(site: &Site, links: &AssetLinks) -> Markup {
    let content = html! {
        (site_header(site, None, None))
        main.not-found {
            h1 { "Sacred scroll not found." }
            p { "The scroll you seek is not in the archives. Please return to the Codex." }
            div.return {
                a href="/" { "⬅ Return to Codex" }
            }
        }
    };

    base_document(&page_title(site, "Not Found"), links, Some("not-found-view"), content)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::Taxonomy;
    use crate::test_helpers::*;

    fn links() -> AssetLinks {
        AssetLinks::plain()
    }

    #[test]
    fn base_document_includes_doctype_and_assets() {
        let content = html! { p { "test" } };
        let doc = base_document("Test", &links(), None, content).into_string();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains(r#"href="/assets/style.css""#));
        assert!(doc.contains(r#"src="/assets/nav.js""#));
        assert!(doc.contains(r#"id="loading-bar""#));
    }

    #[test]
    fn base_document_applies_body_class() {
        let doc = base_document("Test", &links(), Some("article-view"), html! {}).into_string();
        assert!(doc.contains(r#"class="article-view""#));
    }

    #[test]
    fn neighbors_at_edges() {
        let a = article("a", "A");
        let b = article("b", "B");
        let c = article("c", "C");
        let entries = vec![&a, &b, &c];

        let (prev, next) = neighbors(&entries, "a");
        assert!(prev.is_none());
        assert_eq!(next.unwrap().slug, "b");

        let (prev, next) = neighbors(&entries, "c");
        assert_eq!(prev.unwrap().slug, "b");
        assert!(next.is_none());

        assert_eq!(neighbors(&entries, "zzz"), (None, None));
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    #[test]
    fn nav_has_one_dropdown_per_nonempty_category() {
        let html = render_nav(&builtin_site(), None).into_string();
        assert_eq!(html.matches("data-dropdown=").count(), 5);
        assert!(html.contains(r#"data-dropdown="react""#));
        assert!(html.contains(r#"data-dropdown="typescript""#));
        assert!(!html.contains(r#"data-dropdown="python""#));
    }

    #[test]
    fn nav_dropdowns_start_closed() {
        let html = render_nav(&builtin_site(), None).into_string();
        assert!(html.contains(r#"aria-expanded="false""#));
        assert!(!html.contains(r#"aria-expanded="true""#));
    }

    #[test]
    fn nav_marks_current_article() {
        let html = render_nav(&builtin_site(), Some("use-swr")).into_string();
        assert!(html.contains(r#"href="/codex/use-swr/" class="current" aria-current="page""#));
        assert_eq!(html.matches(r#"aria-current="page""#).count(), 1);
    }

    #[test]
    fn nav_later_menus_align_right() {
        let html = render_nav(&builtin_site(), None).into_string();
        assert!(html.contains(r#"class="dropdown-menu align-right" id="menu-3""#));
        assert!(html.contains(r#"class="dropdown-menu" id="menu-0""#));
    }

    #[test]
    fn nav_includes_mobile_panel() {
        let html = render_nav(&builtin_site(), None).into_string();
        assert!(html.contains(r#"id="nav-toggle""#));
        assert!(html.contains(r#"id="nav-panel""#));
        assert!(html.contains("hamburger-line"));
    }

    // =========================================================================
    // Page renderers
    // =========================================================================

    #[test]
    fn home_lists_every_article() {
        let site = builtin_site();
        let html = render_home(&site, &links()).into_string();
        for article in site.registry().list() {
            assert!(html.contains(&format!(r#"href="/codex/{}/""#, article.slug)));
        }
        assert!(html.contains("Mechanicus Codex"));
    }

    #[test]
    fn home_shows_home_saying() {
        let site = builtin_site();
        let saying = site.lore().pick("home").unwrap();
        let html = render_home(&site, &links()).into_string();
        assert!(html.contains(&maud::html! { (saying.author) }.into_string()));
    }

    #[test]
    fn home_sections_follow_taxonomy_order() {
        let html = render_home(&builtin_site(), &links()).into_string();
        let react = html.find(r#"id="category-react""#).unwrap();
        let next = html.find(r#"id="category-next.js""#).unwrap();
        let ts = html.find(r#"id="category-typescript""#).unwrap();
        assert!(react < next && next < ts);
    }

    #[test]
    fn home_with_empty_registry() {
        let html = render_home(&site_of(vec![]), &links()).into_string();
        assert!(html.contains("The archives are empty"));
    }

    #[test]
    fn article_page_sections() {
        let site = builtin_site();
        let article = site.registry().get("react-memo").unwrap();
        let html = render_article(&site, &links(), article).into_string();
        assert!(html.contains("<h1>React.memo</h1>"));
        assert!(html.contains("Why Use It"));
        assert!(html.contains("Good / Bad Example"));
        assert!(html.contains("When Not to Use"));
        assert!(html.contains("<title>React.memo · Mechanicus Codex</title>"));
    }

    #[test]
    fn article_markdown_is_rendered() {
        let site = site_of(vec![article("react-memo", "React.memo")]);
        let record = site.registry().get("react-memo").unwrap();
        let html = render_article(&site, &links(), record).into_string();
        assert!(html.contains("<li>first reason</li>"));
        assert!(html.contains("<strong>not</strong>"));
    }

    #[test]
    fn article_example_is_escaped_verbatim() {
        let mut record = article("react-memo", "React.memo");
        record.example = "<Button onClick={go} />".to_string();
        let site = site_of(vec![record]);
        let html = render_article(&site, &links(), site.registry().get("react-memo").unwrap())
            .into_string();
        assert!(html.contains("&lt;Button onClick={go} /&gt;"));
    }

    #[test]
    fn article_shows_synthesized_benediction() {
        let site = site_of(vec![article("react-memo", "React.memo")]);
        let html = render_article(&site, &links(), site.registry().get("react-memo").unwrap())
            .into_string();
        let quote = crate::quotes::synthesize(&Taxonomy::standard(), "react-memo", "React.memo");
        assert!(html.contains(&maud::html! { (quote) }.into_string()));
    }

    #[test]
    fn article_breadcrumb_names_category() {
        let site = builtin_site();
        let html = render_article(&site, &links(), site.registry().get("use-swr").unwrap())
            .into_string();
        assert!(html.contains(r#"class="crumb-category" href="/category/performance/""#));
        assert!(html.contains(r#"<span class="crumb-current" aria-current="page">Use SWR or React Query</span>"#));
    }

    #[test]
    fn article_pager_follows_member_order() {
        let site = builtin_site();
        let html = render_article(
            &site,
            &links(),
            site.registry().get("usememo-usecallback").unwrap(),
        )
        .into_string();
        assert!(html.contains(r#"class="prev" href="/codex/react-memo/""#));
        assert!(html.contains(r#"class="next" href="/codex/lazy-loading/""#));
    }

    #[test]
    fn misc_article_breadcrumb_uses_misc() {
        let site = site_of(vec![article("stray", "Stray")]);
        let html = render_article(&site, &links(), site.registry().get("stray").unwrap())
            .into_string();
        assert!(html.contains("/category/misc/"));
        assert!(html.contains("Miscellanea"));
    }

    #[test]
    fn category_page_metadata() {
        let site = builtin_site();
        let react = site.taxonomy().category("react").unwrap();
        let html = render_category(&site, &links(), react).into_string();
        assert!(html.contains("Ritual of Component Sanctification"));
        assert!(html.contains(r#"<li class="chip">Server Components</li>"#));
        // 8 listed, 6 written
        assert!(html.contains("6 sacred scrolls"));
        assert!(!html.contains("/codex/react-server-components/"));
    }

    #[test]
    fn category_page_saying_matches_theme() {
        let site = builtin_site();
        let performance = site.taxonomy().category("performance").unwrap();
        let saying = site
            .lore()
            .pick_tagged(lore::Tag::Performance, "performance")
            .unwrap();
        assert!(saying.tags.contains(&lore::Tag::Performance));
        let html = render_category(&site, &links(), performance).into_string();
        assert!(html.contains(&maud::html! { (saying.text) }.into_string()));
    }

    #[test]
    fn category_page_entries_in_member_order() {
        let site = builtin_site();
        let react = site.taxonomy().category("react").unwrap();
        let html = render_category(&site, &links(), react).into_string();
        let memo = html.find(r#"class="card" href="/codex/react-memo/""#).unwrap();
        let hydration = html.find(r#"class="card" href="/codex/lazy-hydration/""#).unwrap();
        assert!(memo < hydration);
    }

    #[test]
    fn empty_category_page() {
        let site = builtin_site();
        let python = site.taxonomy().category("python").unwrap();
        let html = render_category(&site, &links(), python).into_string();
        assert!(html.contains("0 sacred scrolls"));
        assert!(html.contains("No scrolls have been inscribed"));
    }

    #[test]
    fn single_entry_category_count() {
        let site = builtin_site();
        let ts = site.taxonomy().category("typescript").unwrap();
        let html = render_category(&site, &links(), ts).into_string();
        assert!(html.contains("1 sacred scroll<"));
    }

    #[test]
    fn not_found_page() {
        let html = render_not_found(&builtin_site(), &links()).into_string();
        assert!(html.contains("Sacred scroll not found."));
        assert!(html.contains(r#"href="/""#));
    }

    #[test]
    fn markdown_shows_raw_html_as_text() {
        let html = markdown("Use <Image> here.\n\n<div onclick=\"x()\">block</div>").into_string();
        assert!(html.contains("Use &lt;Image&gt; here."));
        assert!(html.contains("&lt;div onclick="));
        assert!(!html.contains("<Image>"));
        assert!(!html.contains("<div"));
    }

    #[test]
    fn article_body_escapes_component_names() {
        let site = builtin_site();
        let html = render_article(
            &site,
            &links(),
            site.registry().get("image-optimization").unwrap(),
        )
        .into_string();
        let start = html.find(r#"<section class="why">"#).unwrap();
        let end = start + html[start..].find("</section>").unwrap();
        let why = &html[start..end];
        assert!(why.contains("&lt;Image&gt;"), "{why}");
        assert!(!why.contains("<Image>"));
    }

    #[test]
    fn script_block_in_source_is_not_emitted() {
        let mut record = article("stray", "Stray");
        record.anti_pattern = "<script>alert(1)</script>\n\nNever.".to_string();
        let site = site_of(vec![record]);
        let html = render_article(&site, &links(), site.registry().get("stray").unwrap())
            .into_string();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn html_escape_in_titles() {
        let site = site_of(vec![article("stray", "<script>alert(1)</script>")]);
        let html = render_article(&site, &links(), site.registry().get("stray").unwrap())
            .into_string();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
