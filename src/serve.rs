//! HTTP server for on-demand rendering.
//!
//! Pages are rendered per request from the shared, immutable [`Site`]; no
//! files are written. The URL layout matches the static build:
//!
//! ```text
//! GET /                    → home
//! GET /codex/{slug}        → article (404 page for unknown slugs)
//! GET /category/{key}      → category listing (404 page for unknown keys)
//! GET /codex.json          → catalog
//! GET /assets/style.css    → stylesheet
//! GET /assets/nav.js       → script
//! GET /favicon.ico         → 204
//! *                        → 404 page
//! ```
//!
//! Page routes accept a trailing slash. Assets are served under their plain
//! names, so pages rendered here link to `/assets/style.css` rather than the
//! fingerprinted names the static build uses.

use crate::catalog::Catalog;
use crate::render;
use crate::site::{AssetLinks, Site};
use axum::Router;
use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Router state. Cheap to clone; both fields are reference-counted.
#[derive(Clone)]
struct AppState {
    site: Arc<Site>,
    links: Arc<AssetLinks>,
}

pub fn router(site: Arc<Site>) -> Router {
    let state = AppState {
        site,
        links: Arc::new(AssetLinks::plain()),
    };
    Router::new()
        .route("/", get(home_page))
        .route("/index.html", get(home_page))
        .route("/codex/{slug}", get(article_page))
        .route("/codex/{slug}/", get(article_page))
        .route("/category/{key}", get(category_page))
        .route("/category/{key}/", get(category_page))
        .route("/codex.json", get(catalog_json))
        .route("/assets/style.css", get(stylesheet))
        .route("/assets/nav.js", get(script))
        .route("/favicon.ico", get(|| async { StatusCode::NO_CONTENT }))
        .fallback(not_found)
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn run(site: Arc<Site>, addr: SocketAddr) -> Result<(), ServeError> {
    let articles = site.registry().len();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind { addr, source })?;
    let local = listener.local_addr()?;

    info!(%local, articles, "codex listening");

    axum::serve(listener, router(site))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("codex shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

// ============================================================================
// Handlers
// ============================================================================

async fn home_page(State(state): State<AppState>) -> Html<String> {
    debug!("GET /");
    Html(render::render_home(&state.site, &state.links).into_string())
}

async fn article_page(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    debug!(%slug, "GET article");
    match state.site.registry().get(&slug) {
        Some(record) => {
            Html(render::render_article(&state.site, &state.links, record).into_string())
                .into_response()
        }
        None => {
            info!(%slug, "unknown article");
            not_found_page(&state)
        }
    }
}

async fn category_page(State(state): State<AppState>, Path(key): Path<String>) -> Response {
    debug!(%key, "GET category");
    match state.site.listing_category(&key) {
        Some(category) => {
            Html(render::render_category(&state.site, &state.links, category).into_string())
                .into_response()
        }
        None => {
            info!(%key, "unknown category");
            not_found_page(&state)
        }
    }
}

async fn catalog_json(State(state): State<AppState>) -> Response {
    match Catalog::build(&state.site).to_json() {
        Ok(json) => ([(header::CONTENT_TYPE, "application/json")], json).into_response(),
        Err(e) => {
            warn!(error = %e, "catalog serialization failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn stylesheet(State(state): State<AppState>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        state.site.css().to_string(),
    )
        .into_response()
}

async fn script(State(state): State<AppState>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/javascript; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        state.site.js(),
    )
        .into_response()
}

async fn not_found(State(state): State<AppState>, uri: Uri) -> Response {
    info!(%uri, "no route");
    not_found_page(&state)
}

fn not_found_page(state: &AppState) -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(render::render_not_found(&state.site, &state.links).into_string()),
    )
        .into_response()
}
