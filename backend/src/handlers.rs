use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{
    error::ContentError, pages, render, request_context::PageOutcome, sitemap, state::AppState,
};

/// Query string of the listing page.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// 1-indexed page; kept raw so junk values fall back to page 1
    #[serde(default)]
    pub page: Option<String>,
}

/// GET /blog
pub async fn blog_index(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Response {
    let listing = pages::list_page(state.source(), query.page.as_deref()).await;
    match listing {
        Ok(page) => {
            let outcome = PageOutcome::Listing {
                page_number: page.window.page_number,
                last_page: page.window.last_page,
            };
            let body = render::render_list_page(&page, state.chrome());
            outcome.attach(fresh_html(StatusCode::OK, body))
        },
        Err(err) => error_page("blog listing", query.page, err),
    }
}

/// GET /blog/:slug
pub async fn blog_article(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let detail = pages::detail_page(state.source(), &slug, state.site_url()).await;
    match detail {
        Ok(Some(page)) => PageOutcome::Article { slug }
            .attach(fresh_html(StatusCode::OK, render::render_article_page(&page))),
        Ok(None) => PageOutcome::MissingArticle { slug }.attach(not_found().await),
        Err(err) => error_page("blog article", Some(slug), err),
    }
}

/// GET /sitemap.xml
pub async fn sitemap_xml(State(state): State<AppState>) -> Response {
    let entries = match state.sitemap().build(state.source()).await {
        Ok(entries) => entries,
        Err(err) => return error_page("sitemap", None, err),
    };
    let xml = sitemap::render_sitemap_xml(&entries, state.site_url());
    let response =
        (StatusCode::OK, [(header::CONTENT_TYPE, "application/xml; charset=utf-8")], xml)
            .into_response();
    PageOutcome::Sitemap {
        entries: entries.len(),
    }
    .attach(response)
}

/// GET /robots.txt
pub async fn robots_txt(State(state): State<AppState>) -> Response {
    if !state.robots_txt_enabled() {
        return not_found().await;
    }
    let body = sitemap::render_robots_txt(state.site_url());
    (StatusCode::OK, [(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}

/// GET /, redirected to the docs landing page
pub async fn docs_redirect() -> Redirect {
    Redirect::temporary("/docs")
}

/// GET /healthz
pub async fn healthz() -> &'static str {
    "ok"
}

/// Fallback for every unmatched route and every unknown slug.
pub async fn not_found() -> Response {
    fresh_html(StatusCode::NOT_FOUND, render::render_not_found())
}

fn fresh_html(status: StatusCode, body: String) -> Response {
    (status, [(header::CACHE_CONTROL, "no-store")], Html(body)).into_response()
}

fn error_page(page: &'static str, target: Option<String>, err: ContentError) -> Response {
    tracing::error!(
        page,
        requested = target.as_deref().unwrap_or_default(),
        error = %err,
        "failed to render page"
    );
    PageOutcome::Failed { page, target }
        .attach(fresh_html(StatusCode::INTERNAL_SERVER_ERROR, render::render_error_page()))
}
