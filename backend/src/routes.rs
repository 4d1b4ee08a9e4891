use axum::{middleware, routing::get, Router};

use crate::{handlers, request_context::request_context_middleware, state::AppState};

/// Blog, sitemap and housekeeping routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::docs_redirect))
        .route("/blog", get(handlers::blog_index))
        .route("/blog/", get(handlers::blog_index))
        .route("/blog/:slug", get(handlers::blog_article))
        .route("/sitemap.xml", get(handlers::sitemap_xml))
        .route("/robots.txt", get(handlers::robots_txt))
        .route("/healthz", get(handlers::healthz))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(middleware::from_fn(request_context_middleware))
}
