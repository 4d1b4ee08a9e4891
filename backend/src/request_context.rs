//! Access logging for the blog routes.
//!
//! Handlers attach a [`PageOutcome`] to their response describing what they
//! resolved (which listing page, which slug). The middleware logs it next to
//! the status, so a 404 or 500 in the log names the article or page behind it.

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
    time::Instant,
};

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;

/// Caller-supplied correlation id, echoed back when present.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

static REQUEST_SEQ: AtomicU64 = AtomicU64::new(0);

/// What a handler resolved for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// A listing page was rendered.
    Listing {
        /// 1-indexed page shown after clamping.
        page_number: u64,
        /// Last page of the source at render time.
        last_page: u64,
    },
    /// An article page was rendered.
    Article {
        /// Slug that was looked up.
        slug: String,
    },
    /// The content source has no article under `slug`.
    MissingArticle {
        /// Slug that was looked up.
        slug: String,
    },
    /// The sitemap was rendered.
    Sitemap {
        /// Number of `<url>` entries.
        entries: usize,
    },
    /// A page could not be rendered because the content source failed.
    Failed {
        /// Which page was being built.
        page: &'static str,
        /// Requested slug or raw page parameter, when there was one.
        target: Option<String>,
    },
}

impl PageOutcome {
    /// Attach this outcome to `response`.
    pub fn attach(self, mut response: Response) -> Response {
        response.extensions_mut().insert(self);
        response
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Listing {
                page_number,
                last_page,
            } => write!(f, "listing page {page_number} of {last_page}"),
            Self::Article { slug } => write!(f, "article {slug}"),
            Self::MissingArticle { slug } => write!(f, "missing article {slug}"),
            Self::Sitemap { entries } => write!(f, "sitemap with {entries} entries"),
            Self::Failed { page, target: Some(target) } => write!(f, "{page} failed for {target}"),
            Self::Failed { page, target: None } => write!(f, "{page} failed"),
        }
    }
}

/// Log every request with its status, latency and [`PageOutcome`].
pub async fn request_context_middleware(request: Request, next: Next) -> Response {
    let seq = REQUEST_SEQ.fetch_add(1, Ordering::Relaxed);
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .filter(|value| !value.is_empty())
        .cloned();
    // 未匹配的路由（fallback）没有 MatchedPath，记录原始路径
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path().to_owned(), |m| m.as_str().to_owned());

    let span = tracing::info_span!(
        "http_request",
        seq,
        request_id = request_id.as_ref().and_then(|v| v.to_str().ok()).unwrap_or_default(),
        method = %request.method(),
        route = %route,
    );
    let started_at = Instant::now();
    let mut response = next.run(request).instrument(span.clone()).await;

    if let Some(request_id) = request_id {
        response.headers_mut().insert(REQUEST_ID_HEADER, request_id);
    }

    let status = response.status();
    let elapsed_ms = started_at.elapsed().as_millis();
    let outcome = describe(response.extensions().get::<PageOutcome>());
    if status.is_server_error() {
        tracing::error!(parent: &span, status = status.as_u16(), elapsed_ms, %outcome, "request failed");
    } else if status.is_client_error() {
        tracing::warn!(parent: &span, status = status.as_u16(), elapsed_ms, %outcome, "request rejected");
    } else {
        tracing::info!(parent: &span, status = status.as_u16(), elapsed_ms, %outcome, "request completed");
    }

    response
}

fn describe(outcome: Option<&PageOutcome>) -> String {
    outcome.map_or_else(|| "unresolved".to_owned(), ToString::to_string)
}
