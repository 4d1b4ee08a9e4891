//! Typed client for the remote content API.
//!
//! This is the only I/O boundary of the pipeline. Every call goes to the
//! network with `Cache-Control: no-store`; nothing is cached or retried here.

use async_trait::async_trait;
use content_flow_shared::{Article, ArticlePage};
use reqwest::{header, StatusCode};
use serde::Deserialize;

use crate::{
    config::{ApiKey, ContentSettings},
    error::{ContentError, Result},
};

/// Read-only view of a content source. Pages and the sitemap depend on this
/// rather than on [`ContentClient`] directly.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Look up one article by exact slug; `Ok(None)` when it does not exist.
    async fn get_article(&self, slug: &str) -> Result<Option<Article>>;

    /// Fetch the 0-indexed page `page_index` of `page_size` articles.
    async fn list_articles(&self, page_index: u64, page_size: u32) -> Result<ArticlePage>;
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct ArticlePageWire {
    #[serde(default)]
    total: Option<u64>,
    #[serde(default)]
    articles: Option<Vec<Article>>,
}

/// HTTP client for the content API, holding one resolved credential.
#[derive(Debug, Clone)]
pub struct ContentClient {
    http: reqwest::Client,
    api_base: String,
    api_key: ApiKey,
}

impl ContentClient {
    /// Resolve the credential in `settings` and build a client.
    ///
    /// Fails with [`ContentError::Config`] before any request is made when
    /// no key is available.
    pub fn configure(settings: &ContentSettings) -> Result<Self> {
        let api_key = settings.resolve_key()?;
        Self::new(&settings.api_base, api_key)
    }

    /// Build a client for `api_base` with an already resolved key.
    pub fn new(api_base: &str, api_key: ApiKey) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("content-flow/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ContentError::config(format!("failed to build HTTP client: {e}")))?;

        if api_key.source().is_production() {
            tracing::info!(key_source = %api_key.source(), "content API client configured");
        } else {
            tracing::warn!(
                key_source = %api_key.source(),
                "content API client is using the public demo key; do not run this in production"
            );
        }

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// The credential this client was built with.
    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    fn endpoint(&self, route: &str) -> String {
        format!("{}/api/{}", self.api_base, route)
    }

    async fn send(&self, route: &str, query: &[(&str, String)]) -> Result<reqwest::Response> {
        let mut params = Vec::with_capacity(query.len() + 1);
        params.push(("key", self.api_key.as_str().to_string()));
        params.extend(query.iter().map(|(k, v)| (*k, v.clone())));

        self.http
            .get(self.endpoint(route))
            .header(header::CACHE_CONTROL, "no-store")
            .query(&params)
            .send()
            .await
            .map_err(|e| ContentError::transport(format!("GET /api/{route} failed"), e))
    }
}

#[async_trait]
impl ContentSource for ContentClient {
    async fn get_article(&self, slug: &str) -> Result<Option<Article>> {
        tracing::debug!(slug, "fetching article");
        let response = self.send("article", &[("slug", slug.to_string())]).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = error_for_status(response, "article")?;
        let envelope: Envelope<Article> = response
            .json()
            .await
            .map_err(|e| ContentError::transport("invalid article payload", e))?;
        Ok(envelope.data)
    }

    async fn list_articles(&self, page_index: u64, page_size: u32) -> Result<ArticlePage> {
        let page_size = page_size.max(1);
        tracing::debug!(page_index, page_size, "fetching article page");
        let response = self
            .send(
                "articles",
                &[("page", page_index.to_string()), ("limit", page_size.to_string())],
            )
            .await?;

        let response = error_for_status(response, "articles")?;
        let envelope: Envelope<ArticlePageWire> = response
            .json()
            .await
            .map_err(|e| ContentError::transport("invalid article list payload", e))?;

        // total 以上游为准，不能用当前页长度推算
        let page = envelope.data.map_or_else(ArticlePage::default, |data| ArticlePage {
            total: data.total.unwrap_or_default(),
            articles: data.articles.unwrap_or_default(),
        });
        Ok(page)
    }
}

fn error_for_status(response: reqwest::Response, route: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ContentError::upstream(format!("GET /api/{route} returned {status}")))
    }
}
