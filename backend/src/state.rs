use std::sync::Arc;

use anyhow::{Context, Result};

use crate::{
    client::{ContentClient, ContentSource},
    config::{AppConfig, BlogChrome},
    sitemap::SitemapBuilder,
};

/// Per-process state shared by all handlers. Holds no mutable data, so
/// requests never contend on it.
#[derive(Clone)]
pub struct AppState {
    /// Content source every page reads from
    source: Arc<dyn ContentSource>,
    /// Compiled sitemap rules
    sitemap: Arc<SitemapBuilder>,
    /// Absolute site origin, no trailing slash
    site_url: Arc<str>,
    /// Listing page strings
    chrome: Arc<BlogChrome>,
    robots_txt: bool,
}

impl AppState {
    /// Resolve the API key and build the HTTP content client.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = ContentClient::configure(&config.content)
            .context("failed to configure content API client")?;
        Self::with_source(Arc::new(client), config)
    }

    /// Build state around an existing content source.
    pub fn with_source(source: Arc<dyn ContentSource>, config: &AppConfig) -> Result<Self> {
        let sitemap = SitemapBuilder::new(&config.sitemap)
            .context("invalid sitemap exclusion pattern")?;

        Ok(Self {
            source,
            sitemap: Arc::new(sitemap),
            site_url: Arc::from(config.site_url.as_str()),
            chrome: Arc::new(config.chrome.clone()),
            robots_txt: config.sitemap.robots_txt,
        })
    }

    /// The content source.
    pub fn source(&self) -> &dyn ContentSource {
        self.source.as_ref()
    }

    /// The sitemap builder.
    pub fn sitemap(&self) -> &SitemapBuilder {
        &self.sitemap
    }

    /// Absolute site origin.
    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    /// Listing page strings.
    pub fn chrome(&self) -> &BlogChrome {
        &self.chrome
    }

    /// Whether `/robots.txt` is served.
    pub fn robots_txt_enabled(&self) -> bool {
        self.robots_txt
    }
}
