//! Startup configuration, read once from the environment.
//!
//! Resolution goes through an injected lookup so it can be exercised without
//! touching the process environment. Nothing re-reads the environment after
//! [`AppConfig::from_env`] returns.

use std::{env, fmt};

use anyhow::{Context, Result};

use crate::error::ContentError;

/// Publicly documented demo key of the content API. Never for production.
pub const DEMO_API_KEY: &str = "a8c58738-7b98-4597-b20a-0bb1c2fe5772";

/// Environment variable holding the production API key.
pub const API_KEY_ENV: &str = "SEOBOT_API_KEY";

/// Default content API origin.
pub const DEFAULT_API_BASE: &str = "https://app.seobotai.com";

const DEFAULT_EXCLUDES: &[&str] = &["/docs/README", "*/_meta"];
const DEFAULT_STATIC_PATHS: &[&str] = &["/docs", "/blog"];

/// Where the API key in use came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// Passed in by the caller (CLI flag or code).
    Explicit,
    /// Read from [`API_KEY_ENV`].
    Environment,
    /// The public demo key.
    Demo,
}

impl KeySource {
    /// Only the demo key is non-production.
    pub fn is_production(self) -> bool {
        !matches!(self, Self::Demo)
    }
}

impl fmt::Display for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Explicit => "explicit",
            Self::Environment => "environment",
            Self::Demo => "demo (NON-PRODUCTION)",
        };
        f.write_str(label)
    }
}

/// A resolved API credential. `Debug` never prints the key.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    value: String,
    source: KeySource,
}

impl ApiKey {
    /// Explicit key, then environment key, then (if allowed) the demo key.
    pub fn resolve(
        explicit: Option<&str>,
        environment: Option<&str>,
        allow_demo: bool,
    ) -> std::result::Result<Self, ContentError> {
        if let Some(value) = non_empty(explicit) {
            return Ok(Self::new(value, KeySource::Explicit));
        }
        if let Some(value) = non_empty(environment) {
            return Ok(Self::new(value, KeySource::Environment));
        }
        if allow_demo {
            return Ok(Self::new(DEMO_API_KEY, KeySource::Demo));
        }
        Err(ContentError::config(format!(
            "no API key configured: pass one explicitly or set {API_KEY_ENV} \
             (the demo key {DEMO_API_KEY} can be enabled for testing with CONTENT_ALLOW_DEMO_KEY=1)"
        )))
    }

    fn new(value: &str, source: KeySource) -> Self {
        Self {
            value: value.to_string(),
            source,
        }
    }

    /// The key itself.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Where the key came from.
    pub fn source(&self) -> KeySource {
        self.source
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey")
            .field("value", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Content API connection settings.
#[derive(Debug, Clone)]
pub struct ContentSettings {
    /// API origin, without trailing slash.
    pub api_base: String,
    /// Key supplied directly by the caller.
    pub explicit_key: Option<String>,
    /// Key read from [`API_KEY_ENV`].
    pub environment_key: Option<String>,
    /// Whether the demo key may be used as a last resort.
    pub allow_demo_key: bool,
}

impl ContentSettings {
    /// Resolve the credential these settings describe.
    pub fn resolve_key(&self) -> std::result::Result<ApiKey, ContentError> {
        ApiKey::resolve(
            self.explicit_key.as_deref(),
            self.environment_key.as_deref(),
            self.allow_demo_key,
        )
    }
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            explicit_key: None,
            environment_key: None,
            allow_demo_key: false,
        }
    }
}

/// Sitemap generation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapSettings {
    /// Paths always listed, subject to `exclude`.
    pub static_paths: Vec<String>,
    /// Glob patterns of paths that are never listed.
    pub exclude: Vec<String>,
    /// Whether robots.txt is generated alongside the sitemap.
    pub robots_txt: bool,
}

impl Default for SitemapSettings {
    fn default() -> Self {
        Self {
            static_paths: DEFAULT_STATIC_PATHS.iter().map(|s| s.to_string()).collect(),
            exclude: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            robots_txt: true,
        }
    }
}

/// Fixed strings of the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogChrome {
    /// Listing page title.
    pub title: String,
    /// Listing page description.
    pub description: String,
}

impl Default for BlogChrome {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            description: "Latest articles".to_string(),
        }
    }
}

/// Everything the server needs at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Interface to bind.
    pub bind_addr: String,
    /// Port to listen on.
    pub port: u16,
    /// Absolute site origin used in sitemap and Open Graph URLs.
    pub site_url: String,
    /// Content API settings.
    pub content: ContentSettings,
    /// Sitemap settings.
    pub sitemap: SitemapSettings,
    /// Listing page strings.
    pub chrome: BlogChrome,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("invalid PORT value: {raw}"))?,
            None => 3000,
        };

        let sitemap_defaults = SitemapSettings::default();
        let chrome_defaults = BlogChrome::default();

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            site_url: normalize_site_url(
                &lookup("SITE_BASE_URL").unwrap_or_else(|| "http://localhost:3000".to_string()),
            ),
            content: ContentSettings {
                api_base: lookup("CONTENT_API_BASE")
                    .map(|raw| raw.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
                explicit_key: None,
                environment_key: lookup(API_KEY_ENV),
                allow_demo_key: lookup("CONTENT_ALLOW_DEMO_KEY")
                    .map(|raw| parse_bool(&raw))
                    .unwrap_or(false),
            },
            sitemap: SitemapSettings {
                static_paths: lookup("SITEMAP_STATIC_PATHS")
                    .map(|raw| split_list(&raw))
                    .unwrap_or(sitemap_defaults.static_paths),
                exclude: lookup("SITEMAP_EXCLUDE")
                    .map(|raw| split_list(&raw))
                    .unwrap_or(sitemap_defaults.exclude),
                robots_txt: lookup("SITEMAP_ROBOTS_TXT")
                    .map(|raw| parse_bool(&raw))
                    .unwrap_or(sitemap_defaults.robots_txt),
            },
            chrome: BlogChrome {
                title: lookup("BLOG_TITLE").unwrap_or(chrome_defaults.title),
                description: lookup("BLOG_DESCRIPTION").unwrap_or(chrome_defaults.description),
            },
        })
    }

    /// `"{bind_addr}:{port}"`.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// Strip the trailing slash so paths can be appended directly.
pub fn normalize_site_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

/// Split a comma-separated list, dropping blanks.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn parse_bool(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "y" | "on")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
