use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use content_flow_backend::config::{
    normalize_site_url, ContentSettings, SitemapSettings, API_KEY_ENV, DEFAULT_API_BASE,
};

/// Command-line entrypoint.
#[derive(Parser)]
#[command(name = "cf-cli", version, about = "Content-flow blog pipeline CLI")]
pub struct Cli {
    /// Content API connection flags.
    #[command(flatten)]
    pub content: ContentArgs,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every command that talks to the content API.
#[derive(Args, Debug, Clone)]
pub struct ContentArgs {
    /// API key; takes precedence over the SEOBOT_API_KEY environment variable.
    #[arg(long, global = true)]
    pub api_key: Option<String>,
    /// Content API origin.
    #[arg(long, global = true, env = "CONTENT_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,
    /// Fall back to the public demo key when no key is configured.
    #[arg(long, global = true, env = "CONTENT_ALLOW_DEMO_KEY")]
    pub allow_demo_key: bool,
}

impl ContentArgs {
    /// Settings for `ContentClient::configure`, reading the environment key
    /// once here.
    pub fn settings(&self) -> ContentSettings {
        self.settings_with_env_key(std::env::var(API_KEY_ENV).ok())
    }

    /// Settings with an explicitly supplied environment key.
    pub fn settings_with_env_key(&self, environment_key: Option<String>) -> ContentSettings {
        ContentSettings {
            api_base: self.api_base.trim_end_matches('/').to_string(),
            explicit_key: self.api_key.clone(),
            environment_key,
            allow_demo_key: self.allow_demo_key,
        }
    }
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Write sitemap.xml (and robots.txt) for the site.
    Sitemap {
        /// Output directory.
        #[arg(long, default_value = "./public")]
        out_dir: PathBuf,
        /// Absolute site origin.
        #[arg(long, env = "SITE_BASE_URL")]
        site_url: String,
        /// Extra static path to list (repeatable). Defaults to /docs and /blog.
        #[arg(long = "static-path")]
        static_paths: Vec<String>,
        /// Glob of paths to leave out (repeatable). Defaults to
        /// `/docs/README` and `*/_meta`.
        #[arg(long = "exclude")]
        excludes: Vec<String>,
        /// Skip robots.txt.
        #[arg(long)]
        no_robots: bool,
    },
    /// Print one listing page as JSON.
    Articles {
        /// 1-indexed page; values below 1 mean page 1.
        #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
        page: i64,
    },
    /// Print one article view as JSON; exits non-zero when the slug is unknown.
    Show {
        /// Article slug.
        slug: String,
        /// Site origin used for the metadata URLs.
        #[arg(long, env = "SITE_BASE_URL", default_value = "http://localhost:3000")]
        site_url: String,
    },
}

/// Sitemap settings from CLI flags, defaulting empty lists.
pub fn sitemap_settings(
    static_paths: Vec<String>,
    excludes: Vec<String>,
    no_robots: bool,
) -> SitemapSettings {
    let defaults = SitemapSettings::default();
    SitemapSettings {
        static_paths: if static_paths.is_empty() { defaults.static_paths } else { static_paths },
        exclude: if excludes.is_empty() { defaults.exclude } else { excludes },
        robots_txt: !no_robots,
    }
}

/// Normalized site origin.
pub fn site_origin(raw: &str) -> String {
    normalize_site_url(raw)
}
