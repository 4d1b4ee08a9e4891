//! Sitemap enumeration.
//!
//! Only the first [`PAGE_SIZE`] articles (the most recent page) are listed.
//! Indexing the whole source would mean paging through it, which this
//! builder deliberately does not do.

use content_flow_shared::{view::canonical_url, PAGE_SIZE};
use regex::Regex;

use crate::{
    client::ContentSource,
    config::SitemapSettings,
    error::Result,
    render::html_escape,
};

/// One sitemap location, as a site-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    /// Path starting with `/`.
    pub loc: String,
}

/// Compiled exclusion globs. `*` matches any run of characters, including
/// `/`; `?` matches exactly one.
#[derive(Debug, Clone)]
pub struct ExclusionRules {
    patterns: Vec<Regex>,
}

impl ExclusionRules {
    /// Compile `globs`.
    pub fn new(globs: &[String]) -> std::result::Result<Self, regex::Error> {
        let patterns = globs
            .iter()
            .map(|glob| Regex::new(&glob_to_regex(glob)))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Whether `path` matches any exclusion pattern.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(path))
    }
}

fn glob_to_regex(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len() + 8);
    out.push('^');
    let mut literal = String::new();
    for ch in glob.chars() {
        match ch {
            '*' | '?' => {
                out.push_str(&regex::escape(&literal));
                literal.clear();
                out.push_str(if ch == '*' { ".*" } else { "." });
            },
            _ => literal.push(ch),
        }
    }
    out.push_str(&regex::escape(&literal));
    out.push('$');
    out
}

/// Builds the list of indexable paths.
#[derive(Debug, Clone)]
pub struct SitemapBuilder {
    static_paths: Vec<String>,
    rules: ExclusionRules,
}

impl SitemapBuilder {
    /// Compile the exclusion rules from `settings`.
    pub fn new(settings: &SitemapSettings) -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            static_paths: settings.static_paths.clone(),
            rules: ExclusionRules::new(&settings.exclude)?,
        })
    }

    /// Static paths first, then one `/blog/{slug}` entry per article on the
    /// first page. Excluded paths are dropped from both groups.
    pub async fn build(&self, source: &dyn ContentSource) -> Result<Vec<SitemapEntry>> {
        let page = source.list_articles(0, PAGE_SIZE).await?;

        let entries: Vec<SitemapEntry> = self
            .static_paths
            .iter()
            .cloned()
            .chain(page.articles.iter().map(|article| canonical_url(&article.slug)))
            .filter(|path| {
                let excluded = self.rules.is_excluded(path);
                if excluded {
                    tracing::debug!(path = %path, "sitemap path excluded");
                }
                !excluded
            })
            .map(|loc| SitemapEntry { loc })
            .collect();

        tracing::info!(entries = entries.len(), total = page.total, "sitemap built");
        Ok(entries)
    }
}

/// `<urlset>` document with absolute locations under `site_url`.
pub fn render_sitemap_xml(entries: &[SitemapEntry], site_url: &str) -> String {
    let base = site_url.trim_end_matches('/');
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
"#,
    );
    for entry in entries {
        xml.push_str(&format!(
            "  <url>\n    <loc>{}</loc>\n    <changefreq>daily</changefreq>\n    \
             <priority>0.7</priority>\n  </url>\n",
            html_escape(&format!("{base}{}", entry.loc)),
        ));
    }
    xml.push_str("</urlset>\n");
    xml
}

/// robots.txt allowing everything and pointing at the sitemap.
pub fn render_robots_txt(site_url: &str) -> String {
    let base = site_url.trim_end_matches('/');
    format!("User-agent: *\nAllow: /\n\n# Host\nHost: {base}\n\n# Sitemaps\nSitemap: {base}/sitemap.xml\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::testing::{article, FakeSource};

    fn settings(static_paths: &[&str]) -> SitemapSettings {
        SitemapSettings {
            static_paths: static_paths.iter().map(|s| s.to_string()).collect(),
            ..SitemapSettings::default()
        }
    }

    #[test]
    fn default_rules_exclude_readme_and_meta() {
        let rules = ExclusionRules::new(&SitemapSettings::default().exclude).expect("rules");
        assert!(rules.is_excluded("/docs/README"));
        assert!(rules.is_excluded("/docs/guide/_meta"));
        assert!(rules.is_excluded("/_meta"));
        assert!(!rules.is_excluded("/docs/README/intro"));
        assert!(!rules.is_excluded("/docs/guide/meta"));
    }

    #[test]
    fn glob_literals_are_escaped() {
        let rules = ExclusionRules::new(&["/a.b?".to_string()]).expect("rules");
        assert!(rules.is_excluded("/a.bc"));
        assert!(!rules.is_excluded("/axbc"));
    }

    #[tokio::test]
    async fn build_lists_static_then_first_page_articles() {
        let articles = (0..15).map(|i| article(&format!("p{i}"))).collect();
        let source = FakeSource::with_articles(articles);
        let builder = SitemapBuilder::new(&settings(&["/docs", "/blog"])).expect("builder");

        let entries = builder.build(&source).await.expect("entries");
        assert_eq!(*source.requested_pages.lock().expect("lock"), vec![(0, PAGE_SIZE)]);
        assert_eq!(entries.len(), 12);
        assert_eq!(entries[0].loc, "/docs");
        assert_eq!(entries[2].loc, "/blog/p0");
        assert_eq!(entries[11].loc, "/blog/p9");
    }

    #[tokio::test]
    async fn exclusions_apply_regardless_of_article_content() {
        let source = FakeSource::with_articles(vec![article("ok"), article("_meta")]);
        let builder =
            SitemapBuilder::new(&settings(&["/docs/README", "/docs/intro/_meta", "/docs"]))
                .expect("builder");

        let locs: Vec<String> = builder
            .build(&source)
            .await
            .expect("entries")
            .into_iter()
            .map(|e| e.loc)
            .collect();
        assert_eq!(locs, vec!["/docs", "/blog/ok"]);
    }

    #[test]
    fn xml_uses_absolute_locations() {
        let xml = render_sitemap_xml(
            &[SitemapEntry {
                loc: "/blog/a&b".to_string(),
            }],
            "https://site.test/",
        );
        assert!(xml.contains("<loc>https://site.test/blog/a&amp;b</loc>"));
        assert!(xml.starts_with("<?xml"));
    }

    #[test]
    fn robots_points_at_sitemap() {
        let robots = render_robots_txt("https://site.test");
        assert!(robots.contains("Sitemap: https://site.test/sitemap.xml"));
        assert!(robots.starts_with("User-agent: *\nAllow: /"));
    }
}
