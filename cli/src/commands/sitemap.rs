use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use content_flow_backend::{
    config::{ContentSettings, SitemapSettings},
    sitemap::{render_robots_txt, render_sitemap_xml, SitemapBuilder},
    ContentClient,
};

/// Fetch the first article page and write `sitemap.xml` (plus `robots.txt`
/// when enabled) into `out_dir`. Returns the written files.
pub async fn run(
    content: &ContentSettings,
    settings: &SitemapSettings,
    site_url: &str,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let client = ContentClient::configure(content).context("failed to configure content API")?;
    let builder = SitemapBuilder::new(settings).context("invalid exclusion pattern")?;

    let entries = builder
        .build(&client)
        .await
        .context("failed to enumerate sitemap entries")?;

    tokio::fs::create_dir_all(out_dir)
        .await
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let mut written = Vec::new();
    let sitemap_path = out_dir.join("sitemap.xml");
    write_file(&sitemap_path, &render_sitemap_xml(&entries, site_url)).await?;
    written.push(sitemap_path);

    if settings.robots_txt {
        let robots_path = out_dir.join("robots.txt");
        write_file(&robots_path, &render_robots_txt(site_url)).await?;
        written.push(robots_path);
    }

    tracing::info!("Wrote {} sitemap entries to {}", entries.len(), out_dir.display());
    Ok(written)
}

async fn write_file(path: &Path, contents: &str) -> Result<()> {
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("failed to write {}", path.display()))
}
