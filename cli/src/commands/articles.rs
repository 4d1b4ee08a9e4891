use anyhow::{bail, Context, Result};
use content_flow_backend::{config::ContentSettings, pages, ContentClient};

/// Print the listing page for a 1-indexed `page` as JSON.
pub async fn list(content: &ContentSettings, page: i64) -> Result<()> {
    let client = ContentClient::configure(content).context("failed to configure content API")?;
    let listing = pages::load_list_page(&client, page)
        .await
        .context("failed to load article listing")?;
    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}

/// Print the detail page (metadata + view) for `slug` as JSON.
pub async fn show(content: &ContentSettings, slug: &str, site_url: &str) -> Result<()> {
    let client = ContentClient::configure(content).context("failed to configure content API")?;
    let Some(detail) = pages::detail_page(&client, slug, site_url)
        .await
        .context("failed to load article")?
    else {
        bail!("article not found: {slug}");
    };
    println!("{}", serde_json::to_string_pretty(&detail)?);
    Ok(())
}
