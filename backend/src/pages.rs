//! Listing and detail pages composed over a [`ContentSource`].
//!
//! Each function performs its own fetch. The detail page derives metadata
//! and body in two independent phases, so one request may hit the content
//! source twice and the two phases may observe different upstream state.

use content_flow_shared::{
    window::requested_page_from_query, ArticleCard, ArticleView, PageMetadata, PageWindow,
    PAGE_SIZE,
};
use serde::Serialize;

use crate::{client::ContentSource, error::Result};

/// Render-ready state of one listing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListPage {
    /// Pagination state.
    pub window: PageWindow,
    /// One card per article, in upstream order.
    pub cards: Vec<ArticleCard>,
}

/// Build the listing page for the raw 1-indexed `page` query value.
pub async fn list_page(source: &dyn ContentSource, raw_page: Option<&str>) -> Result<ListPage> {
    load_list_page(source, requested_page_from_query(raw_page)).await
}

/// Build the listing page for a 1-indexed requested page.
pub async fn load_list_page(source: &dyn ContentSource, requested_page: i64) -> Result<ListPage> {
    let page_index = PageWindow::page_index(requested_page);
    let page = source.list_articles(page_index, PAGE_SIZE).await?;
    let window = PageWindow::resolve(requested_page, page.total);

    tracing::debug!(
        page_number = window.page_number,
        last_page = window.last_page,
        total = window.total,
        returned = page.articles.len(),
        "resolved listing window"
    );

    Ok(ListPage {
        window,
        cards: page.articles.iter().map(ArticleCard::from_article).collect(),
    })
}

/// Metadata phase of the detail page. `Ok(None)` when the slug is unknown.
pub async fn article_metadata(
    source: &dyn ContentSource,
    slug: &str,
    site_url: &str,
) -> Result<Option<PageMetadata>> {
    let article = source.get_article(slug).await?;
    Ok(article.map(|article| PageMetadata::for_article(&article, site_url)))
}

/// Body phase of the detail page. `Ok(None)` when the slug is unknown.
pub async fn article_body(source: &dyn ContentSource, slug: &str) -> Result<Option<ArticleView>> {
    let article = source.get_article(slug).await?;
    Ok(article.as_ref().map(ArticleView::from_article))
}

/// Both phases of a detail page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailPage {
    /// Head metadata; `None` if the article vanished between phases.
    pub metadata: Option<PageMetadata>,
    /// Article body.
    pub view: ArticleView,
}

/// Run the metadata phase, then the body phase. Absence in the body phase
/// decides the not-found outcome.
pub async fn detail_page(
    source: &dyn ContentSource,
    slug: &str,
    site_url: &str,
) -> Result<Option<DetailPage>> {
    let metadata = article_metadata(source, slug, site_url).await?;
    let Some(view) = article_body(source, slug).await? else {
        return Ok(None);
    };
    Ok(Some(DetailPage { metadata, view }))
}
