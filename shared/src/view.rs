//! Presentation projections over [`Article`].
//!
//! The `html` field is passed through verbatim. The content source is
//! trusted; pointing this pipeline at an untrusted source turns every article
//! body into a markup injection vector.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Article, TaxonomyRef};

/// Root path of every blog route.
pub const BLOG_ROOT: &str = "/blog";

/// Number of tags shown on a listing card.
pub const CARD_TAG_LIMIT: usize = 3;

const BYLINE_SEPARATOR: &str = " \u{00b7} ";

/// `"/blog/{slug}"`.
pub fn canonical_url(slug: &str) -> String {
    format!("{BLOG_ROOT}/{slug}")
}

/// Link to a tag filter page.
pub fn tag_url(slug: &str) -> String {
    format!("{BLOG_ROOT}/tag/{slug}")
}

/// Link to a category filter page.
pub fn category_url(slug: &str) -> String {
    format!("{BLOG_ROOT}/category/{slug}")
}

/// `"{day} {abbreviated month} {year}"`, e.g. `5 Mar 2024`.
pub fn format_display_date(ts: DateTime<Utc>) -> String {
    ts.format("%-d %b %Y").to_string()
}

/// `"{n} min read"`; absent (and zero) reading times produce no label.
pub fn reading_time_label(minutes: Option<u32>) -> Option<String> {
    minutes.filter(|n| *n > 0).map(|n| format!("{n} min read"))
}

/// The first [`CARD_TAG_LIMIT`] tags, borrowed from the article.
pub fn card_tags(article: &Article) -> &[TaxonomyRef] {
    let end = article.tags.len().min(CARD_TAG_LIMIT);
    &article.tags[..end]
}

/// `"Published {date} · {n} min read"`, dropping whichever part is missing.
pub fn byline(article: &Article) -> String {
    let mut parts = Vec::with_capacity(2);
    if let Some(ts) = article.display_timestamp() {
        parts.push(format!("Published {}", format_display_date(ts)));
    }
    if let Some(label) = reading_time_label(article.reading_time) {
        parts.push(label);
    }
    parts.join(BYLINE_SEPARATOR)
}

/// An anchor target and its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkView {
    /// Link target.
    pub href: String,
    /// Visible text.
    pub label: String,
}

impl LinkView {
    fn tag(tag: &TaxonomyRef) -> Self {
        Self {
            href: tag_url(&tag.slug),
            label: tag.title.clone(),
        }
    }
}

/// Listing-card projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleCard {
    /// Article id, used as the list key.
    pub id: String,
    /// Canonical URL of the article.
    pub url: String,
    /// Headline text.
    pub headline: String,
    /// Meta description shown as the excerpt.
    pub description: String,
    /// Publication date and reading time.
    pub byline: String,
    /// At most [`CARD_TAG_LIMIT`] tag links.
    pub tags: Vec<LinkView>,
}

impl ArticleCard {
    /// Project an article into a card without touching its tag list.
    pub fn from_article(article: &Article) -> Self {
        Self {
            id: article.id.clone(),
            url: article.canonical_url(),
            headline: article.headline.clone(),
            description: article.meta_description.clone(),
            byline: byline(article),
            tags: card_tags(article).iter().map(LinkView::tag).collect(),
        }
    }
}

/// Full detail projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleView {
    /// Article slug.
    pub slug: String,
    /// Canonical URL of the article.
    pub url: String,
    /// Headline, also the hero image alt text.
    pub headline: String,
    /// Publication date and reading time.
    pub byline: String,
    /// Category breadcrumb target, when a category is set.
    pub category: Option<LinkView>,
    /// Hero image URL.
    pub image: Option<String>,
    /// Trusted, pre-rendered body markup.
    pub html: String,
    /// Every tag, in upstream order.
    pub tags: Vec<LinkView>,
    /// Related articles, never including this one. Empty means the section
    /// is omitted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<LinkView>,
}

impl ArticleView {
    /// Project an article for the detail page.
    pub fn from_article(article: &Article) -> Self {
        let related = article
            .related_posts
            .iter()
            .filter(|post| !post.slug.is_empty() && post.slug != article.slug)
            .map(|post| LinkView {
                href: canonical_url(&post.slug),
                label: post.headline.clone(),
            })
            .collect();

        Self {
            slug: article.slug.clone(),
            url: article.canonical_url(),
            headline: article.headline.clone(),
            byline: byline(article),
            category: article.category.as_ref().map(|category| LinkView {
                href: category_url(&category.slug),
                label: category.title.clone(),
            }),
            image: article.image.clone().filter(|img| !img.is_empty()),
            html: article.html.clone(),
            tags: article.tags.iter().map(LinkView::tag).collect(),
            related,
        }
    }

    /// Whether the related-posts section should be rendered at all.
    pub fn has_related(&self) -> bool {
        !self.related.is_empty()
    }
}

/// SEO metadata for a detail page, derivable without rendering the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Document title.
    pub title: String,
    /// Meta description.
    pub description: String,
    /// Base URL relative links resolve against.
    pub metadata_base: String,
    /// Relative canonical path.
    pub canonical: String,
    /// Absolute Open Graph URL.
    pub url: String,
    /// Open Graph / Twitter image.
    pub image: Option<String>,
    /// Open Graph type.
    pub og_type: String,
    /// Twitter card kind.
    pub twitter_card: String,
}

impl PageMetadata {
    /// Derive metadata for `article` as served from `site_url`.
    pub fn for_article(article: &Article, site_url: &str) -> Self {
        let base = site_url.trim_end_matches('/');
        let canonical = article.canonical_url();
        Self {
            title: article.headline.clone(),
            description: article.meta_description.clone(),
            metadata_base: base.to_string(),
            url: format!("{base}{canonical}"),
            canonical,
            image: article.image.clone().filter(|img| !img.is_empty()),
            og_type: "article".to_string(),
            twitter_card: "summary_large_image".to_string(),
        }
    }
}
