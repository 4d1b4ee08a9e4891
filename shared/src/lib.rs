//! Content model and pure transformations for the blog pipeline.
//!
//! Everything in this crate is I/O free: the backend fetches [`Article`]
//! records from the content API and hands them to [`window`] and [`view`] to
//! produce render-ready state.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

mod de;
pub mod view;
pub mod window;

pub use view::{ArticleCard, ArticleView, LinkView, PageMetadata};
pub use window::{PageWindow, PAGE_SIZE};

// 完整文章数据模型 (camelCase, as served by the content API)
/// A single article as owned by the remote content source.
///
/// Only `slug` is mandatory. Every other field is defaulted when missing,
/// `null` or of the wrong type upstream, so one odd record never fails a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Opaque upstream identifier.
    #[serde(default, deserialize_with = "de::string")]
    pub id: String,
    /// Unique, URL-safe lookup key.
    pub slug: String,
    /// Display title.
    #[serde(default, deserialize_with = "de::string")]
    pub headline: String,
    /// SEO description.
    #[serde(default, deserialize_with = "de::string")]
    pub meta_description: String,
    /// Pre-rendered markup, embedded verbatim.
    #[serde(default, deserialize_with = "de::string")]
    pub html: String,
    /// Hero image URL.
    #[serde(default, deserialize_with = "de::optional_string")]
    pub image: Option<String>,
    /// Optional category reference.
    #[serde(default, deserialize_with = "de::optional_record")]
    pub category: Option<TaxonomyRef>,
    /// Tags in upstream relevance order.
    #[serde(default, deserialize_with = "de::records")]
    pub tags: Vec<TaxonomyRef>,
    /// Publication time; preferred over `created_at` for display.
    #[serde(default, deserialize_with = "de::timestamp")]
    pub published_at: Option<DateTime<Utc>>,
    /// Creation time.
    #[serde(default, deserialize_with = "de::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    /// Estimated reading time in minutes.
    #[serde(default, deserialize_with = "de::minutes")]
    pub reading_time: Option<u32>,
    /// Partial references to related articles.
    #[serde(default, deserialize_with = "de::records")]
    pub related_posts: Vec<RelatedPost>,
}

impl Article {
    /// `published_at`, falling back to `created_at`.
    pub fn display_timestamp(&self) -> Option<DateTime<Utc>> {
        self.published_at.or(self.created_at)
    }

    /// Canonical path of this article.
    pub fn canonical_url(&self) -> String {
        view::canonical_url(&self.slug)
    }
}

/// Category or tag reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyRef {
    /// URL-safe key.
    #[serde(default, deserialize_with = "de::string")]
    pub slug: String,
    /// Display label.
    #[serde(default, deserialize_with = "de::string")]
    pub title: String,
}

/// Partial reference to another article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedPost {
    /// Slug of the related article.
    #[serde(default, deserialize_with = "de::string")]
    pub slug: String,
    /// Headline of the related article.
    #[serde(default, deserialize_with = "de::string")]
    pub headline: String,
}

/// One page of articles plus the source's authoritative total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticlePage {
    /// Total number of articles in the source, not in this page.
    pub total: u64,
    /// Articles on the requested page, newest first.
    pub articles: Vec<Article>,
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_record() {
        let raw = r#"{
            "id": "a1",
            "slug": "hello-world",
            "headline": "Hello",
            "metaDescription": "First post",
            "html": "<p>hi</p>",
            "image": "https://img.example.com/a.png",
            "category": { "slug": "news", "title": "News" },
            "tags": [{ "slug": "go", "title": "Go" }],
            "publishedAt": "2024-03-05T10:00:00.000Z",
            "createdAt": "2024-03-01T10:00:00Z",
            "readingTime": 4,
            "relatedPosts": [{ "slug": "other", "headline": "Other" }]
        }"#;
        let article: Article = serde_json::from_str(raw).expect("parse article");
        assert_eq!(article.slug, "hello-world");
        assert_eq!(article.meta_description, "First post");
        assert_eq!(article.category.as_ref().map(|c| c.title.as_str()), Some("News"));
        assert_eq!(article.reading_time, Some(4));
        assert_eq!(
            article.display_timestamp().map(|ts| ts.format("%Y-%m-%d").to_string()),
            Some("2024-03-05".to_string())
        );
    }

    #[test]
    fn partial_record_falls_back_to_defaults() {
        let raw = r#"{
            "slug": "bare",
            "headline": null,
            "tags": null,
            "publishedAt": "not a date",
            "createdAt": "2023-12-24"
        }"#;
        let article: Article = serde_json::from_str(raw).expect("parse article");
        assert!(article.headline.is_empty());
        assert!(article.tags.is_empty());
        assert!(article.related_posts.is_empty());
        assert_eq!(article.published_at, None);
        assert_eq!(article.display_timestamp(), parse_timestamp("2023-12-24"));
        assert_eq!(article.canonical_url(), "/blog/bare");
    }

    #[test]
    fn wrong_typed_fields_degrade_instead_of_failing() {
        let raw = r#"{
            "id": 42,
            "slug": "odd",
            "headline": 7,
            "image": false,
            "category": "news",
            "tags": [{ "slug": "ok", "title": "Ok" }, "loose", { "slug": 3 }],
            "publishedAt": 1709632800,
            "createdAt": { "when": "yesterday" },
            "readingTime": -1,
            "relatedPosts": { "slug": "not-a-list" }
        }"#;
        let article: Article = serde_json::from_str(raw).expect("parse article");
        assert_eq!(article.id, "42");
        assert_eq!(article.headline, "7");
        assert_eq!(article.image, None);
        assert_eq!(article.category, None);
        assert_eq!(article.tags.len(), 2);
        assert_eq!(article.tags[0].title, "Ok");
        assert_eq!(article.tags[1].slug, "3");
        assert_eq!(article.display_timestamp(), None);
        assert_eq!(article.reading_time, None);
        assert!(article.related_posts.is_empty());
    }

    #[test]
    fn reading_time_accepts_fractions_and_numeric_strings() {
        let minutes = |value: &str| {
            let raw = format!(r#"{{ "slug": "s", "readingTime": {value} }}"#);
            serde_json::from_str::<Article>(&raw).expect("parse article").reading_time
        };
        assert_eq!(minutes("4.5"), Some(5));
        assert_eq!(minutes("4.4"), Some(4));
        assert_eq!(minutes(r#""5""#), Some(5));
        assert_eq!(minutes(r#""soon""#), None);
        assert_eq!(minutes("-1"), None);
        assert_eq!(minutes("true"), None);
        assert_eq!(minutes("null"), None);
    }
}
