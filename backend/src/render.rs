//! Minimal HTML rendering for blog pages.
//!
//! Article `html` is written into the page verbatim (no sanitization): the
//! content source is trusted. Every other upstream string is escaped.

use std::fmt::Write as _;

use content_flow_shared::{ArticleView, LinkView, PageMetadata, PageWindow};

use crate::{
    config::BlogChrome,
    pages::{DetailPage, ListPage},
};

// ---------------------------------------------------------------------------
// HTML escaping
// ---------------------------------------------------------------------------

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub(crate) fn html_attr_escape(s: &str) -> String {
    html_escape(s).replace('"', "&quot;")
}

fn document(title: &str, head: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en" dir="ltr">
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1" />
<title>{title}</title>
{head}</head>
<body>
{body}
</body>
</html>
"#,
        title = html_escape(title),
    )
}

fn meta_tag(out: &mut String, attr: &str, key: &str, content: &str) {
    let _ = writeln!(
        out,
        r#"<meta {attr}="{key}" content="{}" />"#,
        html_attr_escape(content)
    );
}

fn link(view: &LinkView) -> String {
    format!(
        r#"<a href="{}">{}</a>"#,
        html_attr_escape(&view.href),
        html_escape(&view.label)
    )
}

// ---------------------------------------------------------------------------
// Listing page
// ---------------------------------------------------------------------------

/// Render the `/blog` listing.
pub fn render_list_page(page: &ListPage, chrome: &BlogChrome) -> String {
    let mut head = String::new();
    meta_tag(&mut head, "name", "description", &chrome.description);

    let mut body = format!(
        "<section class=\"blog\">\n<h1>{}</h1>\n<ul class=\"articles\">\n",
        html_escape(&chrome.title)
    );
    for card in &page.cards {
        let url = html_attr_escape(&card.url);
        let tags: Vec<String> = card.tags.iter().map(link).collect();
        let _ = write!(
            body,
            "<li class=\"article-card\" data-id=\"{id}\">\n\
             <div class=\"byline\">{byline}</div>\n\
             <a class=\"headline\" href=\"{url}\">{headline}</a>\n\
             <p class=\"excerpt\">{description}</p>\n\
             <div class=\"tags\">{tags}</div>\n\
             <a class=\"read-more\" href=\"{url}\">Read More \u{2192}</a>\n\
             </li>\n",
            id = html_attr_escape(&card.id),
            byline = html_escape(&card.byline),
            headline = html_escape(&card.headline),
            description = html_escape(&card.description),
            tags = tags.join(""),
        );
    }
    body.push_str("</ul>\n");
    if page.window.is_pagination_visible() {
        body.push_str(&render_pagination(&page.window));
    }
    body.push_str("</section>");

    document(&chrome.title, &head, &body)
}

fn render_pagination(window: &PageWindow) -> String {
    let control = |param: Option<u64>, label: &str| match param {
        Some(page) => format!(r#"<a class="page-link" href="/blog?page={page}">{label}</a>"#),
        None => format!(
            r##"<a class="page-link disabled" aria-disabled="true" href="#">{label}</a>"##
        ),
    };
    format!(
        "<nav class=\"pagination\">\n{}\n<span class=\"position\">{}</span>\n{}\n</nav>\n",
        control(window.prev_page_param(), "\u{2190} Prev"),
        window.position_label(),
        control(window.next_page_param(), "Next \u{2192}"),
    )
}

// ---------------------------------------------------------------------------
// Detail page
// ---------------------------------------------------------------------------

/// Head tags for an article; empty when metadata is unavailable.
pub fn render_metadata_head(metadata: Option<&PageMetadata>) -> String {
    let Some(meta) = metadata else {
        return String::new();
    };
    let mut head = String::new();
    meta_tag(&mut head, "name", "description", &meta.description);
    let _ = writeln!(
        head,
        r#"<link rel="canonical" href="{}" />"#,
        html_attr_escape(&format!("{}{}", meta.metadata_base, meta.canonical))
    );

    meta_tag(&mut head, "property", "og:type", &meta.og_type);
    meta_tag(&mut head, "property", "og:title", &meta.title);
    meta_tag(&mut head, "property", "og:description", &meta.description);
    meta_tag(&mut head, "property", "og:url", &meta.url);
    if let Some(image) = &meta.image {
        meta_tag(&mut head, "property", "og:image", image);
    }

    meta_tag(&mut head, "name", "twitter:card", &meta.twitter_card);
    meta_tag(&mut head, "name", "twitter:title", &meta.title);
    meta_tag(&mut head, "name", "twitter:description", &meta.description);
    if let Some(image) = &meta.image {
        meta_tag(&mut head, "name", "twitter:image", image);
    }
    head
}

fn render_article_body(view: &ArticleView) -> String {
    let mut body = String::from("<section class=\"article\">\n");

    if let Some(category) = &view.category {
        let _ = writeln!(
            body,
            "<nav class=\"breadcrumb\"><a href=\"/\">Home</a> / <a href=\"/blog/\">Blog</a> / {}</nav>",
            link(category)
        );
    }
    let _ = writeln!(body, "<div class=\"byline\">{}</div>", html_escape(&view.byline));
    let _ = writeln!(body, "<h1>{}</h1>", html_escape(&view.headline));
    if let Some(image) = &view.image {
        let _ = writeln!(
            body,
            r#"<img class="hero" src="{}" alt="{}" />"#,
            html_attr_escape(image),
            html_attr_escape(&view.headline)
        );
    }

    // trusted upstream markup, embedded as-is
    let _ = writeln!(body, "<div class=\"prose\">{}</div>", view.html);

    let tags: Vec<String> = view.tags.iter().map(link).collect();
    let _ = writeln!(body, "<div class=\"tags\">{}</div>", tags.join(""));

    if view.has_related() {
        body.push_str("<div class=\"related\">\n<h2>Related posts</h2>\n<ul>\n");
        for post in &view.related {
            let _ = writeln!(body, "<li>{}</li>", link(post));
        }
        body.push_str("</ul>\n</div>\n");
    }
    body.push_str("</section>");
    body
}

/// Render `/blog/{slug}`.
pub fn render_article_page(page: &DetailPage) -> String {
    let title = page
        .metadata
        .as_ref()
        .map_or(page.view.headline.as_str(), |meta| meta.title.as_str());
    document(
        title,
        &render_metadata_head(page.metadata.as_ref()),
        &render_article_body(&page.view),
    )
}

// ---------------------------------------------------------------------------
// Fallback pages
// ---------------------------------------------------------------------------

/// Standard 404 page.
pub fn render_not_found() -> String {
    document(
        "404: This page could not be found",
        "",
        "<h1>404</h1>\n<p>This page could not be found.</p>",
    )
}

/// Generic error page, deliberately free of blog-specific detail.
pub fn render_error_page() -> String {
    document(
        "Application error",
        "",
        "<h1>500</h1>\n<p>Something went wrong while rendering this page.</p>",
    )
}
