//! Best-effort thumbnails for live news records that came back without one.
//!
//! Each article page is fetched with the short enrichment timeout and the
//! image is read from, in order: `og:image`, `twitter:image`, then the first
//! image inside an article body. Failures leave the record untouched.

use crate::client::{ClientConfig, PageFetcher, PageRequest};
use crate::extract::normalize_thumbnail;
use crate::models::ContentRecord;
use futures::future::join_all;
use scraper::{Html, Selector};
use tracing::{debug, instrument};
use url::Url;

fn first_attr<'a>(document: &'a Html, selector: &str, attr: &str) -> Option<&'a str> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Lead image of an article page, absolutized against the page's origin.
pub fn page_image(html: &str, page_url: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let image = first_attr(&document, r#"meta[property="og:image"]"#, "content")
        .or_else(|| first_attr(&document, r#"meta[name="twitter:image"]"#, "content"))
        .or_else(|| first_attr(&document, "article img, .article img", "src"))?;

    let origin = Url::parse(page_url).ok()?.origin().ascii_serialization();
    let thumbnail = normalize_thumbnail(&origin, image);
    (!thumbnail.is_empty()).then_some(thumbnail)
}

/// Fill empty thumbnails concurrently, keeping record order.
#[instrument(level = "debug", skip_all, fields(count = records.len()))]
pub async fn fill_thumbnails(
    fetcher: &dyn PageFetcher,
    config: &ClientConfig,
    records: Vec<ContentRecord>,
) -> Vec<ContentRecord> {
    join_all(records.into_iter().map(|record| async move {
        if !record.thumbnail().is_empty() || !record.has_link() {
            return record;
        }
        let request = PageRequest::new(record.url(), config.enrich_timeout);
        match fetcher.fetch(request).await {
            Ok(html) => match page_image(&html, record.url()) {
                Some(image) => record.with_thumbnail(image),
                None => record,
            },
            Err(e) => {
                debug!(source = record.source(), url = %record.url(), error = %e, "Thumbnail lookup failed");
                record
            }
        }
    }))
    .await
}
