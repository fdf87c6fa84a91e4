//! YouTube search scraper.
//!
//! The results page ships its data as a JSON blob assigned to `ytInitialData`
//! inside a `<script>` block. We locate that assignment, parse the first JSON
//! value after it, and walk a fixed path down to the item list:
//!
//! ```text
//! contents.twoColumnSearchResultsRenderer.primaryContents
//!   .sectionListRenderer.contents[0].itemSectionRenderer.contents
//! ```
//!
//! The shape is unversioned and changes without notice. Any mismatch degrades
//! to an empty list; there is no fallback data for this source.

use crate::client::{ClientConfig, PageFetcher, PageRequest};
use crate::models::{ContentRecord, NO_LINK, SocialPlatform};
use crate::utils::truncate_for_log;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

/// Items inspected from the top of the result list.
pub const MAX_VIDEOS: usize = 6;

const ITEMS_POINTER: &str = "/contents/twoColumnSearchResultsRenderer/primaryContents/sectionListRenderer/contents/0/itemSectionRenderer/contents";

static INITIAL_DATA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:var\s+ytInitialData|window\[["']ytInitialData["']\])\s*=\s*"#).expect("valid ytInitialData regex")
});

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoRenderer {
    video_id: Option<String>,
    title: Option<Runs>,
    thumbnail: Option<Thumbnails>,
}

#[derive(Debug, Deserialize)]
struct Runs {
    #[serde(default)]
    runs: Vec<Run>,
}

#[derive(Debug, Deserialize)]
struct Run {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Thumbnails {
    #[serde(default)]
    thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: Option<String>,
}

/// Search results page for `query`.
pub fn results_url(query: &str) -> String {
    format!(
        "https://www.youtube.com/results?search_query={}",
        urlencoding::encode(query)
    )
}

/// Parse the first `ytInitialData` assignment found in a `<script>` block.
fn embedded_initial_data(html: &str) -> Option<Value> {
    let document = Html::parse_document(html);
    let scripts = Selector::parse("script").ok()?;

    for script in document.select(&scripts) {
        let text = script.text().collect::<String>();
        let Some(assignment) = INITIAL_DATA.find(&text) else {
            continue;
        };
        let payload = &text[assignment.end()..];
        match serde_json::Deserializer::from_str(payload)
            .into_iter::<Value>()
            .next()
        {
            Some(Ok(value)) => return Some(value),
            Some(Err(e)) => {
                warn!(
                    error = %e,
                    preview = %truncate_for_log(payload, 120),
                    "Malformed ytInitialData payload"
                );
            }
            None => {}
        }
    }
    None
}

/// Markup to raw result items, or `None` when the payload or path is missing.
pub fn video_items(html: &str) -> Option<Vec<Value>> {
    let data = embedded_initial_data(html)?;
    data.pointer(ITEMS_POINTER)?.as_array().cloned()
}

/// Turn result items into records.
///
/// Only the first [`MAX_VIDEOS`] items are considered and only video entries
/// are kept, so channels, shelves and ads shrink the list. The last thumbnail
/// is the highest resolution one.
pub fn parse_videos(items: &[Value]) -> Vec<ContentRecord> {
    items
        .iter()
        .take(MAX_VIDEOS)
        .filter_map(|item| item.get("videoRenderer"))
        .filter_map(|renderer| match VideoRenderer::deserialize(renderer) {
            Ok(video) => Some(video),
            Err(e) => {
                debug!(error = %e, "Skipping unreadable videoRenderer");
                None
            }
        })
        .map(|video| {
            let title = video
                .title
                .and_then(|t| t.runs.into_iter().next())
                .and_then(|run| run.text)
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| "No title".to_string());
            let url = video
                .video_id
                .filter(|id| !id.is_empty())
                .map(|id| format!("https://www.youtube.com/watch?v={id}"))
                .unwrap_or_else(|| NO_LINK.to_string());
            let thumbnail = video
                .thumbnail
                .and_then(|t| t.thumbnails.into_iter().last())
                .and_then(|t| t.url)
                .unwrap_or_default();
            ContentRecord::new(title, url, thumbnail, SocialPlatform::YouTube.label())
        })
        .collect()
}

/// Fetch and parse YouTube search results. Never fails; errors yield an empty list.
#[instrument(level = "info", skip(fetcher, config))]
pub async fn fetch_videos(
    fetcher: &dyn PageFetcher,
    config: &ClientConfig,
    query: &str,
) -> Vec<ContentRecord> {
    let request = PageRequest::new(results_url(query), config.video_timeout);
    let html = match fetcher.fetch(request).await {
        Ok(html) => html,
        Err(e) => {
            error!(error = %e, "YouTube scrape failed");
            return Vec::new();
        }
    };

    let Some(items) = video_items(&html) else {
        warn!("YouTube results payload not found; extraction degraded");
        return Vec::new();
    };

    let videos = parse_videos(&items);
    info!(count = videos.len(), "Parsed YouTube videos");
    videos
}
