//! Record extraction from outlet search pages.
//!
//! A single loop walks an outlet's [`SelectorStrategy`] list in priority order
//! and stops as soon as [`MAX_RECORDS`] distinct records are collected. Later
//! strategies only run when earlier ones under-filled the quota.
//!
//! # Normalization
//!
//! - Links that are not already absolute are resolved against the outlet's base URL.
//! - Thumbnails get the same treatment, except data URIs and values longer than
//!   [`MAX_THUMBNAIL_LEN`] are dropped to an empty string.
//! - Titles shorter than [`MIN_TITLE_CHARS`] are navigation or boilerplate and
//!   are rejected.

use crate::catalog::SelectorStrategy;
use crate::dedup;
use crate::models::ContentRecord;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument, warn};
use url::Url;

/// Records kept per outlet.
pub const MAX_RECORDS: usize = 5;
/// Containers inspected per strategy.
pub const MAX_CONTAINERS: usize = 8;
/// Shortest acceptable title, in characters.
pub const MIN_TITLE_CHARS: usize = 10;
/// Longest acceptable thumbnail reference, in characters.
pub const MAX_THUMBNAIL_LEN: usize = 500;

/// Image attributes checked in order: the standard one, then two lazy-load variants.
const IMAGE_ATTRS: [&str; 3] = ["src", "data-src", "data-lazy-src"];

/// A [`SelectorStrategy`] with its selectors parsed.
struct CompiledStrategy {
    container: Selector,
    title: Selector,
    link: Selector,
    image: Selector,
}

impl CompiledStrategy {
    fn compile(strategy: &SelectorStrategy) -> Option<Self> {
        let parse = |sel: &str| match Selector::parse(sel) {
            Ok(s) => Some(s),
            Err(e) => {
                warn!(selector = sel, error = ?e, "Skipping unparseable selector");
                None
            }
        };
        Some(Self {
            container: parse(strategy.container)?,
            title: parse(strategy.title)?,
            link: parse(strategy.link)?,
            image: parse(strategy.image)?,
        })
    }

    fn record_from(&self, card: ElementRef<'_>, base_url: &str, label: &str) -> Option<ContentRecord> {
        let title = card
            .select(&self.title)
            .next()
            .map(|el| el.text().collect::<String>())?;
        let title = title.trim();
        if title.chars().count() < MIN_TITLE_CHARS {
            return None;
        }

        let href = card
            .select(&self.link)
            .next()
            .and_then(|el| el.value().attr("href"))
            .map(str::trim)
            .filter(|h| !h.is_empty())?;

        let thumbnail = card
            .select(&self.image)
            .next()
            .and_then(|img| {
                IMAGE_ATTRS
                    .iter()
                    .filter_map(|attr| img.value().attr(attr))
                    .find(|v| !v.trim().is_empty())
            })
            .map(|raw| normalize_thumbnail(base_url, raw))
            .unwrap_or_default();

        Some(ContentRecord::new(
            title,
            absolutize(base_url, href),
            thumbnail,
            label,
        ))
    }
}

/// Extract up to [`MAX_RECORDS`] distinct records from `html`.
///
/// # Arguments
///
/// * `html` - The page body
/// * `base_url` - Scheme and host that relative links resolve against
/// * `label` - Value for each record's `source`
/// * `strategies` - Selector strategies, highest priority first
#[instrument(level = "debug", skip_all, fields(%label, bytes = html.len()))]
pub fn extract_records(
    html: &str,
    base_url: &str,
    label: &str,
    strategies: &[SelectorStrategy],
) -> Vec<ContentRecord> {
    let document = Html::parse_document(html);
    let mut records: Vec<ContentRecord> = Vec::new();

    for strategy in strategies {
        if records.len() >= MAX_RECORDS {
            break;
        }
        let Some(compiled) = CompiledStrategy::compile(strategy) else {
            continue;
        };

        let before = records.len();
        for card in document.select(&compiled.container).take(MAX_CONTAINERS) {
            if records.len() >= MAX_RECORDS {
                break;
            }
            if let Some(record) = compiled.record_from(card, base_url, label) {
                dedup::push_unique(&mut records, record);
            }
        }
        debug!(
            container = strategy.container,
            added = records.len() - before,
            "Applied selector strategy"
        );
    }

    records
}

fn is_absolute(link: &str) -> bool {
    let lower = link.get(..8).unwrap_or(link).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Resolve `link` against `base_url` unless it is already absolute.
///
/// `"/a/b"` against `"https://x.com"` gives `"https://x.com/a/b"`; no doubled
/// slash is produced whether or not the link starts with one.
pub fn absolutize(base_url: &str, link: &str) -> String {
    if is_absolute(link) {
        return link.to_string();
    }
    if let Ok(joined) = Url::parse(base_url).and_then(|base| base.join(link)) {
        return joined.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if link.starts_with('/') {
        format!("{base}{link}")
    } else {
        format!("{base}/{link}")
    }
}

fn is_data_uri(value: &str) -> bool {
    value
        .get(..5)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("data:"))
        || value.contains("data:image")
}

/// Absolutize a thumbnail reference, or return empty for inline/garbage values.
pub fn normalize_thumbnail(base_url: &str, raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() || is_data_uri(raw) || raw.chars().count() > MAX_THUMBNAIL_LEN {
        return String::new();
    }
    let url = absolutize(base_url, raw);
    if url.chars().count() > MAX_THUMBNAIL_LEN {
        return String::new();
    }
    url
}
