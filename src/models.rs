//! Data models for aggregated search results.
//!
//! This module defines the core data structures used throughout the application:
//! - [`ContentRecord`]: One normalized item from a platform or outlet
//! - [`ResultBundle`]: Every source's records for a single search request
//! - Source keys: [`SocialPlatform`] and [`Outlet`]
//!
//! Keys are fixed at build time, so the bundle is a pair of plain structs whose
//! field names are the JSON keys the frontend reads.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder URL for a record that has no usable destination.
pub const NO_LINK: &str = "#";

/// A single normalized item shown as a card in the results grid.
///
/// Records are immutable once built; dedup compares `title` and `url` only.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContentRecord {
    title: String,
    url: String,
    thumbnail: String,
    source: String,
}

impl ContentRecord {
    /// Build a record. `thumbnail` may be empty; `url` is absolute or [`NO_LINK`].
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        thumbnail: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            thumbnail: thumbnail.into(),
            source: source.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn thumbnail(&self) -> &str {
        &self.thumbnail
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Copy of this record with a different thumbnail.
    pub fn with_thumbnail(&self, thumbnail: impl Into<String>) -> Self {
        Self {
            thumbnail: thumbnail.into(),
            ..self.clone()
        }
    }

    /// `false` when the record carries the [`NO_LINK`] placeholder.
    pub fn has_link(&self) -> bool {
        self.url != NO_LINK
    }
}

/// Video and social platforms shown under `social`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocialPlatform {
    YouTube,
    TikTok,
    Instagram,
    Twitch,
}

impl SocialPlatform {
    pub const ALL: [SocialPlatform; 4] = [
        SocialPlatform::YouTube,
        SocialPlatform::TikTok,
        SocialPlatform::Instagram,
        SocialPlatform::Twitch,
    ];

    /// JSON key in the `social` mapping.
    pub fn key(self) -> &'static str {
        match self {
            SocialPlatform::YouTube => "youtube",
            SocialPlatform::TikTok => "tiktok",
            SocialPlatform::Instagram => "instagram",
            SocialPlatform::Twitch => "twitch",
        }
    }

    /// Label written into each record's `source` field.
    pub fn label(self) -> &'static str {
        match self {
            SocialPlatform::YouTube => "YouTube",
            SocialPlatform::TikTok => "TikTok",
            SocialPlatform::Instagram => "Instagram",
            SocialPlatform::Twitch => "Twitch",
        }
    }
}

impl fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// News outlets shown under `news`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outlet {
    Cnn,
    Fox,
    Bbc,
}

impl Outlet {
    pub const ALL: [Outlet; 3] = [Outlet::Cnn, Outlet::Fox, Outlet::Bbc];

    /// JSON key in the `news` mapping.
    pub fn key(self) -> &'static str {
        match self {
            Outlet::Cnn => "cnn",
            Outlet::Fox => "fox",
            Outlet::Bbc => "bbc",
        }
    }

    /// Label written into each record's `source` field (the key upper-cased).
    pub fn label(self) -> &'static str {
        match self {
            Outlet::Cnn => "CNN",
            Outlet::Fox => "FOX",
            Outlet::Bbc => "BBC",
        }
    }
}

impl fmt::Display for Outlet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Records for the video platform and the social mocks.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SocialResults {
    pub youtube: Vec<ContentRecord>,
    pub tiktok: Vec<ContentRecord>,
    pub instagram: Vec<ContentRecord>,
    pub twitch: Vec<ContentRecord>,
}

impl SocialResults {
    pub fn get(&self, platform: SocialPlatform) -> &[ContentRecord] {
        match platform {
            SocialPlatform::YouTube => &self.youtube,
            SocialPlatform::TikTok => &self.tiktok,
            SocialPlatform::Instagram => &self.instagram,
            SocialPlatform::Twitch => &self.twitch,
        }
    }
}

/// Records per news outlet.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NewsResults {
    pub cnn: Vec<ContentRecord>,
    pub fox: Vec<ContentRecord>,
    pub bbc: Vec<ContentRecord>,
}

impl NewsResults {
    pub fn get(&self, outlet: Outlet) -> &[ContentRecord] {
        match outlet {
            Outlet::Cnn => &self.cnn,
            Outlet::Fox => &self.fox,
            Outlet::Bbc => &self.bbc,
        }
    }
}

/// Everything returned for one search request.
///
/// Built once per request and dropped after the response is written.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ResultBundle {
    pub social: SocialResults,
    pub news: NewsResults,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_record_creation() {
        let record = ContentRecord::new(
            "A headline long enough",
            "https://example.com/a",
            "",
            "CNN",
        );
        assert_eq!(record.title(), "A headline long enough");
        assert_eq!(record.url(), "https://example.com/a");
        assert_eq!(record.thumbnail(), "");
        assert_eq!(record.source(), "CNN");
        assert!(record.has_link());
    }

    #[test]
    fn test_no_link_sentinel() {
        let record = ContentRecord::new("No title", NO_LINK, "", "YouTube");
        assert!(!record.has_link());
    }

    #[test]
    fn test_with_thumbnail_keeps_other_fields() {
        let record = ContentRecord::new("Some title here", "https://x.com/a", "", "BBC");
        let updated = record.with_thumbnail("https://x.com/i.jpg");
        assert_eq!(updated.title(), record.title());
        assert_eq!(updated.url(), record.url());
        assert_eq!(updated.thumbnail(), "https://x.com/i.jpg");
    }

    #[test]
    fn test_record_serialization_shape() {
        let record = ContentRecord::new("t", "https://x.com", "https://x.com/t.png", "FOX");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["title"], "t");
        assert_eq!(json["url"], "https://x.com");
        assert_eq!(json["thumbnail"], "https://x.com/t.png");
        assert_eq!(json["source"], "FOX");
    }

    #[test]
    fn test_bundle_serialization_has_every_key() {
        let bundle = ResultBundle::default();
        let json = serde_json::to_value(&bundle).unwrap();
        for platform in SocialPlatform::ALL {
            assert!(json["social"][platform.key()].is_array(), "{platform}");
        }
        for outlet in Outlet::ALL {
            assert!(json["news"][outlet.key()].is_array(), "{outlet}");
        }
    }

    #[test]
    fn test_bundle_deserialization() {
        let json = r#"{
            "social": {"youtube": [], "tiktok": [], "instagram": [], "twitch": []},
            "news": {"cnn": [{"title": "t", "url": "u", "thumbnail": "", "source": "CNN"}], "fox": [], "bbc": []}
        }"#;
        let bundle: ResultBundle = serde_json::from_str(json).unwrap();
        assert_eq!(bundle.news.get(Outlet::Cnn).len(), 1);
        assert_eq!(bundle.social.get(SocialPlatform::YouTube).len(), 0);
    }

    #[test]
    fn test_outlet_labels_are_upper_keys() {
        for outlet in Outlet::ALL {
            assert_eq!(outlet.label(), outlet.key().to_uppercase());
        }
    }
}
