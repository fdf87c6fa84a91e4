//! Templated results for platforms without a scrapeable search page.
//!
//! TikTok, Instagram and Twitch all gate search behind login or client-side
//! rendering, so each gets three fixed entries that deep-link into the
//! platform's own search for the query. No network access.

use crate::models::{ContentRecord, SocialPlatform};

fn placeholder(background: &str, text: &str) -> String {
    format!("https://via.placeholder.com/640x360/{background}/FFFFFF?text={text}")
}

fn entries(platform: SocialPlatform, titles: [String; 3], url: &str, thumbnail: &str) -> Vec<ContentRecord> {
    titles
        .into_iter()
        .map(|title| ContentRecord::new(title, url, thumbnail, platform.label()))
        .collect()
}

/// Instagram tag form of a query: whitespace removed, lowercased.
pub fn hashtag(query: &str) -> String {
    query
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

pub fn tiktok(query: &str) -> Vec<ContentRecord> {
    let url = format!(
        "https://www.tiktok.com/search?q={}",
        urlencoding::encode(query)
    );
    entries(
        SocialPlatform::TikTok,
        [
            format!("{query} trending on TikTok"),
            format!("{query} viral content"),
            format!("Latest {query} videos"),
        ],
        &url,
        &placeholder("000000", "TikTok"),
    )
}

pub fn instagram(query: &str) -> Vec<ContentRecord> {
    let tag = hashtag(query);
    let url = format!(
        "https://www.instagram.com/explore/tags/{}/",
        urlencoding::encode(&tag)
    );
    entries(
        SocialPlatform::Instagram,
        [
            format!("#{tag} on Instagram"),
            format!("{query} posts and reels"),
            format!("Explore {query} content"),
        ],
        &url,
        &placeholder("E4405F", "Instagram"),
    )
}

pub fn twitch(query: &str) -> Vec<ContentRecord> {
    let url = format!(
        "https://www.twitch.tv/search?term={}",
        urlencoding::encode(query)
    );
    entries(
        SocialPlatform::Twitch,
        [
            format!("{query} live streams on Twitch"),
            format!("Watch {query} gameplay"),
            format!("{query} streamers and clips"),
        ],
        &url,
        &placeholder("9146FF", "Twitch"),
    )
}
