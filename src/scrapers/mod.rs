//! Source fetchers, one per external platform or outlet.
//!
//! Every fetcher maps `(query, location)` to a list of records and never
//! returns an error: failures are logged and become an empty list (or, for
//! news outlets, the outlet's fallback entries).
//!
//! # Sources
//!
//! | Source | Module | Method | Cap | Fallback |
//! |--------|--------|--------|-----|----------|
//! | YouTube | [`youtube`] | Embedded JSON in the results page | 6 | none |
//! | TikTok, Instagram, Twitch | [`social`] | Templated, no network | 3 | n/a |
//! | CNN, Fox News, BBC | [`news`] | HTML scraping via the selector catalog | 5 | templated |

pub mod news;
pub mod social;
pub mod youtube;
