//! Per-outlet endpoints and the ordered selector strategies used to scrape them.
//!
//! Each outlet has a small table of facts (base URL, search path, where to go
//! when the query is empty, where fallback entries point) and a priority-ordered
//! list of [`SelectorStrategy`] values. Adding or reordering a strategy is a
//! change to the data in this file; the extraction loop in [`crate::extract`]
//! never changes.
//!
//! | Outlet | Base | Search | Empty query | Fallback link |
//! |--------|------|--------|-------------|---------------|
//! | CNN | `https://www.cnn.com` | `/search?q=` | homepage | homepage |
//! | Fox News | `https://www.foxnews.com` | `/search-results/search?q=` | homepage | homepage |
//! | BBC | `https://www.bbc.com` | `/search?q=` | `/news` | `/news` |

use crate::models::Outlet;

/// One way of locating article cards in a page.
///
/// `container` selects a card; the other selectors are matched inside it and
/// the first hit wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorStrategy {
    pub container: &'static str,
    pub title: &'static str,
    pub link: &'static str,
    pub image: &'static str,
}

impl SelectorStrategy {
    const fn new(container: &'static str, title: &'static str) -> Self {
        Self {
            container,
            title,
            link: "a",
            image: "img",
        }
    }
}

const CNN_STRATEGIES: &[SelectorStrategy] = &[
    SelectorStrategy::new(".container__item", ".container__title"),
    SelectorStrategy::new(".card", "h3"),
    SelectorStrategy::new("article", "h2, h3"),
];

const FOX_STRATEGIES: &[SelectorStrategy] = &[
    SelectorStrategy::new("article.article", "h2.title, h3"),
    SelectorStrategy::new(".content-list article", "h4, h3"),
    SelectorStrategy::new(".collection-article-list article", "h2, h3"),
];

const BBC_STRATEGIES: &[SelectorStrategy] = &[
    SelectorStrategy::new(r#"[data-testid="card"]"#, "h3"),
    SelectorStrategy::new("article", "h3, h2"),
    SelectorStrategy::new(".gel-layout__item", "h3"),
];

/// Static facts about an outlet's site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutletSite {
    /// Scheme and host, no trailing slash. Relative links resolve against it.
    pub base_url: &'static str,
    /// Path and query prefix; the encoded query is appended.
    pub search_path: &'static str,
    /// Path fetched when the query is empty.
    pub empty_query_path: &'static str,
    /// Destination of every fallback entry.
    pub fallback_url: &'static str,
    /// Placeholder image used by every fallback entry.
    pub placeholder_thumbnail: &'static str,
}

impl OutletSite {
    /// URL to fetch for `query`.
    ///
    /// A blank query falls back to the outlet's landing page.
    pub fn search_url(&self, query: &str) -> String {
        let query = query.trim();
        if query.is_empty() {
            format!("{}{}", self.base_url, self.empty_query_path)
        } else {
            format!(
                "{}{}{}",
                self.base_url,
                self.search_path,
                urlencoding::encode(query)
            )
        }
    }
}

/// Site facts for `outlet`.
pub fn site(outlet: Outlet) -> &'static OutletSite {
    match outlet {
        Outlet::Cnn => &OutletSite {
            base_url: "https://www.cnn.com",
            search_path: "/search?q=",
            empty_query_path: "",
            fallback_url: "https://www.cnn.com",
            placeholder_thumbnail: "https://via.placeholder.com/640x360/CC0000/FFFFFF?text=CNN",
        },
        Outlet::Fox => &OutletSite {
            base_url: "https://www.foxnews.com",
            search_path: "/search-results/search?q=",
            empty_query_path: "",
            fallback_url: "https://www.foxnews.com",
            placeholder_thumbnail: "https://via.placeholder.com/640x360/003366/FFFFFF?text=Fox+News",
        },
        Outlet::Bbc => &OutletSite {
            base_url: "https://www.bbc.com",
            search_path: "/search?q=",
            empty_query_path: "/news",
            fallback_url: "https://www.bbc.com/news",
            placeholder_thumbnail: "https://via.placeholder.com/640x360/000000/FFFFFF?text=BBC",
        },
    }
}

/// Strategies for `outlet`, highest priority first.
pub fn strategies(outlet: Outlet) -> &'static [SelectorStrategy] {
    match outlet {
        Outlet::Cnn => CNN_STRATEGIES,
        Outlet::Fox => FOX_STRATEGIES,
        Outlet::Bbc => BBC_STRATEGIES,
    }
}
