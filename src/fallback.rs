//! Deterministic placeholder entries for outlets whose live scrape came back empty.
//!
//! Output depends only on `(outlet, query, location)`: no clock, no randomness,
//! no network. Every entry points at the outlet's landing page and shares one
//! placeholder thumbnail, so the frontend still renders a labelled column.

use crate::catalog;
use crate::models::{ContentRecord, Outlet};

fn titles(outlet: Outlet, q: &str, near: &str) -> [String; 5] {
    match outlet {
        Outlet::Cnn => [
            format!("Breaking: {q} developments{near}"),
            format!("Analysis: Understanding {q}"),
            format!("{q} impact on communities"),
            format!("Latest updates on {q}"),
            format!("Experts weigh in on {q}"),
        ],
        Outlet::Fox => [
            format!("{q} situation unfolds{near}"),
            format!("What you need to know about {q}"),
            format!("{q}: Key takeaways"),
            format!("Breaking coverage: {q}"),
            format!("{q} update: Full story"),
        ],
        Outlet::Bbc => [
            format!("{q}: What's happening{near}"),
            format!("{q} explained"),
            format!("The story behind {q}"),
            format!("{q}: Latest developments"),
            format!("In-depth: {q} coverage"),
        ],
    }
}

/// Templated records for `outlet`.
///
/// A non-blank `location` is appended to the lead headline as ` in <location>`.
pub fn synthesize(outlet: Outlet, query: &str, location: Option<&str>) -> Vec<ContentRecord> {
    let site = catalog::site(outlet);
    let near = location
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| format!(" in {l}"))
        .unwrap_or_default();

    titles(outlet, query.trim(), &near)
        .into_iter()
        .map(|title| {
            ContentRecord::new(
                title,
                site.fallback_url,
                site.placeholder_thumbnail,
                outlet.label(),
            )
        })
        .collect()
}
