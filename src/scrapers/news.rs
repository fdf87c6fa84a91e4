//! News outlet scraper.
//!
//! One request per outlet with browser-like headers and the news timeout. The
//! body goes through [`extract_records`] with the outlet's selector strategies.
//! A failed request, a timeout, or zero extracted records all end the same
//! way: the outlet's fallback entries from [`fallback::synthesize`].

use crate::catalog;
use crate::client::{ClientConfig, PageFetcher, PageRequest};
use crate::enrich;
use crate::extract::extract_records;
use crate::fallback;
use crate::models::{ContentRecord, Outlet};
use tracing::{error, info, instrument};

/// Scrape `outlet` for `query`. Never fails and never returns an empty list.
#[instrument(level = "info", skip(fetcher, config, query, location), fields(source = %outlet))]
pub async fn fetch_outlet(
    fetcher: &dyn PageFetcher,
    config: &ClientConfig,
    outlet: Outlet,
    query: &str,
    location: Option<&str>,
) -> Vec<ContentRecord> {
    info!(query, location = location.unwrap_or(""), "Scraping outlet");

    let records = scrape_live(fetcher, config, outlet, query).await;
    if records.is_empty() {
        info!("Using fallback data");
        return fallback::synthesize(outlet, query, location);
    }
    records
}

async fn scrape_live(
    fetcher: &dyn PageFetcher,
    config: &ClientConfig,
    outlet: Outlet,
    query: &str,
) -> Vec<ContentRecord> {
    let site = catalog::site(outlet);
    let request = PageRequest::new(site.search_url(query), config.news_timeout)
        .with_headers(&config.browser_headers);

    let html = match fetcher.fetch(request).await {
        Ok(html) => html,
        Err(e) => {
            error!(error = %e, "Outlet scrape failed");
            return Vec::new();
        }
    };

    let records = extract_records(
        &html,
        site.base_url,
        outlet.label(),
        catalog::strategies(outlet),
    );
    info!(count = records.len(), "Extracted outlet results");

    if config.enrich_thumbnails {
        enrich::fill_thumbnails(fetcher, config, records).await
    } else {
        records
    }
}
