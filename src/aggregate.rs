//! Fan-out of one search request to every source.
//!
//! Network sources run as separate tokio tasks and are all awaited before the
//! bundle is assembled. Each task writes only its own slot, so completion
//! order never affects the result. The templated social sources are computed
//! inline.
//!
//! A task that panics degrades to its source's empty or fallback list. Only a
//! cancelled task fails the request.

use crate::client::{ClientConfig, PageFetcher};
use crate::error::SearchError;
use crate::fallback;
use crate::models::{ContentRecord, NewsResults, Outlet, ResultBundle, SocialPlatform, SocialResults};
use crate::scrapers::{news, social, youtube};
use std::sync::Arc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{Instrument, error, info, instrument};

/// Builds a [`ResultBundle`] per request. Cheap to share behind an `Arc`.
pub struct Aggregator {
    fetcher: Arc<dyn PageFetcher>,
    config: Arc<ClientConfig>,
}

impl Aggregator {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: ClientConfig) -> Self {
        Self {
            fetcher,
            config: Arc::new(config),
        }
    }

    /// Run every source for `query` and collect the results.
    ///
    /// # Errors
    ///
    /// - [`SearchError::EmptyQuery`] if `query` is blank; nothing is fetched.
    /// - [`SearchError::TaskFailed`] if a source task was cancelled.
    #[instrument(level = "info", skip(self))]
    pub async fn search(
        &self,
        query: &str,
        location: Option<&str>,
    ) -> Result<ResultBundle, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        let location = location
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string);
        info!(
            query,
            location = location.as_deref().unwrap_or("none"),
            "New search request"
        );

        let youtube = self.spawn_videos(query);
        let cnn = self.spawn_outlet(Outlet::Cnn, query, location.clone());
        let fox = self.spawn_outlet(Outlet::Fox, query, location.clone());
        let bbc = self.spawn_outlet(Outlet::Bbc, query, location.clone());

        let social_mocks = (social::tiktok(query), social::instagram(query), social::twitch(query));

        let (youtube, cnn, fox, bbc) = tokio::join!(youtube, cnn, fox, bbc);
        let location = location.as_deref();
        let youtube = settle(SocialPlatform::YouTube.key(), youtube, Vec::new)?;
        let cnn = settle(Outlet::Cnn.key(), cnn, || {
            fallback::synthesize(Outlet::Cnn, query, location)
        })?;
        let fox = settle(Outlet::Fox.key(), fox, || {
            fallback::synthesize(Outlet::Fox, query, location)
        })?;
        let bbc = settle(Outlet::Bbc.key(), bbc, || {
            fallback::synthesize(Outlet::Bbc, query, location)
        })?;
        let (tiktok, instagram, twitch) = social_mocks;

        let bundle = ResultBundle {
            social: SocialResults {
                youtube,
                tiktok,
                instagram,
                twitch,
            },
            news: NewsResults { cnn, fox, bbc },
        };
        log_summary(&bundle);
        Ok(bundle)
    }

    fn spawn_videos(&self, query: &str) -> JoinHandle<Vec<ContentRecord>> {
        let fetcher = Arc::clone(&self.fetcher);
        let config = Arc::clone(&self.config);
        let query = query.to_string();
        tokio::spawn(
            async move { youtube::fetch_videos(fetcher.as_ref(), &config, &query).await }
                .in_current_span(),
        )
    }

    fn spawn_outlet(
        &self,
        outlet: Outlet,
        query: &str,
        location: Option<String>,
    ) -> JoinHandle<Vec<ContentRecord>> {
        let fetcher = Arc::clone(&self.fetcher);
        let config = Arc::clone(&self.config);
        let query = query.to_string();
        tokio::spawn(
            async move {
                news::fetch_outlet(fetcher.as_ref(), &config, outlet, &query, location.as_deref())
                    .await
            }
            .in_current_span(),
        )
    }
}

/// Unwrap a finished source task, replacing a panicked one with `degraded`.
fn settle(
    source: &str,
    joined: Result<Vec<ContentRecord>, JoinError>,
    degraded: impl FnOnce() -> Vec<ContentRecord>,
) -> Result<Vec<ContentRecord>, SearchError> {
    match joined {
        Ok(records) => Ok(records),
        Err(e) if e.is_panic() => {
            error!(source, error = %e, "Source task panicked; using degraded results");
            Ok(degraded())
        }
        Err(e) => Err(SearchError::TaskFailed(e)),
    }
}

fn log_summary(bundle: &ResultBundle) {
    for platform in SocialPlatform::ALL {
        info!(
            source = platform.key(),
            count = bundle.social.get(platform).len(),
            "Source results"
        );
    }
    for outlet in Outlet::ALL {
        info!(
            source = outlet.key(),
            count = bundle.news.get(outlet).len(),
            "Source results"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockFetcher;
    use crate::client::{FetchError, PageRequest};
    use crate::extract::MAX_RECORDS;
    use crate::scrapers::youtube::MAX_VIDEOS;

    fn aggregator(fetcher: Arc<MockFetcher>) -> Aggregator {
        Aggregator::new(fetcher, ClientConfig::default())
    }

    fn cnn_page() -> String {
        (0..3)
            .map(|i| {
                format!(
                    r#"<div class="card"><h3>CNN live headline {i}</h3><a href="/live/{i}">go</a></div>"#
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_blank_query_fetches_nothing() {
        let fetcher = Arc::new(MockFetcher::new());
        let agg = aggregator(Arc::clone(&fetcher));

        for query in ["", "   "] {
            let result = agg.search(query, Some("Ohio")).await;
            assert!(matches!(result, Err(SearchError::EmptyQuery)));
        }
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_every_source_key_is_populated_when_network_is_down() {
        let fetcher = Arc::new(MockFetcher::new());
        let bundle = aggregator(Arc::clone(&fetcher))
            .search("election", Some(""))
            .await
            .unwrap();

        assert!(bundle.social.youtube.is_empty());
        assert_eq!(bundle.social.tiktok.len(), 3);
        assert_eq!(bundle.social.instagram.len(), 3);
        assert_eq!(bundle.social.twitch.len(), 3);
        for outlet in Outlet::ALL {
            let records = bundle.news.get(outlet);
            assert_eq!(records, fallback::synthesize(outlet, "election", None).as_slice());
            assert!(records.iter().all(|r| r.title().contains("election")));
        }
        // one attempt per network source, no retries
        assert_eq!(fetcher.call_count(), 4);
    }

    #[tokio::test]
    async fn test_one_outlet_timeout_leaves_others_alone() {
        let fetcher = Arc::new(
            MockFetcher::new()
                .with_body("https://www.cnn.com", cnn_page())
                .with_timeout("https://www.foxnews.com"),
        );
        let bundle = aggregator(fetcher)
            .search("election", Some("Ohio"))
            .await
            .unwrap();

        assert_eq!(
            bundle.news.fox,
            fallback::synthesize(Outlet::Fox, "election", Some("Ohio"))
        );
        assert_eq!(bundle.news.cnn.len(), 3);
        assert_eq!(bundle.news.cnn[0].title(), "CNN live headline 0");
        assert_eq!(bundle.news.cnn[0].url(), "https://www.cnn.com/live/0");
        assert_eq!(
            bundle.news.bbc,
            fallback::synthesize(Outlet::Bbc, "election", Some("Ohio"))
        );
    }

    /// Panics on the video request and refuses everything else.
    struct PanickingVideoFetcher;

    #[async_trait::async_trait]
    impl PageFetcher for PanickingVideoFetcher {
        async fn fetch(&self, request: PageRequest) -> Result<String, FetchError> {
            if request.url.starts_with("https://www.youtube.com") {
                panic!("bug inside video source");
            }
            Err(FetchError::Request {
                url: request.url,
                message: "connection refused".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_panicking_source_does_not_fail_the_request() {
        let agg = Aggregator::new(Arc::new(PanickingVideoFetcher), ClientConfig::default());
        let bundle = agg.search("election", None).await.unwrap();

        assert!(bundle.social.youtube.is_empty());
        assert_eq!(bundle.social.tiktok.len(), 3);
        for outlet in Outlet::ALL {
            assert_eq!(
                bundle.news.get(outlet),
                fallback::synthesize(outlet, "election", None).as_slice()
            );
        }
    }

    #[tokio::test]
    async fn test_panicking_outlet_gets_its_fallback() {
        struct PanickingBbc(MockFetcher);

        #[async_trait::async_trait]
        impl PageFetcher for PanickingBbc {
            async fn fetch(&self, request: PageRequest) -> Result<String, FetchError> {
                if request.url.starts_with("https://www.bbc.com") {
                    panic!("bug inside outlet source");
                }
                self.0.fetch(request).await
            }
        }

        let fetcher = PanickingBbc(MockFetcher::new().with_body("https://www.cnn.com", cnn_page()));
        let bundle = Aggregator::new(Arc::new(fetcher), ClientConfig::default())
            .search("election", Some("Ohio"))
            .await
            .unwrap();

        assert_eq!(
            bundle.news.bbc,
            fallback::synthesize(Outlet::Bbc, "election", Some("Ohio"))
        );
        assert_eq!(bundle.news.cnn.len(), 3);
    }

    #[test]
    fn test_settle_passes_results_through() {
        let records = vec![ContentRecord::new("A long enough title", "https://x.com", "", "CNN")];
        let settled = settle("cnn", Ok(records.clone()), Vec::new).unwrap();
        assert_eq!(settled, records);
    }

    #[tokio::test]
    async fn test_cancelled_task_fails_the_request() {
        let handle: JoinHandle<Vec<ContentRecord>> =
            tokio::spawn(async { std::future::pending().await });
        handle.abort();
        let joined = handle.await;
        let result = settle("youtube", joined, Vec::new);
        assert!(matches!(result, Err(SearchError::TaskFailed(_))));
    }

    #[tokio::test]
    async fn test_caps_hold_across_bundle() {
        let fetcher = Arc::new(MockFetcher::new().with_body("https://www.cnn.com", cnn_page()));
        let bundle = aggregator(fetcher).search("storm", None).await.unwrap();
        assert!(bundle.social.youtube.len() <= MAX_VIDEOS);
        for outlet in Outlet::ALL {
            assert!(bundle.news.get(outlet).len() <= MAX_RECORDS);
        }
        for platform in [SocialPlatform::TikTok, SocialPlatform::Instagram, SocialPlatform::Twitch] {
            assert_eq!(bundle.social.get(platform).len(), 3);
        }
    }

    #[tokio::test]
    async fn test_query_is_trimmed() {
        let fetcher = Arc::new(MockFetcher::new());
        let bundle = aggregator(Arc::clone(&fetcher))
            .search("  floods ", None)
            .await
            .unwrap();
        assert_eq!(bundle.social.tiktok[0].title(), "floods trending on TikTok");
        assert!(
            fetcher
                .requests()
                .iter()
                .any(|r| r.url == "https://www.cnn.com/search?q=floods")
        );
    }
}
