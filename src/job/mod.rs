//! The daily fetch-format-dispatch pipeline.
//!
//! One run fetches the date-link page and the trending page independently,
//! renders a digest per category, and hands both to the notifier. Failures in
//! one category never block the other, and no failure escapes [`DailyJob::run`]:
//! a dead source degrades to a placeholder body, not a crash.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::digest::{Digest, render_links, render_trending_item};
use crate::extract::{date_links, first_heading, static_item, today_token};
use crate::fetcher::fetch;
use crate::notify::Notifier;

const CHINA_DAILY_URL: &str = "https://www.chinadaily.com.cn/";
const DECOHACK_URL: &str = "https://decohack.com/category/producthunt/";
const GITHUB_TRENDING_URL: &str = "https://github.com/trending";

const LINKS_DIGEST_TITLE: &str = "今日外刊";
const TRENDING_DIGEST_TITLE: &str = "GitHub Trending";

/// The pages one run scrapes. Defaults point at the production sites;
/// tests substitute mock-server URLs.
#[derive(Debug, Clone)]
pub struct Sources {
    pub date_links_url: String,
    pub trending_url: String,
    pub trending_source_name: String,
    pub static_source_name: String,
    pub static_source_url: String,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            date_links_url: CHINA_DAILY_URL.to_string(),
            trending_url: DECOHACK_URL.to_string(),
            trending_source_name: "Decohack".to_string(),
            static_source_name: "GitHub".to_string(),
            static_source_url: GITHUB_TRENDING_URL.to_string(),
        }
    }
}

pub struct DailyJob {
    sources: Sources,
    fetch_timeout: Duration,
    notifier: Arc<dyn Notifier>,
}

impl DailyJob {
    pub fn new(sources: Sources, fetch_timeout: Duration, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            sources,
            fetch_timeout,
            notifier,
        }
    }

    /// Execute one complete run. Always dispatches exactly two messages (one
    /// per category); each delivery independently succeeds or fails. Runs are
    /// stateless with respect to prior runs: no dedup across days, no
    /// "already sent today" guard beyond the scheduler firing once.
    pub async fn run(&self) {
        info!("starting daily push run");

        let links_digest = self.build_links_digest().await;
        self.dispatch(&links_digest).await;

        let trending_digest = self.build_trending_digest().await;
        self.dispatch(&trending_digest).await;

        info!("daily push run complete");
    }

    async fn build_links_digest(&self) -> Digest {
        let token = today_token();
        let links = match fetch(&self.sources.date_links_url, self.fetch_timeout).await {
            Ok(page) => date_links(&page.body_utf8, &page.url_final, &token),
            Err(e) => {
                warn!(url = %self.sources.date_links_url, error = %e, "date-link fetch failed");
                Vec::new()
            }
        };
        info!(count = links.len(), token = %token, "collected date links");

        Digest {
            title: LINKS_DIGEST_TITLE.to_string(),
            body: render_links(&links),
        }
    }

    async fn build_trending_digest(&self) -> Digest {
        let scraped = match fetch(&self.sources.trending_url, self.fetch_timeout).await {
            Ok(page) => first_heading(&page.body_utf8),
            Err(e) => {
                warn!(url = %self.sources.trending_url, error = %e, "trending fetch failed");
                None
            }
        };
        info!(found = scraped.is_some(), "scraped trending source");

        let fixed = static_item(
            &self.sources.static_source_name,
            &self.sources.static_source_url,
        );

        // Two logically distinct topics ride in one notification: the scraped
        // block first, then the static block.
        let body = render_trending_item(scraped.as_ref(), &self.sources.trending_source_name)
            + &render_trending_item(Some(&fixed), &self.sources.static_source_name);

        Digest {
            title: TRENDING_DIGEST_TITLE.to_string(),
            body,
        }
    }

    async fn dispatch(&self, digest: &Digest) {
        match self.notifier.deliver(&digest.title, &digest.body).await {
            Ok(()) => info!(title = %digest.title, "notification delivered"),
            // A failed delivery is lost; there is no retry or queueing.
            Err(e) => error!(title = %digest.title, error = %e, "notification delivery failed"),
        }
    }
}
