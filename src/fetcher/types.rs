use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use url::Url;

/// One fetched page. Lives only for the duration of a single job run.
#[derive(Debug)]
pub struct PageResponse {
    pub url_final: Url,
    pub status: StatusCode,
    pub body_utf8: String,
    pub fetched_at: DateTime<Utc>,
}
