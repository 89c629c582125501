pub mod pushplus;

pub use pushplus::PushplusNotifier;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("delivery request failed: {0}")]
    Request(String),

    #[error("channel rejected delivery: http {status}")]
    Rejected { status: reqwest::StatusCode },
}

/// The one contract the pipeline needs from a notification channel. Delivery
/// attempts never panic and never propagate transport errors past this
/// boundary; a failed delivery is logged by the caller and lost. No retry,
/// no queueing.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, title: &str, body: &str) -> Result<(), DispatchError>;
}
