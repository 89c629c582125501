use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument};

use super::{DispatchError, Notifier};

const PUSHPLUS_SEND_URL: &str = "http://www.pushplus.plus/send";

#[derive(Serialize)]
struct PushplusPayload<'a> {
    token: &'a str,
    title: &'a str,
    content: &'a str,
    template: &'a str,
}

/// Delivers messages through the pushplus HTTP API, rendered as markdown on
/// the subscriber's device.
#[derive(Clone)]
pub struct PushplusNotifier {
    token: String,
    send_url: String,
    client: Client,
    timeout: Duration,
}

impl PushplusNotifier {
    pub fn new(token: String) -> Self {
        Self {
            token,
            send_url: PUSHPLUS_SEND_URL.to_string(),
            client: Client::new(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Point deliveries at a different endpoint. Used by tests to aim at a
    /// mock server.
    pub fn with_send_url(mut self, url: impl Into<String>) -> Self {
        self.send_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl Notifier for PushplusNotifier {
    #[instrument(skip_all, fields(title = %title))]
    async fn deliver(&self, title: &str, body: &str) -> Result<(), DispatchError> {
        let payload = PushplusPayload {
            token: &self.token,
            title,
            content: body,
            template: "markdown",
        };

        let response = self
            .client
            .post(&self.send_url)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| DispatchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DispatchError::Rejected { status });
        }

        debug!(status = %status, "delivered notification");
        Ok(())
    }
}
