use async_trait::async_trait;
use reqwest::header::{HeaderMap, ACCEPT, COOKIE, REFERER, SET_COOKIE, USER_AGENT};
use reqwest::Client;
use tracing::debug;

use filings_core::config::UpstreamConfig;
use filings_core::{IngestError, RawAnnouncement};

use crate::AnnouncementFeed;

/// Session-bootstrapping client for the NSE announcements feed.
pub struct NseFeedClient {
    client: Client,
    config: UpstreamConfig,
}

impl NseFeedClient {
    pub fn new(config: UpstreamConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn unavailable(e: reqwest::Error) -> IngestError {
        IngestError::UpstreamUnavailable(e.to_string())
    }
}

/// Collapse `Set-Cookie` response headers into a single `Cookie` request
/// value: the `name=value` pair of each cookie, attributes stripped.
fn session_cookie(headers: &HeaderMap) -> String {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

#[async_trait]
impl AnnouncementFeed for NseFeedClient {
    async fn fetch_latest(&self) -> Result<Vec<RawAnnouncement>, IngestError> {
        // Step 1: landing page, to receive session cookies.
        let landing = self
            .client
            .get(&self.config.landing_url)
            .header(USER_AGENT, &self.config.user_agent)
            .header(ACCEPT, &self.config.accept)
            .header(REFERER, &self.config.referer)
            .send()
            .await
            .map_err(Self::unavailable)?
            .error_for_status()
            .map_err(Self::unavailable)?;

        let cookie = session_cookie(landing.headers());
        debug!(cookies = cookie.split("; ").count(), "session bootstrapped");

        // Step 2: the feed itself, with the session cookie attached.
        let mut request = self
            .client
            .get(&self.config.feed_url)
            .header(USER_AGENT, &self.config.user_agent)
            .header(ACCEPT, &self.config.accept)
            .header(REFERER, &self.config.referer);
        if !cookie.is_empty() {
            request = request.header(COOKIE, cookie);
        }

        let body = request
            .send()
            .await
            .map_err(Self::unavailable)?
            .error_for_status()
            .map_err(Self::unavailable)?
            .text()
            .await
            .map_err(Self::unavailable)?;

        // The feed must be a JSON array; anything else (rate-limit HTML,
        // error objects) is a shape failure, not a decode panic.
        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| IngestError::UpstreamShape(format!("response is not JSON: {e}")))?;
        if !value.is_array() {
            return Err(IngestError::UpstreamShape(
                "response is not a JSON array".to_string(),
            ));
        }

        serde_json::from_value(value)
            .map_err(|e| IngestError::UpstreamShape(format!("unexpected element shape: {e}")))
    }
}
