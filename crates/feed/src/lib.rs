//! Upstream session client for the exchange's corporate-announcements feed.
//!
//! The source rejects anonymous API calls: a session cookie must first be
//! obtained from the public landing page, then replayed on the feed
//! request. [`NseFeedClient`] performs that two-step handshake on every
//! invocation — no cookie is cached across cycles.

mod client;

use async_trait::async_trait;

use filings_core::{IngestError, RawAnnouncement};

pub use client::NseFeedClient;

/// Source of raw announcement records. The production implementation is
/// [`NseFeedClient`]; tests substitute an in-memory feed.
#[async_trait]
pub trait AnnouncementFeed: Send + Sync {
    /// Fetch the current batch of announcements from the source.
    /// No retry is attempted here; retry policy belongs to the caller.
    async fn fetch_latest(&self) -> Result<Vec<RawAnnouncement>, IngestError>;
}
