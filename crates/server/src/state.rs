use std::sync::Arc;

use filings_feed::AnnouncementFeed;
use filings_store::AnnouncementStore;

/// Shared application state. Both collaborators are trait objects
/// constructed by the host at startup and injected here — the core
/// logic owns no global clients.
pub struct AppState {
    pub store: Arc<dyn AnnouncementStore>,
    pub feed: Arc<dyn AnnouncementFeed>,
    /// Whether the normalizer assigns bucket labels.
    pub classify: bool,
}
