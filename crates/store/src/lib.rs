//! Durable storage for normalized announcements.
//!
//! The store is write-only from the ingestion pipeline and read-only
//! from the API: batches are upserted keyed on `seq_id` (full replace
//! of non-key fields on conflict) and reads come back newest-first.
//! Rows are never deleted.

mod postgres;

use async_trait::async_trait;

use filings_core::{AnnouncementRecord, IngestError};

pub use postgres::PgAnnouncementStore;

/// Storage contract for announcement records. The production
/// implementation is [`PgAnnouncementStore`]; tests substitute an
/// in-memory map with the same upsert semantics.
#[async_trait]
pub trait AnnouncementStore: Send + Sync {
    /// Idempotently upsert a batch in a single transaction. Returns the
    /// number of records submitted (an upsert of an identical row is a
    /// data-level no-op but still counts as submitted). Either the whole
    /// batch commits or none of it does.
    async fn upsert_batch(&self, records: &[AnnouncementRecord]) -> Result<usize, IngestError>;

    /// Every stored record, ordered by `filing_time` descending with
    /// unknown filing times last, ties broken by insertion order.
    async fn fetch_all(&self) -> Result<Vec<AnnouncementRecord>, IngestError>;

    /// Total number of stored records.
    async fn count(&self) -> Result<i64, IngestError>;
}
