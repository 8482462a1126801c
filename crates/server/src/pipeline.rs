//! One ingestion cycle: fetch from upstream, normalize, upsert.
//!
//! Per-record normalization problems degrade the record (field left
//! absent, logged) and never abort the batch; upstream or persistence
//! failures abort the whole cycle with nothing committed.

use tracing::{info, warn};

use filings_core::normalize::normalize;
use filings_core::{AnnouncementRecord, IngestError, RawAnnouncement};

use crate::state::AppState;

/// Normalize a raw batch. Records without a sequence identifier are
/// dropped here — they cannot satisfy the one-row-per-seq_id constraint.
pub fn normalize_batch(raw: Vec<RawAnnouncement>, classify: bool) -> Vec<AnnouncementRecord> {
    raw.into_iter()
        .filter_map(|item| {
            let symbol = item.symbol.clone();
            let had_date = item.an_dt.is_some();
            match normalize(item, classify) {
                Some(record) => {
                    if had_date && record.filing_time.is_none() {
                        warn!(symbol = %record.symbol, seq_id = %record.seq_id,
                              "unparseable filing date — storing without timestamp");
                    }
                    Some(record)
                }
                None => {
                    warn!(symbol = %symbol, "record without seq_id — skipped");
                    None
                }
            }
        })
        .collect()
}

/// Run one full fetch → normalize → upsert cycle. Returns the number of
/// records submitted to the store.
pub async fn run_cycle(state: &AppState) -> Result<usize, IngestError> {
    let raw = state.feed.fetch_latest().await?;
    let fetched = raw.len();

    let records = normalize_batch(raw, state.classify);
    let inserted = state.store.upsert_batch(&records).await?;

    info!(fetched, inserted, "ingestion cycle complete");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use filings_core::Bucket;

    use super::*;

    fn raw(seq_id: Option<&str>, desc: &str, an_dt: Option<&str>) -> RawAnnouncement {
        RawAnnouncement {
            seq_id: seq_id.map(Into::into),
            symbol: "ABC".into(),
            sm_name: "ABC Ltd".into(),
            desc: desc.into(),
            an_dt: an_dt.map(Into::into),
            ..Default::default()
        }
    }

    #[test]
    fn bad_date_degrades_only_that_record() {
        let batch = vec![
            raw(Some("1"), "Q1 Results", Some("01-Jan-2025 10:00:00")),
            raw(Some("2"), "Press Release", Some("not-a-date")),
            raw(Some("3"), "Credit Rating", Some("02-Jan-2025 09:30:00")),
        ];
        let records = normalize_batch(batch, true);
        assert_eq!(records.len(), 3);
        assert!(records[0].filing_time.is_some());
        assert!(records[1].filing_time.is_none());
        assert!(records[2].filing_time.is_some());
    }

    #[test]
    fn records_without_seq_id_are_dropped() {
        let batch = vec![
            raw(None, "Q1 Results", None),
            raw(Some("9"), "Acquisition of XYZ", None),
        ];
        let records = normalize_batch(batch, true);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].seq_id, "9");
        assert_eq!(records[0].bucket, Some(Bucket::Acquisition));
    }

    #[test]
    fn classify_flag_controls_bucket_presence() {
        let records = normalize_batch(vec![raw(Some("1"), "Q1 Results", None)], false);
        assert!(records[0].bucket.is_none());
    }
}
