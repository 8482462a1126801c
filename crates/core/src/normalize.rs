//! Pure normalization: provider date strings to fixed-offset timestamps,
//! and free-text descriptions to bucket labels.
//!
//! Both functions are total over their inputs — a value that cannot be
//! normalized yields an absent field, never an error. One bad record
//! must not abort an ingestion cycle.

use chrono::{DateTime, FixedOffset, NaiveDateTime};

use crate::announcement::{ist, AnnouncementRecord, Bucket, RawAnnouncement};

/// Parse the provider's `DD-Mon-YYYY HH:MM:SS` date string into a
/// timestamp pinned at UTC+05:30.
///
/// Returns `None` for empty input or an unrecognized month abbreviation;
/// callers treat that as "filing time unknown".
pub fn parse_filing_time(raw: &str) -> Option<DateTime<FixedOffset>> {
    if raw.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(raw, "%d-%b-%Y %H:%M:%S")
        .ok()?
        .and_local_timezone(ist())
        .single()
}

/// Keyword table in declared priority order — the first matching bucket
/// wins, so "Press Release: Q3 results" classifies as `Results`.
const CLASSIFY_RULES: &[(Bucket, &[&str])] = &[
    (Bucket::Results, &["financial results", "results"]),
    (Bucket::OrderWin, &["order", "contract"]),
    (Bucket::BoardMeeting, &["board meeting"]),
    (Bucket::PressRelease, &["press release"]),
    (Bucket::InvestorPresentation, &["investor presentation"]),
    (Bucket::Acquisition, &["acquisition"]),
    (Bucket::CreditRating, &["credit rating"]),
];

impl Bucket {
    /// Best-effort heuristic classification of a free-text description.
    /// Deterministic and total; ambiguous text may misclassify.
    pub fn classify(text: &str) -> Bucket {
        let lower = text.to_lowercase();
        for (bucket, keywords) in CLASSIFY_RULES {
            if keywords.iter().any(|k| lower.contains(k)) {
                return *bucket;
            }
        }
        Bucket::Other
    }
}

/// Convert a raw upstream record into canonical shape.
///
/// Returns `None` when the record carries no sequence identifier — such
/// a record cannot satisfy the one-row-per-seq_id invariant and is
/// skipped by the pipeline (logged there). A missing or unparseable
/// date is a per-field skip, not a reason to drop the record.
pub fn normalize(raw: RawAnnouncement, classify: bool) -> Option<AnnouncementRecord> {
    let seq_id = raw.seq_id?;
    let filing_time = raw.an_dt.as_deref().and_then(parse_filing_time);
    let bucket = classify.then(|| Bucket::classify(&raw.desc));

    Some(AnnouncementRecord {
        seq_id,
        symbol: raw.symbol,
        company_name: raw.sm_name,
        description: raw.desc,
        announcement_text: raw.attachment_text,
        attachment_url: raw.attachment_file,
        filing_time,
        bucket,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provider_date_to_ist() {
        let dt = parse_filing_time("15-Feb-2026 14:09:17").unwrap();
        assert_eq!(dt.to_rfc3339(), "2026-02-15T14:09:17+05:30");
    }

    #[test]
    fn zero_pads_single_digit_months() {
        let dt = parse_filing_time("01-Jan-2025 10:00:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-01-01T10:00:00+05:30");
    }

    #[test]
    fn unknown_month_is_none_not_panic() {
        assert!(parse_filing_time("15-Xyz-2026 14:09:17").is_none());
        assert!(parse_filing_time("").is_none());
        assert!(parse_filing_time("not a date").is_none());
    }

    #[test]
    fn serializes_with_ist_offset() {
        let dt = parse_filing_time("15-Feb-2026 14:09:17").unwrap();
        let json = serde_json::to_string(&dt).unwrap();
        assert_eq!(json, "\"2026-02-15T14:09:17+05:30\"");
    }

    #[test]
    fn classification_priority_order_wins() {
        // Contains both "results" and "order" — Results is checked first.
        assert_eq!(
            Bucket::classify("Financial Results and new order book"),
            Bucket::Results
        );
        assert_eq!(Bucket::classify("Press Release: Q3 results"), Bucket::Results);
    }

    #[test]
    fn classification_single_keywords() {
        assert_eq!(Bucket::classify("New contract signed"), Bucket::OrderWin);
        assert_eq!(Bucket::classify("Outcome of Board Meeting"), Bucket::BoardMeeting);
        assert_eq!(Bucket::classify("Press Release"), Bucket::PressRelease);
        assert_eq!(
            Bucket::classify("Investor Presentation FY26"),
            Bucket::InvestorPresentation
        );
        assert_eq!(Bucket::classify("Acquisition of XYZ Pvt Ltd"), Bucket::Acquisition);
        assert_eq!(Bucket::classify("Credit Rating update"), Bucket::CreditRating);
    }

    #[test]
    fn classification_is_case_insensitive_and_total() {
        assert_eq!(Bucket::classify("CREDIT RATING revision"), Bucket::CreditRating);
        assert_eq!(Bucket::classify("Change in registered office"), Bucket::Other);
        assert_eq!(Bucket::classify(""), Bucket::Other);
    }

    #[test]
    fn normalize_requires_seq_id() {
        let raw = RawAnnouncement {
            symbol: "ABC".into(),
            desc: "Q1 Results".into(),
            ..Default::default()
        };
        assert!(normalize(raw, true).is_none());
    }

    #[test]
    fn normalize_keeps_record_with_bad_date() {
        let raw = RawAnnouncement {
            seq_id: Some("42".into()),
            symbol: "ABC".into(),
            sm_name: "ABC Ltd".into(),
            desc: "Q1 Results".into(),
            an_dt: Some("garbage".into()),
            ..Default::default()
        };
        let record = normalize(raw, true).unwrap();
        assert_eq!(record.seq_id, "42");
        assert!(record.filing_time.is_none());
        assert_eq!(record.bucket, Some(Bucket::Results));
    }

    #[test]
    fn normalize_without_classification_leaves_bucket_absent() {
        let raw = RawAnnouncement {
            seq_id: Some("7".into()),
            desc: "Q1 Results".into(),
            ..Default::default()
        };
        let record = normalize(raw, false).unwrap();
        assert!(record.bucket.is_none());
    }

    #[test]
    fn raw_record_accepts_numeric_and_string_seq_id() {
        let numeric: RawAnnouncement =
            serde_json::from_str(r#"{"seq_id": 12345, "symbol": "ABC"}"#).unwrap();
        assert_eq!(numeric.seq_id.as_deref(), Some("12345"));

        let string: RawAnnouncement =
            serde_json::from_str(r#"{"seq_id": "12345", "symbol": "ABC"}"#).unwrap();
        assert_eq!(string.seq_id.as_deref(), Some("12345"));

        let missing: RawAnnouncement = serde_json::from_str(r#"{"symbol": "ABC"}"#).unwrap();
        assert!(missing.seq_id.is_none());
    }

    #[test]
    fn raw_record_maps_provider_field_names() {
        let raw: RawAnnouncement = serde_json::from_str(
            r#"{
                "seq_id": 1,
                "symbol": "ABC",
                "sm_name": "ABC Ltd",
                "desc": "Q1 Results",
                "attchmntText": "Unaudited financial results for Q1",
                "attchmntFile": "https://example.com/q1.pdf",
                "an_dt": "01-Jan-2025 10:00:00"
            }"#,
        )
        .unwrap();
        let record = normalize(raw, true).unwrap();
        assert_eq!(record.company_name, "ABC Ltd");
        assert_eq!(record.announcement_text, "Unaudited financial results for Q1");
        assert_eq!(record.attachment_url.as_deref(), Some("https://example.com/q1.pdf"));
        assert_eq!(
            record.filing_time.unwrap().to_rfc3339(),
            "2025-01-01T10:00:00+05:30"
        );
    }
}
