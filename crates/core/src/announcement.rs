//! Domain model: raw upstream records and the canonical announcement shape.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

/// Offset of Indian Standard Time (UTC+05:30), the exchange's wall clock.
/// Filing timestamps are always expressed in this offset.
pub fn ist() -> FixedOffset {
    FixedOffset::east_opt(5 * 3600 + 30 * 60).expect("IST offset is in range")
}

// ── Raw upstream record ──────────────────────────────────────────

/// One element of the upstream feed's JSON array, with the provider's
/// field names. Every field is tolerant of absence so a sparse record
/// never aborts decoding of the whole batch; what is *required* for
/// storage (the sequence id) is enforced in `normalize`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAnnouncement {
    /// Provider-assigned sequence identifier. Emitted as either a JSON
    /// number or a string depending on feed revision; normalized to text.
    #[serde(default, deserialize_with = "seq_id_as_string")]
    pub seq_id: Option<String>,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub sm_name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default, rename = "attchmntText")]
    pub attachment_text: String,
    #[serde(default, rename = "attchmntFile")]
    pub attachment_file: Option<String>,
    /// Provider date string, `DD-Mon-YYYY HH:MM:SS`.
    #[serde(default)]
    pub an_dt: Option<String>,
}

/// Accept `seq_id` as either a JSON number or a string.
fn seq_id_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

// ── Canonical record ─────────────────────────────────────────────

/// One filed disclosure in canonical shape. Exactly one row is stored
/// per `seq_id`; re-ingesting the same id replaces all non-key fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnouncementRecord {
    pub seq_id: String,
    pub symbol: String,
    pub company_name: String,
    pub description: String,
    pub announcement_text: String,
    pub attachment_url: Option<String>,
    /// Always at UTC+05:30 when present; `None` when the provider date
    /// string was missing or unparseable.
    pub filing_time: Option<DateTime<FixedOffset>>,
    /// Present only when the normalizer is configured to classify.
    pub bucket: Option<Bucket>,
}

// ── Bucket taxonomy ──────────────────────────────────────────────

/// Fixed classification taxonomy, in priority order. Classification
/// tests keywords in this order and the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bucket {
    Results,
    #[serde(rename = "Order Win")]
    OrderWin,
    #[serde(rename = "Board Meeting")]
    BoardMeeting,
    #[serde(rename = "Press Release")]
    PressRelease,
    #[serde(rename = "Investor Presentation")]
    InvestorPresentation,
    Acquisition,
    #[serde(rename = "Credit Rating")]
    CreditRating,
    Other,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Results => "Results",
            Self::OrderWin => "Order Win",
            Self::BoardMeeting => "Board Meeting",
            Self::PressRelease => "Press Release",
            Self::InvestorPresentation => "Investor Presentation",
            Self::Acquisition => "Acquisition",
            Self::CreditRating => "Credit Rating",
            Self::Other => "Other",
        }
    }

    /// Inverse of `as_str`, for rows read back from storage.
    /// Unrecognized labels (from a future taxonomy revision) map to `Other`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Results" => Self::Results,
            "Order Win" => Self::OrderWin,
            "Board Meeting" => Self::BoardMeeting,
            "Press Release" => Self::PressRelease,
            "Investor Presentation" => Self::InvestorPresentation,
            "Acquisition" => Self::Acquisition,
            "Credit Rating" => Self::CreditRating,
            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
