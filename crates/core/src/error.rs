use thiserror::Error;

/// Failures that abort an ingestion cycle.
///
/// A record whose date or classification cannot be derived is NOT an
/// error — the field is simply left absent (see `normalize`). These
/// variants cover the fatal cases only, and each maps to an HTTP
/// status so the API layer never conflates "no data" with "error".
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("unexpected upstream payload shape: {0}")]
    UpstreamShape(String),

    #[error("persistence failed: {0}")]
    Persistence(String),
}

impl IngestError {
    /// Map to an HTTP status code for API responses.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::UpstreamUnavailable(_) | Self::UpstreamShape(_) => 502,
            Self::Persistence(_) => 500,
        }
    }
}
