use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use filings_core::announcement::ist;
use filings_core::config::PostgresConfig;
use filings_core::{AnnouncementRecord, Bucket, IngestError};

use crate::AnnouncementStore;

/// PostgreSQL-backed announcement store. Owns its connection pool; the
/// host constructs it once at startup and injects it into app state.
pub struct PgAnnouncementStore {
    pool: PgPool,
}

impl PgAnnouncementStore {
    /// Connect and apply embedded migrations.
    pub async fn connect(config: &PostgresConfig) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.connection_string())
            .await?;
        info!("PostgreSQL connected: {}", config.host);

        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Database migrations applied");

        Ok(Self { pool })
    }

    /// Wrap an existing pool (tests, alternate lifecycles).
    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    fn persistence(e: sqlx::Error) -> IngestError {
        IngestError::Persistence(e.to_string())
    }
}

/// Row shape as stored; `filing_time` comes back in UTC and is shifted
/// to +05:30 on the way out so the canonical offset invariant holds on
/// the read path too.
#[derive(sqlx::FromRow)]
struct AnnouncementRow {
    seq_id: String,
    symbol: String,
    company_name: String,
    description: String,
    announcement_text: String,
    attachment_url: Option<String>,
    filing_time: Option<DateTime<Utc>>,
    bucket: Option<String>,
}

impl From<AnnouncementRow> for AnnouncementRecord {
    fn from(row: AnnouncementRow) -> Self {
        Self {
            seq_id: row.seq_id,
            symbol: row.symbol,
            company_name: row.company_name,
            description: row.description,
            announcement_text: row.announcement_text,
            attachment_url: row.attachment_url,
            filing_time: row.filing_time.map(|t| t.with_timezone(&ist())),
            bucket: row.bucket.as_deref().map(Bucket::from_label),
        }
    }
}

#[async_trait]
impl AnnouncementStore for PgAnnouncementStore {
    async fn upsert_batch(&self, records: &[AnnouncementRecord]) -> Result<usize, IngestError> {
        let mut tx = self.pool.begin().await.map_err(Self::persistence)?;

        for record in records {
            sqlx::query(
                "INSERT INTO announcements
                     (seq_id, symbol, company_name, description, announcement_text,
                      attachment_url, filing_time, bucket)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                 ON CONFLICT (seq_id) DO UPDATE SET
                     symbol = EXCLUDED.symbol,
                     company_name = EXCLUDED.company_name,
                     description = EXCLUDED.description,
                     announcement_text = EXCLUDED.announcement_text,
                     attachment_url = EXCLUDED.attachment_url,
                     filing_time = EXCLUDED.filing_time,
                     bucket = EXCLUDED.bucket,
                     updated_at = now()",
            )
            .bind(&record.seq_id)
            .bind(&record.symbol)
            .bind(&record.company_name)
            .bind(&record.description)
            .bind(&record.announcement_text)
            .bind(&record.attachment_url)
            .bind(record.filing_time)
            .bind(record.bucket.map(|b| b.as_str()))
            .execute(&mut *tx)
            .await
            .map_err(Self::persistence)?;
        }

        tx.commit().await.map_err(Self::persistence)?;
        Ok(records.len())
    }

    async fn fetch_all(&self) -> Result<Vec<AnnouncementRecord>, IngestError> {
        let rows = sqlx::query_as::<_, AnnouncementRow>(
            "SELECT seq_id, symbol, company_name, description, announcement_text,
                    attachment_url, filing_time, bucket
             FROM announcements
             ORDER BY filing_time DESC NULLS LAST, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Self::persistence)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<i64, IngestError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM announcements")
            .fetch_one(&self.pool)
            .await
            .map_err(Self::persistence)
    }
}
