// SQLite summary store. One row per captured Summary; `data` holds the Summary as UTF-8 JSON.

mod query;

pub use query::{RowSource, SummaryQuery, SummaryRow};

use crate::models::Summary;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use tracing::instrument;

// Times are compared through julianday(), which reads naive, `Z` and `+HH:MM` forms as one UTC
// instant. Rows whose time it cannot read are never returned by `since`, and sort last in `latest`.
const LATEST_SQL: &str =
    "SELECT time, data FROM summary ORDER BY julianday(time) DESC, id DESC LIMIT 1";
const SINCE_SQL: &str = "SELECT time, data FROM summary WHERE julianday(time) >= julianday($1)
     ORDER BY julianday(time) ASC, id ASC";
const ALL_SQL: &str = "SELECT time, data FROM summary ORDER BY julianday(time) ASC, id ASC";

/// Stored form of a capture time written by `save_summary`.
pub fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub struct SummaryRepo {
    pool: SqlitePool,
}

impl SummaryRepo {
    /// Connect to SQLite at `path`, create parent dir and DB if missing, enable WAL + pragmas.
    pub async fn connect(path: &str, max_pool_size: u32) -> anyhow::Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_pool_size)
            .connect_with(opts)
            .await?;
        Ok(Self { pool })
    }

    pub async fn init(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS summary (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                time TEXT NOT NULL,
                data BLOB
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_summary_time ON summary(time)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    #[instrument(skip(self, summary), fields(repo = "summary", operation = "save_summary"))]
    pub async fn save_summary(&self, time: DateTime<Utc>, summary: &Summary) -> anyhow::Result<()> {
        let data = serde_json::to_vec(summary)?;
        sqlx::query("INSERT INTO summary (time, data) VALUES ($1, $2)")
            .bind(format_time(time))
            .bind(&data)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Most recent summary (at most one row).
    pub fn latest_summary(&self) -> SummaryQuery<'_> {
        SummaryQuery::new(&self.pool, LATEST_SQL)
    }

    /// Summaries captured at or after `cutoff`, oldest first.
    pub fn summaries_since(&self, cutoff: DateTime<Utc>) -> SummaryQuery<'_> {
        SummaryQuery::new(&self.pool, SINCE_SQL).bind(format_time(cutoff))
    }

    /// Every stored summary, oldest first.
    pub fn all_summaries(&self) -> SummaryQuery<'_> {
        SummaryQuery::new(&self.pool, ALL_SQL)
    }

    #[instrument(skip(self), fields(repo = "summary", operation = "count"))]
    pub async fn count(&self) -> anyhow::Result<i64> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM summary")
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }
}
