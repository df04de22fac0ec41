// Prepared queries over the summary table, and the row-source seam the chart builders read from.

use futures_util::TryStreamExt;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqlitePool, SqliteRow};
use sqlx::{Row, TypeInfo, ValueRef};
use std::future::Future;

use crate::error::ChartError;

/// One stored summary row. `data` is `None` unless the column holds a BLOB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub time: String,
    pub data: Option<Vec<u8>>,
}

impl SummaryRow {
    pub fn new(time: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            time: time.into(),
            data: Some(data.into()),
        }
    }

    fn from_sqlite(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        let time: String = row.try_get("time")?;
        let is_blob = {
            let raw = row.try_get_raw("data")?;
            !raw.is_null() && raw.type_info().name() == "BLOB"
        };
        let data = if is_blob {
            Some(row.try_get::<Vec<u8>, _>("data")?)
        } else {
            None
        };
        Ok(Self { time, data })
    }
}

/// An already-bound query yielding summary rows. Builders borrow it and never finalize it.
pub trait RowSource: Sync {
    /// First row, if any.
    fn fetch_one(&self) -> impl Future<Output = Result<Option<SummaryRow>, ChartError>> + Send;

    /// Every row, in query order.
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<SummaryRow>, ChartError>> + Send;
}

impl RowSource for [SummaryRow] {
    async fn fetch_one(&self) -> Result<Option<SummaryRow>, ChartError> {
        Ok(self.first().cloned())
    }

    async fn fetch_all(&self) -> Result<Vec<SummaryRow>, ChartError> {
        Ok(self.to_vec())
    }
}

/// SQL text plus bound text parameters, run against a borrowed pool.
#[derive(Debug, Clone)]
pub struct SummaryQuery<'a> {
    pool: &'a SqlitePool,
    sql: &'static str,
    params: Vec<String>,
}

impl<'a> SummaryQuery<'a> {
    pub(super) fn new(pool: &'a SqlitePool, sql: &'static str) -> Self {
        Self {
            pool,
            sql,
            params: Vec::new(),
        }
    }

    pub(super) fn bind(mut self, value: impl Into<String>) -> Self {
        self.params.push(value.into());
        self
    }

    fn query(&self) -> Query<'_, Sqlite, SqliteArguments<'_>> {
        let mut q = sqlx::query(self.sql);
        for p in &self.params {
            q = q.bind(p.as_str());
        }
        q
    }
}

impl RowSource for SummaryQuery<'_> {
    async fn fetch_one(&self) -> Result<Option<SummaryRow>, ChartError> {
        let row = self.query().fetch_optional(self.pool).await?;
        Ok(row.as_ref().map(SummaryRow::from_sqlite).transpose()?)
    }

    async fn fetch_all(&self) -> Result<Vec<SummaryRow>, ChartError> {
        let mut rows = self.query().fetch(self.pool);
        let mut out = Vec::new();
        while let Some(row) = rows.try_next().await? {
            out.push(SummaryRow::from_sqlite(&row)?);
        }
        Ok(out)
    }
}
