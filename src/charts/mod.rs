// Chart builders: stored summaries -> Vega-Lite JSON text.
// Pies read the single row a query yields; the instance line walks every row.

mod line;
mod pie;

pub use line::num_instance_line;
pub use pie::{data_fs_pie, music_fs_pie, os_pie, player_type_pie};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::ChartError;
use crate::models::Summary;
use crate::summary_repo::RowSource;

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Summary from the first row of `query`. No row, or a row whose payload is not a BLOB,
/// is the empty state: an empty Summary.
async fn latest_summary<Q: RowSource + ?Sized>(query: &Q) -> Result<Summary, ChartError> {
    let Some(row) = query.fetch_one().await? else {
        tracing::debug!("no summary row, rendering empty chart");
        return Ok(Summary::default());
    };
    match row.data {
        Some(bytes) => Summary::from_payload(&bytes),
        None => {
            tracing::debug!(time = %row.time, "summary row has no byte payload, rendering empty chart");
            Ok(Summary::default())
        }
    }
}

/// UTC calendar day of a stored time, as `YYYY-MM-DD`. Values without an offset are read as UTC.
pub fn calendar_date(time: &str) -> Result<String, ChartError> {
    let time = time.trim();
    let date = if let Ok(dt) = DateTime::parse_from_rfc3339(time) {
        dt.with_timezone(&Utc).date_naive()
    } else if let Some(dt) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(time, fmt).ok())
    {
        dt.date()
    } else {
        NaiveDate::parse_from_str(time, "%Y-%m-%d").map_err(|_| ChartError::InvalidTime {
            value: time.to_string(),
        })?
    };
    Ok(date.format("%Y-%m-%d").to_string())
}
