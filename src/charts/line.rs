// Instances-over-time line chart: one series per version plus an "all" series.

use tracing::instrument;

use super::calendar_date;
use crate::error::ChartError;
use crate::models::{
    AggregateOp, ChartSpec, FieldEncoding, FieldType, InlineData, LineChartSpec, LineEncoding,
    LineValue, Mark, Sort, SortOrder, Summary, TimeUnit, VEGA_LITE_SCHEMA,
};
use crate::summary_repo::{RowSource, SummaryRow};

const ALL_VERSIONS: &str = "all";
const HEIGHT: u32 = 500;
const WIDTH: u32 = 1000;

/// Number of server instances per day, by version, over every row `query` yields.
#[instrument(skip(query), fields(chart = "num_instance_line"))]
pub async fn num_instance_line<Q: RowSource + ?Sized>(query: &Q) -> Result<String, ChartError> {
    let rows = query.fetch_all().await?;
    let spec = line_spec(line_values(&rows)?);
    tracing::debug!(
        rows = rows.len(),
        values = spec.data.values.len(),
        "line chart built"
    );
    spec.to_json()
}

/// Leading `{}` placeholder, then per row: one point per version and one "all" point.
fn line_values(rows: &[SummaryRow]) -> Result<Vec<LineValue>, ChartError> {
    let mut values = vec![LineValue::default()];
    for row in rows {
        let d = calendar_date(&row.time)?;
        let bytes = row.data.as_deref().ok_or_else(|| ChartError::MissingPayload {
            time: row.time.clone(),
        })?;
        let summary = Summary::from_payload(bytes)?;

        values.extend(summary.versions.iter().map(|(version, &count)| LineValue {
            v: Some(version.clone()),
            n: Some(count),
            d: Some(d.clone()),
        }));
        values.push(LineValue {
            v: Some(ALL_VERSIONS.to_string()),
            n: summary.num_instances,
            d: Some(d),
        });
    }
    Ok(values)
}

fn line_spec(values: Vec<LineValue>) -> LineChartSpec {
    ChartSpec {
        schema: VEGA_LITE_SCHEMA,
        title: "Number of Instances Over Time",
        description: "Number of instances of the server over time, by version",
        data: InlineData { values },
        height: Some(HEIGHT),
        width: Some(WIDTH),
        mark: Mark::line_with_points(),
        encoding: LineEncoding {
            // Legend lists the version with the most instances first.
            color: FieldEncoding::new("v", FieldType::Nominal, "Version").sort(Sort::ByField {
                field: "n",
                op: Some(AggregateOp::Sum),
                order: SortOrder::Descending,
            }),
            x: FieldEncoding::new("d", FieldType::Temporal, "Date")
                .time_unit(TimeUnit::YearMonthDate),
            y: FieldEncoding::new("n", FieldType::Quantitative, "Number of Instances"),
        },
    }
}
