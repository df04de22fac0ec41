// Domain models: stored summaries and the chart documents built from them

mod chart;
mod summary;

pub use chart::{
    AggregateOp, ChartSpec, FieldEncoding, FieldType, InlineData, LineChartSpec, LineEncoding,
    LineValue, Mark, MarkType, PieChartSpec, PieEncoding, PieValue, Sort, SortOrder, Stack,
    TimeUnit, VEGA_LITE_SCHEMA,
};
pub use summary::{Counts, Summary};
