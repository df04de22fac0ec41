// Donut charts over one Counts mapping of the latest summary.

use tracing::instrument;

use super::latest_summary;
use crate::error::ChartError;
use crate::models::{
    ChartSpec, Counts, FieldEncoding, FieldType, InlineData, Mark, PieChartSpec, PieEncoding,
    PieValue, Sort, SortOrder, Stack, Summary, VEGA_LITE_SCHEMA,
};
use crate::summary_repo::RowSource;

/// Static description of one pie chart.
struct PieChart {
    title: &'static str,
    description: &'static str,
    /// Data field holding the slice label (`os`, `fs`, `pt`).
    dimension: &'static str,
    legend_title: &'static str,
    counts: fn(&Summary) -> &Counts,
    label: fn(&str, u64) -> String,
}

const OS: PieChart = PieChart {
    title: "Operating Systems",
    description: "Distribution of operating systems used by clients",
    dimension: "os",
    legend_title: "Operating System",
    counts: os_counts,
    label: plain_label,
};

const MUSIC_FS: PieChart = PieChart {
    title: "Music File Systems",
    description: "Distribution of file systems used for music files",
    dimension: "fs",
    legend_title: "File System (music)",
    counts: music_fs_counts,
    label: plain_label,
};

const DATA_FS: PieChart = PieChart {
    title: "Data File Systems",
    description: "Distribution of file systems used for data files",
    dimension: "fs",
    legend_title: "File System (data)",
    counts: data_fs_counts,
    label: plain_label,
};

const PLAYER_TYPES: PieChart = PieChart {
    title: "Player Types",
    description: "Distribution of clients used",
    dimension: "pt",
    legend_title: "Client",
    counts: player_type_counts,
    label: counted_label,
};

fn os_counts(s: &Summary) -> &Counts {
    &s.os
}

fn music_fs_counts(s: &Summary) -> &Counts {
    &s.music_fs
}

fn data_fs_counts(s: &Summary) -> &Counts {
    &s.data_fs
}

fn player_type_counts(s: &Summary) -> &Counts {
    &s.player_types
}

fn plain_label(name: &str, _count: u64) -> String {
    name.to_string()
}

/// Legend label carrying its own count, e.g. `"Bassline: 7"`.
fn counted_label(name: &str, count: u64) -> String {
    format!("{}: {}", name, count)
}

impl PieChart {
    fn spec(&self, summary: &Summary) -> PieChartSpec {
        let values = (self.counts)(summary)
            .iter()
            .map(|(name, &count)| PieValue {
                dimension: self.dimension,
                label: (self.label)(name, count),
                c: count,
            })
            .collect();

        ChartSpec {
            schema: VEGA_LITE_SCHEMA,
            title: self.title,
            description: self.description,
            data: InlineData { values },
            height: None,
            width: None,
            mark: Mark::arc(),
            encoding: PieEncoding {
                theta: FieldEncoding::new("c", FieldType::Quantitative, "Percentage")
                    .stack(Stack::Normalize),
                color: FieldEncoding::new(self.dimension, FieldType::Nominal, self.legend_title)
                    .sort(Sort::ByField {
                        field: "c",
                        op: None,
                        order: SortOrder::Descending,
                    }),
                order: FieldEncoding::new("c", FieldType::Quantitative, "Count")
                    .sort(Sort::Order(SortOrder::Descending)),
            },
        }
    }

    async fn render<Q: RowSource + ?Sized>(&self, query: &Q) -> Result<String, ChartError> {
        let summary = latest_summary(query).await?;
        let spec = self.spec(&summary);
        tracing::debug!(values = spec.data.values.len(), "pie chart built");
        spec.to_json()
    }
}

/// Client operating systems in the latest summary.
#[instrument(skip(query), fields(chart = "os_pie"))]
pub async fn os_pie<Q: RowSource + ?Sized>(query: &Q) -> Result<String, ChartError> {
    OS.render(query).await
}

#[instrument(skip(query), fields(chart = "music_fs_pie"))]
pub async fn music_fs_pie<Q: RowSource + ?Sized>(query: &Q) -> Result<String, ChartError> {
    MUSIC_FS.render(query).await
}

#[instrument(skip(query), fields(chart = "data_fs_pie"))]
pub async fn data_fs_pie<Q: RowSource + ?Sized>(query: &Q) -> Result<String, ChartError> {
    DATA_FS.render(query).await
}

/// Player/client types; slice labels read `"<name>: <count>"`.
#[instrument(skip(query), fields(chart = "player_type_pie"))]
pub async fn player_type_pie<Q: RowSource + ?Sized>(query: &Q) -> Result<String, ChartError> {
    PLAYER_TYPES.render(query).await
}
