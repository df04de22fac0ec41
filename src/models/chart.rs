// Vega-Lite chart document. Field order here is the key order on the wire.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::error::ChartError;

pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// Top-level chart document: inline values `V`, an encoding block `E`.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec<V, E> {
    #[serde(rename = "$schema")]
    pub schema: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub data: InlineData<V>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    pub mark: Mark,
    pub encoding: E,
}

impl<V: Serialize, E: Serialize> ChartSpec<V, E> {
    pub fn to_json(&self) -> Result<String, ChartError> {
        serde_json::to_string(self).map_err(ChartError::Serialize)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineData<V> {
    pub values: Vec<V>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkType {
    Arc,
    Line,
}

#[derive(Debug, Clone, Serialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub kind: MarkType,
    pub tooltip: bool,
    /// Draw a point at every line vertex (line marks only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point: Option<bool>,
}

impl Mark {
    pub fn arc() -> Self {
        Self {
            kind: MarkType::Arc,
            tooltip: true,
            point: None,
        }
    }

    pub fn line_with_points() -> Self {
        Self {
            kind: MarkType::Line,
            tooltip: true,
            point: Some(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Quantitative,
    Nominal,
    Temporal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stack {
    Normalize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    YearMonthDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateOp {
    Sum,
}

/// `"descending"` or `{ "field": .., "op": .., "order": .. }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Sort {
    Order(SortOrder),
    ByField {
        field: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        op: Option<AggregateOp>,
        order: SortOrder,
    },
}

/// One encoding channel bound to a data field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldEncoding {
    pub field: &'static str,
    #[serde(rename = "type")]
    pub kind: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<Stack>,
    #[serde(rename = "timeUnit", skip_serializing_if = "Option::is_none")]
    pub time_unit: Option<TimeUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Sort>,
    pub title: &'static str,
}

impl FieldEncoding {
    pub fn new(field: &'static str, kind: FieldType, title: &'static str) -> Self {
        Self {
            field,
            kind,
            stack: None,
            time_unit: None,
            sort: None,
            title,
        }
    }

    pub fn stack(mut self, stack: Stack) -> Self {
        self.stack = Some(stack);
        self
    }

    pub fn time_unit(mut self, unit: TimeUnit) -> Self {
        self.time_unit = Some(unit);
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }
}

/// Donut chart channels: slice angle, slice color, stacking order.
#[derive(Debug, Clone, Serialize)]
pub struct PieEncoding {
    pub theta: FieldEncoding,
    pub color: FieldEncoding,
    pub order: FieldEncoding,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineEncoding {
    pub color: FieldEncoding,
    pub x: FieldEncoding,
    pub y: FieldEncoding,
}

/// Pie slice record, serialized as `{ <dimension>: label, "c": count }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieValue {
    pub dimension: &'static str,
    pub label: String,
    pub c: u64,
}

impl Serialize for PieValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.dimension, &self.label)?;
        map.serialize_entry("c", &self.c)?;
        map.end()
    }
}

/// Time-series point: version `v`, instance count `n`, day `d`.
/// All fields are optional; `LineValue::default()` serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LineValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
}

pub type PieChartSpec = ChartSpec<PieValue, PieEncoding>;
pub type LineChartSpec = ChartSpec<LineValue, LineEncoding>;
