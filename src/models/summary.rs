// Usage summary as stored in the `summary.data` BLOB (UTF-8 JSON).

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::error::ChartError;

/// Name -> observation count. Ordered so chart output is deterministic.
/// Counts must be non-negative JSON integers; a float, negative or `null` count fails to decode.
pub type Counts = BTreeMap<String, u64>;

/// One pre-aggregated usage snapshot. Every mapping may be absent or `null` in the stored JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    #[serde(default, deserialize_with = "nullable_counts", skip_serializing_if = "Counts::is_empty")]
    pub os: Counts,
    #[serde(
        rename = "musicFS",
        default,
        deserialize_with = "nullable_counts",
        skip_serializing_if = "Counts::is_empty"
    )]
    pub music_fs: Counts,
    #[serde(
        rename = "dataFS",
        default,
        deserialize_with = "nullable_counts",
        skip_serializing_if = "Counts::is_empty"
    )]
    pub data_fs: Counts,
    #[serde(default, deserialize_with = "nullable_counts", skip_serializing_if = "Counts::is_empty")]
    pub player_types: Counts,
    #[serde(default, deserialize_with = "nullable_counts", skip_serializing_if = "Counts::is_empty")]
    pub versions: Counts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_instances: Option<u64>,
}

impl Summary {
    /// Parse a stored payload. Bytes must be UTF-8 JSON.
    pub fn from_payload(bytes: &[u8]) -> Result<Self, ChartError> {
        let text = std::str::from_utf8(bytes)?;
        serde_json::from_str(text).map_err(ChartError::Decode)
    }
}

fn nullable_counts<'de, D>(deserializer: D) -> Result<Counts, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Counts>::deserialize(deserializer)?.unwrap_or_default())
}
