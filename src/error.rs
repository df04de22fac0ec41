use thiserror::Error;

/// Failures while reading summaries or building a chart from them.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("summary store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("summary payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("summary payload is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("row time is not a recognised date/time: {value:?}")]
    InvalidTime { value: String },

    #[error("row at {time} has no byte payload")]
    MissingPayload { time: String },

    #[error("chart serialization error: {0}")]
    Serialize(#[source] serde_json::Error),
}
