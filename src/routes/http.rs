// GET handlers: version, chart specs

use axum::{
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{TimeDelta, Utc};
use serde::Deserialize;

use super::AppState;
use crate::charts;
use crate::error::ChartError;

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

impl IntoResponse for ChartError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "chart request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

/// Builder output is already JSON text; pass it through untouched.
fn chart_response(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

pub(super) async fn os_pie_handler(State(state): State<AppState>) -> Result<Response, ChartError> {
    let body = charts::os_pie(&state.repo.latest_summary()).await?;
    Ok(chart_response(body))
}

pub(super) async fn music_fs_pie_handler(
    State(state): State<AppState>,
) -> Result<Response, ChartError> {
    let body = charts::music_fs_pie(&state.repo.latest_summary()).await?;
    Ok(chart_response(body))
}

pub(super) async fn data_fs_pie_handler(
    State(state): State<AppState>,
) -> Result<Response, ChartError> {
    let body = charts::data_fs_pie(&state.repo.latest_summary()).await?;
    Ok(chart_response(body))
}

pub(super) async fn player_type_pie_handler(
    State(state): State<AppState>,
) -> Result<Response, ChartError> {
    let body = charts::player_type_pie(&state.repo.latest_summary()).await?;
    Ok(chart_response(body))
}

#[derive(Debug, Deserialize)]
pub(super) struct HistoryParams {
    /// Days back from now; 0 means every stored summary.
    days: Option<u32>,
}

/// GET /charts/instances — instances over time; window defaults to charts.history_days.
pub(super) async fn instances_handler(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Response, ChartError> {
    let days = params.days.unwrap_or(state.config.charts.history_days);
    let cutoff = TimeDelta::try_days(i64::from(days))
        .filter(|_| days > 0)
        .and_then(|window| Utc::now().checked_sub_signed(window));
    let body = match cutoff {
        Some(cutoff) => charts::num_instance_line(&state.repo.summaries_since(cutoff)).await?,
        None => charts::num_instance_line(&state.repo.all_summaries()).await?,
    };
    Ok(chart_response(body))
}
