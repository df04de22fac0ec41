// HTTP routes: chart specs as JSON, plus version

mod http;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::summary_repo::SummaryRepo;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) repo: Arc<SummaryRepo>,
    pub(crate) config: AppConfig,
}

pub fn app(repo: Arc<SummaryRepo>, config: AppConfig) -> Router {
    let state = AppState { repo, config };
    Router::new()
        .route("/", get(|| async { "Hello from insights-charts!" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/charts/os", get(http::os_pie_handler)) // GET /charts/os
        .route("/charts/music-fs", get(http::music_fs_pie_handler)) // GET /charts/music-fs
        .route("/charts/data-fs", get(http::data_fs_pie_handler)) // GET /charts/data-fs
        .route("/charts/player-types", get(http::player_type_pie_handler)) // GET /charts/player-types
        .route("/charts/instances", get(http::instances_handler)) // GET /charts/instances?days=N
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
