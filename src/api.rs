//! The two inbound endpoints: a liveness/next-run status line and a manual
//! trigger for the daily push. Both reply in plain text, matching what a
//! human poking the service with a browser expects to see.

use axum::{Router, extract::State, routing::get};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::app_state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(status))
        .route("/test_push", get(test_push))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Read-only liveness report with the next scheduled fire time.
async fn status(State(state): State<AppState>) -> String {
    let next_run = state.scheduler.next_run_time();
    format!("Server is running. Next push scheduled at: {next_run}")
}

/// Run the daily job synchronously on this request. Sub-fetch and delivery
/// failures are already absorbed inside the run, so the caller checks the
/// push channel (and the logs) for the actual outcome.
async fn test_push(State(state): State<AppState>) -> String {
    info!("manual push triggered over http");
    state.scheduler.trigger_now().await;
    "推送任务已执行，请检查推送结果".to_string()
}
