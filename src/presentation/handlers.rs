// HTTP request handlers
use crate::application::chart_presenter::RenderOutcome;
use crate::application::mount::ViewportSize;
use crate::domain::mount_target::MountTarget;
use crate::infrastructure::page_mount::MountSnapshot;
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
pub struct RenderResponse {
    pub outcomes: Vec<RenderOutcome>,
    pub charts: Vec<MountSnapshot>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current content of every mount on the page
pub async fn list_charts(State(state): State<Arc<AppState>>) -> Json<Vec<MountSnapshot>> {
    Json(state.page.snapshot())
}

pub async fn get_chart(
    Path(target): Path<String>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let snapshot = target
        .parse::<MountTarget>()
        .ok()
        .and_then(|t| state.page.snapshot_of(t));

    match snapshot {
        Some(snapshot) => Json(snapshot).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            format!("no mount '{}' on this page", target),
        )
            .into_response(),
    }
}

/// Re-run every renderer against the page's mounts
pub async fn render_charts(State(state): State<Arc<AppState>>) -> Json<RenderResponse> {
    let outcomes = state.presenter.render_all(&state.page.registry()).await;
    Json(RenderResponse {
        outcomes,
        charts: state.page.snapshot(),
    })
}

pub async fn resize_viewport(
    State(state): State<Arc<AppState>>,
    Json(size): Json<ViewportSize>,
) -> StatusCode {
    tracing::debug!(
        "Viewport resized to {}x{}, {} charts listening",
        size.width,
        size.height,
        state.presenter.resize_registry().listener_count()
    );
    if state.resize_events.send(size).is_err() {
        tracing::warn!(
            "No resize listener running, dropping {}x{}",
            size.width,
            size.height
        );
    }
    StatusCode::ACCEPTED
}
