/// Request handlers
/// Each request samples the host independently; nothing is shared between requests

use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::view::DashboardView;
use super::AppState;
use crate::core::{MetricsError, MetricsSnapshot};
use crate::utils::DASHBOARD_PATH;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn error(msg: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg),
        }
    }
}

// ============================================================================
// Dashboard Handlers
// ============================================================================

/// `GET /` always redirects; no sampling
pub async fn index() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, DASHBOARD_PATH)]).into_response()
}

pub async fn dashboard(State(state): State<AppState>) -> Response {
    match state.sampler.sample_async().await {
        Ok(snapshot) => {
            let html = DashboardView::from_snapshot(&snapshot, state.refresh_secs).render();
            let mut response = Html(html).into_response();
            response
                .headers_mut()
                .insert(HeaderName::from_static("refresh"), HeaderValue::from(state.refresh_secs));
            response
        }
        Err(err) => {
            tracing::error!(error = %err, "dashboard sampling failed");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {}", err)).into_response()
        }
    }
}

// ============================================================================
// JSON API Handlers
// ============================================================================

pub async fn get_snapshot(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<MetricsSnapshot>>, (StatusCode, Json<ApiResponse<MetricsSnapshot>>)> {
    state
        .sampler
        .sample_async()
        .await
        .map(|snapshot| Json(ApiResponse::ok(snapshot)))
        .map_err(|err: MetricsError| {
            tracing::error!(error = %err, "snapshot sampling failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(err.to_string())),
            )
        })
}

pub async fn health_check() -> Json<ApiResponse<String>> {
    Json(ApiResponse::ok("healthy".to_string()))
}
