use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse},
};
use tracing::{error, instrument};

use crate::catalog::services;
use crate::error::ApiError;
use crate::state::AppState;

const PAGE_TEMPLATE: &str = include_str!("../assets/index.html");

/// GET /ads.txt — authorized digital seller record for ad verification.
pub async fn ads_txt(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain")],
        state.config.ads_txt.clone(),
    )
}

/// Fallback handler: the game page with today's image list spliced in. The
/// page only ever sees ids and proxy paths. The caller identity comes from
/// an upstream trusted proxy header; without one the viewer is anonymous.
#[instrument(skip(state, headers))]
pub async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Html<String>, (StatusCode, String)> {
    let viewer = headers
        .get(state.config.identity_header.as_str())
        .and_then(|v| v.to_str().ok())
        .unwrap_or("anonymous");

    let images = services::daily_images(&state.db, state.clock.now())
        .await
        .map_err(|e| {
            error!(error = %e, "daily selection failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error connecting to database: {e}"),
            )
        })?;

    let payload = serde_json::to_string(&images).map_err(|e| ApiError::Store(e.into()).plain())?;

    let page = PAGE_TEMPLATE
        .replace("__DAILY_IMAGES__", &payload)
        .replace("__VIEWER__", &viewer.replace('<', "&lt;"));
    Ok(Html(page))
}
