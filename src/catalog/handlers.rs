use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use serde::Deserialize;
use tracing::{instrument, warn};

use super::repo::{self, Reveal};
use super::services;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

/// GET /api/image?id= — fetch the origin image server-side and stream it
/// back so clients never see the source URL.
#[instrument(skip(state))]
pub async fn proxy_image(
    State(state): State<AppState>,
    Query(q): Query<IdQuery>,
) -> Result<Response, (StatusCode, String)> {
    let id = q
        .id
        .ok_or_else(|| ApiError::Validation("Missing ID".into()).plain())?;

    let url = repo::origin_url(&state.db, &id)
        .await
        .map_err(|e| ApiError::Store(e).plain())?
        .ok_or_else(|| ApiError::NotFound("Not found".into()).plain())?;

    // No timeout here: a hanging origin hangs this request. Known gap kept
    // for parity with observed behavior.
    let upstream = state
        .http
        .get(&url)
        .header(header::USER_AGENT, state.config.proxy_user_agent.as_str())
        .send()
        .await
        .map_err(|e| {
            warn!(error = %e, id = %id, "origin fetch failed");
            ApiError::Upstream("Failed to fetch image".into()).plain()
        })?;

    if !upstream.status().is_success() {
        warn!(status = %upstream.status(), id = %id, "origin answered non-success");
        return Err(ApiError::Upstream("Failed to fetch image".into()).plain());
    }

    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("image/jpeg")
        .to_string();

    Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CACHE_CONTROL, "public, max-age=86400")
        .body(Body::from_stream(upstream.bytes_stream()))
        .map_err(|e| ApiError::Upstream(e.to_string()).plain())
}

/// GET /api/reveal?id= — ground-truth label and explanation, only asked for
/// after the player has committed a guess.
#[instrument(skip(state))]
pub async fn reveal(
    State(state): State<AppState>,
    Query(q): Query<IdQuery>,
) -> Result<Json<Reveal>, (StatusCode, String)> {
    let id = q
        .id
        .ok_or_else(|| ApiError::Validation("Missing ID".into()).plain())?;
    let row = services::reveal(&state.db, &id)
        .await
        .map_err(ApiError::plain)?;
    Ok(Json(row))
}
