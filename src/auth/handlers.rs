use axum::{extract::State, Json};
use tracing::{info, instrument, warn};

use super::dto::{AuthResponse, LoginRequest, RegisterRequest};
use super::services;
use crate::error::ApiError;
use crate::state::AppState;

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let email = payload.email.clone();
    match services::register(&state.db, &state.config.password_salt, payload).await {
        Ok(resp) => {
            info!(email = %resp.email, "user registered");
            Ok(Json(resp))
        }
        Err(e) => {
            warn!(email = %email, error = %e, "registration failed");
            Err(e)
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let email = payload.email.clone();
    match services::login(&state.db, &state.config.password_salt, payload).await {
        Ok(resp) => {
            info!(email = %resp.email, "user logged in");
            Ok(Json(resp))
        }
        Err(e) => {
            warn!(email = %email, error = %e, "login failed");
            Err(e)
        }
    }
}
