use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, instrument};

use super::dto::SaveStatsRequest;
use super::services;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

#[instrument(skip(state))]
pub async fn get_stats(
    State(state): State<AppState>,
    Query(q): Query<UserIdQuery>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let user_id = q
        .user_id
        .ok_or_else(|| ApiError::Validation("Missing User ID".into()).plain())?;
    let row = services::fetch(&state.db, &user_id)
        .await
        .map_err(ApiError::plain)?;
    Ok(Json(row))
}

#[instrument(skip(state, payload))]
pub async fn save_stats(
    State(state): State<AppState>,
    Json(payload): Json<SaveStatsRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let user_id = payload.user_id.clone();
    services::save(&state.db, payload).await.map_err(|e| {
        error!(user_id = %user_id, error = %e, "saving stats failed");
        e.plain()
    })?;
    Ok(Json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_state;
    use time::macros::datetime;

    #[tokio::test]
    async fn get_stats_requires_a_user_id() {
        let state = test_state(datetime!(2024-01-01 00:00 UTC)).await;
        let err = get_stats(State(state), Query(UserIdQuery { user_id: None }))
            .await
            .unwrap_err();
        assert_eq!(err, (StatusCode::BAD_REQUEST, "Missing User ID".to_string()));
    }

    #[tokio::test]
    async fn save_then_read_through_the_handlers() {
        let state = test_state(datetime!(2024-01-01 00:00 UTC)).await;

        let payload = SaveStatsRequest {
            user_id: "guest-9".into(),
            played: 1,
            wins: 1,
            current_streak: 1,
            max_streak: 1,
            distribution: serde_json::json!({"5": 1}),
            last_played_date: "2024-06-02".into(),
        };
        let Json(resp) = save_stats(State(state.clone()), Json(payload)).await.unwrap();
        assert_eq!(resp, json!({ "success": true }));

        let Json(row) = get_stats(
            State(state),
            Query(UserIdQuery {
                user_id: Some("guest-9".into()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(row["played"], 1);
        assert_eq!(row["wins"], 1);
    }
}
