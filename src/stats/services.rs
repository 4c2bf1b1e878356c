use anyhow::Context;
use sqlx::SqlitePool;

use super::dto::SaveStatsRequest;
use super::repo;
use crate::auth;
use crate::error::ApiError;

/// The stored row, or `{}` when the user has never saved. "Never played" is
/// not an error.
pub async fn fetch(db: &SqlitePool, user_id: &str) -> Result<serde_json::Value, ApiError> {
    match repo::fetch(db, user_id).await? {
        Some(row) => Ok(serde_json::to_value(row).map_err(anyhow::Error::from)?),
        None => Ok(serde_json::json!({})),
    }
}

/// Upsert in one transaction: make sure the user row exists (guests save
/// before they ever register), then overwrite the stats row.
pub async fn save(db: &SqlitePool, req: SaveStatsRequest) -> Result<(), ApiError> {
    let distribution = serde_json::to_string(&req.distribution).map_err(anyhow::Error::from)?;

    let mut tx = db.begin().await.context("begin stats save")?;
    auth::repo::ensure_tx(&mut tx, &req.user_id).await?;
    repo::upsert_tx(&mut tx, &req, &distribution).await?;
    tx.commit().await.context("commit stats save")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_pool;

    fn payload(user_id: &str, played: i64) -> SaveStatsRequest {
        SaveStatsRequest {
            user_id: user_id.into(),
            played,
            wins: played - 1,
            current_streak: 2,
            max_streak: 4,
            distribution: serde_json::json!({"0": 0, "3": 1, "5": played - 1}),
            last_played_date: "2024-06-02".into(),
        }
    }

    #[tokio::test]
    async fn save_creates_user_and_row() {
        let db = memory_pool().await;

        save(&db, payload("guest-1", 3)).await.unwrap();

        let (hash,): (String,) = sqlx::query_as("SELECT password_hash FROM users WHERE email = ?")
            .bind("guest-1")
            .fetch_one(&db)
            .await
            .unwrap();
        assert_eq!(hash, "", "implicitly created users have no password");

        let row = fetch(&db, "guest-1").await.unwrap();
        assert_eq!(row["played"], 3);
        assert_eq!(row["wins"], 2);
        assert_eq!(row["last_played_date"], "2024-06-02");
        // Distribution round-trips as the stored JSON string.
        let dist: serde_json::Value =
            serde_json::from_str(row["distribution"].as_str().unwrap()).unwrap();
        assert_eq!(dist["5"], 2);
    }

    #[tokio::test]
    async fn save_is_idempotent_and_overwrites() {
        let db = memory_pool().await;

        save(&db, payload("u@example.com", 5)).await.unwrap();
        save(&db, payload("u@example.com", 5)).await.unwrap();
        let first = fetch(&db, "u@example.com").await.unwrap();

        save(&db, payload("u@example.com", 6)).await.unwrap();
        let second = fetch(&db, "u@example.com").await.unwrap();

        assert_eq!(first["played"], 5);
        assert_eq!(second["played"], 6);
        assert_eq!(second["wins"], 5);

        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM user_stats WHERE user_id = ?")
                .bind("u@example.com")
                .fetch_one(&db)
                .await
                .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn unknown_user_fetches_an_empty_object() {
        let db = memory_pool().await;
        let row = fetch(&db, "nobody").await.unwrap();
        assert_eq!(row, serde_json::json!({}));
    }
}
