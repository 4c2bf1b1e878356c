use anyhow::Context;
use serde::Serialize;
use sqlx::{FromRow, Sqlite, SqlitePool, Transaction};

use super::dto::SaveStatsRequest;

/// Stored stats row. Serialized column-for-column for GET responses;
/// `distribution` stays the raw JSON string it was stored as.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserStats {
    pub user_id: String,
    pub played: i64,
    pub wins: i64,
    pub current_streak: i64,
    pub max_streak: i64,
    pub distribution: String,
    pub last_played_date: String,
}

pub async fn fetch(db: &SqlitePool, user_id: &str) -> anyhow::Result<Option<UserStats>> {
    let row = sqlx::query_as::<_, UserStats>(
        r#"
        SELECT user_id, played, wins, current_streak, max_streak,
               distribution, last_played_date
          FROM user_stats
         WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
    .context("fetch user stats")?;
    Ok(row)
}

/// Insert-or-update keyed on user_id, overwriting every mutable field with
/// the caller-supplied values.
pub async fn upsert_tx(
    tx: &mut Transaction<'_, Sqlite>,
    req: &SaveStatsRequest,
    distribution: &str,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO user_stats
            (user_id, played, wins, current_streak, max_streak, distribution, last_played_date)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (user_id) DO UPDATE SET
            played = excluded.played,
            wins = excluded.wins,
            current_streak = excluded.current_streak,
            max_streak = excluded.max_streak,
            distribution = excluded.distribution,
            last_played_date = excluded.last_played_date
        "#,
    )
    .bind(&req.user_id)
    .bind(req.played)
    .bind(req.wins)
    .bind(req.current_streak)
    .bind(req.max_streak)
    .bind(distribution)
    .bind(&req.last_played_date)
    .execute(&mut **tx)
    .await
    .context("upsert user stats")?;
    Ok(())
}

pub async fn exists_tx(tx: &mut Transaction<'_, Sqlite>, user_id: &str) -> anyhow::Result<bool> {
    let row: Option<(String,)> =
        sqlx::query_as("SELECT user_id FROM user_stats WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&mut **tx)
            .await
            .context("check stats exist")?;
    Ok(row.is_some())
}

/// Re-key a guest's stats row to its freshly registered email.
pub async fn rekey_tx(
    tx: &mut Transaction<'_, Sqlite>,
    new_user_id: &str,
    old_user_id: &str,
) -> anyhow::Result<()> {
    sqlx::query("UPDATE user_stats SET user_id = ? WHERE user_id = ?")
        .bind(new_user_id)
        .bind(old_user_id)
        .execute(&mut **tx)
        .await
        .context("rekey user stats")?;
    Ok(())
}

pub async fn delete_tx(tx: &mut Transaction<'_, Sqlite>, user_id: &str) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM user_stats WHERE user_id = ?")
        .bind(user_id)
        .execute(&mut **tx)
        .await
        .context("delete user stats")?;
    Ok(())
}
