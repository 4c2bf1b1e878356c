use anyhow::Context;
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, FromRow)]
pub struct ImageRow {
    pub id: i64,
    pub url: Option<String>,
}

/// Ground truth for one catalog entry, withheld until reveal.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Reveal {
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub explanation: String,
}

pub async fn count(db: &SqlitePool) -> anyhow::Result<i64> {
    let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM images")
        .fetch_one(db)
        .await
        .context("count images")?;
    Ok(total)
}

/// A contiguous window of the catalog in stable id order.
pub async fn window(db: &SqlitePool, limit: i64, offset: i64) -> anyhow::Result<Vec<ImageRow>> {
    let rows = sqlx::query_as::<_, ImageRow>(
        r#"
        SELECT id, url
          FROM images
         ORDER BY id ASC
         LIMIT ? OFFSET ?
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
    .context("select daily window")?;
    Ok(rows)
}

/// Origin URL for an image id; `None` when the id is unknown or the row
/// carries no origin URL.
pub async fn origin_url(db: &SqlitePool, id: &str) -> anyhow::Result<Option<String>> {
    let row: Option<(Option<String>,)> = sqlx::query_as("SELECT url FROM images WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await
        .context("select image url")?;
    Ok(row.and_then(|(url,)| url).filter(|u| !u.is_empty()))
}

pub async fn reveal(db: &SqlitePool, id: &str) -> anyhow::Result<Option<Reveal>> {
    let row = sqlx::query_as::<_, Reveal>("SELECT type, explanation FROM images WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await
        .context("select reveal")?;
    Ok(row)
}
