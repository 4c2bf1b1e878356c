use serde::Serialize;
use sqlx::SqlitePool;
use time::OffsetDateTime;

use super::repo::{self, Reveal};
use super::rotation;
use crate::error::ApiError;

/// What clients learn about a daily image before reveal: the id and a
/// same-origin proxy path. The origin URL stays server-side.
#[derive(Debug, Clone, Serialize)]
pub struct DailyImage {
    pub id: i64,
    pub url: String,
}

pub async fn daily_images(
    db: &SqlitePool,
    now: OffsetDateTime,
) -> Result<Vec<DailyImage>, ApiError> {
    let total = repo::count(db).await?;
    let Some(offset) = rotation::daily_offset(now, total) else {
        return Ok(Vec::new());
    };
    let rows = repo::window(db, rotation::DAILY_LIMIT, offset).await?;
    Ok(rows
        .into_iter()
        .map(|img| DailyImage {
            id: img.id,
            url: format!("/api/image?id={}", img.id),
        })
        .collect())
}

pub async fn reveal(db: &SqlitePool, id: &str) -> Result<Reveal, ApiError> {
    repo::reveal(db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Not found".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{memory_pool, seed_images};
    use time::macros::datetime;

    #[tokio::test]
    async fn daily_window_advances_and_wraps() {
        let db = memory_pool().await;
        seed_images(&db, 12).await;

        let day0 = daily_images(&db, datetime!(2024-01-01 09:00 UTC))
            .await
            .unwrap();
        let day1 = daily_images(&db, datetime!(2024-01-02 09:00 UTC))
            .await
            .unwrap();
        let day2 = daily_images(&db, datetime!(2024-01-03 09:00 UTC))
            .await
            .unwrap();

        let ids = |v: &[DailyImage]| v.iter().map(|i| i.id).collect::<Vec<_>>();
        assert_eq!(ids(&day0), vec![1, 2, 3, 4, 5]);
        assert_eq!(ids(&day1), vec![6, 7, 8, 9, 10]);
        assert_eq!(ids(&day2), ids(&day0));
    }

    #[tokio::test]
    async fn urls_point_at_the_proxy_only() {
        let db = memory_pool().await;
        seed_images(&db, 5).await;

        let day = daily_images(&db, datetime!(2024-02-10 12:00 UTC))
            .await
            .unwrap();
        assert_eq!(day.len(), 5);
        for img in &day {
            assert_eq!(img.url, format!("/api/image?id={}", img.id));
        }
    }

    #[tokio::test]
    async fn small_catalog_selects_nothing() {
        let db = memory_pool().await;
        seed_images(&db, 4).await;

        let day = daily_images(&db, datetime!(2024-01-01 09:00 UTC))
            .await
            .unwrap();
        assert!(day.is_empty());
    }

    #[tokio::test]
    async fn reveal_returns_ground_truth() {
        let db = memory_pool().await;
        seed_images(&db, 2).await;

        let first = reveal(&db, "1").await.unwrap();
        assert_eq!(first.kind, "Real");
        assert_eq!(first.explanation, "explanation 0");

        let missing = reveal(&db, "99").await.unwrap_err();
        assert!(matches!(missing, ApiError::NotFound(_)));
    }
}
